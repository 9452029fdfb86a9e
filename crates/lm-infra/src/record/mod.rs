mod json_file_record_store;

pub use json_file_record_store::{JsonFileRecordStore, StoredRecord};
