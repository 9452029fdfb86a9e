mod filesystem_asset_store;

pub use filesystem_asset_store::FilesystemAssetStore;
