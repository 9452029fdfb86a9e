//! Payment page openers.

mod logging_opener;
mod system_opener;

pub use logging_opener::LoggingPaymentOpener;
pub use system_opener::{OpenError, SystemPaymentOpener};
