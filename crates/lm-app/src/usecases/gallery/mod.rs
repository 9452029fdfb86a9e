//! Inspiration gallery use cases.
//!
//! 画廊加载：挂载时加载首批，哨兵可见时追加下一批。

mod loader;
mod sentinel;

pub use loader::{GalleryLoadError, GalleryLoader, LoadOutcome, SkipReason};
pub use sentinel::{SentinelObservation, VisibilityEntry};
