//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `lm-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or runtime layer?**
//!
//! If all three answers are **yes**, place it in `lm-core/ports`.
//! Otherwise, place it in the relevant `domain` submodule.

mod asset_upload;
mod gallery_event_port;
mod gallery_feed;
pub mod observability;
mod payment_redirect;
mod record_store;
mod wizard_event_port;

#[cfg(test)]
mod tests;

pub use asset_upload::AssetUploadPort;
pub use gallery_event_port::GalleryEventPort;
pub use gallery_feed::GalleryFeedPort;
pub use payment_redirect::PaymentRedirectPort;
pub use record_store::RecordStorePort;
pub use wizard_event_port::WizardEventPort;
