//! Business logic use cases
//!
//! [WizardOrchestrator] ──SubmitRequest──▶ SubmitLogoRequest ──▶ upload ×2 ──▶ record
//!         │
//!         └──OpenPaymentRedirect──▶ PaymentRedirectPort
//!
//! [SentinelObservation] ──visible──▶ GalleryLoader::request_more ──▶ GalleryFeedPort

pub mod gallery;
pub mod submit_logo_request;
pub mod wizard;

pub use gallery::{
    GalleryLoadError, GalleryLoader, LoadOutcome, SentinelObservation, SkipReason,
    VisibilityEntry,
};
pub use submit_logo_request::{SubmitLogoRequest, SubmitLogoRequestError};
pub use wizard::WizardOrchestrator;
