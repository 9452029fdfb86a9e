//! # lm-core
//!
//! Core domain models and business logic for LogoMagic Pro.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod asset;
pub mod config;
pub mod gallery;
pub mod ids;
pub mod modal;
pub mod ports;
pub mod submission;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use asset::{AssetKind, BinaryAsset};
pub use config::AppConfig;
pub use gallery::{GalleryState, ItemRef, PageRequest};
pub use ids::RecordId;
pub use modal::{ModalPhase, Point, Rect};
pub use submission::{AssetUrl, LogoRequestRecord, Submission, SubmissionOutcome};
pub use wizard::{
    ValidationError, WizardAction, WizardEvent, WizardState, WizardStateMachine, WizardStep,
};
