//! Modal sequencing domain.
//!
//! The confirmation/collection/redirect chain overlaying the wizard, plus the
//! geometry used to decide whether a pointer press dismisses it.

mod dismiss;
mod phase;

pub use dismiss::{OutsideInteraction, Point, Rect};
pub use phase::ModalPhase;
