//! Wizard domain module.
//!
//! This module defines the logo submission wizard state machine types.

pub mod state_machine;

pub use state_machine::{
    ValidationError, WizardAction, WizardEvent, WizardState, WizardStateMachine, WizardStep,
};
