//! Host runtime for LogoMagic Pro.
//!
//! Boots tracing and configuration, wires the infra adapters into the use
//! cases, and exposes a JSON command surface plus event stream to a host
//! shell.

pub mod bootstrap;
pub mod commands;
pub mod events;
