//! Core abstractions
//!
//! Provider client interface with its concrete backends, and the optional
//! collaborator traits injected into the monitoring orchestrator.

pub mod collaborators;
pub mod providers;
