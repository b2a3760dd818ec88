//! Typed arguments for the external programs driven by the setup sequence.

pub mod packages;
pub mod service;
pub mod status;
