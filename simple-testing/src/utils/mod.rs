//! # Utilities Module
//!
//! Internal utility modules for the simple-testing crate.

pub(crate) mod diagnostics;

pub use diagnostics::setup_diagnostics;
