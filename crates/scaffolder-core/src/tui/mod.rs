//! Charm-style progress output using cliclack
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod spinner;

#[cfg(feature = "tui")]
pub use spinner::SpinnerProgress;
