//! docpost CLI library.
//!
//! Exposes the command implementations and formatters used by the `docpost`
//! binary so they can be tested without spawning a process.

#![allow(clippy::missing_errors_doc)]

pub mod actions;
pub mod commands;
pub mod formatters;

pub use actions::ConfigAction;
