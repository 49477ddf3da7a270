//! Command implementations for the docpost CLI.
//!
//! Each command module runs one operation from `docpost-core`, then renders
//! its report according to the requested output format.

pub mod add_js;
pub mod class2id;
pub mod class_name;
pub mod common;
pub mod completions;
pub mod config;
pub mod post_process;
