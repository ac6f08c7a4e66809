//! Ranking pipeline
//!
//! Stage traits, the runner that threads the graph through each stage, the
//! observer hooks, and the JSON rank spec with its validation engine.

pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;
