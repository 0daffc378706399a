//! Canvas persistence for handscriber.
//!
//! This module provides:
//! - The [`PersistenceSink`] boundary invoked on each thumbs-up save
//! - A PNG file sink with chrono-templated filenames

pub mod file;
pub mod sink;
pub mod types;

pub use file::FileSaveConfig;
pub use sink::{FileSink, PersistenceSink};
pub use types::{CaptureError, SaveOutcome};
