//! Hand-gesture drawing on top of a live video feed.
//!
//! The library holds everything except the process entry point: landmark
//! classification, the drawing state machine, canvas rasterization and
//! history, persistence, configuration and the session loop with its
//! replay sources.

pub mod capture;
pub mod config;
pub mod draw;
pub mod gesture;
pub mod input;
pub mod session;
pub mod util;

pub use config::Config;
