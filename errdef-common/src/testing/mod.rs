//! Test helpers shared by errdef crates.

pub mod log;

pub use log::init_test_logging;
