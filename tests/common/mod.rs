#![allow(dead_code)]

pub mod fixtures;

use dockey::{DockeyError, KeyAssigner, KeyGeneratorBuilder};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Routes `log` output through the test harness; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build an assigner for `expression` with the default delimiters
pub fn assigner(expression: &str) -> Result<KeyAssigner, DockeyError> {
    KeyGeneratorBuilder::new().with_expression(expression).build()
}
