//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Line-ending normalisation and splitting
//! - Line classification and key/value extraction
//! - Whole-buffer parsing (duplicates, partition, idempotence)
//! - Record storage and syntax helpers

#[cfg(test)]
mod parser_tests;
