//! Test support utilities for panekit layout integration tests
//!
//! - tree: headless element builders and tracing setup
//! - assertions: geometry assertions with tolerance

#![allow(dead_code)]

mod assertions;
mod tree;

pub use assertions::*;
pub use tree::*;
