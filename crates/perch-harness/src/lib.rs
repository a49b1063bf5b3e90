#![forbid(unsafe_code)]

//! Test harness for Perch.
//!
//! Provides [`MockHost`], an in-memory implementation of the host-framework
//! contract with a call journal, so placement and lifecycle behavior can be
//! asserted deterministically.

pub mod mock_host;

pub use mock_host::{HostCall, MockHost};
