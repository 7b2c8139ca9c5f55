//! Shared test utilities for git-alias integration tests
//!
//! Tests run the real binary against temporary git repositories.

pub mod assertions;
pub mod fixtures;
pub mod repository;
