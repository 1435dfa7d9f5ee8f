//! Unit tests for the workflow module.
//!
//! Domain tests drive the completion and review state machine directly;
//! service tests cover the permission table, check ordering and failure
//! classification.
