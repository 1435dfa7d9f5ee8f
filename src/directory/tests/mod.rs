//! Unit tests for the directory module.
//!
//! Domain tests cover value validation, the actor lifecycle and the
//! effective-department resolver; service tests exercise administration
//! against the in-memory adapter.
