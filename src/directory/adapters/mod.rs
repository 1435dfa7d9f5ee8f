//! Adapter implementations for directory ports.

pub mod memory;
pub mod postgres;
