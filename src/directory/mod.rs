//! Employee and department directory.
//!
//! Employees (actors) hold a closed role, a power level, an optional direct
//! department membership and an explicit active/deactivated lifecycle.
//! Departments hold at most one head. The module follows hexagonal
//! architecture:
//!
//! - Domain types and the effective-department resolver in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
