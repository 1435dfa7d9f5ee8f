//! Tasks and milestones.
//!
//! Both kinds share one approval/completion lifecycle. Completion and review
//! move independently: completing never requires approval, and rejecting
//! clears any approval without touching completion. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the state machine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
