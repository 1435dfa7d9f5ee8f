//! Workboard: departments, employees and the task/milestone approval
//! workflow.
//!
//! The crate is the authorization-gated core of a project dashboard. Every
//! operation takes an explicit [`access::RequestContext`], checks the caller
//! against the permission table, reads or writes through a repository port
//! and reports its outcome through the [`action`] result envelope.
//!
//! # Architecture
//!
//! Workboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration of context, permission checks and storage
//!
//! # Modules
//!
//! - [`directory`]: Employees, departments and effective-department resolution
//! - [`workflow`]: Task and milestone completion and review
//! - [`access`]: Request context and the permission table
//! - [`action`]: Result envelope and error taxonomy
//! - [`config`]: Layered configuration
//! - [`database`]: `PostgreSQL` connection pooling
//! - [`telemetry`]: Structured logging setup

pub mod access;
pub mod action;
pub mod config;
pub mod database;
pub mod directory;
pub mod telemetry;
pub mod workflow;
