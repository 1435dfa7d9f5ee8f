//! Session context and the role-based permission table.

mod error;
mod policy;
mod session;

pub use error::AccessError;
pub use policy::{AccessFacts, Operation, ensure_permitted, permits};
pub use session::{RequestContext, Session};
