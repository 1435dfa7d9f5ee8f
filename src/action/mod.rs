//! Result envelope and error taxonomy shared by every operation.

mod envelope;
mod error;

pub use envelope::{ActionResponse, respond};
pub use error::{ActionFailure, ErrorKind};
