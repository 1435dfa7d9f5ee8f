//! Application services for the directory.

mod administration;
mod membership;

pub(crate) use administration::directory_repository_kind;
pub use administration::{
    DirectoryService, DirectoryServiceError, DirectoryServiceResult, EditProfileRequest,
    RegisterEmployeeRequest,
};
pub use membership::{MembershipError, MembershipResolver};
