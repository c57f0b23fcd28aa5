//! Table-scoped repositories. Each is a stateless unit struct whose methods
//! take the pool explicitly.

mod issue_repo;
mod user_repo;

pub use issue_repo::IssueRepo;
pub use user_repo::UserRepo;
