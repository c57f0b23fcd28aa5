//! Domain logic for the issue tracker.
//!
//! This crate has no internal dependencies so the same rules can be used by
//! the API server, the repository layer, and any future CLI tooling.
//!
//! - [`issue`] -- issue field value sets, defaults, and validators.
//! - [`forms`] -- per-field form validation, input sanitization, and the
//!   touched-state form model.
//! - [`filter`] -- the pure issue list filter.

pub mod error;
pub mod filter;
pub mod forms;
pub mod issue;
pub mod types;
