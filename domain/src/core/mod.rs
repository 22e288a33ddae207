//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::Prompt`] : the immutable query dispatched to every provider
//! - [`error::DomainError`] : domain-level errors

pub mod error;
pub mod prompt;
pub mod string;
