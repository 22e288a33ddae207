//! Provider configuration and per-call outcomes.
//!
//! - [`spec::ProviderSpec`] : static per-provider settings (timeout, retries, backoff)
//! - [`kind::ProviderKind`] : which backend family serves a provider
//! - [`error::ProviderError`] : the closed error taxonomy every adapter maps into
//! - [`response::RawResponse`] : the result of dispatching to one provider
//! - [`endpoint`] : connection settings for the HTTP backends

pub mod endpoint;
pub mod error;
pub mod kind;
pub mod response;
pub mod spec;

pub use endpoint::{EndpointConfig, EndpointSettings};
pub use error::{ProviderError, ProviderErrorKind};
pub use kind::ProviderKind;
pub use response::{ProviderFailure, RawResponse};
pub use spec::{BackoffPolicy, ProviderSpec};
