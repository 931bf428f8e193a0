//! Client helpers for MyCoRe repository servers.
//!
//! - [`jwt`]: short-lived access tokens
//! - [`orcid`]: ORCID OAuth, user and work endpoints
//! - [`i18n`]: cached UI translations backed by a pluggable [`cache`]
//!
//! Network calls are single-shot: there is no retry and no timeout beyond
//! what the caller configures on its `reqwest::Client`.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod i18n;
pub mod jwt;
pub mod orcid;
pub mod url_builder;

pub use error::{ApiError, ApiResult};
