//! Shiplog GitHub - REST API change source
//!
//! Implements the [`shiplog_core::ChangeSource`] port against the GitHub
//! REST API: compare ranges with pull-request resolution, plus release and
//! tag listings. All HTTP details (status mapping, rate-limit headers,
//! authentication) live here; the pipeline never sees them.

pub mod client;
pub mod wire;

pub use client::GithubSource;
