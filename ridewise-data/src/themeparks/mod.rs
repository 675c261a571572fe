//! Client for the themeparks.wiki park data API.
//!
//! [`api`] holds the wire-format documents; [`HttpParkDataProvider`]
//! implements the engine's [`ridewise_core::ParkDataProvider`] seam over
//! them.

pub mod api;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpParkDataProvider, HttpParkDataProviderConfig,
    ProviderBuildError,
};
