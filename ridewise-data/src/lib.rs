//! HTTP collaborators for the Ridewise engine.
//!
//! The crate implements the network-facing seams the core engine defines or
//! the routing layer consumes:
//!
//! - [`themeparks`]: the park data provider (children / live / schedule
//!   feeds) behind [`ridewise_core::ParkDataProvider`];
//! - [`weather`]: the NWS two-step forecast lookup;
//! - [`summary`]: natural-language summary generation with a static,
//!   never-failing fallback;
//! - [`test_support`]: deterministic stubs for all of the above.
//!
//! All clients are synchronous at the trait boundary and bridge to async
//! `reqwest` calls over an internally owned Tokio runtime, so the core and
//! the CLI stay free of async plumbing.

#![forbid(unsafe_code)]

mod runtime;
pub mod summary;
pub mod test_support;
pub mod themeparks;
pub mod weather;

pub use summary::{
    OpenAiSummarizer, OpenAiSummarizerConfig, SummaryBuildError, SummaryContext, SummaryError,
    Summarizer, fallback_summary, summarize_or_fallback,
};
pub use themeparks::{HttpParkDataProvider, HttpParkDataProviderConfig, ProviderBuildError};
pub use weather::{
    NwsWeatherProvider, NwsWeatherProviderConfig, WeatherError, WeatherProvider, WeatherReport,
};
