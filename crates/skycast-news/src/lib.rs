//! Category-filtered news headlines for Skycast.
//!
//! [`NewsClient`] runs an ordered chain of [`NewsSource`] tiers: the keyed
//! provider (when an API key is configured), the keyless provider, and a
//! built-in sample set. The chain as a whole never fails and never returns
//! an empty list.

pub mod client;
pub mod free;
pub mod keyed;
pub mod sample;
pub mod source;
pub mod types;

pub use client::NewsClient;
pub use free::FreeNewsSource;
pub use keyed::KeyedNewsSource;
pub use sample::SampleNewsSource;
pub use source::NewsSource;
pub use types::{NewsArticle, NewsError};
