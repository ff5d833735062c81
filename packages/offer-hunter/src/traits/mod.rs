//! Trait seams between the mission and its external services.
//!
//! The browser, the language model and the remote table are each behind a
//! trait so the pipeline can run against mocks.

pub mod fetcher;
pub mod model;
pub mod store;
