//! Data types shared across the fetch, extract and sink stages.

pub mod config;
pub mod offer;
pub mod page;
