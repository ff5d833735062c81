//! The offer pipeline: chunk, prompt, extract, sink, mission.

pub mod chunk;
pub mod extract;
pub mod mission;
pub mod prompts;
pub mod sink;

pub use chunk::TextSplitter;
pub use extract::{extract_json_array, parse_offer_reply, ExtractionReport, OfferExtractor};
pub use mission::{Mission, MissionReport, TargetOutcome, TargetReport};
pub use prompts::format_offer_prompt;
pub use sink::{filter_storable, OfferSink, SinkReport};
