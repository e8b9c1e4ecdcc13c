//! Result aggregation: normalise, filter, dedup, merge.
//!
//! Raw payloads become [`crate::types::SiteRecord`]s in [`normalize`],
//! are filtered per batch by [`exclusion`], merged across batches and
//! finalised in [`pipeline`]. The two batch sources, [`collect`] and
//! [`replay`], feed the same pipeline.

pub mod collect;
pub mod dedup;
pub mod exclusion;
pub mod normalize;
pub mod pipeline;
pub mod replay;
pub mod source;
