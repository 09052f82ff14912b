//! The aggregation pipeline.
//!
//! Takes cleaned, canonicalized case and vaccination rows and produces the
//! derived summary tables a dashboard consumes: per-region totals, a
//! date-wise series with daily differences and rolling averages, a
//! per-state pivot of latest cumulative values, and vaccination rollups.

pub mod builder;
pub mod date;
pub mod pivot;
pub mod region;
pub mod types;
pub mod utility;
pub mod vaccination;
