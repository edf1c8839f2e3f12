//! Aggregator Core - Streaming daily AOV pipeline
//!
//! Fans a stream of validated orders out to one running-mean task per
//! calendar date and joins every per-date mean back into a single mapping
//! once the input is exhausted.
//!
//! # Architecture
//!
//! ```text
//! CsvOrderSource → Order (normalizer)
//!     ↓
//! AggregationRouter (fan-out: one accumulator task per date, lazily spawned)
//!     ↓                                ↓
//! mpsc per date ──────────────→ running-mean task
//!     ↓ finish()                       ↓ oneshot
//! ResultMapping (fan-in join over every task)
//!     ↓
//! render_report (sorted by date)
//! ```

pub mod accumulator;
pub mod normalizer;
pub mod reader;
pub mod report;
pub mod router;

pub use accumulator::{AccumulatorHandle, RunningMean};
pub use normalizer::{Order, ParseError};
pub use reader::CsvOrderSource;
pub use report::render_report;
pub use router::{AggregationRouter, ResultMapping};
