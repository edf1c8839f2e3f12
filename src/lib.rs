//! aovflow - Daily AOV (average order value) streaming aggregation
//!
//! Consumes an order stream and produces the mean order value per calendar
//! date, one concurrently running accumulator per distinct date.

pub mod aggregator_core;
pub mod config;
