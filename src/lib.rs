//! Floodgate - Per-Key Sliding-Window Rate Limiting
//!
//! This crate implements an embeddable, in-process rate limiter. Each
//! logical key carries an independent budget of timestamped requests; a
//! check prunes the timestamps that have slid out of the window, decides
//! admit or deny, and reports the remaining quota along with a retry hint.
//! A background sweeper evicts keys that have gone idle so memory stays
//! bounded under high key cardinality.

pub mod config;
pub mod error;
pub mod ratelimit;
