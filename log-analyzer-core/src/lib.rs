#![doc = "log-analyzer-core: core pipeline library for log-analyzer."]

//! This crate contains the decoding, fan-out/fan-in processing and reporting
//! logic for log-analyzer. It has no CLI or process-level concerns: callers hand
//! it a configuration and a [`contract::LogReader`] and get a typed outcome back.
//!
//! # Usage
//! Call [`analyse::analyse`] for a whole run, or use the individual stages
//! ([`decode`], [`discover`], [`process`], [`report`]) directly.

pub mod analyse;
pub mod config;
pub mod contract;
pub mod decode;
pub mod discover;
pub mod process;
pub mod report;
