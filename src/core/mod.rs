//! Core processing engine for SwapX.
//!
//! This module contains the subsystems that make up the batch replacement
//! pipeline, leaves first:
//!
//! - `rules` for rule validation, the literal matcher, and the persisted
//!   rule document
//! - `processor` for applying an ordered rule set to one content value
//! - `discovery` for recursive file enumeration with filters
//! - `io` for size-aware reads/writes with binary sniffing and atomic
//!   replacement
//! - `batch` for the concurrent executor, its lifecycle control, and the
//!   event stream
//! - `preview` for the read-only impact report
//!
//! Data flows root-to-summary: discovery produces file descriptors, the
//! batch executor pipes each one through read → process → write, and the
//! aggregated results become the terminal batch summary.

pub mod batch;
pub mod discovery;
pub mod io;
pub mod preview;
pub mod processor;
pub mod rules;
