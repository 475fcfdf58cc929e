//! Domain rules for the regsuite registries.
//!
//! This crate has zero IO: it holds the identifiers, state tables, derived
//! field computations and validation predicates shared by the repository
//! layer, the HTTP API and the scheduled jobs.
//!
//! - [`sequence`]: named counters and identifier formatting.
//! - [`age`]: calendar-aware and approximate age computation.
//! - [`lifecycle`]: closed state enumerations with transition tables.
//! - [`acl`]: (entity, operation) to role access matrix.
//! - [`activity`]: activity types and job dedupe keys.
//! - [`operator`], [`hospital`], [`school`]: per-registry rules.

#[macro_use]
pub mod lifecycle;

pub mod acl;
pub mod activity;
pub mod age;
pub mod batch;
pub mod error;
pub mod hospital;
pub mod operator;
pub mod pagination;
pub mod person;
pub mod school;
pub mod sequence;
pub mod types;
