//! Scheduled procedures for the regsuite registries.
//!
//! Every job scans a filtered entity set and performs one write per entity,
//! returning a [`BatchReport`](regsuite_core::batch::BatchReport). The
//! [`scheduler`] runs them on their recurrence; the API can also run one on
//! demand by name through [`jobs::Job::from_name`].

pub mod config;
pub mod jobs;
pub mod scheduler;

pub use config::WorkerConfig;
pub use jobs::{Job, JobContext, Recurrence};
