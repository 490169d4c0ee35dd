//! Core of the Hashery service.
//!
//! The in-memory [`registry::Registry`] reserves identifiers and stores
//! digests, the [`scheduler::CompletionScheduler`] writes each digest after
//! the enforced minimum delay, [`stats::StatsAggregator`] keeps the timing
//! counters, and [`shutdown::ShutdownCoordinator`] drives the
//! running/draining/stopped lifecycle. [`service::hash::HashService`] ties them
//! together behind the operations the HTTP layer calls.
//!
//! This crate depends only on `hashery-types` -- never on `hashery-infra`
//! or any HTTP crate.

pub mod digest;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod shutdown;
pub mod stats;
