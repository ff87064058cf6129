//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! RouterBuilder::build, ConfigWatcher, CLI
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or the configured level)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber or exporter is
//!   left to the binary
//! - Metric updates without an installed recorder are no-ops
//! - Nothing is recorded on the matching hot path

pub mod logging;
pub mod metrics;
