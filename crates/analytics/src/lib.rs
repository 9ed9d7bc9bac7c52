//! # Vitrine Analytics Engine
//!
//! This crate turns a transaction dataset into the summary KPIs and grouped
//! aggregates the presentation layer charts from. It acts as the "unbiased
//! judge" of the sales data.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `KpiEngine` is a stateless calculator. It
//!   takes transaction rows as input and produces scalars, aggregate tables,
//!   or a `SalesReport` as output. This makes it highly reliable and easy to
//!   test.
//!
//! ## Public API
//!
//! - `KpiEngine`: The main struct that contains the calculation logic.
//! - `SalesReport`: The standardized bundle of scalar KPIs.
//! - `RegionTotal`: One row of the region aggregate, annotated with
//!   coordinates for downstream mapping.
//! - `AnalyticsError`: The specific error types that can be returned from
//!   this crate.

pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::KpiEngine;
pub use error::AnalyticsError;
pub use report::{RegionTotal, SalesReport};
