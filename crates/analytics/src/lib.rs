//! # Lotbook Analytics Engine
//!
//! This crate derives investment, revenue and profit metrics from a snapshot
//! of resale inventory records. It is the single place the cost, revenue and
//! period rules live; every consumer calls these resolvers instead of
//! re-deriving the formulas inline.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MetricsEngine` is a stateless
//!   calculator. It takes one consistent snapshot of items and lots plus a
//!   reporting window as input and produces a `MetricsSnapshot` as output.
//!   It holds nothing between calls and caches nothing across them.
//! - **Total Functions:** Nothing here errors. Missing fields, dangling lot
//!   references and zero denominators degrade to `0`/`None`; the wall clock
//!   is never read (relative period modes take "today" as a parameter).
//!
//! ## Public API
//!
//! - `MetricsEngine` / `MetricsSnapshot`: the aggregator and its report.
//! - `derive_period` / `Period` / `PeriodMode`: the time-window resolver.
//! - `resolve_lot_for_item`, `resolved_purchase_cost`, `net_revenue`,
//!   `LotIndex`: the per-item resolvers, also consumed standalone by detail
//!   views.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod period;
pub mod report;
pub mod resolve;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricsEngine;
pub use period::{Period, PeriodMode, derive_period};
pub use report::{LotPerformance, MetricsSnapshot, StatusCounts};
pub use resolve::{LotIndex, net_revenue, resolve_lot_for_item, resolved_purchase_cost};
