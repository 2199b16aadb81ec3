use core_types::ItemStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The aggregated view of one inventory snapshot over one reporting window.
///
/// This struct is the final output of the `MetricsEngine` and serves as the
/// data transfer object for every consumer that renders results. All money
/// fields are raw amounts in the major currency unit; formatting is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // I. Sales within the selected window
    pub total_revenue: Decimal,
    /// Realized profit across sold units: net revenue minus the resolved
    /// acquisition cost, summed per sold item in the window.
    pub profit_per_sold_unit: Decimal,
    pub sold_margin: Option<Decimal>, // Option<> because it is undefined without revenue
    /// Mean listing-to-sale span over every sold item carrying both dates,
    /// whatever window is selected.
    pub avg_days_to_sell: Option<Decimal>, // Option<> when no qualifying item exists

    // II. Investment and profit
    /// Every lot's total cost plus the costs of loose items inside the
    /// window. Acquisitions are never window-filtered; only loose items are.
    pub investment_in_period: Decimal,
    /// The same figure without any window filter on loose items.
    pub investment_all_time: Decimal,
    /// `total_revenue - investment_in_period`, the period-scoped pairing.
    pub total_profit: Decimal,

    // III. Item tallies by canonical status, window-filtered
    pub counts: StatusCounts,

    // IV. Per-lot breakdown, sorted by lot id
    pub per_lot: Vec<LotPerformance>,
}

impl MetricsSnapshot {
    /// Creates a new, zeroed-out snapshot for the engine to accumulate into.
    pub fn new() -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            profit_per_sold_unit: Decimal::ZERO,
            sold_margin: None,
            avg_days_to_sell: None,
            investment_in_period: Decimal::ZERO,
            investment_all_time: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            counts: StatusCounts::default(),
            per_lot: Vec::new(),
        }
    }
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Window-filtered item tallies per canonical status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub for_sale: usize,
    pub reserved: usize,
    pub sold: usize,
    pub returned: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: ItemStatus) {
        match status {
            ItemStatus::ForSale => self.for_sale += 1,
            ItemStatus::Reserved => self.reserved += 1,
            ItemStatus::Sold => self.sold += 1,
            ItemStatus::Returned => self.returned += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.for_sale + self.reserved + self.sold + self.returned
    }
}

/// One lot's line in the breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotPerformance {
    pub lot_id: String,
    pub lot_name: String,
    /// Amount paid for the whole lot.
    pub cost: Decimal,
    pub unit_cost: Decimal,
    pub sold_count_in_period: usize,
    pub revenue_in_period: Decimal,
    /// Committed income (sold plus reserved items) minus the lot's cost. A
    /// portfolio-state figure, deliberately not window-filtered.
    pub profit_current: Decimal,
    pub roi: Option<Decimal>, // Option<> because it is undefined for a zero-cost lot
}
