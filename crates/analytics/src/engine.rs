use crate::period::Period;
use crate::report::{LotPerformance, MetricsSnapshot};
use crate::resolve::{LotIndex, net_revenue};
use core_types::{Item, ItemStatus, Lot};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A stateless calculator deriving financial metrics from an inventory
/// snapshot.
///
/// Every call recomputes from the collections it is handed; nothing is cached
/// between calls, so the output always reflects the snapshot it was given.
/// All operations are total: missing fields, dangling lot references and zero
/// denominators degrade to `0`/`None`, never to an error.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates `items` and `lots` over the given reporting window.
    ///
    /// The output is a pure function of the arguments and invariant under
    /// permutation of either collection.
    pub fn compute(&self, items: &[Item], lots: &[Lot], period: &Period) -> MetricsSnapshot {
        let index = LotIndex::new(lots);
        let mut snapshot = MetricsSnapshot::new();

        self.aggregate_sales(items, &index, period, &mut snapshot);
        self.aggregate_investment(items, lots, &index, period, &mut snapshot);
        self.aggregate_lots(items, lots, &index, period, &mut snapshot);

        // Profit pairs window-scoped revenue with window-scoped investment;
        // the all-time investment figure stays available alongside it.
        snapshot.total_profit = snapshot.total_revenue - snapshot.investment_in_period;
        if snapshot.total_revenue > Decimal::ZERO {
            snapshot.sold_margin = Some(snapshot.profit_per_sold_unit / snapshot.total_revenue);
        }

        tracing::debug!(
            items = items.len(),
            lots = lots.len(),
            revenue = %snapshot.total_revenue,
            profit = %snapshot.total_profit,
            "metrics snapshot computed"
        );

        snapshot
    }

    /// Revenue, realized profit and status tallies over items whose
    /// reference date falls inside the window, plus the days-to-sell
    /// average, which spans every sold item regardless of window.
    fn aggregate_sales(
        &self,
        items: &[Item],
        index: &LotIndex<'_>,
        period: &Period,
        snapshot: &mut MetricsSnapshot,
    ) {
        let mut days_total = Decimal::ZERO;
        let mut days_samples = 0u32;

        for item in items {
            let in_window = period.contains(item.reference_date());
            if in_window {
                snapshot.counts.record(item.status);
            }

            if item.status != ItemStatus::Sold {
                continue;
            }
            if in_window {
                let revenue = net_revenue(item);
                snapshot.total_revenue += revenue;
                snapshot.profit_per_sold_unit += revenue - index.purchase_cost(item);
            }

            // Days-to-sell is a sell-through figure over the whole history,
            // not the selected window, and it needs both ends of the
            // interval. A sale recorded before its listing is a data-entry
            // error; it clamps to zero so the row stays visible without
            // dragging the average negative.
            if let (Some(listed), Some(sold)) = (item.listing_date, item.sale_date) {
                let days = (sold - listed).num_days().max(0);
                days_total += Decimal::from(days);
                days_samples += 1;
            }
        }

        if days_samples > 0 {
            snapshot.avg_days_to_sell = Some(days_total / Decimal::from(days_samples));
        }
    }

    /// Investment in both scopes. An acquisition counts once regardless of
    /// when its items later sell, so lots are never window-filtered; loose
    /// items (no resolvable lot) carry their own cost and follow the same
    /// reference-date rule as revenue in the window-scoped figure.
    fn aggregate_investment(
        &self,
        items: &[Item],
        lots: &[Lot],
        index: &LotIndex<'_>,
        period: &Period,
        snapshot: &mut MetricsSnapshot,
    ) {
        let lot_cost: Decimal = lots.iter().map(|lot| lot.total_cost).sum();
        snapshot.investment_all_time = lot_cost;
        snapshot.investment_in_period = lot_cost;

        for item in items {
            if index.resolve(item).is_some() {
                continue;
            }
            let cost = index.purchase_cost(item);
            snapshot.investment_all_time += cost;
            if period.contains(item.reference_date()) {
                snapshot.investment_in_period += cost;
            }
        }
    }

    /// Per-lot breakdown. Sold and reserved items both count toward a lot's
    /// committed income; the sold-count and revenue columns are
    /// window-scoped. Rows are sorted by lot id so the output does not
    /// depend on the order lots arrived in.
    fn aggregate_lots(
        &self,
        items: &[Item],
        lots: &[Lot],
        index: &LotIndex<'_>,
        period: &Period,
        snapshot: &mut MetricsSnapshot,
    ) {
        #[derive(Default, Clone, Copy)]
        struct LotTally {
            sold_in_period: usize,
            revenue_in_period: Decimal,
            committed_revenue: Decimal,
        }

        let mut tallies: HashMap<&str, LotTally> = HashMap::new();
        for item in items {
            let Some(lot) = index.resolve(item) else {
                continue;
            };
            let tally = tallies.entry(lot.id.as_str()).or_default();
            let revenue = net_revenue(item);

            if matches!(item.status, ItemStatus::Sold | ItemStatus::Reserved) {
                tally.committed_revenue += revenue;
            }
            if item.status == ItemStatus::Sold && period.contains(item.reference_date()) {
                tally.sold_in_period += 1;
                tally.revenue_in_period += revenue;
            }
        }

        snapshot.per_lot = lots
            .iter()
            .map(|lot| {
                let tally = tallies.get(lot.id.as_str()).copied().unwrap_or_default();
                let profit_current = tally.committed_revenue - lot.total_cost;
                let roi = if lot.total_cost > Decimal::ZERO {
                    Some(profit_current / lot.total_cost)
                } else {
                    None
                };
                LotPerformance {
                    lot_id: lot.id.clone(),
                    lot_name: lot.name.clone(),
                    cost: lot.total_cost,
                    unit_cost: lot.unit_cost(),
                    sold_count_in_period: tally.sold_in_period,
                    revenue_in_period: tally.revenue_in_period,
                    profit_current,
                    roi,
                }
            })
            .collect();
        snapshot.per_lot.sort_by(|a, b| a.lot_id.cmp(&b.lot_id));
    }
}
