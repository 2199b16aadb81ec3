use core_types::{Item, Lot};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Finds the lot an item belongs to.
///
/// The recorded `lot_id` wins when present; a dangling id resolves to `None`
/// rather than falling through to the name match, so a stale reference never
/// silently re-attaches an item to an unrelated lot. Items without an id are
/// joined through the free-text lot name hint kept on legacy rows. First
/// match wins when lots share a name.
pub fn resolve_lot_for_item<'a>(item: &Item, lots: &'a [Lot]) -> Option<&'a Lot> {
    if let Some(id) = item.lot_id.as_deref() {
        return lots.iter().find(|lot| lot.id == id);
    }
    if let Some(hint) = item.lot_name_hint.as_deref() {
        return lots.iter().find(|lot| lot.name == hint);
    }
    None
}

/// An item's effective acquisition cost.
///
/// An explicitly recorded purchase cost is returned verbatim: zero and
/// negative values included, since corrections are booked as negative costs.
/// Otherwise the resolved lot's unit cost applies, and a loose item without
/// either source costs nothing.
pub fn resolved_purchase_cost(item: &Item, lots: &[Lot]) -> Decimal {
    if let Some(cost) = item.purchase_cost {
        return cost;
    }
    resolve_lot_for_item(item, lots)
        .map(Lot::unit_cost)
        .unwrap_or(Decimal::ZERO)
}

/// An item's net sale amount.
///
/// Prefers the authoritative `sale_price` when it is present and non-zero,
/// then the legacy price field, then zero. A deliberately recorded sale of
/// exactly 0 is therefore indistinguishable from "no sale price set" and
/// falls through to the legacy field; kept as-is until that product
/// question is settled. Negative amounts are non-zero and do not fall
/// through. Never consults lots.
pub fn net_revenue(item: &Item) -> Decimal {
    item.sale_price
        .filter(|price| !price.is_zero())
        .or_else(|| item.legacy_price.filter(|price| !price.is_zero()))
        .unwrap_or(Decimal::ZERO)
}

/// Per-pass lookup maps over one lot collection.
///
/// Resolution semantics are identical to `resolve_lot_for_item`; the maps
/// only buy O(1) lookups when the aggregator walks a whole snapshot against
/// the same lots. Name collisions keep the first lot in the original order,
/// matching the linear scan.
pub struct LotIndex<'a> {
    by_id: HashMap<&'a str, &'a Lot>,
    by_name: HashMap<&'a str, &'a Lot>,
}

impl<'a> LotIndex<'a> {
    pub fn new(lots: &'a [Lot]) -> Self {
        let mut by_id = HashMap::with_capacity(lots.len());
        let mut by_name = HashMap::with_capacity(lots.len());
        for lot in lots {
            by_id.entry(lot.id.as_str()).or_insert(lot);
            by_name.entry(lot.name.as_str()).or_insert(lot);
        }
        Self { by_id, by_name }
    }

    /// See [`resolve_lot_for_item`].
    pub fn resolve(&self, item: &Item) -> Option<&'a Lot> {
        if let Some(id) = item.lot_id.as_deref() {
            return self.by_id.get(id).copied();
        }
        if let Some(hint) = item.lot_name_hint.as_deref() {
            return self.by_name.get(hint).copied();
        }
        None
    }

    /// See [`resolved_purchase_cost`].
    pub fn purchase_cost(&self, item: &Item) -> Decimal {
        if let Some(cost) = item.purchase_cost {
            return cost;
        }
        self.resolve(item)
            .map(Lot::unit_cost)
            .unwrap_or(Decimal::ZERO)
    }
}
