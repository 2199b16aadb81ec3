use crate::enums::ItemStatus;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sellable unit, optionally linked to the bulk lot it was broken out of.
///
/// Field aliases from older schema generations (`title` for the label, `price`
/// for the sale amount) are resolved at the ingestion boundary; this record
/// carries exactly one field per concept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Display label.
    pub name: String,
    pub status: ItemStatus,
    /// Reference to the owning `Lot`, when one was recorded. May dangle.
    pub lot_id: Option<String>,
    /// Free-text lot name, used as a fallback join key for legacy rows that
    /// predate `lot_id`.
    pub lot_name_hint: Option<String>,
    /// Explicitly recorded acquisition cost. Overrides the lot-derived unit
    /// cost when present, including when zero or negative (corrections are
    /// booked as negative costs).
    pub purchase_cost: Option<Decimal>,
    /// The authoritative sale amount when present.
    pub sale_price: Option<Decimal>,
    /// Sale amount from the previous schema; consulted only when
    /// `sale_price` is absent or zero.
    pub legacy_price: Option<Decimal>,
    pub listing_date: Option<NaiveDate>,
    /// May be absent even for sold items (data-entry gap).
    pub sale_date: Option<NaiveDate>,
    pub created_at: Option<NaiveDate>,
}

impl Item {
    /// The date a metric files this item under: the sale date when known,
    /// else the listing date, else the creation date.
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.sale_date.or(self.listing_date).or(self.created_at)
    }
}

/// One bulk acquisition, later broken into sellable items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: String,
    /// Display label; doubles as the fallback join key for legacy items.
    pub name: String,
    /// Amount paid for the whole lot.
    pub total_cost: Decimal,
    /// How many units the purchaser expects to derive from this lot. A
    /// planning number, so it may exceed the item rows actually entered.
    pub declared_item_count: u32,
    pub purchase_date: Option<NaiveDate>,
}

impl Lot {
    /// Evenly spread acquisition cost per declared unit.
    ///
    /// Recomputed on demand because `declared_item_count` can be edited after
    /// items were created. Zero when no units are declared, so the division
    /// is always safe.
    pub fn unit_cost(&self) -> Decimal {
        if self.declared_item_count > 0 {
            self.total_cost / Decimal::from(self.declared_item_count)
        } else {
            Decimal::ZERO
        }
    }
}
