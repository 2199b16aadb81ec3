use chrono::NaiveDate;
use core_types::{Item, ItemStatus, Lot};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// The top-level snapshot document handed over by the surrounding
/// application: everything the engine needs, captured at one instant.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub lots: Vec<RawLot>,
}

/// Canonical records ready for the analytics engine.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub items: Vec<Item>,
    pub lots: Vec<Lot>,
}

impl RawSnapshot {
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            items: self.items.into_iter().map(RawItem::into_item).collect(),
            lots: self.lots.into_iter().map(RawLot::into_lot).collect(),
        }
    }
}

/// One item row as it appears in a legacy export.
///
/// Field names drifted across schema generations; every alias encountered in
/// the wild is accepted here and resolved onto the canonical `Item` exactly
/// once, so downstream code never sees more than one name per concept.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    /// Older exports used `title` for the display label.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "lotId")]
    pub lot_id: Option<Value>,
    /// Free-text lot name on rows that predate `lot_id`.
    #[serde(default, alias = "lotName", alias = "lot")]
    pub lot_name: Option<String>,
    #[serde(default, alias = "purchaseCost")]
    pub purchase_cost: Option<Value>,
    #[serde(default, alias = "salePrice")]
    pub sale_price: Option<Value>,
    /// The sale amount field of the previous schema.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, alias = "listingDate")]
    pub listing_date: Option<String>,
    #[serde(default, alias = "saleDate")]
    pub sale_date: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl RawItem {
    /// Resolves aliases and coerces loose values onto the canonical record.
    ///
    /// Total: a bad field degrades to absent, it never rejects the row.
    pub fn into_item(self) -> Item {
        let name = self
            .name
            .filter(|label| !label.trim().is_empty())
            .or(self.title)
            .unwrap_or_default();
        Item {
            id: coerce_id(self.id).unwrap_or_default(),
            name,
            status: ItemStatus::normalize(self.status.as_deref().unwrap_or("")),
            lot_id: coerce_id(self.lot_id),
            lot_name_hint: self.lot_name.filter(|hint| !hint.trim().is_empty()),
            purchase_cost: coerce_amount(self.purchase_cost.as_ref()),
            sale_price: coerce_amount(self.sale_price.as_ref()),
            legacy_price: coerce_amount(self.price.as_ref()),
            listing_date: coerce_date(self.listing_date.as_deref()),
            sale_date: coerce_date(self.sale_date.as_deref()),
            created_at: coerce_date(self.created_at.as_deref()),
        }
    }
}

/// One lot row as it appears in a legacy export.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLot {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "totalCost")]
    pub total_cost: Option<Value>,
    /// The oldest exports recorded the lot price under `purchase_cost`.
    #[serde(default, alias = "purchaseCost")]
    pub purchase_cost: Option<Value>,
    #[serde(
        default,
        alias = "declaredItemCount",
        alias = "itemCount",
        alias = "item_count"
    )]
    pub declared_item_count: Option<Value>,
    #[serde(default, alias = "purchaseDate")]
    pub purchase_date: Option<String>,
}

impl RawLot {
    pub fn into_lot(self) -> Lot {
        let total_cost = coerce_amount(self.total_cost.as_ref())
            .or_else(|| coerce_amount(self.purchase_cost.as_ref()))
            .unwrap_or(Decimal::ZERO);
        Lot {
            id: coerce_id(self.id).unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            total_cost,
            declared_item_count: coerce_count(self.declared_item_count.as_ref()),
            purchase_date: coerce_date(self.purchase_date.as_deref()),
        }
    }
}

/// Ids arrive as strings or bare numbers; either becomes an opaque string.
/// Empty strings count as absent so a blank cell never joins anything.
fn coerce_id(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Currency amounts arrive as JSON numbers or as strings in either `12.50`
/// or localized `1.234,56` form. Anything unparseable degrades to absent.
fn coerce_amount(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(number) => Decimal::from_str(&number.to_string()).ok(),
        Value::String(text) => parse_amount_str(text),
        _ => None,
    }
}

fn parse_amount_str(text: &str) -> Option<Decimal> {
    let trimmed = text.trim().trim_end_matches('€').trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(amount) = Decimal::from_str(trimmed) {
        return Some(amount);
    }
    // Comma decimal separator, optionally with dot thousands separators.
    if !trimmed.contains(',') {
        return None;
    }
    let normalized = trimmed.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// The declared unit count is a planning number. Fractions truncate;
/// negative or unparseable input degrades to zero, which also zeroes the
/// derived unit cost downstream.
fn coerce_count(value: Option<&Value>) -> u32 {
    let Some(amount) = coerce_amount(value) else {
        return 0;
    };
    if amount.is_sign_negative() {
        return 0;
    }
    amount.trunc().to_u32().unwrap_or(0)
}

/// Accepts `YYYY-MM-DD`, with or without a trailing time component; anything
/// else degrades to absent so one bad stamp never poisons the snapshot.
fn coerce_date(value: Option<&str>) -> Option<NaiveDate> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    let day_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item_from(json: &str) -> Item {
        serde_json::from_str::<RawItem>(json).unwrap().into_item()
    }

    fn lot_from(json: &str) -> Lot {
        serde_json::from_str::<RawLot>(json).unwrap().into_lot()
    }

    #[test]
    fn title_fills_in_for_a_missing_name() {
        let item = item_from(r#"{"id": "i1", "title": "Vintage lamp"}"#);
        assert_eq!(item.name, "Vintage lamp");

        let item = item_from(r#"{"id": "i1", "name": "  ", "title": "Vintage lamp"}"#);
        assert_eq!(item.name, "Vintage lamp");

        let item = item_from(r#"{"id": "i1", "name": "Lamp", "title": "ignored"}"#);
        assert_eq!(item.name, "Lamp");
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let item = item_from(
            r#"{"id": "i1", "lotId": "l1", "salePrice": 40, "purchaseCost": 10,
                "listingDate": "2024-02-10", "saleDate": "2024-02-15"}"#,
        );
        assert_eq!(item.lot_id.as_deref(), Some("l1"));
        assert_eq!(item.sale_price, Some(dec!(40)));
        assert_eq!(item.purchase_cost, Some(dec!(10)));
        assert_eq!(
            item.sale_date,
            NaiveDate::from_ymd_opt(2024, 2, 15)
        );
    }

    #[test]
    fn legacy_price_field_stays_separate_from_sale_price() {
        let item = item_from(r#"{"id": "i1", "price": 30}"#);
        assert_eq!(item.legacy_price, Some(dec!(30)));
        assert_eq!(item.sale_price, None);
    }

    #[test]
    fn amounts_coerce_from_strings_including_localized_forms() {
        let item = item_from(r#"{"id": "i1", "salePrice": "12.50"}"#);
        assert_eq!(item.sale_price, Some(dec!(12.50)));

        let item = item_from(r#"{"id": "i1", "salePrice": "12,50"}"#);
        assert_eq!(item.sale_price, Some(dec!(12.50)));

        let item = item_from(r#"{"id": "i1", "salePrice": "1.234,56 €"}"#);
        assert_eq!(item.sale_price, Some(dec!(1234.56)));
    }

    #[test]
    fn garbage_amounts_degrade_to_absent() {
        let item = item_from(r#"{"id": "i1", "salePrice": "n/a", "purchaseCost": null}"#);
        assert_eq!(item.sale_price, None);
        assert_eq!(item.purchase_cost, None);

        let item = item_from(r#"{"id": "i1", "salePrice": true}"#);
        assert_eq!(item.sale_price, None);
    }

    #[test]
    fn numeric_and_blank_ids_are_handled() {
        let item = item_from(r#"{"id": 7, "lotId": 12}"#);
        assert_eq!(item.id, "7");
        assert_eq!(item.lot_id.as_deref(), Some("12"));

        let item = item_from(r#"{"id": "i1", "lotId": ""}"#);
        assert_eq!(item.lot_id, None);
    }

    #[test]
    fn status_strings_are_normalized_on_the_way_in() {
        let item = item_from(r#"{"id": "i1", "status": " Verkauft "}"#);
        assert_eq!(item.status, ItemStatus::Sold);

        let item = item_from(r#"{"id": "i1"}"#);
        assert_eq!(item.status, ItemStatus::ForSale);
    }

    #[test]
    fn dates_truncate_time_components_and_drop_garbage() {
        let item = item_from(r#"{"id": "i1", "saleDate": "2024-02-15T10:30:00Z"}"#);
        assert_eq!(item.sale_date, NaiveDate::from_ymd_opt(2024, 2, 15));

        let item = item_from(r#"{"id": "i1", "saleDate": "15.02.2024"}"#);
        assert_eq!(item.sale_date, None);
    }

    #[test]
    fn lot_cost_falls_back_to_the_purchase_cost_alias() {
        let lot = lot_from(r#"{"id": "l1", "name": "Attic", "purchaseCost": 100}"#);
        assert_eq!(lot.total_cost, dec!(100));

        let lot = lot_from(r#"{"id": "l1", "totalCost": 80, "purchaseCost": 100}"#);
        assert_eq!(lot.total_cost, dec!(80));
    }

    #[test]
    fn declared_counts_truncate_and_never_go_negative() {
        let lot = lot_from(r#"{"id": "l1", "itemCount": "4"}"#);
        assert_eq!(lot.declared_item_count, 4);

        let lot = lot_from(r#"{"id": "l1", "declaredItemCount": 4.7}"#);
        assert_eq!(lot.declared_item_count, 4);

        let lot = lot_from(r#"{"id": "l1", "itemCount": -3}"#);
        assert_eq!(lot.declared_item_count, 0);

        let lot = lot_from(r#"{"id": "l1", "itemCount": "many"}"#);
        assert_eq!(lot.declared_item_count, 0);
    }

    #[test]
    fn an_empty_document_yields_an_empty_snapshot() {
        let snapshot = serde_json::from_str::<RawSnapshot>("{}")
            .unwrap()
            .into_snapshot();
        assert!(snapshot.items.is_empty());
        assert!(snapshot.lots.is_empty());
    }
}
