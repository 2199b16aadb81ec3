use serde::{Deserialize, Serialize};

/// The canonical lifecycle states of a resale item.
///
/// Historical data carries many spellings for these four states (mixed case,
/// localized labels, tags from the previous schema). `ItemStatus::normalize`
/// is the single place that folds all of them onto this closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    ForSale,
    Reserved,
    Sold,
    Returned,
}

impl ItemStatus {
    /// Maps any observed status spelling onto the canonical set.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unrecognized input falls back to `ForSale`: an item we cannot
    /// classify is treated as still on the shelf rather than counted
    /// as revenue.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "sold" | "sold_out" | "sold out" | "verkauft" => ItemStatus::Sold,
            "reserved" | "on_hold" | "on hold" | "hold" | "pending" | "reserviert" => {
                ItemStatus::Reserved
            }
            "returned" | "return" | "refunded" | "retoure" | "retour" | "zurückgegeben"
            | "zurueckgegeben" => ItemStatus::Returned,
            // "for_sale", "for sale", "listed", "zum verkauf" and every
            // unknown spelling: still on the shelf.
            _ => ItemStatus::ForSale,
        }
    }

    /// The canonical snake_case tag, as used in exports and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::ForSale => "for_sale",
            ItemStatus::Reserved => "reserved",
            ItemStatus::Sold => "sold",
            ItemStatus::Returned => "returned",
        }
    }
}
