use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The two backing product stores. Adding a third source means extending this
/// enum — `product_url` and the adapters then fail to compile until handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The crawler store ("spiders" schema).
    Catalog,
    /// The card-shop store ("ly_card" schema).
    Card,
}

impl SourceKind {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "catalog" => Some(SourceKind::Catalog),
            "card" => Some(SourceKind::Card),
            _ => None,
        }
    }

    /// Canonical product-page URL for an item id on this source. Pure and
    /// deterministic; each source has its own template.
    pub fn product_url(self, id: i64) -> String {
        match self {
            SourceKind::Catalog => format!("https://xinqidianqy.cn/goods?id={id}"),
            SourceKind::Card => format!("https://ly6.sk678.cn/goods/{id}"),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::Catalog => "catalog",
            SourceKind::Card => "card",
        };
        write!(f, "{s}")
    }
}

/// URL synthesis for loosely-typed callers holding a string tag. An
/// unrecognized tag yields an empty string rather than an error.
pub fn url_for_tag(tag: &str, id: i64) -> String {
    SourceKind::parse(tag)
        .map(|s| s.product_url(id))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Query modes
// ---------------------------------------------------------------------------

/// The active query intent. Each mode carries its own ordering and cap
/// policy, applied per source and re-applied to the merged set.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMode {
    /// Alias-expanded keyword search: substring match over name and category,
    /// price ascending, capped.
    Keyword(Vec<String>),
    /// Exact category browse: newest first, uncapped.
    Category(String),
    /// Uniform random sample of the whole table, capped.
    Default,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// A merged product row as handed to the presentation layer. `source` and
/// `url` are assigned by the merger, never stored upstream.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// Member price; only the card store carries this column.
    pub member_price: Option<f64>,
    pub category_path: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
    pub source: SourceKind,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Price changes
// ---------------------------------------------------------------------------

/// A price-delta event from `current_price_update`. `price_change` is the
/// stored, authoritative delta — not recomputed from before/after.
#[derive(Debug, Clone, Serialize)]
pub struct PriceChange {
    pub goods_name: String,
    pub before_price: f64,
    pub after_price: f64,
    pub price_change: f64,
    pub create_time: Option<NaiveDateTime>,
    /// Origin classifier: non-null means the catalog feed produced the event,
    /// null means the card feed did. Presence, not value, discriminates.
    pub goods_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionFilter {
    All,
    /// `price_change > 0` only.
    Increase,
    /// `price_change < 0` only.
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginFilter {
    All,
    /// Events with a `goods_type` value (catalog feed).
    Catalog,
    /// Events without a `goods_type` value (card feed).
    Card,
}
