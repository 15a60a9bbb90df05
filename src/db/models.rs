//! Row types shared by both product stores. Used by sqlx for typed queries.
//!
//! The two `products` schemas are structurally similar but not identical:
//! only the card store has `min_level_price`, so the catalog adapter selects
//! `NULL` in its place and both decode into [`ProductRow`].

use chrono::NaiveDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub goods_id: i64,
    pub goods_name: String,
    pub goods_price: f64,
    pub min_level_price: Option<f64>,
    pub category_path: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PriceChangeRow {
    pub goods_name: String,
    pub before_price: f64,
    pub after_price: f64,
    pub price_change: f64,
    pub create_time: Option<NaiveDateTime>,
    pub goods_type: Option<String>,
}
