use sqlx::mysql::MySqlPool;

use crate::config::PRICE_CHANGE_CAP;
use crate::db::models::PriceChangeRow;
use crate::error::{AppError, Result};
use crate::types::{DirectionFilter, OriginFilter};

/// Read path over the `current_price_update` table on the catalog store.
/// Separate from the product adapters: single source, its own filters.
pub struct PriceChangeReader {
    pool: MySqlPool,
}

impl PriceChangeReader {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Newest first, capped. Filters AND-combine when both are restrictive.
    pub async fn fetch(
        &self,
        direction: DirectionFilter,
        origin: OriginFilter,
    ) -> Result<Vec<PriceChangeRow>> {
        let sql = build_sql(direction, origin);
        sqlx::query_as::<_, PriceChangeRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from_sqlx)
    }
}

/// Both filters are closed enums mapping to fixed predicates; no user text
/// reaches the statement, so there is nothing to bind here.
fn build_sql(direction: DirectionFilter, origin: OriginFilter) -> String {
    let mut conditions: Vec<&str> = Vec::new();

    match direction {
        DirectionFilter::All => {}
        DirectionFilter::Increase => conditions.push("price_change > 0"),
        DirectionFilter::Decrease => conditions.push("price_change < 0"),
    }

    // origin is discriminated by presence of the classifier column, not by
    // its value: the catalog feed writes goods_type, the card feed does not
    match origin {
        OriginFilter::All => {}
        OriginFilter::Catalog => conditions.push("goods_type IS NOT NULL"),
        OriginFilter::Card => conditions.push("goods_type IS NULL"),
    }

    let mut sql = String::from(
        "SELECT goods_name, before_price, after_price, price_change, create_time, goods_type \
         FROM current_price_update",
    );
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(&format!(" ORDER BY create_time DESC LIMIT {PRICE_CHANGE_CAP}"));
    sql
}
