use sqlx::mysql::MySqlPool;
use sqlx::{MySql, QueryBuilder};

use crate::config::{DEFAULT_SAMPLE_CAP, KEYWORD_RESULT_CAP};
use crate::db::models::ProductRow;
use crate::error::{AppError, Result};
use crate::types::{QueryMode, SourceKind};

/// One backing product store. Executes the mode's parameterized query against
/// its pool and returns raw rows; tagging and URL synthesis happen in the
/// merger. Every user-supplied value is bound, never interpolated.
pub struct SourceAdapter {
    kind: SourceKind,
    pool: MySqlPool,
}

impl SourceAdapter {
    pub fn new(kind: SourceKind, pool: MySqlPool) -> Self {
        Self { kind, pool }
    }

    /// Per-source select list. The catalog schema has no member-price column,
    /// so it selects NULL to keep one row type across both stores.
    fn select_clause(kind: SourceKind) -> &'static str {
        match kind {
            SourceKind::Catalog => {
                "SELECT goods_id, goods_name, goods_price, \
                 CAST(NULL AS DOUBLE) AS min_level_price, category_path, updated_at \
                 FROM products"
            }
            SourceKind::Card => {
                "SELECT goods_id, goods_name, goods_price, \
                 min_level_price, category_path, updated_at \
                 FROM products"
            }
        }
    }

    pub async fn fetch_products(&self, mode: &QueryMode) -> Result<Vec<ProductRow>> {
        let select = Self::select_clause(self.kind);
        match mode {
            QueryMode::Keyword(terms) => {
                if terms.is_empty() {
                    return Ok(Vec::new());
                }
                let mut qb = keyword_query(select, terms);
                qb.build_query_as::<ProductRow>()
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::from_sqlx)
            }
            QueryMode::Category(category) => {
                let sql = format!("{select} WHERE category_path = ? ORDER BY updated_at DESC");
                sqlx::query_as::<_, ProductRow>(&sql)
                    .bind(category)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::from_sqlx)
            }
            QueryMode::Default => {
                // uniform sample in storage; merged set is re-shuffled anyway
                let sql = format!("{select} ORDER BY RAND() LIMIT {DEFAULT_SAMPLE_CAP}");
                sqlx::query_as::<_, ProductRow>(&sql)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::from_sqlx)
            }
        }
    }

    /// Distinct non-empty category labels from this store.
    pub async fn fetch_categories(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT category_path FROM products \
             WHERE category_path IS NOT NULL AND category_path != ''",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from_sqlx)?;
        Ok(rows.into_iter().map(|(c,)| c).collect())
    }
}

/// Wraps a substring-search value with wildcard markers before it is bound.
fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

/// Builds the keyword disjunction: for every expanded term, match either the
/// name or the category path. Ordering and cap follow keyword-mode policy.
fn keyword_query(select: &str, terms: &[String]) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(select.to_string());
    qb.push(" WHERE ");
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push("goods_name LIKE ");
        qb.push_bind(like_pattern(term));
        qb.push(" OR category_path LIKE ");
        qb.push_bind(like_pattern(term));
    }
    qb.push(format!(" ORDER BY goods_price ASC LIMIT {KEYWORD_RESULT_CAP}"));
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn like_pattern_wraps_with_wildcards() {
        assert_eq!(like_pattern("肯德基"), "%肯德基%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn keyword_query_binds_two_predicates_per_term() {
        let mut qb = keyword_query(SourceAdapter::select_clause(SourceKind::Card), &terms(&["kfc", "肯德基"]));
        let sql = qb.sql();
        // one placeholder per LIKE, two LIKEs per term
        assert_eq!(sql.matches('?').count(), 4);
        assert_eq!(sql.matches("goods_name LIKE").count(), 2);
        assert_eq!(sql.matches("category_path LIKE").count(), 2);
        assert_eq!(sql.matches(" OR ").count(), 3);
    }

    #[test]
    fn keyword_query_applies_price_ordering_and_cap() {
        let mut qb = keyword_query(SourceAdapter::select_clause(SourceKind::Catalog), &terms(&["会员"]));
        assert!(qb.sql().ends_with("ORDER BY goods_price ASC LIMIT 100"));
    }

    #[test]
    fn keyword_query_never_interpolates_the_term() {
        let mut qb = keyword_query(SourceAdapter::select_clause(SourceKind::Catalog), &terms(&["kfc"]));
        assert!(!qb.sql().contains("kfc"), "search value must be bound, not inlined");
    }

    #[test]
    fn catalog_selects_null_member_price() {
        let catalog = SourceAdapter::select_clause(SourceKind::Catalog);
        let card = SourceAdapter::select_clause(SourceKind::Card);
        assert!(catalog.contains("CAST(NULL AS DOUBLE) AS min_level_price"));
        assert!(!card.contains("NULL"));
        assert!(card.contains("min_level_price"));
    }
}
