use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::service::{PriceChangePage, ProductPage, ProductQuery, QueryService};
use crate::types::{DirectionFilter, OriginFilter};

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<QueryService>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/products", get(get_products))
        .route("/categories", get(get_categories))
        .route("/price-changes", get(get_price_changes))
        .route("/refresh", post(post_refresh))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ProductsQuery {
    pub keyword: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct PriceChangesQuery {
    pub direction: Option<DirectionFilter>,
    pub origin: Option<OriginFilter>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// An active keyword outranks a category selection; with neither, the default
/// random-sample view is served.
fn product_query(params: ProductsQuery) -> ProductQuery {
    match (non_empty(params.keyword), non_empty(params.category)) {
        (Some(keyword), _) => ProductQuery::Search(keyword),
        (None, Some(category)) => ProductQuery::Category(category),
        (None, None) => ProductQuery::Sample,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

async fn get_products(
    State(state): State<ApiState>,
    Query(params): Query<ProductsQuery>,
) -> Json<ProductPage> {
    Json(state.service.products(product_query(params)).await)
}

async fn get_categories(State(state): State<ApiState>) -> Json<Vec<String>> {
    Json(state.service.categories().await)
}

async fn get_price_changes(
    State(state): State<ApiState>,
    Query(params): Query<PriceChangesQuery>,
) -> Json<PriceChangePage> {
    let direction = params.direction.unwrap_or(DirectionFilter::All);
    let origin = params.origin.unwrap_or(OriginFilter::All);
    Json(state.service.price_changes(direction, origin).await)
}

async fn post_refresh(State(state): State<ApiState>) -> Json<RefreshResponse> {
    state.service.invalidate_all();
    Json(RefreshResponse { refreshed: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, SourceKind};

    fn params(keyword: Option<&str>, category: Option<&str>) -> ProductsQuery {
        ProductsQuery {
            keyword: keyword.map(str::to_string),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn keyword_outranks_category() {
        let q = product_query(params(Some("kfc"), Some("餐饮")));
        assert_eq!(q, ProductQuery::Search("kfc".to_string()));
    }

    #[test]
    fn category_alone_browses() {
        let q = product_query(params(None, Some("餐饮")));
        assert_eq!(q, ProductQuery::Category("餐饮".to_string()));
    }

    #[test]
    fn blank_params_fall_through_to_sample() {
        assert_eq!(product_query(params(None, None)), ProductQuery::Sample);
        assert_eq!(product_query(params(Some("  "), Some(""))), ProductQuery::Sample);
    }

    #[test]
    fn keyword_is_trimmed() {
        let q = product_query(params(Some("  会员 "), None));
        assert_eq!(q, ProductQuery::Search("会员".to_string()));
    }

    #[test]
    fn filter_params_deserialize_from_lowercase() {
        let d: DirectionFilter = serde_json::from_str("\"increase\"").unwrap();
        assert_eq!(d, DirectionFilter::Increase);
        let o: OriginFilter = serde_json::from_str("\"card\"").unwrap();
        assert_eq!(o, OriginFilter::Card);
        assert!(serde_json::from_str::<DirectionFilter>("\"sideways\"").is_err());
    }

    #[test]
    fn products_serialize_with_source_tag_and_raw_values() {
        let p = Product {
            id: 1,
            name: "肯德基100元卡".to_string(),
            price: 95.0,
            member_price: None,
            category_path: Some("餐饮".to_string()),
            updated_at: None,
            source: SourceKind::Catalog,
            url: SourceKind::Catalog.product_url(1),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["source"], "catalog");
        assert_eq!(v["url"], "https://xinqidianqy.cn/goods?id=1");
        // raw number, not a formatted currency string
        assert_eq!(v["price"], 95.0);
    }
}
