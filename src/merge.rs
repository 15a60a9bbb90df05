use rand::seq::SliceRandom;

use crate::config::{DEFAULT_SAMPLE_CAP, KEYWORD_RESULT_CAP};
use crate::db::models::ProductRow;
use crate::types::{Product, QueryMode, SourceKind};

/// Unions the per-source result batches into the final table: tags every row
/// with its source, synthesizes the canonical URL from (source, id), and
/// re-applies the mode's ordering/cap policy to the combined set.
///
/// No cross-source dedup: ids are only unique within a source, so the same id
/// from both stores is two distinct rows. The policy must be re-applied here
/// because each source was already capped individually — concatenation alone
/// would neither be globally sorted nor correctly capped.
pub fn merge(batches: Vec<(SourceKind, Vec<ProductRow>)>, mode: &QueryMode) -> Vec<Product> {
    let mut products: Vec<Product> = batches
        .into_iter()
        .flat_map(|(source, rows)| rows.into_iter().map(move |r| tag_row(source, r)))
        .collect();
    apply_policy(&mut products, mode);
    products
}

fn tag_row(source: SourceKind, row: ProductRow) -> Product {
    Product {
        url: source.product_url(row.goods_id),
        source,
        id: row.goods_id,
        name: row.goods_name,
        price: row.goods_price,
        member_price: row.min_level_price,
        category_path: row.category_path,
        updated_at: row.updated_at,
    }
}

fn apply_policy(products: &mut Vec<Product>, mode: &QueryMode) {
    match mode {
        QueryMode::Keyword(_) => {
            products.sort_by(|a, b| a.price.total_cmp(&b.price));
            products.truncate(KEYWORD_RESULT_CAP);
        }
        QueryMode::Category(_) => {
            // newest first; rows without a timestamp sink to the end
            products.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        }
        QueryMode::Default => {
            products.shuffle(&mut rand::thread_rng());
            products.truncate(DEFAULT_SAMPLE_CAP);
        }
    }
}
