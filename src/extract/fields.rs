//! Tolerant field extraction from raw catalog records
//!
//! The catalog API delivers semi-structured records with no shape
//! guarantees. Extraction never fails: every missing or malformed field
//! resolves to a sentinel default. The source field names and their
//! sentinels are enumerated once in the `source` and `sentinel` modules
//! rather than scattered through the function.

use crate::model::{Product, RawRecord};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Source-record field names, enumerated in one place.
pub mod source {
    /// Product display name; may carry specs after the first comma.
    pub const NAME: &str = "name";

    /// URL slug the canonical product link is built from.
    pub const SLUG: &str = "url_key";

    /// Discounted price, preferred for `new_price`.
    pub const FINAL_PRICE: &str = "jarir_final_price";

    /// Base price; `new_price` fallback and `old_price` source.
    pub const BASE_PRICE: &str = "price";

    /// Brand label.
    pub const BRAND: &str = "GTM_brand";

    /// Secondary attribute appended to specs when applicable.
    pub const SECONDARY_ATTR: &str = "GTM_cofa";

    /// Stock flag, `1` meaning in stock; only read by stock-tracking variants.
    pub const STOCK_FLAG: &str = "klevu_stock_flag";
}

/// Sentinel defaults for missing source fields.
pub mod sentinel {
    pub const NAME: &str = "No Name Available";
    pub const SPECS: &str = "No Specifications Available";
    pub const BRAND: &str = "No Brand Available";

    /// Slug substitute; produces a link that never matches a real product.
    pub const SLUG: &str = "No Link Available";

    /// Secondary-attribute value treated as absent.
    pub const NOT_APPLICABLE: &str = "n/a";
}

/// Fixed suffix appended to every product link.
pub const LINK_SUFFIX: &str = ".html";

/// Per-run extraction parameters.
///
/// One context is built per crawl run (with `now` refreshed per page) so
/// the three deployment variants differ only in configuration.
#[derive(Debug, Clone)]
pub struct ExtractContext {
    /// Category label persisted with every product; any in-record category
    /// field is informational only and discarded.
    pub category: String,

    /// Base URL the product slug is joined onto.
    pub product_base_url: String,

    /// Store label for variants that persist one.
    pub store: Option<String>,

    /// Whether to read the stock flag from the record.
    pub track_stock: bool,

    /// Page-fetch wall-clock time in the configured fixed offset.
    pub now: DateTime<FixedOffset>,
}

/// Maps one raw record to a canonical `Product`.
///
/// Never fails; every missing field resolves to its sentinel. The name is
/// split on the first comma only: the left part becomes the name, the
/// trimmed right part becomes the specs, preserving any further commas.
pub fn extract(record: &RawRecord, ctx: &ExtractContext) -> Product {
    let raw_name = str_field(record, source::NAME, sentinel::NAME);

    // Split name/specs on the first comma only.
    let (name, mut specs) = match raw_name.split_once(',') {
        Some((left, right)) => (left.trim().to_string(), right.trim().to_string()),
        None => (raw_name, sentinel::SPECS.to_string()),
    };

    // Append the secondary attribute unless absent or marked not applicable.
    let secondary = str_field(record, source::SECONDARY_ATTR, "");
    if !secondary.is_empty() && secondary != sentinel::NOT_APPLICABLE {
        specs = if specs == sentinel::SPECS {
            secondary
        } else {
            format!("{}, {}", specs, secondary)
        };
    }

    let base_price = num_field(record, source::BASE_PRICE);
    let new_price = num_field(record, source::FINAL_PRICE)
        .or(base_price)
        .unwrap_or(0.0);
    let old_price = base_price.unwrap_or(new_price);

    let slug = str_field(record, source::SLUG, sentinel::SLUG);
    let link = format!("{}{}{}", ctx.product_base_url, slug, LINK_SUFFIX);

    let stock = if ctx.track_stock {
        Some(num_field(record, source::STOCK_FLAG).unwrap_or(0.0) == 1.0)
    } else {
        None
    };

    Product {
        name,
        specs,
        new_price,
        old_price,
        brand: str_field(record, source::BRAND, sentinel::BRAND),
        link,
        category: ctx.category.clone(),
        timestamp: ctx.now,
        stock,
        store: ctx.store.clone(),
    }
}

/// Reads a string field, falling back to `default` when missing or non-string.
fn str_field(record: &RawRecord, key: &str, default: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

/// Reads a numeric field, tolerating numeric strings.
fn num_field(record: &RawRecord, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn test_ctx() -> ExtractContext {
        ExtractContext {
            category: "smartphones".to_string(),
            product_base_url: "https://www.jarir.com/".to_string(),
            store: None,
            track_stock: false,
            now: FixedOffset::east_opt(3 * 3600)
                .unwrap()
                .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .unwrap(),
        }
    }

    fn record(value: serde_json::Value) -> RawRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_empty_record_yields_all_sentinels() {
        let product = extract(&record(json!({})), &test_ctx());

        assert_eq!(product.name, sentinel::NAME);
        assert_eq!(product.specs, sentinel::SPECS);
        assert_eq!(product.new_price, 0.0);
        assert_eq!(product.old_price, 0.0);
        assert_eq!(product.brand, sentinel::BRAND);
        assert_eq!(
            product.link,
            "https://www.jarir.com/No Link Available.html"
        );
        assert_eq!(product.category, "smartphones");
        assert_eq!(product.stock, None);
        assert_eq!(product.store, None);
    }

    #[test]
    fn test_name_splits_on_first_comma_only() {
        let product = extract(
            &record(json!({"name": "Phone X, 128GB, Black"})),
            &test_ctx(),
        );

        assert_eq!(product.name, "Phone X");
        assert_eq!(product.specs, "128GB, Black");
    }

    #[test]
    fn test_name_without_comma_keeps_specs_sentinel() {
        let product = extract(&record(json!({"name": "Phone X"})), &test_ctx());

        assert_eq!(product.name, "Phone X");
        assert_eq!(product.specs, sentinel::SPECS);
    }

    #[test]
    fn test_secondary_attribute_appended_to_specs() {
        let product = extract(
            &record(json!({"name": "Phone X, 128GB", "GTM_cofa": "5G"})),
            &test_ctx(),
        );

        assert_eq!(product.specs, "128GB, 5G");
    }

    #[test]
    fn test_secondary_attribute_replaces_sentinel_specs() {
        let product = extract(
            &record(json!({"name": "Phone X", "GTM_cofa": "5G"})),
            &test_ctx(),
        );

        assert_eq!(product.specs, "5G");
    }

    #[test]
    fn test_not_applicable_secondary_attribute_ignored() {
        let product = extract(
            &record(json!({"name": "Phone X", "GTM_cofa": "n/a"})),
            &test_ctx(),
        );

        assert_eq!(product.specs, sentinel::SPECS);
    }

    #[test]
    fn test_discounted_price_preferred() {
        let product = extract(
            &record(json!({"jarir_final_price": 899, "price": 999})),
            &test_ctx(),
        );

        assert_eq!(product.new_price, 899.0);
        assert_eq!(product.old_price, 999.0);
    }

    #[test]
    fn test_old_price_defaults_to_new_price() {
        let product = extract(&record(json!({"jarir_final_price": 899})), &test_ctx());

        assert_eq!(product.new_price, 899.0);
        assert_eq!(product.old_price, 899.0);
    }

    #[test]
    fn test_new_price_defaults_to_zero() {
        let product = extract(&record(json!({"name": "Phone X"})), &test_ctx());

        assert_eq!(product.new_price, 0.0);
        assert_eq!(product.old_price, 0.0);
    }

    #[test]
    fn test_numeric_string_price_parsed() {
        let product = extract(&record(json!({"price": "1299.5"})), &test_ctx());

        assert_eq!(product.new_price, 1299.5);
        assert_eq!(product.old_price, 1299.5);
    }

    #[test]
    fn test_link_built_from_slug() {
        let product = extract(&record(json!({"url_key": "phone-x-128gb"})), &test_ctx());

        assert_eq!(product.link, "https://www.jarir.com/phone-x-128gb.html");
    }

    #[test]
    fn test_category_ignores_record_field() {
        let product = extract(
            &record(json!({"GTM_category": "Mobiles & Tablets"})),
            &test_ctx(),
        );

        assert_eq!(product.category, "smartphones");
    }

    #[test]
    fn test_stock_tracked_variant() {
        let mut ctx = test_ctx();
        ctx.track_stock = true;
        ctx.store = Some("jarir".to_string());

        let in_stock = extract(&record(json!({"klevu_stock_flag": 1})), &ctx);
        assert_eq!(in_stock.stock, Some(true));
        assert_eq!(in_stock.store.as_deref(), Some("jarir"));

        let out_of_stock = extract(&record(json!({"klevu_stock_flag": 0})), &ctx);
        assert_eq!(out_of_stock.stock, Some(false));

        let missing_flag = extract(&record(json!({})), &ctx);
        assert_eq!(missing_flag.stock, Some(false));
    }
}
