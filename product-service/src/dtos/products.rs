use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inbound body of `POST /api/products`.
///
/// Required fields are optional at the type level so that a missing field
/// is reported by [`crate::models::validate_create`] with its name, instead
/// of failing deserialization as a whole.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must be greater than or equal to 0"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub limit: Option<i64>,
    pub category: Option<String>,
}

/// Wire shape of a product. Every field is always present; optional ones
/// serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub image: Option<String>,
}

impl From<&Document> for ProductView {
    /// Never fails: stored records may predate the current schema, so
    /// anything missing or of the wrong type falls back to its default.
    fn from(doc: &Document) -> Self {
        Self {
            id: id_string(doc.get("_id")),
            title: text_or_empty(doc.get("title")),
            description: optional_text(doc.get("description")),
            price: coerce_price(doc.get("price")),
            category: text_or_empty(doc.get("category")),
            in_stock: coerce_in_stock(doc.get("in_stock")),
            image: optional_text(doc.get("image")),
        }
    }
}

impl From<Document> for ProductView {
    fn from(doc: Document) -> Self {
        Self::from(&doc)
    }
}

fn id_string(value: Option<&Bson>) -> String {
    match value {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn text_or_empty(value: Option<&Bson>) -> String {
    optional_text(value).unwrap_or_default()
}

fn optional_text(value: Option<&Bson>) -> Option<String> {
    match value {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn coerce_price(value: Option<&Bson>) -> f64 {
    let price = match value {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        Some(Bson::Int64(v)) => *v as f64,
        Some(Bson::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if price.is_finite() {
        price
    } else {
        0.0
    }
}

fn coerce_in_stock(value: Option<&Bson>) -> bool {
    match value {
        Some(Bson::Boolean(b)) => *b,
        Some(Bson::Int32(v)) => *v != 0,
        Some(Bson::Int64(v)) => *v != 0,
        Some(Bson::Double(v)) => *v != 0.0,
        _ => true,
    }
}
