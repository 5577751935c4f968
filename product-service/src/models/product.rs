use crate::dtos::CreateProductRequest;
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

pub const PRODUCT_COLLECTION: &str = "product";

/// A product that passed validation, with every default applied.
/// This is exactly what gets persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub image: Option<String>,
}

impl NewProduct {
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Check an inbound product against the creation rules and apply defaults.
///
/// `title`, `price` and `category` are required; `title` and `category`
/// must be non-empty and `price` must be non-negative. All failures are
/// collected, keyed by field name. `in_stock` defaults to `true`.
pub fn validate_create(input: CreateProductRequest) -> Result<NewProduct, ValidationErrors> {
    let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);

    let title = required(&mut errors, "title", input.title);
    let price = required(&mut errors, "price", input.price);
    let category = required(&mut errors, "category", input.category);

    match (title, price, category) {
        (Some(title), Some(price), Some(category)) if errors.errors().is_empty() => Ok(NewProduct {
            title,
            description: input.description,
            price,
            category,
            in_stock: input.in_stock.unwrap_or(true),
            image: input.image,
        }),
        _ => Err(errors),
    }
}

fn required<T>(errors: &mut ValidationErrors, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        let mut error = ValidationError::new("required");
        error.message = Some(format!("{} is required", field).into());
        errors.add(field, error);
    }
    value
}
