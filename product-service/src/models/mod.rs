pub mod product;

pub use product::{validate_create, NewProduct, PRODUCT_COLLECTION};
