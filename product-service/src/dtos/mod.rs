pub mod products;

pub use products::{CreateProductRequest, ListProductsParams, ProductView};
