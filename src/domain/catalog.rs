use std::fmt;

/// Which home-screen tab a store is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Dining,
    Market,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Dining => f.write_str("DINING"),
            ServiceType::Market => f.write_str("MARKET"),
        }
    }
}

/// Represents a product sold by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// A catalog store and the products it offers.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub service_type: ServiceType,
    pub rating: f64,
    pub distance: String,
    pub image: String,
    /// Flat fee added to every cart total for this store.
    pub delivery_fee: f64,
    pub products: Vec<Product>,
}

impl Store {
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }
}
