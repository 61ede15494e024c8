//! Read-only store catalog.

mod mock;

use crate::domain::{Product, ServiceType, Store};

/// Immutable list of stores. Shared between surfaces behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stores: Vec<Store>,
}

impl Catalog {
    pub fn new(stores: Vec<Store>) -> Self {
        Self { stores }
    }

    /// The synthetic catalog the application ships with.
    pub fn mock() -> Self {
        Self::new(mock::stores())
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn store(&self, store_id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == store_id)
    }

    pub fn product(&self, store_id: &str, product_id: &str) -> Option<&Product> {
        self.store(store_id)?.product(product_id)
    }

    /// Stores of one service type whose name contains `query`.
    /// An empty query matches every store of that type.
    pub fn browse(&self, service_type: ServiceType, query: &str) -> Vec<&Store> {
        let query = query.trim().to_lowercase();
        self.stores
            .iter()
            .filter(|s| s.service_type == service_type)
            .filter(|s| query.is_empty() || s.name.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_filters_by_type_and_name() {
        let catalog = Catalog::mock();

        let dining: Vec<&str> = catalog
            .browse(ServiceType::Dining, "")
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(dining, vec!["s1", "s2"]);

        let pizza = catalog.browse(ServiceType::Dining, "pizza");
        assert_eq!(pizza.len(), 1);
        assert_eq!(pizza[0].id, "s2");

        assert!(catalog.browse(ServiceType::Market, "pizza").is_empty());
    }

    #[test]
    fn product_lookup_is_scoped_to_store() {
        let catalog = Catalog::mock();
        assert_eq!(catalog.product("s1", "p1").map(|p| p.price), Some(19.5));
        assert!(catalog.product("s2", "p1").is_none());
        assert!(catalog.product("nope", "p1").is_none());
    }
}
