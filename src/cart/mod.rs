//! Per-store shopping cart.
//!
//! A [`Cart`] only holds quantities. Prices, line ordering and totals are
//! derived from the store on every [`Cart::summary`] call, so there is no
//! cached total to go stale.

use std::collections::HashMap;

use crate::domain::{ItemSelection, LineItem, Store};

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    store_id: String,
    quantities: HashMap<String, u32>,
}

/// Priced view of a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    /// In catalog order, quantities > 0 only.
    pub lines: Vec<LineItem>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    /// `subtotal + delivery_fee`. The fee applies even to an empty cart.
    pub total: f64,
}

impl Cart {
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            quantities: HashMap::new(),
        }
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Adds one unit and returns the new quantity.
    pub fn increment(&mut self, product_id: &str) -> u32 {
        let quantity = self.quantities.entry(product_id.to_string()).or_insert(0);
        *quantity += 1;
        *quantity
    }

    /// Removes one unit and returns the new quantity. Entries never sit at zero.
    pub fn decrement(&mut self, product_id: &str) -> u32 {
        match self.quantities.get_mut(product_id) {
            Some(quantity) if *quantity > 1 => {
                *quantity -= 1;
                *quantity
            }
            Some(_) => {
                self.quantities.remove(product_id);
                0
            }
            None => 0,
        }
    }

    pub fn quantity(&self, product_id: &str) -> u32 {
        self.quantities.get(product_id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Total number of units across all products.
    pub fn item_count(&self) -> u32 {
        self.quantities.values().sum()
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    pub fn summary(&self, store: &Store) -> CartSummary {
        let lines: Vec<LineItem> = store
            .products
            .iter()
            .filter_map(|product| match self.quantity(&product.id) {
                0 => None,
                quantity => Some(LineItem { product: product.clone(), quantity }),
            })
            .collect();
        let subtotal: f64 = lines.iter().map(LineItem::amount).sum();

        CartSummary {
            lines,
            subtotal,
            delivery_fee: store.delivery_fee,
            total: subtotal + store.delivery_fee,
        }
    }

    /// Product selections for checkout, in catalog order. Products that the
    /// store does not carry are dropped.
    pub fn selections(&self, store: &Store) -> Vec<ItemSelection> {
        self.summary(store)
            .lines
            .into_iter()
            .map(|line| ItemSelection {
                product_id: line.product.id,
                quantity: line.quantity,
            })
            .collect()
    }
}
