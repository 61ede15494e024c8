use chrono::{DateTime, Utc};
use std::fmt;

use super::catalog::Product;

/// Lifecycle status of an order. Transitions are strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Accepted,
    PickedUp,
    Delivered,
    Completed,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Completed
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::PickedUp => "PICKED_UP",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
        };
        f.write_str(label)
    }
}

/// Opaque reference to a captured image. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Returns `None` for empty or whitespace-only references.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store identity as recorded on an order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRef {
    pub id: String,
    pub name: String,
}

/// A purchased product with its quantity, priced at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// What is being delivered. Exactly one facet exists per order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderKind {
    Store { store: StoreRef, items: Vec<LineItem> },
    Errand { description: String, item_photo: Option<PhotoRef> },
}

/// Represents a delivery order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub courier_id: Option<String>,
    pub kind: OrderKind,
    pub origin_address: String,
    pub dest_address: String,
    pub status: OrderStatus,
    pub total_price: f64,
    pub delivery_fee: f64,
    pub tip: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub pickup_photo: Option<PhotoRef>,
    pub receipt_photo: Option<PhotoRef>,
    /// Set once the delivery fee has been debited from the customer.
    pub settled: bool,
}

impl Order {
    /// What the courier earns for the run.
    pub fn courier_payout(&self) -> f64 {
        self.delivery_fee + self.tip.unwrap_or(0.0)
    }

    /// Display title: the store name, or a generic label for errands.
    pub fn title(&self) -> &str {
        match &self.kind {
            OrderKind::Store { store, .. } => store.name.as_str(),
            OrderKind::Errand { .. } => "Errand delivery",
        }
    }
}

/// Parameters for storing a new order. Built by the order client after the
/// intent has been validated and priced.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: String,
    pub kind: OrderKind,
    pub origin_address: String,
    pub dest_address: String,
    pub total_price: f64,
    pub delivery_fee: f64,
    pub tip: Option<f64>,
}

/// A product chosen by the customer, before it is priced from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSelection {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntentKind {
    Store { store_id: String, items: Vec<ItemSelection> },
    Errand { description: String, item_photo: Option<PhotoRef> },
}

/// Order-creation input coming from a customer surface.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderIntent {
    pub kind: IntentKind,
    pub origin_address: String,
    pub dest_address: String,
    pub delivery_fee: f64,
    pub tip: Option<f64>,
}
