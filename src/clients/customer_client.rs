use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::account_actor::AccountError;
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::clients::{AccountClient, OrderClient};
use crate::description::DescriptionWriter;
use crate::domain::{Account, IntentKind, Order, OrderIntent, PhotoRef, ServiceType, Store};
use crate::order_actor::{Ignored, OrderError, Transition};

pub const DEFAULT_DEST_ADDRESS: &str = "My delivery address";

/// Errand request as filled in by the customer.
#[derive(Debug, Clone, Default)]
pub struct ErrandForm {
    pub origin_address: String,
    pub dest_address: String,
    pub description: String,
    pub item_photo: Option<String>,
    pub tip: Option<f64>,
}

/// The customer-facing surface, bound to one account.
#[derive(Clone)]
pub struct CustomerClient {
    account_id: String,
    orders: OrderClient,
    accounts: AccountClient,
    catalog: Arc<Catalog>,
    writer: DescriptionWriter,
    delivery_fee: f64,
}

impl CustomerClient {
    pub fn new(
        account_id: impl Into<String>,
        orders: OrderClient,
        accounts: AccountClient,
        catalog: Arc<Catalog>,
        writer: DescriptionWriter,
        delivery_fee: f64,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            orders,
            accounts,
            catalog,
            writer,
            delivery_fee,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn browse(&self, service_type: ServiceType, query: &str) -> Vec<Store> {
        self.catalog.browse(service_type, query).into_iter().cloned().collect()
    }

    pub fn store(&self, store_id: &str) -> Option<Store> {
        self.catalog.store(store_id).cloned()
    }

    /// Starts an empty cart for a known store.
    pub fn open_cart(&self, store_id: &str) -> Option<Cart> {
        self.catalog.store(store_id).map(|s| Cart::new(s.id.clone()))
    }

    /// Places a store order from the cart contents.
    #[instrument(skip(self, cart), fields(store_id = %cart.store_id()))]
    pub async fn checkout(&self, cart: &Cart, dest_address: Option<&str>) -> Result<Order, OrderError> {
        let store = self
            .catalog
            .store(cart.store_id())
            .ok_or_else(|| OrderError::UnknownStore(cart.store_id().to_string()))?;
        let items = cart.selections(store);
        if items.is_empty() {
            return Err(OrderError::EmptyCart(store.id.clone()));
        }

        let intent = OrderIntent {
            kind: IntentKind::Store {
                store_id: store.id.clone(),
                items,
            },
            origin_address: store.name.clone(),
            dest_address: dest_address.unwrap_or(DEFAULT_DEST_ADDRESS).to_string(),
            delivery_fee: self.delivery_fee,
            tip: None,
        };
        self.orders.create_order(&self.account_id, intent).await
    }

    #[instrument(skip(self, form))]
    pub async fn place_errand(&self, form: ErrandForm) -> Result<Order, OrderError> {
        if form.origin_address.trim().is_empty()
            || form.dest_address.trim().is_empty()
            || form.description.trim().is_empty()
        {
            return Err(OrderError::ValidationError(
                "origin, destination and description are required".to_string(),
            ));
        }

        let intent = OrderIntent {
            kind: IntentKind::Errand {
                description: form.description,
                item_photo: form.item_photo.and_then(PhotoRef::parse),
            },
            origin_address: form.origin_address,
            dest_address: form.dest_address,
            delivery_fee: self.delivery_fee,
            tip: form.tip,
        };
        self.orders.create_order(&self.account_id, intent).await
    }

    /// Suggests a delivery remark for the errand form. Never fails.
    pub async fn polish_description(&self, keywords: &str) -> String {
        self.writer.polish(keywords).await
    }

    /// The customer's orders, newest first.
    pub async fn my_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.orders_for_customer(&self.account_id).await
    }

    pub async fn profile(&self) -> Result<Account, AccountError> {
        self.accounts
            .get_account(&self.account_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(self.account_id.clone()))
    }

    /// Confirms receipt of one of this customer's orders.
    #[instrument(skip(self))]
    pub async fn verify_delivery(&self, order_id: &str, receipt_photo: &str) -> Result<Transition, OrderError> {
        match self.orders.get_order(order_id).await? {
            None => return Ok(Transition::Ignored(Ignored::UnknownOrder)),
            Some(order) if order.customer_id != self.account_id => {
                debug!("Order belongs to another customer");
                return Ok(Transition::Ignored(Ignored::NotOwner));
            }
            Some(_) => {}
        }
        let transition = self.orders.verify_and_complete(order_id, receipt_photo).await?;
        if transition.is_applied() {
            info!("Delivery verified");
        }
        Ok(transition)
    }
}
