use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::account_actor::AccountError;
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::catalog::Catalog;
use crate::clients::AccountClient;
use crate::domain::{
    IntentKind, LineItem, Order, OrderCreate, OrderIntent, OrderKind, OrderStatus, PhotoRef, StoreRef,
};
use crate::order_actor::{Ignored, OrderAction, OrderError, Transition};

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(e: FrameworkError<OrderError>) -> Self {
        match e {
            FrameworkError::Entity(e) => e,
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// The order lifecycle manager.
///
/// Owns every state change of an order and keeps the account lock in step:
/// the lock is taken when an order is created and cleared when it is
/// verified. Both surfaces go through this client.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    account_client: AccountClient,
    catalog: Arc<Catalog>,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, account_client: AccountClient, catalog: Arc<Catalog>) -> Self {
        Self {
            inner,
            account_client,
            catalog,
        }
    }

    #[instrument(skip(self, intent))]
    pub async fn create_order(&self, customer_id: &str, intent: OrderIntent) -> Result<Order, OrderError> {
        info!("Processing create_order request");

        // Step 1: Validate and price the intent
        let params = self.price_intent(customer_id, intent)?;
        debug!(total = params.total_price, "Intent priced");

        // Step 2: Take the account lock
        match self.account_client.lock(customer_id).await {
            Ok(()) => info!("Account locked"),
            Err(AccountError::Locked(id)) => {
                warn!("Order rejected: account locked");
                return Err(OrderError::AccountLocked(id));
            }
            Err(AccountError::NotFound(id)) => {
                error!("Account not found");
                return Err(OrderError::InvalidUser(id));
            }
            Err(e) => {
                error!(error = %e, "Account lock failed");
                return Err(OrderError::ActorCommunicationError(e.to_string()));
            }
        }

        // Step 3: Store the order, giving the lock back if that fails
        match self.inner.create(params).await {
            Ok(order) => {
                info!(order_id = %order.id, "Order created");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed, releasing account lock");
                if let Err(release_err) = self.account_client.release(customer_id).await {
                    error!(error = %release_err, "Failed to release account lock");
                }
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn accept_order(&self, order_id: &str, courier_id: &str) -> Result<Transition, OrderError> {
        let action = OrderAction::Accept {
            courier_id: courier_id.to_string(),
        };
        self.transition(order_id, action).await
    }

    #[instrument(skip(self))]
    pub async fn advance_to_picked_up(&self, order_id: &str, pickup_photo: &str) -> Result<Transition, OrderError> {
        let photo = PhotoRef::parse(pickup_photo).ok_or(OrderError::MissingPhoto("confirm pickup"))?;
        self.transition(order_id, OrderAction::PickUp { photo }).await
    }

    #[instrument(skip(self))]
    pub async fn advance_to_delivered(&self, order_id: &str) -> Result<Transition, OrderError> {
        self.transition(order_id, OrderAction::Arrive).await
    }

    /// Completes a delivered order and settles it against the ordering
    /// account: the delivery fee is debited and the lock cleared.
    ///
    /// A completed order whose settlement failed is settled again instead of
    /// being ignored, so the account lock can always be cleared.
    #[instrument(skip(self))]
    pub async fn verify_and_complete(&self, order_id: &str, receipt_photo: &str) -> Result<Transition, OrderError> {
        let photo = PhotoRef::parse(receipt_photo).ok_or(OrderError::MissingPhoto("verify delivery"))?;
        let transition = self.transition(order_id, OrderAction::Verify { photo }).await?;

        let order = match transition {
            Transition::Applied(order) => order,
            Transition::Ignored(Ignored::WrongStatus {
                actual: OrderStatus::Completed,
                ..
            }) => match self.get_order(order_id).await? {
                Some(order) if !order.settled => {
                    warn!("Completed order was never settled, retrying");
                    order
                }
                _ => return Ok(transition),
            },
            Transition::Ignored(_) => return Ok(transition),
        };
        self.settle(order).await
    }

    /// All orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.inner.list().await?;
        orders.reverse();
        Ok(orders)
    }

    /// Orders waiting for a courier.
    pub async fn pending_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.filtered(|o| o.status == OrderStatus::Pending).await
    }

    pub async fn orders_for_customer(&self, customer_id: &str) -> Result<Vec<Order>, OrderError> {
        self.filtered(|o| o.customer_id == customer_id).await
    }

    /// Orders assigned to the courier that are not yet completed.
    pub async fn active_orders_for_courier(&self, courier_id: &str) -> Result<Vec<Order>, OrderError> {
        self.filtered(|o| o.courier_id.as_deref() == Some(courier_id) && !o.status.is_terminal())
            .await
    }

    async fn filtered(&self, keep: impl Fn(&Order) -> bool) -> Result<Vec<Order>, OrderError> {
        Ok(self.list_orders().await?.into_iter().filter(|o| keep(o)).collect())
    }

    async fn transition(&self, order_id: &str, action: OrderAction) -> Result<Transition, OrderError> {
        debug!(?action, "Sending request");
        let transition = match self.inner.perform_action(order_id.to_string(), action).await {
            Ok(transition) => transition,
            Err(FrameworkError::NotFound(_)) => Transition::Ignored(Ignored::UnknownOrder),
            Err(e) => return Err(e.into()),
        };

        match &transition {
            Transition::Applied(order) => info!(status = %order.status, "Order advanced"),
            Transition::Ignored(reason) => warn!(?reason, "Transition ignored"),
        }
        Ok(transition)
    }

    async fn settle(&self, order: Order) -> Result<Transition, OrderError> {
        let balance = self
            .account_client
            .settle(&order.customer_id, order.delivery_fee)
            .await
            .map_err(|e| {
                error!(error = %e, "Settlement failed");
                OrderError::Settlement {
                    order_id: order.id.clone(),
                    reason: e.to_string(),
                }
            })?;
        info!(fee = order.delivery_fee, balance, "Order settled");

        self.transition(&order.id, OrderAction::MarkSettled).await
    }

    /// Validates the intent against the catalog and fixes the total price.
    /// Prices always come from the catalog, never from the caller.
    ///
    /// A store order costs its items plus the store's cart fee. An errand
    /// costs the delivery fee. Either way `delivery_fee` is what verification
    /// later debits.
    fn price_intent(&self, customer_id: &str, intent: OrderIntent) -> Result<OrderCreate, OrderError> {
        if intent.origin_address.trim().is_empty() || intent.dest_address.trim().is_empty() {
            return Err(OrderError::ValidationError("origin and destination are required".to_string()));
        }
        if !intent.delivery_fee.is_finite() || intent.delivery_fee < 0.0 {
            return Err(OrderError::ValidationError(format!(
                "invalid delivery fee {}",
                intent.delivery_fee
            )));
        }

        let (kind, total_price) = match intent.kind {
            IntentKind::Store { store_id, items } => {
                let store = self
                    .catalog
                    .store(&store_id)
                    .ok_or_else(|| OrderError::UnknownStore(store_id.clone()))?;
                if items.is_empty() {
                    return Err(OrderError::EmptyCart(store_id));
                }

                let lines = items
                    .into_iter()
                    .map(|selection| {
                        if selection.quantity == 0 {
                            return Err(OrderError::ValidationError(format!(
                                "quantity for {} must be positive",
                                selection.product_id
                            )));
                        }
                        let product = self.catalog.product(&store.id, &selection.product_id).ok_or_else(|| {
                            OrderError::UnknownProduct {
                                store_id: store.id.clone(),
                                product_id: selection.product_id.clone(),
                            }
                        })?;
                        Ok(LineItem {
                            product: product.clone(),
                            quantity: selection.quantity,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                let subtotal: f64 = lines.iter().map(LineItem::amount).sum();
                let total_price = subtotal + store.delivery_fee;
                let kind = OrderKind::Store {
                    store: StoreRef {
                        id: store.id.clone(),
                        name: store.name.clone(),
                    },
                    items: lines,
                };
                (kind, total_price)
            }
            IntentKind::Errand { description, item_photo } => {
                if description.trim().is_empty() {
                    return Err(OrderError::ValidationError("errand description is required".to_string()));
                }
                (OrderKind::Errand { description, item_photo }, intent.delivery_fee)
            }
        };

        Ok(OrderCreate {
            customer_id: customer_id.to_string(),
            kind,
            origin_address: intent.origin_address,
            dest_address: intent.dest_address,
            total_price,
            delivery_fee: intent.delivery_fee,
            tip: intent.tip,
        })
    }
}
