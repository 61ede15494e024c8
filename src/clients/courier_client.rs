use tracing::{debug, instrument};

use crate::clients::OrderClient;
use crate::domain::Order;
use crate::order_actor::{Ignored, OrderError, Transition};

/// The courier-facing surface, bound to one courier id.
#[derive(Clone)]
pub struct CourierClient {
    courier_id: String,
    orders: OrderClient,
}

impl CourierClient {
    pub fn new(courier_id: impl Into<String>, orders: OrderClient) -> Self {
        Self {
            courier_id: courier_id.into(),
            orders,
        }
    }

    pub fn courier_id(&self) -> &str {
        &self.courier_id
    }

    /// The order pool: everything still waiting for a courier.
    pub async fn available_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.pending_orders().await
    }

    /// Orders this courier has accepted and not yet seen completed.
    pub async fn active_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.active_orders_for_courier(&self.courier_id).await
    }

    pub async fn accept(&self, order_id: &str) -> Result<Transition, OrderError> {
        self.orders.accept_order(order_id, &self.courier_id).await
    }

    #[instrument(skip(self), fields(courier_id = %self.courier_id))]
    pub async fn confirm_pickup(&self, order_id: &str, pickup_photo: &str) -> Result<Transition, OrderError> {
        if let Some(ignored) = self.check_assignment(order_id).await? {
            return Ok(ignored);
        }
        self.orders.advance_to_picked_up(order_id, pickup_photo).await
    }

    #[instrument(skip(self), fields(courier_id = %self.courier_id))]
    pub async fn confirm_arrival(&self, order_id: &str) -> Result<Transition, OrderError> {
        if let Some(ignored) = self.check_assignment(order_id).await? {
            return Ok(ignored);
        }
        self.orders.advance_to_delivered(order_id).await
    }

    // The courier on an order never changes once set, so checking it before
    // the transition cannot race with another courier.
    async fn check_assignment(&self, order_id: &str) -> Result<Option<Transition>, OrderError> {
        let ignored = match self.orders.get_order(order_id).await? {
            None => Some(Ignored::UnknownOrder),
            Some(order) if order.courier_id.as_deref() == Some(self.courier_id.as_str()) => None,
            Some(order) if order.courier_id.is_none() => None,
            Some(_) => {
                debug!("Order assigned to another courier");
                Some(Ignored::NotAssigned)
            }
        };
        Ok(ignored.map(Transition::Ignored))
    }
}
