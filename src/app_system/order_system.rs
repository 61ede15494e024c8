use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use super::{SystemConfig, SystemError};
use crate::actor_framework::ResourceActor;
use crate::catalog::Catalog;
use crate::clients::{AccountClient, CourierClient, CustomerClient, OrderClient};
use crate::description::DescriptionWriter;
use crate::domain::{Account, AccountCreate, Order};

/// The main application system that orchestrates all actors.
///
/// Starts the account and order actors, seeds the single customer account
/// and hands out the customer and courier surfaces. Both surfaces share one
/// [`OrderClient`], so they always see the same orders.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub account_client: AccountClient,
    pub customer: CustomerClient,
    catalog: Arc<Catalog>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the system with the mock catalog. Must run inside a Tokio runtime.
    pub fn new(config: SystemConfig) -> Result<Self, SystemError> {
        Self::with_catalog(config, Catalog::mock())
    }

    pub fn with_catalog(config: SystemConfig, catalog: Catalog) -> Result<Self, SystemError> {
        info!("Starting order system");
        let catalog = Arc::new(catalog);

        // 1. Account Service, seeded with the session's customer
        let account_id_counter = Arc::new(AtomicU64::new(1));
        let next_account_id = move || {
            let id = account_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("u{}", id)
        };

        let (mut account_actor, account_resource_client) =
            ResourceActor::<Account>::new(config.actor_buffer_size, next_account_id);
        let customer_id = account_actor.seed(AccountCreate {
            name: config.customer_name.clone(),
            balance: config.initial_balance,
        })?;
        info!(customer_id = %customer_id, balance = config.initial_balance, "Customer account seeded");
        let account_client = AccountClient::new(account_resource_client);
        let account_handle = tokio::spawn(account_actor.run());

        // 2. Order Service
        let order_id_counter = Arc::new(AtomicU64::new(1));
        let next_order_id = move || {
            let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("ORD-{:06}", id)
        };

        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.actor_buffer_size, next_order_id);
        let order_client = OrderClient::new(order_resource_client, account_client.clone(), catalog.clone());
        let order_handle = tokio::spawn(order_actor.run());

        // 3. Customer surface
        let customer = CustomerClient::new(
            customer_id,
            order_client.clone(),
            account_client.clone(),
            catalog.clone(),
            DescriptionWriter::new(config.description.clone()),
            config.delivery_fee,
        );

        Ok(Self {
            order_client,
            account_client,
            customer,
            catalog,
            handles: vec![account_handle, order_handle],
        })
    }

    /// A courier surface over the same order list.
    pub fn courier(&self, courier_id: impl Into<String>) -> CourierClient {
        CourierClient::new(courier_id, self.order_client.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // Explicit shutdown: surfaces handed out to callers may still hold
        // senders, so waiting for the channels to close is not enough.
        if let Err(e) = self.order_client.shutdown().await {
            error!(error = %e, "Order actor already stopped");
        }
        if let Err(e) = self.account_client.shutdown().await {
            error!(error = %e, "Account actor already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::Shutdown(format!("{:?}", e)));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
