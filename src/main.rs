mod account_actor;
mod actor_framework;
mod app_system;
mod cart;
mod catalog;
mod clients;
mod description;
mod domain;
mod order_actor;

#[cfg(test)]
mod mock_framework;

use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, OrderSystem, SystemConfig};
use crate::clients::ErrandForm;
use crate::domain::ServiceType;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    info!("Starting errand dispatch simulation");

    let config = SystemConfig::from_env()?;
    let system = OrderSystem::new(config)?;
    let customer = system.customer.clone();
    let courier = system.courier("r1");
    info!(stores = system.catalog().stores().len(), "Catalog loaded");

    // Customer fills a cart and checks out
    let span = tracing::info_span!("store_order");
    let store_order = async {
        let store_id = customer
            .browse(ServiceType::Dining, "")
            .into_iter()
            .next()
            .map(|s| s.id)
            .ok_or("catalog has no dining stores")?;
        let store = customer.store(&store_id).ok_or("store disappeared")?;
        info!(store = %store.name, "Browsing store");

        let mut cart = customer.open_cart(&store.id).ok_or("store disappeared")?;
        for product in store.products.iter().take(2) {
            cart.increment(&product.id);
        }
        if let Some(product) = store.products.first() {
            // One more, then back to one
            cart.increment(&product.id);
            cart.decrement(&product.id);
        }
        if cart.is_empty() {
            return Err(Box::<dyn std::error::Error>::from("cart is empty"));
        }
        let summary = cart.summary(&store);
        info!(items = cart.item_count(), total = summary.total, "Cart ready");

        let order = customer.checkout(&cart, None).await?;
        cart.clear();
        Ok::<_, Box<dyn std::error::Error>>(order)
    }
    .instrument(span)
    .await?;
    info!(
        order_id = %store_order.id,
        customer_id = customer.account_id(),
        total = store_order.total_price,
        "Store order placed"
    );

    // A second order is refused until the first is verified
    let description = customer.polish_description("fragile glass vase").await;
    let errand = ErrandForm {
        origin_address: "Office".to_string(),
        dest_address: "Home".to_string(),
        description,
        item_photo: None,
        tip: None,
    };
    if let Err(e) = customer.place_errand(errand.clone()).await {
        warn!(error = %e, "Errand refused");
    }

    // Courier picks the order from the pool and works it
    let span = tracing::info_span!("delivery", courier_id = courier.courier_id());
    async {
        let order = courier
            .available_orders()
            .await?
            .into_iter()
            .next()
            .ok_or("order pool is empty")?;
        info!(order_id = %order.id, title = order.title(), payout = order.courier_payout(), "Order in pool");

        let accepted = courier.accept(&order.id).await?.applied().ok_or("order taken by someone else")?;
        info!(order_id = %accepted.id, status = %accepted.status, "Order accepted");

        let picked = courier.confirm_pickup(&order.id, "photos/pickup-1.jpg").await?;
        if let Some(photo) = picked.applied().and_then(|o| o.pickup_photo) {
            info!(photo = photo.as_str(), "Pickup confirmed");
        }
        courier.confirm_arrival(&order.id).await?;
        info!(active = courier.active_orders().await?.len(), "Arrived at destination");

        customer.verify_delivery(&order.id, "photos/receipt-1.jpg").await?;
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let account = customer.profile().await?;
    info!(balance = account.balance, locked = account.is_locked, "Customer settled");

    // Now the errand goes through
    let errand_order = customer.place_errand(errand).await?;
    info!(order_id = %errand_order.id, status = %errand_order.status, "Errand placed");

    for order in customer.my_orders().await? {
        info!(order_id = %order.id, title = order.title(), status = %order.status, "Order history");
    }

    system.shutdown().await?;

    info!("Simulation completed successfully");
    Ok(())
}
