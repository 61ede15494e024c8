use chrono::Utc;

use super::actions::{Ignored, OrderAction, Transition};
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderKind, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Action = OrderAction;
    type ActionResult = Transition;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order in PENDING, stamped with the current time.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        match &params.kind {
            OrderKind::Store { items, .. } if items.is_empty() => {
                return Err(OrderError::ValidationError("store order without items".to_string()));
            }
            OrderKind::Errand { description, .. } if description.trim().is_empty() => {
                return Err(OrderError::ValidationError("errand description is required".to_string()));
            }
            _ => {}
        }

        Ok(Self {
            id,
            customer_id: params.customer_id,
            courier_id: None,
            kind: params.kind,
            origin_address: params.origin_address,
            dest_address: params.dest_address,
            status: OrderStatus::Pending,
            total_price: params.total_price,
            delivery_fee: params.delivery_fee,
            tip: params.tip,
            created_at: Utc::now(),
            pickup_photo: None,
            receipt_photo: None,
            settled: false,
        })
    }

    /// Applies a lifecycle step.
    ///
    /// An action from the wrong status leaves the order untouched and reports
    /// [`Ignored::WrongStatus`].
    fn handle_action(&mut self, action: OrderAction) -> Result<Transition, OrderError> {
        let expected = action.required_status();
        if self.status != expected {
            return Ok(Transition::Ignored(Ignored::WrongStatus {
                expected,
                actual: self.status,
            }));
        }

        match action {
            OrderAction::Accept { courier_id } => {
                self.courier_id = Some(courier_id);
                self.status = OrderStatus::Accepted;
            }
            OrderAction::PickUp { photo } => {
                self.pickup_photo = Some(photo);
                self.status = OrderStatus::PickedUp;
            }
            OrderAction::Arrive => {
                self.status = OrderStatus::Delivered;
            }
            OrderAction::Verify { photo } => {
                self.receipt_photo = Some(photo);
                self.status = OrderStatus::Completed;
            }
            OrderAction::MarkSettled => {
                if self.settled {
                    return Ok(Transition::Ignored(Ignored::AlreadySettled));
                }
                self.settled = true;
            }
        }
        Ok(Transition::Applied(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhotoRef;

    fn errand(id: &str) -> Order {
        Order::from_create_params(
            id.to_string(),
            OrderCreate {
                customer_id: "u1".to_string(),
                kind: OrderKind::Errand {
                    description: "Documents, keep dry".to_string(),
                    item_photo: None,
                },
                origin_address: "Office".to_string(),
                dest_address: "Home".to_string(),
                total_price: 15.0,
                delivery_fee: 15.0,
                tip: None,
            },
        )
        .unwrap()
    }

    fn completed(id: &str) -> Order {
        let mut order = errand(id);
        for action in [
            OrderAction::Accept { courier_id: "r1".to_string() },
            OrderAction::PickUp { photo: photo("p1") },
            OrderAction::Arrive,
            OrderAction::Verify { photo: photo("r1") },
        ] {
            order.handle_action(action).unwrap();
        }
        order
    }

    fn photo(raw: &str) -> PhotoRef {
        PhotoRef::parse(raw).unwrap()
    }

    #[test]
    fn new_order_starts_pending() {
        let order = errand("ORD-1");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.courier_id, None);
        assert_eq!(order.total_price, 15.0);
    }

    #[test]
    fn rejects_empty_errand_description() {
        let result = Order::from_create_params(
            "ORD-1".to_string(),
            OrderCreate {
                customer_id: "u1".to_string(),
                kind: OrderKind::Errand { description: "  ".to_string(), item_photo: None },
                origin_address: "a".to_string(),
                dest_address: "b".to_string(),
                total_price: 15.0,
                delivery_fee: 15.0,
                tip: None,
            },
        );
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
    }

    #[test]
    fn walks_the_full_lifecycle() {
        let mut order = errand("ORD-1");

        let steps = vec![
            (OrderAction::Accept { courier_id: "r1".to_string() }, OrderStatus::Accepted),
            (OrderAction::PickUp { photo: photo("p1") }, OrderStatus::PickedUp),
            (OrderAction::Arrive, OrderStatus::Delivered),
            (OrderAction::Verify { photo: photo("r1") }, OrderStatus::Completed),
        ];
        for (action, status) in steps {
            let applied = order.handle_action(action).unwrap().applied().unwrap();
            assert_eq!(applied.status, status);
        }

        assert_eq!(order.courier_id.as_deref(), Some("r1"));
        assert_eq!(order.pickup_photo, Some(photo("p1")));
        assert_eq!(order.receipt_photo, Some(photo("r1")));
        assert!(order.status.is_terminal());
    }

    #[test]
    fn second_accept_keeps_first_courier() {
        let mut order = errand("ORD-1");
        assert!(order
            .handle_action(OrderAction::Accept { courier_id: "r1".to_string() })
            .unwrap()
            .is_applied());

        let second = order
            .handle_action(OrderAction::Accept { courier_id: "r2".to_string() })
            .unwrap();
        assert_eq!(
            second,
            Transition::Ignored(Ignored::WrongStatus {
                expected: OrderStatus::Pending,
                actual: OrderStatus::Accepted,
            })
        );
        assert_eq!(order.courier_id.as_deref(), Some("r1"));
    }

    #[test]
    fn out_of_order_steps_are_ignored() {
        let mut order = errand("ORD-1");
        let before = order.clone();

        for action in [
            OrderAction::PickUp { photo: photo("p1") },
            OrderAction::Arrive,
            OrderAction::Verify { photo: photo("r1") },
        ] {
            let outcome = order.handle_action(action).unwrap();
            assert!(!outcome.is_applied());
        }
        assert_eq!(order, before);
    }

    #[test]
    fn settlement_is_recorded_once_after_completion() {
        let mut order = errand("ORD-1");
        assert_eq!(
            order.handle_action(OrderAction::MarkSettled).unwrap(),
            Transition::Ignored(Ignored::WrongStatus {
                expected: OrderStatus::Completed,
                actual: OrderStatus::Pending,
            })
        );
        assert!(!order.settled);

        let mut order = completed("ORD-2");
        assert!(!order.settled);
        let settled = order.handle_action(OrderAction::MarkSettled).unwrap().applied().unwrap();
        assert!(settled.settled);
        assert_eq!(settled.status, OrderStatus::Completed);

        assert_eq!(
            order.handle_action(OrderAction::MarkSettled).unwrap(),
            Transition::Ignored(Ignored::AlreadySettled)
        );
    }

    #[test]
    fn courier_payout_adds_tip_to_fee() {
        let mut order = errand("ORD-1");
        assert_eq!(order.courier_payout(), 15.0);

        order.tip = Some(4.5);
        assert_eq!(order.courier_payout(), 19.5);
    }
}
