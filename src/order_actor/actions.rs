use crate::domain::{Order, OrderStatus, PhotoRef};

/// Lifecycle actions for Order entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// PENDING -> ACCEPTED, assigning the courier.
    Accept { courier_id: String },
    /// ACCEPTED -> PICKED_UP, recording the courier's pickup photo.
    PickUp { photo: PhotoRef },
    /// PICKED_UP -> DELIVERED.
    Arrive,
    /// DELIVERED -> COMPLETED, recording the customer's receipt photo.
    Verify { photo: PhotoRef },
    /// Records that the delivery fee was debited. COMPLETED only, once.
    MarkSettled,
}

impl OrderAction {
    /// The status this action must start from.
    pub fn required_status(&self) -> OrderStatus {
        match self {
            OrderAction::Accept { .. } => OrderStatus::Pending,
            OrderAction::PickUp { .. } => OrderStatus::Accepted,
            OrderAction::Arrive => OrderStatus::PickedUp,
            OrderAction::Verify { .. } => OrderStatus::Delivered,
            OrderAction::MarkSettled => OrderStatus::Completed,
        }
    }
}

/// Outcome of a lifecycle action.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The order moved forward; carries the updated order.
    Applied(Order),
    /// Nothing changed.
    Ignored(Ignored),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ignored {
    UnknownOrder,
    /// The order belongs to another customer.
    NotOwner,
    /// The order is assigned to another courier.
    NotAssigned,
    WrongStatus { expected: OrderStatus, actual: OrderStatus },
    AlreadySettled,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    pub fn applied(self) -> Option<Order> {
        match self {
            Transition::Applied(order) => Some(order),
            Transition::Ignored(_) => None,
        }
    }
}
