//! Orders
//!
//! Order tracking: the status lifecycle of a placed order, and an in-memory order book that
//! stands in for the order-placement collaborator.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Mutex,
};

use async_trait::async_trait;
use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::info;

use crate::{
    checkout::{OrderPlacer, OrderRequest, PlacementError},
    uuids::TypedUuid,
};

/// Order identifier
pub type OrderId = TypedUuid<Order>;

/// Errors raised by order tracking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// No order has the given id.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The status change is not allowed.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
    },

    /// Another holder of the order book panicked mid-update.
    #[error("order book lock poisoned")]
    Poisoned,
}

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Placed, not yet picked up by the pharmacy.
    #[default]
    Pending,

    /// Being prepared.
    Processing,

    /// Handed to the courier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Cancelled before shipping.
    Cancelled,
}

impl OrderStatus {
    /// The normal progression of an order, used for tracking displays.
    pub const STEPS: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Whether the order can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the order can still be cancelled.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }

    /// Whether `next` directly follows this status.
    #[must_use]
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::Pending, OrderStatus::Processing)
            | (OrderStatus::Processing, OrderStatus::Shipped)
            | (OrderStatus::Shipped, OrderStatus::Delivered) => true,
            (_, OrderStatus::Cancelled) => self.can_cancel(),
            _ => false,
        }
    }

    /// The 1-based step reached and the number of steps, or `None` for a cancelled order.
    #[must_use]
    pub fn progress(&self) -> Option<(usize, usize)> {
        OrderStatus::STEPS
            .iter()
            .position(|step| step == self)
            .map(|idx| (idx + 1, OrderStatus::STEPS.len()))
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    request: OrderRequest,
    status: OrderStatus,
    placed_at: Timestamp,
}

impl Order {
    /// Record a newly placed order as pending.
    #[must_use]
    pub fn new(id: OrderId, request: OrderRequest) -> Self {
        Self {
            id,
            request,
            status: OrderStatus::Pending,
            placed_at: Timestamp::now(),
        }
    }

    /// Move the order to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] if `next` does not follow the current status.
    pub fn transition(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;

        Ok(())
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] once the order has shipped.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.transition(OrderStatus::Cancelled)
    }

    /// Order identifier.
    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// The payload the order was placed from.
    #[must_use]
    pub fn request(&self) -> &OrderRequest {
        &self.request
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// When the order was placed.
    #[must_use]
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// Total units ordered.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.request.item_count()
    }

    /// Unrounded subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.request.subtotal
    }
}

#[derive(Debug, Default)]
struct OrderBookState {
    orders: FxHashMap<OrderId, Order>,
    placed: Vec<OrderId>,
}

/// Process-local order store implementing [`OrderPlacer`].
#[derive(Debug, Default)]
pub struct InMemoryOrderBook {
    state: Mutex<OrderBookState>,
}

impl InMemoryOrderBook {
    /// Create an empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids.
    pub fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        let state = self.state.lock().map_err(|_poisoned| OrderError::Poisoned)?;

        state.orders.get(&id).cloned().ok_or(OrderError::NotFound(id))
    }

    /// Every order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Poisoned`] if the book's lock is poisoned.
    pub fn orders(&self) -> Result<Vec<Order>, OrderError> {
        let state = self.state.lock().map_err(|_poisoned| OrderError::Poisoned)?;

        Ok(state
            .placed
            .iter()
            .filter_map(|id| state.orders.get(id))
            .cloned()
            .collect())
    }

    /// Move an order to `next` and return the new status.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] or [`OrderError::InvalidTransition`].
    pub fn advance(&self, id: OrderId, next: OrderStatus) -> Result<OrderStatus, OrderError> {
        let mut state = self.state.lock().map_err(|_poisoned| OrderError::Poisoned)?;
        let order = state.orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;

        order.transition(next)?;

        info!(order_id = %id, status = %next, "order status changed");

        Ok(order.status())
    }
}

#[async_trait]
impl OrderPlacer for InMemoryOrderBook {
    async fn place_order(&self, order: &OrderRequest) -> Result<OrderId, PlacementError> {
        let id = OrderId::generate();
        let mut state = self
            .state
            .lock()
            .map_err(|_poisoned| PlacementError::Unavailable("order book lock poisoned".into()))?;

        state.orders.insert(id, Order::new(id, order.clone()));
        state.placed.push(id);

        Ok(id)
    }
}
