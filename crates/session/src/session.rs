use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use guide_pharma_catalog::Catalog;
use guide_pharma_core::{Aggregate, DomainError, DomainResult, MedicineId, OrderId, SessionId};
use guide_pharma_ordering::{
    AddToCart, CartLine, CompleteOrder, MarkItemOutOfStock, Order, OrderStatus, OrderingSession,
    PlaceOrder, RemoveFromCart, SessionCommand, SessionEvent, UpdateQuantity,
};

use crate::export::{CartExport, OrderExport};
use crate::profile::UserProfile;

/// One client's session: catalog + profile + serialized ordering state.
///
/// Cart and ledger mutations execute one at a time; the mutex is the
/// serialization point the single-session model requires. External AI calls
/// live elsewhere and never hold this lock.
#[derive(Debug)]
pub struct PharmacySession {
    catalog: Arc<Catalog>,
    user: UserProfile,
    state: Mutex<OrderingSession>,
}

impl PharmacySession {
    pub fn new(catalog: Arc<Catalog>, user: UserProfile) -> Self {
        Self {
            catalog,
            user,
            state: Mutex::new(OrderingSession::new(SessionId::new())),
        }
    }

    /// Start a session with restored order history (newest-first).
    pub fn with_order_history(catalog: Arc<Catalog>, user: UserProfile, orders: Vec<Order>) -> Self {
        Self {
            catalog,
            user,
            state: Mutex::new(OrderingSession::with_order_history(SessionId::new(), orders)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    fn state(&self) -> MutexGuard<'_, OrderingSession> {
        // Aggregate code does not panic mid-mutation; if a guard was ever
        // poisoned the state is still consistent, so recover it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle + apply under one lock acquisition, so no other operation can
    /// observe a half-applied command.
    fn execute(&self, command: SessionCommand) -> DomainResult<Vec<SessionEvent>> {
        let mut state = self.state();
        let events = state.handle(&command)?;
        for event in &events {
            state.apply(event);
        }
        Ok(events)
    }

    /// Add `quantity` packs of a catalog medicine to the cart.
    ///
    /// Non-positive quantities are rejected (`DomainError::Validation`), not
    /// normalized; unknown medicine ids are `NotFound`.
    pub fn add_to_cart(&self, medicine_id: MedicineId, quantity: u64) -> DomainResult<()> {
        let medicine = self
            .catalog
            .get(medicine_id)
            .ok_or(DomainError::NotFound)?
            .clone();
        self.execute(SessionCommand::AddToCart(AddToCart {
            medicine,
            quantity,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    pub fn remove_from_cart(&self, medicine_id: MedicineId) -> DomainResult<()> {
        self.execute(SessionCommand::RemoveFromCart(RemoveFromCart {
            medicine_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Adjust a line's quantity by `delta`, clamping at 1.
    pub fn update_quantity(&self, medicine_id: MedicineId, delta: i64) -> DomainResult<()> {
        self.execute(SessionCommand::UpdateQuantity(UpdateQuantity {
            medicine_id,
            delta,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.state().cart().lines().to_vec()
    }

    pub fn cart_total(&self) -> u64 {
        self.state().cart().total()
    }

    /// Place an order from the current cart.
    ///
    /// Returns the new order id, or `None` when the cart was empty (a no-op,
    /// not an error). Ledger append and cart clearing are one atomic step.
    pub fn place_order(&self) -> DomainResult<Option<OrderId>> {
        let order_id = OrderId::new();
        let events = self.execute(SessionCommand::PlaceOrder(PlaceOrder {
            order_id,
            occurred_at: Utc::now(),
        }))?;
        if events.is_empty() {
            return Ok(None);
        }
        tracing::info!(%order_id, "order placed");
        Ok(Some(order_id))
    }

    /// All orders, most recent first.
    pub fn orders(&self) -> Vec<Order> {
        self.state().orders().to_vec()
    }

    /// Orders with the given status, preserving newest-first ledger order.
    pub fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.state().orders_by_status(status).cloned().collect()
    }

    pub fn order(&self, order_id: OrderId) -> Option<Order> {
        self.state().order(order_id).cloned()
    }

    /// Administrative: mark a pending order completed.
    pub fn complete_order(&self, order_id: OrderId) -> DomainResult<()> {
        self.execute(SessionCommand::CompleteOrder(CompleteOrder {
            order_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Administrative: mark one fulfilled order item out of stock. The
    /// order's total stays at its placement-time value.
    pub fn mark_item_out_of_stock(
        &self,
        order_id: OrderId,
        medicine_id: MedicineId,
    ) -> DomainResult<()> {
        self.execute(SessionCommand::MarkItemOutOfStock(MarkItemOutOfStock {
            order_id,
            medicine_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Snapshot of the cart for the report collaborator.
    pub fn export_cart(&self) -> CartExport {
        let state = self.state();
        CartExport::new(&self.user.pharmacy_name, state.cart().lines())
    }

    /// Snapshot of a placed order for the report collaborator.
    pub fn export_order(&self, order_id: OrderId) -> DomainResult<OrderExport> {
        let state = self.state();
        let order = state.order(order_id).ok_or(DomainError::NotFound)?;
        Ok(OrderExport::new(&self.user.pharmacy_name, order))
    }
}
