use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use guide_pharma_catalog::Medicine;
use guide_pharma_core::{
    Aggregate, AggregateRoot, DomainError, Event, MedicineId, OrderId, SessionId,
};

use crate::cart::Cart;
use crate::order::{FulfillmentStatus, Order, OrderStatus};

/// Aggregate root: the ordering state of one pharmacy session.
///
/// Owns the cart and the order ledger together so that placing an order is a
/// single event: the ledger gains the order and the cart empties in one
/// `apply`, with no observable in-between state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingSession {
    id: SessionId,
    cart: Cart,
    /// Newest-first; orders are only ever prepended, never deleted.
    orders: Vec<Order>,
    version: u64,
}

impl OrderingSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            cart: Cart::new(),
            orders: Vec::new(),
            version: 0,
        }
    }

    /// Seed the ledger with pre-existing orders (e.g. restored history).
    /// Ledger order is kept as given, assumed newest-first.
    pub fn with_order_history(id: SessionId, orders: Vec<Order>) -> Self {
        Self {
            id,
            cart: Cart::new(),
            orders,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// All placed orders, most recent first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders matching a status, preserving newest-first ledger order.
    pub fn orders_by_status(&self, status: OrderStatus) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |o| o.status() == status)
    }

    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id_typed() == order_id)
    }
}

impl AggregateRoot for OrderingSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddToCart. Accumulates onto an existing line for the same
/// medicine; never creates a duplicate line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub medicine: Medicine,
    /// Packs to add; must be at least 1 (rejected otherwise, not normalized).
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveFromCart. Removing an absent line is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromCart {
    pub medicine_id: MedicineId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateQuantity. The resulting quantity clamps at 1; decrementing
/// past the floor neither removes the line nor errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub medicine_id: MedicineId,
    pub delta: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: PlaceOrder. An empty cart yields no events (no-op).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    /// Fresh identifier supplied by the caller (UUIDv7; uniqueness against the
    /// existing ledger is still checked).
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CompleteOrder (administrative, external fulfillment process).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: MarkItemOutOfStock (administrative, external fulfillment process).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkItemOutOfStock {
    pub order_id: OrderId,
    pub medicine_id: MedicineId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    AddToCart(AddToCart),
    RemoveFromCart(RemoveFromCart),
    UpdateQuantity(UpdateQuantity),
    PlaceOrder(PlaceOrder),
    CompleteOrder(CompleteOrder),
    MarkItemOutOfStock(MarkItemOutOfStock),
}

/// Event: CartLineSet. Carries the resolved absolute quantity (accumulation
/// and clamping are decided in `handle`), so `apply` just stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineSet {
    pub medicine: Medicine,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartLineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRemoved {
    pub medicine_id: MedicineId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderPlaced. Carries the complete frozen order; applying it
/// prepends the order and clears the cart atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order: Order,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderItemOutOfStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemOutOfStock {
    pub order_id: OrderId,
    pub medicine_id: MedicineId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    CartLineSet(CartLineSet),
    CartLineRemoved(CartLineRemoved),
    OrderPlaced(OrderPlaced),
    OrderCompleted(OrderCompleted),
    OrderItemOutOfStock(OrderItemOutOfStock),
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::CartLineSet(_) => "ordering.cart.line_set",
            SessionEvent::CartLineRemoved(_) => "ordering.cart.line_removed",
            SessionEvent::OrderPlaced(_) => "ordering.order.placed",
            SessionEvent::OrderCompleted(_) => "ordering.order.completed",
            SessionEvent::OrderItemOutOfStock(_) => "ordering.order.item_out_of_stock",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::CartLineSet(e) => e.occurred_at,
            SessionEvent::CartLineRemoved(e) => e.occurred_at,
            SessionEvent::OrderPlaced(e) => e.occurred_at,
            SessionEvent::OrderCompleted(e) => e.occurred_at,
            SessionEvent::OrderItemOutOfStock(e) => e.occurred_at,
        }
    }
}

impl Aggregate for OrderingSession {
    type Command = SessionCommand;
    type Event = SessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::CartLineSet(e) => {
                self.cart.set_line(e.medicine.clone(), e.quantity);
            }
            SessionEvent::CartLineRemoved(e) => {
                self.cart.remove_line(e.medicine_id);
            }
            SessionEvent::OrderPlaced(e) => {
                // Atomic from the caller's point of view: one event both
                // records the order and consumes the cart.
                self.orders.insert(0, e.order.clone());
                self.cart.clear();
            }
            SessionEvent::OrderCompleted(e) => {
                if let Some(order) = self.orders.iter_mut().find(|o| o.id_typed() == e.order_id) {
                    order.set_completed();
                }
            }
            SessionEvent::OrderItemOutOfStock(e) => {
                if let Some(order) = self.orders.iter_mut().find(|o| o.id_typed() == e.order_id) {
                    order.set_item_out_of_stock(e.medicine_id);
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SessionCommand::AddToCart(cmd) => self.handle_add_to_cart(cmd),
            SessionCommand::RemoveFromCart(cmd) => self.handle_remove_from_cart(cmd),
            SessionCommand::UpdateQuantity(cmd) => self.handle_update_quantity(cmd),
            SessionCommand::PlaceOrder(cmd) => self.handle_place_order(cmd),
            SessionCommand::CompleteOrder(cmd) => self.handle_complete_order(cmd),
            SessionCommand::MarkItemOutOfStock(cmd) => self.handle_mark_item_out_of_stock(cmd),
        }
    }
}

impl OrderingSession {
    fn handle_add_to_cart(&self, cmd: &AddToCart) -> Result<Vec<SessionEvent>, DomainError> {
        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        let quantity = match self.cart.line(cmd.medicine.id) {
            Some(line) => line.quantity.saturating_add(cmd.quantity),
            None => cmd.quantity,
        };

        Ok(vec![SessionEvent::CartLineSet(CartLineSet {
            medicine: cmd.medicine.clone(),
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_from_cart(
        &self,
        cmd: &RemoveFromCart,
    ) -> Result<Vec<SessionEvent>, DomainError> {
        if self.cart.line(cmd.medicine_id).is_none() {
            // Removing what is not there is a no-op, not an error.
            return Ok(Vec::new());
        }

        Ok(vec![SessionEvent::CartLineRemoved(CartLineRemoved {
            medicine_id: cmd.medicine_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_quantity(
        &self,
        cmd: &UpdateQuantity,
    ) -> Result<Vec<SessionEvent>, DomainError> {
        let Some(line) = self.cart.line(cmd.medicine_id) else {
            return Ok(Vec::new());
        };

        // Floor at 1: decrementing never removes the line.
        let quantity = line.quantity.saturating_add_signed(cmd.delta).max(1);
        if quantity == line.quantity {
            return Ok(Vec::new());
        }

        Ok(vec![SessionEvent::CartLineSet(CartLineSet {
            medicine: line.medicine.clone(),
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_place_order(&self, cmd: &PlaceOrder) -> Result<Vec<SessionEvent>, DomainError> {
        if self.cart.is_empty() {
            return Ok(Vec::new());
        }

        if self.order(cmd.order_id).is_some() {
            return Err(DomainError::conflict("order id already used in this session"));
        }

        let order = Order::new(cmd.order_id, cmd.occurred_at.date_naive(), self.cart.lines());

        Ok(vec![SessionEvent::OrderPlaced(OrderPlaced {
            order,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_complete_order(
        &self,
        cmd: &CompleteOrder,
    ) -> Result<Vec<SessionEvent>, DomainError> {
        let order = self.order(cmd.order_id).ok_or(DomainError::NotFound)?;

        if order.status() != OrderStatus::Pending {
            return Err(DomainError::conflict("only pending orders can be completed"));
        }

        Ok(vec![SessionEvent::OrderCompleted(OrderCompleted {
            order_id: cmd.order_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_mark_item_out_of_stock(
        &self,
        cmd: &MarkItemOutOfStock,
    ) -> Result<Vec<SessionEvent>, DomainError> {
        let order = self.order(cmd.order_id).ok_or(DomainError::NotFound)?;
        let item = order.item(cmd.medicine_id).ok_or(DomainError::NotFound)?;

        if item.fulfillment_status != FulfillmentStatus::Fulfilled {
            return Err(DomainError::conflict("item is already marked out of stock"));
        }

        Ok(vec![SessionEvent::OrderItemOutOfStock(OrderItemOutOfStock {
            order_id: cmd.order_id,
            medicine_id: cmd.medicine_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_pharma_catalog::MedicineCategory;

    fn test_session() -> OrderingSession {
        OrderingSession::new(SessionId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn med(name: &str, pack_price: u64) -> Medicine {
        Medicine {
            id: MedicineId::new(),
            name: name.to_string(),
            category: MedicineCategory::Tablets,
            pack_size: "10x10 Box".to_string(),
            pack_price,
            single_price: pack_price / 10,
        }
    }

    fn add(session: &mut OrderingSession, medicine: &Medicine, quantity: u64) {
        let events = session
            .handle(&SessionCommand::AddToCart(AddToCart {
                medicine: medicine.clone(),
                quantity,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            session.apply(event);
        }
    }

    fn place(session: &mut OrderingSession) -> Vec<SessionEvent> {
        let events = session
            .handle(&SessionCommand::PlaceOrder(PlaceOrder {
                order_id: OrderId::new(),
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            session.apply(event);
        }
        events
    }

    #[test]
    fn repeated_adds_accumulate_into_one_line() {
        let mut session = test_session();
        let medicine = med("Paracetamol 500mg", 250);

        add(&mut session, &medicine, 2);
        add(&mut session, &medicine, 3);
        add(&mut session, &medicine, 1);

        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.cart().line(medicine.id).unwrap().quantity, 6);
    }

    #[test]
    fn zero_quantity_add_is_rejected() {
        let session = test_session();
        let err = session
            .handle(&SessionCommand::AddToCart(AddToCart {
                medicine: med("Ibuprofen 400mg", 350),
                quantity: 0,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("at least 1") => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn removing_absent_line_is_a_noop() {
        let session = test_session();
        let events = session
            .handle(&SessionCommand::RemoveFromCart(RemoveFromCart {
                medicine_id: MedicineId::new(),
                occurred_at: test_time(),
            }))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn remove_deletes_the_line() {
        let mut session = test_session();
        let medicine = med("Betadine Ointment", 600);
        add(&mut session, &medicine, 2);

        let events = session
            .handle(&SessionCommand::RemoveFromCart(RemoveFromCart {
                medicine_id: medicine.id,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            session.apply(event);
        }

        assert!(session.cart().is_empty());
    }

    #[test]
    fn update_quantity_clamps_at_one() {
        let mut session = test_session();
        let medicine = med("Diclofenac Gel", 400);
        add(&mut session, &medicine, 2);

        let events = session
            .handle(&SessionCommand::UpdateQuantity(UpdateQuantity {
                medicine_id: medicine.id,
                delta: -100,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            session.apply(event);
        }

        // Clamped, not removed.
        assert_eq!(session.cart().line(medicine.id).unwrap().quantity, 1);
    }

    #[test]
    fn update_quantity_on_absent_line_is_a_noop() {
        let session = test_session();
        let events = session
            .handle(&SessionCommand::UpdateQuantity(UpdateQuantity {
                medicine_id: MedicineId::new(),
                delta: 5,
                occurred_at: test_time(),
            }))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn place_order_freezes_cart_into_pending_order_and_clears_it() {
        let mut session = test_session();
        let a = med("Aceclofenac 100mg", 450);
        let b = med("Amoxicillin 500mg", 850);
        add(&mut session, &a, 2);
        add(&mut session, &b, 1);
        assert_eq!(session.cart().total(), 1750);

        let events = place(&mut session);
        assert_eq!(events.len(), 1);

        assert!(session.cart().is_empty());
        assert_eq!(session.orders().len(), 1);

        let order = &session.orders()[0];
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.total_amount(), 1750);
        assert_eq!(order.items().len(), 2);
        assert!(order
            .items()
            .iter()
            .all(|i| i.fulfillment_status == FulfillmentStatus::Fulfilled));
    }

    #[test]
    fn place_order_on_empty_cart_is_a_noop() {
        let mut session = test_session();
        let events = place(&mut session);
        assert!(events.is_empty());
        assert!(session.orders().is_empty());
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn reused_order_id_is_rejected() {
        let mut session = test_session();
        let medicine = med("Vitamin C Syrup", 650);
        add(&mut session, &medicine, 1);

        let order_id = OrderId::new();
        let events = session
            .handle(&SessionCommand::PlaceOrder(PlaceOrder {
                order_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            session.apply(event);
        }

        add(&mut session, &medicine, 1);
        let err = session
            .handle(&SessionCommand::PlaceOrder(PlaceOrder {
                order_id,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        match err {
            DomainError::Conflict(msg) if msg.contains("order id already used") => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn orders_are_listed_newest_first_and_filtered_by_status() {
        let mut session = test_session();
        let medicine = med("Multivitamin Drops", 500);

        add(&mut session, &medicine, 1);
        place(&mut session);
        let first_id = session.orders()[0].id_typed();

        add(&mut session, &medicine, 2);
        place(&mut session);
        let second_id = session.orders()[0].id_typed();

        assert_ne!(first_id, second_id);
        // Most recent placement leads the ledger.
        let ids: Vec<OrderId> = session.orders().iter().map(|o| o.id_typed()).collect();
        assert_eq!(ids, vec![second_id, first_id]);

        let events = session
            .handle(&SessionCommand::CompleteOrder(CompleteOrder {
                order_id: first_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            session.apply(event);
        }

        let pending: Vec<OrderId> = session
            .orders_by_status(OrderStatus::Pending)
            .map(|o| o.id_typed())
            .collect();
        let completed: Vec<OrderId> = session
            .orders_by_status(OrderStatus::Completed)
            .map(|o| o.id_typed())
            .collect();
        assert_eq!(pending, vec![second_id]);
        assert_eq!(completed, vec![first_id]);
    }

    #[test]
    fn completing_a_completed_order_is_rejected() {
        let mut session = test_session();
        add(&mut session, &med("Calamine Lotion", 300), 1);
        place(&mut session);
        let order_id = session.orders()[0].id_typed();

        let complete = |session: &OrderingSession| {
            session.handle(&SessionCommand::CompleteOrder(CompleteOrder {
                order_id,
                occurred_at: test_time(),
            }))
        };

        let events = complete(&session).unwrap();
        for event in &events {
            session.apply(event);
        }

        let err = complete(&session).unwrap_err();
        match err {
            DomainError::Conflict(msg) if msg.contains("only pending orders") => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn out_of_stock_transition_keeps_the_snapshot_total() {
        let mut session = test_session();
        let a = med("Silver Sulfadiazine", 750);
        let b = med("Zinc Oxide Paste", 420);
        add(&mut session, &a, 2);
        add(&mut session, &b, 1);
        place(&mut session);

        let order_id = session.orders()[0].id_typed();
        let total_before = session.orders()[0].total_amount();

        let events = session
            .handle(&SessionCommand::MarkItemOutOfStock(MarkItemOutOfStock {
                order_id,
                medicine_id: b.id,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            session.apply(event);
        }

        let order = session.order(order_id).unwrap();
        assert_eq!(
            order.item(b.id).unwrap().fulfillment_status,
            FulfillmentStatus::OutOfStock
        );
        assert_eq!(order.total_amount(), total_before);

        // Second transition on the same item is rejected.
        let err = session
            .handle(&SessionCommand::MarkItemOutOfStock(MarkItemOutOfStock {
                order_id,
                medicine_id: b.id,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        match err {
            DomainError::Conflict(msg) if msg.contains("already marked") => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut session = test_session();
        let medicine = med("Cough Syrup (Herbal)", 550);
        add(&mut session, &medicine, 1);

        let before = session.clone();
        let cmd = SessionCommand::AddToCart(AddToCart {
            medicine: medicine.clone(),
            quantity: 3,
            occurred_at: test_time(),
        });

        let events1 = session.handle(&cmd).unwrap();
        assert_eq!(session, before);
        let events2 = session.handle(&cmd).unwrap();
        assert_eq!(session, before);
        assert_eq!(events1, events2);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum CartOp {
            Add(u8, u64),
            Update(u8, i64),
            Remove(u8),
        }

        fn cart_op() -> impl Strategy<Value = CartOp> {
            prop_oneof![
                (0u8..4, 1u64..50).prop_map(|(m, q)| CartOp::Add(m, q)),
                (0u8..4, -60i64..60).prop_map(|(m, d)| CartOp::Update(m, d)),
                (0u8..4).prop_map(CartOp::Remove),
            ]
        }

        fn run_ops(session: &mut OrderingSession, medicines: &[Medicine], ops: &[CartOp]) {
            for op in ops {
                let cmd = match *op {
                    CartOp::Add(m, quantity) => SessionCommand::AddToCart(AddToCart {
                        medicine: medicines[m as usize].clone(),
                        quantity,
                        occurred_at: test_time(),
                    }),
                    CartOp::Update(m, delta) => SessionCommand::UpdateQuantity(UpdateQuantity {
                        medicine_id: medicines[m as usize].id,
                        delta,
                        occurred_at: test_time(),
                    }),
                    CartOp::Remove(m) => SessionCommand::RemoveFromCart(RemoveFromCart {
                        medicine_id: medicines[m as usize].id,
                        occurred_at: test_time(),
                    }),
                };
                let events = session.handle(&cmd).unwrap();
                for event in &events {
                    session.apply(event);
                }
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: the total always equals the sum over current lines,
            /// and no quantity ever drops below 1, for arbitrary interleavings
            /// of add/update/remove.
            #[test]
            fn total_matches_lines_and_quantities_stay_positive(
                ops in proptest::collection::vec(cart_op(), 0..40)
            ) {
                let medicines = vec![
                    med("Aceclofenac 100mg", 450),
                    med("Amoxicillin 500mg", 850),
                    med("Ibuprofen 400mg", 350),
                    med("Paracetamol 500mg", 250),
                ];
                let mut session = test_session();
                run_ops(&mut session, &medicines, &ops);

                let expected: u64 = session
                    .cart()
                    .lines()
                    .iter()
                    .map(|l| l.medicine.pack_price.saturating_mul(l.quantity))
                    .fold(0, u64::saturating_add);
                prop_assert_eq!(session.cart().total(), expected);
                prop_assert!(session.cart().lines().iter().all(|l| l.quantity >= 1));
            }

            /// Property: adding the same medicine repeatedly yields exactly one
            /// line whose quantity is the sum of the added quantities.
            #[test]
            fn adds_accumulate_without_duplicate_lines(
                quantities in proptest::collection::vec(1u64..100, 1..20)
            ) {
                let medicine = med("Latanoprost Eye Drops", 1200);
                let mut session = test_session();
                for quantity in &quantities {
                    let events = session
                        .handle(&SessionCommand::AddToCart(AddToCart {
                            medicine: medicine.clone(),
                            quantity: *quantity,
                            occurred_at: test_time(),
                        }))
                        .unwrap();
                    for event in &events {
                        session.apply(event);
                    }
                }

                prop_assert_eq!(session.cart().len(), 1);
                prop_assert_eq!(
                    session.cart().line(medicine.id).unwrap().quantity,
                    quantities.iter().sum::<u64>()
                );
            }

            /// Property: placing an order transfers the cart total verbatim
            /// and empties the cart.
            #[test]
            fn placement_preserves_the_cart_total(
                ops in proptest::collection::vec(cart_op(), 1..25)
            ) {
                let medicines = vec![
                    med("Timolol Maleate 0.5%", 450),
                    med("Tamoxifen 20mg", 900),
                    med("Imatinib 400mg", 5000),
                    med("Methotrexate 2.5mg", 600),
                ];
                let mut session = test_session();
                run_ops(&mut session, &medicines, &ops);

                let cart_total = session.cart().total();
                let was_empty = session.cart().is_empty();
                let orders_before = session.orders().len();

                let events = session
                    .handle(&SessionCommand::PlaceOrder(PlaceOrder {
                        order_id: OrderId::new(),
                        occurred_at: test_time(),
                    }))
                    .unwrap();
                for event in &events {
                    session.apply(event);
                }

                if was_empty {
                    prop_assert_eq!(session.orders().len(), orders_before);
                } else {
                    prop_assert_eq!(session.orders().len(), orders_before + 1);
                    prop_assert_eq!(session.orders()[0].total_amount(), cart_total);
                    prop_assert!(session.cart().is_empty());
                }
            }
        }
    }
}
