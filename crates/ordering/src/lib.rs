//! Ordering domain module: cart aggregation and the order ledger.
//!
//! This crate contains the business rules for assembling a wholesale cart and
//! turning it into immutable orders, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod cart;
pub mod order;
pub mod session;

pub use cart::{Cart, CartLine};
pub use order::{FulfillmentStatus, Order, OrderItem, OrderStatus};
pub use session::{
    AddToCart, CartLineRemoved, CartLineSet, CompleteOrder, MarkItemOutOfStock, OrderCompleted,
    OrderItemOutOfStock, OrderPlaced, OrderingSession, PlaceOrder, RemoveFromCart, SessionCommand,
    SessionEvent, UpdateQuantity,
};
