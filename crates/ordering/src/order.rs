use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use guide_pharma_catalog::Medicine;
use guide_pharma_core::{Entity, MedicineId, OrderId};

use crate::cart::CartLine;

/// Order status lifecycle. Pending on placement; an external fulfillment
/// process moves it to Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

/// Per-line fulfillment outcome.
///
/// Every item starts Fulfilled; OutOfStock is only ever set afterwards by the
/// external fulfillment process. No code path in this crate decides *when*
/// that happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    Fulfilled,
    OutOfStock,
}

/// A frozen order line: medicine snapshot + quantity + fulfillment outcome.
///
/// The medicine is copied wholesale so the order keeps its historical prices
/// even if the live catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub medicine: Medicine,
    pub quantity: u64,
    pub fulfillment_status: FulfillmentStatus,
}

impl OrderItem {
    /// Pack price x quantity, saturating at `u64::MAX` like the cart side.
    pub fn line_total(&self) -> u64 {
        self.medicine.pack_price.saturating_mul(self.quantity)
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            medicine: line.medicine.clone(),
            quantity: line.quantity,
            fulfillment_status: FulfillmentStatus::Fulfilled,
        }
    }
}

/// An immutable placed order.
///
/// `total_amount` is computed once at creation from the item snapshot and is
/// deliberately never reconciled afterwards — marking an item OutOfStock does
/// not change what was ordered or invoiced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    date: NaiveDate,
    status: OrderStatus,
    items: Vec<OrderItem>,
    total_amount: u64,
}

impl Order {
    /// Freeze cart lines into an order. Items default to Fulfilled; the total
    /// is fixed here and never recomputed.
    pub fn new(id: OrderId, date: NaiveDate, lines: &[CartLine]) -> Self {
        let items: Vec<OrderItem> = lines.iter().map(OrderItem::from).collect();
        let total_amount = items
            .iter()
            .map(OrderItem::line_total)
            .fold(0, u64::saturating_add);
        Self {
            id,
            date,
            status: OrderStatus::Pending,
            items,
            total_amount,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn item(&self, medicine_id: MedicineId) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.medicine.id == medicine_id)
    }

    /// Unchecked status transition; legality is decided by the session's
    /// command handler before the corresponding event is applied.
    pub(crate) fn set_completed(&mut self) {
        self.status = OrderStatus::Completed;
    }

    /// Unchecked per-item transition; see `set_completed`.
    pub(crate) fn set_item_out_of_stock(&mut self, medicine_id: MedicineId) {
        if let Some(item) = self.items.iter_mut().find(|i| i.medicine.id == medicine_id) {
            item.fulfillment_status = FulfillmentStatus::OutOfStock;
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
