//! Read-only snapshots for the report/PDF collaborator.
//!
//! The collaborator renders documents; these types are the whole contract.
//! They are plain serializable values cut loose from live session state.

use chrono::NaiveDate;
use serde::Serialize;

use guide_pharma_core::OrderId;
use guide_pharma_ordering::{CartLine, FulfillmentStatus, Order, OrderStatus};

/// One priced line of an export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportLine {
    pub medicine_name: String,
    pub pack_size: String,
    /// Pack price in smallest currency unit.
    pub unit_price: u64,
    pub quantity: u64,
    pub line_total: u64,
    /// Present only for order exports.
    pub fulfillment_status: Option<FulfillmentStatus>,
}

/// Snapshot of the current cart for a quotation-style document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartExport {
    pub pharmacy_name: String,
    pub lines: Vec<ExportLine>,
    pub total: u64,
}

impl CartExport {
    pub fn new(pharmacy_name: &str, lines: &[CartLine]) -> Self {
        let lines: Vec<ExportLine> = lines
            .iter()
            .map(|l| ExportLine {
                medicine_name: l.medicine.name.clone(),
                pack_size: l.medicine.pack_size.clone(),
                unit_price: l.medicine.pack_price,
                quantity: l.quantity,
                line_total: l.line_total(),
                fulfillment_status: None,
            })
            .collect();
        let total = lines.iter().map(|l| l.line_total).sum();
        Self {
            pharmacy_name: pharmacy_name.to_string(),
            lines,
            total,
        }
    }
}

/// Snapshot of a placed order for an invoice-style document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderExport {
    pub order_id: OrderId,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub pharmacy_name: String,
    pub lines: Vec<ExportLine>,
    /// The order's frozen total, not a recomputation.
    pub total: u64,
}

impl OrderExport {
    pub fn new(pharmacy_name: &str, order: &Order) -> Self {
        let lines = order
            .items()
            .iter()
            .map(|i| ExportLine {
                medicine_name: i.medicine.name.clone(),
                pack_size: i.medicine.pack_size.clone(),
                unit_price: i.medicine.pack_price,
                quantity: i.quantity,
                line_total: i.line_total(),
                fulfillment_status: Some(i.fulfillment_status),
            })
            .collect();
        Self {
            order_id: order.id_typed(),
            date: order.date(),
            status: order.status(),
            pharmacy_name: pharmacy_name.to_string(),
            lines,
            total: order.total_amount(),
        }
    }
}
