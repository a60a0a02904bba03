use serde::{Deserialize, Serialize};

use guide_pharma_catalog::Medicine;
use guide_pharma_core::MedicineId;

/// One cart line: a medicine and the number of packs selected.
///
/// Quantity is at least 1 in every observable cart state; the clamp lives in
/// the session's decision logic, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub medicine: Medicine,
    pub quantity: u64,
}

impl CartLine {
    /// Pack price x quantity, saturating at `u64::MAX`. Quantities arrive via
    /// saturating accumulation, so totals must not panic where lines cannot.
    pub fn line_total(&self) -> u64 {
        self.medicine.pack_price.saturating_mul(self.quantity)
    }
}

/// The in-progress selection: an ordered collection of lines, at most one per
/// medicine id.
///
/// `Cart` itself is a dumb container; all invariants (positive quantities,
/// accumulation on repeated adds) are decided by `OrderingSession` commands
/// and arrive here as already-resolved line states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, medicine_id: MedicineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.medicine.id == medicine_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Derived cart value: sum of pack price x quantity over all lines.
    ///
    /// Recomputed on every read; lines mutate frequently and cheaply, so
    /// caching would only buy staleness bugs.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(0, u64::saturating_add)
    }

    /// Set a line to an absolute quantity, inserting it if absent.
    ///
    /// Insertion order is preserved; an existing line keeps its position.
    pub(crate) fn set_line(&mut self, medicine: Medicine, quantity: u64) {
        match self.lines.iter_mut().find(|l| l.medicine.id == medicine.id) {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(CartLine { medicine, quantity }),
        }
    }

    pub(crate) fn remove_line(&mut self, medicine_id: MedicineId) {
        self.lines.retain(|l| l.medicine.id != medicine_id);
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}
