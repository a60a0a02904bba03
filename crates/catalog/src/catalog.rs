use std::collections::HashMap;

use guide_pharma_core::{DomainError, DomainResult, MedicineId};

use crate::medicine::Medicine;

/// Read-only medicine catalog, sorted by name for presentation.
///
/// Unique ids are enforced at construction; after that the catalog cannot
/// fail and cannot change.
#[derive(Debug, Clone)]
pub struct Catalog {
    medicines: Vec<Medicine>,
    by_id: HashMap<MedicineId, usize>,
}

impl Catalog {
    /// Build a catalog from loaded records.
    ///
    /// Rejects duplicate medicine ids; sorts by name so presentation order is
    /// stable regardless of load order.
    pub fn new(mut medicines: Vec<Medicine>) -> DomainResult<Self> {
        medicines.sort_by(|a, b| a.name.cmp(&b.name));

        let mut by_id = HashMap::with_capacity(medicines.len());
        for (idx, medicine) in medicines.iter().enumerate() {
            if by_id.insert(medicine.id, idx).is_some() {
                return Err(DomainError::conflict(format!(
                    "duplicate medicine id in catalog: {}",
                    medicine.id
                )));
            }
        }

        Ok(Self { medicines, by_id })
    }

    /// All medicines, name-sorted.
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn get(&self, id: MedicineId) -> Option<&Medicine> {
        self.by_id.get(&id).map(|idx| &self.medicines[*idx])
    }

    pub fn contains(&self, id: MedicineId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }
}
