use serde::{Deserialize, Serialize};

use guide_pharma_core::{Entity, MedicineId};

/// Dosage-form category of a medicine. Closed set; no free-form categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicineCategory {
    Tablets,
    Drops,
    Suspensions,
    Ointments,
    Syrups,
    Creams,
    Injections,
}

impl MedicineCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineCategory::Tablets => "Tablets",
            MedicineCategory::Drops => "Drops",
            MedicineCategory::Suspensions => "Suspensions",
            MedicineCategory::Ointments => "Ointments",
            MedicineCategory::Syrups => "Syrups",
            MedicineCategory::Creams => "Creams",
            MedicineCategory::Injections => "Injections",
        }
    }
}

impl core::fmt::Display for MedicineCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog medicine record.
///
/// Immutable once loaded; orders copy the whole record so historical prices
/// survive later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub category: MedicineCategory,
    /// Descriptive pack text, e.g. "10x10 Box" or "12 Vials".
    pub pack_size: String,
    /// Price per pack, in smallest currency unit (e.g., paisa).
    pub pack_price: u64,
    /// Price per single item, in smallest currency unit.
    pub single_price: u64,
}

impl Entity for Medicine {
    type Id = MedicineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
