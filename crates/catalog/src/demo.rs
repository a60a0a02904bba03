//! Bundled demo data set.
//!
//! Stand-in for a real catalog supplier; prices are in the smallest currency
//! unit (paisa).

use guide_pharma_core::MedicineId;

use crate::catalog::Catalog;
use crate::medicine::{Medicine, MedicineCategory};

fn med(
    name: &str,
    category: MedicineCategory,
    pack_size: &str,
    pack_price: u64,
    single_price: u64,
) -> Medicine {
    Medicine {
        id: MedicineId::new(),
        name: name.to_string(),
        category,
        pack_size: pack_size.to_string(),
        pack_price,
        single_price,
    }
}

/// The demo wholesale catalog shipped with the client.
pub fn demo_catalog() -> Catalog {
    use MedicineCategory::*;

    let medicines = vec![
        med("Aceclofenac 100mg", Tablets, "10x10 Box", 45_000, 5_000),
        med("Amoxicillin 500mg", Tablets, "10x10 Box", 85_000, 9_500),
        med("Betadine Ointment", Ointments, "12 Tubes", 60_000, 6_000),
        med("Calamine Lotion", Suspensions, "6 Bottles", 30_000, 6_000),
        med("Ciprofloxacin Eye Drops", Drops, "12 Vials", 24_000, 2_500),
        med("Cough Syrup (Herbal)", Syrups, "12 Bottles", 55_000, 5_500),
        med("Diclofenac Gel", Creams, "10 Tubes", 40_000, 4_500),
        med("Ibuprofen 400mg", Tablets, "20x10 Box", 35_000, 2_000),
        med("Multivitamin Drops", Drops, "10 Bottles", 50_000, 6_000),
        med("Paracetamol 500mg", Tablets, "50x10 Box", 25_000, 600),
        med("Saline Nasal Spray", Drops, "12 Bottles", 48_000, 5_000),
        med("Silver Sulfadiazine", Creams, "5 Jars", 75_000, 16_000),
        med("Vitamin C Syrup", Syrups, "12 Bottles", 65_000, 6_500),
        med("Zinc Oxide Paste", Ointments, "6 Tubs", 42_000, 8_000),
        med("Timolol Maleate 0.5%", Drops, "12 Vials", 45_000, 4_500),
        med("Latanoprost Eye Drops", Drops, "6 Vials", 120_000, 22_000),
        med("Tamoxifen 20mg", Tablets, "30 Tabs", 90_000, 3_500),
        med("Imatinib 400mg", Tablets, "10 Tabs", 500_000, 55_000),
        med("Methotrexate 2.5mg", Tablets, "50 Tabs", 60_000, 1_500),
        med("Artificial Tears", Drops, "24 Vials", 40_000, 2_000),
    ];

    // Ids are freshly generated, so the duplicate-id check cannot trip.
    Catalog::new(medicines).expect("demo catalog ids are unique")
}
