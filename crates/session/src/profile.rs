use serde::{Deserialize, Serialize};

/// The active user's profile. Opaque to the core: loaded at session start,
/// displayed by the presentation layer, never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub pharmacy_name: String,
    pub shop_address: String,
    pub personal_address: String,
    pub phone: String,
    pub license_number: String,
    pub nic: String,
    pub photo_url: Option<String>,
}

/// Demo profile shipped with the client, matching the demo catalog.
pub fn demo_user() -> UserProfile {
    UserProfile {
        name: "Dr. Jane Doe".to_string(),
        pharmacy_name: "City Care Pharmacy".to_string(),
        shop_address: "123 Health Avenue, Meditown, MT 54321".to_string(),
        personal_address: "45 Willow Creek, Suburbia, MT 54300".to_string(),
        phone: "+1 (555) 012-3456".to_string(),
        license_number: "PH-987654321".to_string(),
        nic: "987654321V".to_string(),
        photo_url: None,
    }
}
