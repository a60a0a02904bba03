//! Session facade: the surface the presentation layer talks to.
//!
//! One `PharmacySession` per logged-in client, owning the catalog reference,
//! the user profile and serialized access to the ordering state. There is no
//! other mutation surface.

pub mod export;
pub mod profile;
pub mod session;

pub use export::{CartExport, ExportLine, OrderExport};
pub use profile::{UserProfile, demo_user};
pub use session::PharmacySession;
