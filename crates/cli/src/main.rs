//! Demo driver: seeds a session with the bundled catalog, walks the ordering
//! flow, and (when `API_KEY` is configured) runs a smart search against the
//! live matcher.

use std::sync::Arc;

use anyhow::Result;

use guide_pharma_ai::{
    AiError, EnvCredentialProvider, GeminiClient, SearchCoordinator, SearchOutcome,
};
use guide_pharma_catalog::demo_catalog;
use guide_pharma_ordering::OrderStatus;
use guide_pharma_session::{PharmacySession, demo_user};

#[tokio::main]
async fn main() -> Result<()> {
    guide_pharma_observability::init();

    let catalog = Arc::new(demo_catalog());
    let session = PharmacySession::new(catalog.clone(), demo_user());

    // Wholesale order: 2 packs of the first catalog entry, 1 of the second.
    let first = catalog.medicines()[0].id;
    let second = catalog.medicines()[1].id;
    session.add_to_cart(first, 2)?;
    session.add_to_cart(second, 1)?;
    println!("cart total: {}", session.cart_total());

    match session.place_order()? {
        Some(order_id) => {
            let export = session.export_order(order_id)?;
            println!(
                "placed order {} ({} lines, total {})",
                export.order_id,
                export.lines.len(),
                export.total
            );
        }
        None => println!("cart was empty, nothing placed"),
    }

    let pending = session.orders_by_status(OrderStatus::Pending);
    println!("pending orders: {}", pending.len());

    let query = std::env::args().nth(1).unwrap_or_else(|| "eye pressure".to_string());
    let coordinator = SearchCoordinator::new(GeminiClient::new(EnvCredentialProvider::new()));
    match coordinator.search(&query, &catalog).await {
        Ok(SearchOutcome::Matches(ids)) => {
            println!("'{query}' matched {} medicine(s):", ids.len());
            for id in ids {
                if let Some(medicine) = catalog.get(id) {
                    println!("  {} ({})", medicine.name, medicine.category);
                }
            }
        }
        Ok(SearchOutcome::Superseded) => {}
        Err(AiError::CredentialRequired) => {
            println!("smart search skipped: set API_KEY to enable the matcher");
        }
        Err(err) => {
            tracing::warn!(%err, "smart search failed");
            println!("smart search failed: {err}");
        }
    }

    Ok(())
}
