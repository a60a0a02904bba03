//! Smart-search coordination on top of the AI capability.
//!
//! Matching calls suspend for non-trivial latency, and the user may have
//! typed a new query by the time an old response lands. Each search takes a
//! generation ticket; a response whose ticket is no longer current is
//! discarded instead of overwriting a newer result.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use guide_pharma_catalog::Catalog;
use guide_pharma_core::MedicineId;

use crate::capability::{AiCapability, CatalogView};
use crate::error::AiError;

/// Result of one coordinated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Ids matched by the collaborator, filtered to the submitted view and
    /// deduplicated. Empty means "no match", not an error.
    Matches(Vec<MedicineId>),
    /// A newer search started while this one was in flight; the response
    /// (success or failure) was abandoned.
    Superseded,
}

/// Runs searches against the capability, one generation ticket per request.
#[derive(Debug)]
pub struct SearchCoordinator<M> {
    matcher: M,
    generation: AtomicU64,
}

impl<M: AiCapability> SearchCoordinator<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            generation: AtomicU64::new(0),
        }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Search the catalog for medicines matching a free-text query.
    ///
    /// Builds the reduced `{id, name, category}` view, performs a single
    /// matching attempt and filters out ids the collaborator invented (ids
    /// not present in the submitted view). Errors from superseded requests
    /// are swallowed; only the current request surfaces failures.
    pub async fn search(
        &self,
        query: &str,
        catalog: &Catalog,
    ) -> Result<SearchOutcome, AiError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let view = CatalogView::from_catalog(catalog);

        let result = self.matcher.match_medicines(query, &view).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(query, "discarding superseded search response");
            return Ok(SearchOutcome::Superseded);
        }

        let ids = result?;
        let mut seen = HashSet::new();
        let matches: Vec<MedicineId> = ids
            .into_iter()
            .filter(|id| {
                if !view.contains(*id) {
                    tracing::warn!(%id, "matcher returned an id outside the submitted view");
                    return false;
                }
                seen.insert(*id)
            })
            .collect();

        Ok(SearchOutcome::Matches(matches))
    }
}
