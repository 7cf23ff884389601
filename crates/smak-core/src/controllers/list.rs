//! Recipe list controller: search text, category toggle, sequenced refresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::gateway::{RecipeFilter, RecipeGateway};
use crate::models::Recipe;

/// What became of one refresh round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Response applied; `results` now reflects it
    Applied,
    /// A newer query was issued before this one resolved; response discarded
    Stale,
    /// Gateway error; logged, previous results kept, nothing retried
    Failed,
}

#[derive(Debug, Default)]
struct ListCriteria {
    search_text: String,
    selected_category: Option<String>,
}

/// Owns the combined filter state and keeps `results` consistent with the
/// remote collection.
///
/// Each refresh is tagged with a monotonically increasing sequence number;
/// a response lands only while its sequence is still the latest issued, so
/// a slow early request can never overwrite fresher results.
pub struct RecipeListController<G: RecipeGateway> {
    gateway: Arc<G>,
    criteria: Mutex<ListCriteria>,
    results: Mutex<Vec<Recipe>>,
    issue_seq: AtomicU64,
}

impl<G: RecipeGateway> RecipeListController<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            criteria: Mutex::new(ListCriteria::default()),
            results: Mutex::new(Vec::new()),
            issue_seq: AtomicU64::new(0),
        }
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        if let Ok(mut criteria) = self.criteria.lock() {
            criteria.search_text = text.into();
        }
    }

    /// Category selection is a toggle: selecting the already-selected
    /// category clears the filter.
    pub fn toggle_category(&self, category: &str) {
        if let Ok(mut criteria) = self.criteria.lock() {
            if criteria.selected_category.as_deref() == Some(category) {
                criteria.selected_category = None;
            } else {
                criteria.selected_category = Some(category.to_string());
            }
        }
    }

    #[must_use]
    pub fn search_text(&self) -> String {
        self.criteria
            .lock()
            .map_or_else(|_| String::new(), |criteria| criteria.search_text.clone())
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<String> {
        self.criteria
            .lock()
            .ok()
            .and_then(|criteria| criteria.selected_category.clone())
    }

    /// The gateway filter for the current criteria; blank search maps to no
    /// title filter.
    #[must_use]
    pub fn filter(&self) -> RecipeFilter {
        let criteria = match self.criteria.lock() {
            Ok(criteria) => criteria,
            Err(_) => return RecipeFilter::default(),
        };
        RecipeFilter {
            title_contains: Some(criteria.search_text.clone()),
            category: criteria.selected_category.clone(),
        }
        .normalized()
    }

    /// Re-issue the list query for the current criteria.
    pub async fn refresh(&self) -> RefreshOutcome {
        let seq = self.issue_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.filter();

        match self.gateway.list(&filter).await {
            Ok(rows) => {
                if seq != self.issue_seq.load(Ordering::SeqCst) {
                    tracing::debug!("Discarding stale list response (seq {})", seq);
                    return RefreshOutcome::Stale;
                }
                if let Ok(mut results) = self.results.lock() {
                    *results = rows;
                }
                RefreshOutcome::Applied
            }
            Err(error) => {
                tracing::error!("Error fetching recipes: {}", error);
                RefreshOutcome::Failed
            }
        }
    }

    #[must_use]
    pub fn results(&self) -> Vec<Recipe> {
        self.results
            .lock()
            .map_or_else(|_| Vec::new(), |results| results.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.lock().map_or(true, |results| results.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::super::testing::{make_recipe, MockGateway};
    use super::*;

    fn seeded_controller() -> RecipeListController<MockGateway> {
        let rows = vec![
            make_recipe("Борщ", "Супи", "owner-1", 30),
            make_recipe("Зелений борщ", "Супи", "owner-2", 20),
            make_recipe("Наполеон", "Десерти", "owner-1", 10),
        ];
        RecipeListController::new(Arc::new(MockGateway::with_rows("owner-1", rows)))
    }

    #[tokio::test]
    async fn refresh_loads_all_rows_newest_first() {
        let controller = seeded_controller();
        assert_eq!(controller.refresh().await, RefreshOutcome::Applied);

        let results = controller.results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Борщ");
        assert_eq!(results[2].title, "Наполеон");
    }

    #[tokio::test]
    async fn search_matches_title_case_insensitively() {
        let controller = seeded_controller();
        controller.set_search_text("БОРЩ");
        controller.refresh().await;

        let results = controller.results();
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|recipe| recipe.title.to_lowercase().contains("борщ")));
    }

    #[tokio::test]
    async fn category_filter_is_exact_and_conjunctive_with_search() {
        let controller = seeded_controller();
        controller.toggle_category("Супи");
        controller.set_search_text("зелений");
        controller.refresh().await;

        let results = controller.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Зелений борщ");
    }

    #[tokio::test]
    async fn selecting_selected_category_clears_the_filter() {
        let controller = seeded_controller();
        controller.toggle_category("Десерти");
        controller.refresh().await;
        assert_eq!(controller.results().len(), 1);

        controller.toggle_category("Десерти");
        assert_eq!(controller.selected_category(), None);
        controller.refresh().await;
        assert_eq!(controller.results().len(), 3);
    }

    #[tokio::test]
    async fn blank_search_text_maps_to_unfiltered_query() {
        let controller = seeded_controller();
        controller.set_search_text("   ");
        assert_eq!(controller.filter(), RecipeFilter::default());
    }

    #[tokio::test]
    async fn gateway_error_keeps_previous_results() {
        let controller = seeded_controller();
        controller.refresh().await;
        assert_eq!(controller.results().len(), 3);

        controller.gateway.fail_list.store(true, Ordering::SeqCst);
        assert_eq!(controller.refresh().await, RefreshOutcome::Failed);
        assert_eq!(controller.results().len(), 3);
    }

    #[tokio::test]
    async fn slow_early_response_never_overwrites_fresher_results() {
        let rows = vec![make_recipe("Борщ", "Супи", "owner-1", 0)];
        let gateway = MockGateway::with_rows("owner-1", rows);
        gateway
            .list_delays
            .lock()
            .unwrap()
            .extend([Duration::from_millis(60), Duration::from_millis(5)]);
        let controller = RecipeListController::new(Arc::new(gateway));

        let (first, second) = tokio::join!(controller.refresh(), controller.refresh());
        assert_eq!(first, RefreshOutcome::Stale);
        assert_eq!(second, RefreshOutcome::Applied);
        assert_eq!(controller.results().len(), 1);
    }
}
