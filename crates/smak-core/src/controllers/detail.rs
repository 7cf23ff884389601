//! Recipe detail controller: single-record fetch, ownership, re-fetch.

use std::sync::{Arc, Mutex};

use crate::auth::IdentityResolver;
use crate::gateway::RecipeGateway;
use crate::models::{Recipe, RecipeId};

/// Render states for the detail view.
///
/// An absent row and a transport failure both land in `Failed`; only the
/// message differs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Loading,
    Failed(String),
    Loaded(Recipe),
}

impl DetailState {
    #[must_use]
    pub const fn recipe(&self) -> Option<&Recipe> {
        match self {
            Self::Loaded(recipe) => Some(recipe),
            _ => None,
        }
    }
}

/// Loads one recipe and answers whether the viewer may edit it.
pub struct RecipeDetailController<G: RecipeGateway, R: IdentityResolver> {
    gateway: Arc<G>,
    resolver: R,
    id: RecipeId,
    state: Mutex<DetailState>,
}

impl<G: RecipeGateway, R: IdentityResolver> RecipeDetailController<G, R> {
    #[must_use]
    pub fn new(gateway: Arc<G>, resolver: R, id: RecipeId) -> Self {
        Self {
            gateway,
            resolver,
            id,
            state: Mutex::new(DetailState::Loading),
        }
    }

    #[must_use]
    pub fn state(&self) -> DetailState {
        self.state
            .lock()
            .map_or(DetailState::Loading, |state| state.clone())
    }

    /// Fetch the record, replacing whatever state is currently held.
    ///
    /// Called both on first load and after an edit returns, so a completed
    /// edit is reflected without restarting the view.
    pub async fn load(&self) -> DetailState {
        self.set_state(DetailState::Loading);
        let next = match self.gateway.get_by_id(&self.id).await {
            Ok(recipe) => DetailState::Loaded(recipe),
            Err(crate::Error::NotFound(_)) => DetailState::Failed("Recipe not found".to_string()),
            Err(error) => {
                tracing::error!("Error fetching recipe {}: {}", self.id, error);
                DetailState::Failed("Failed to load recipe".to_string())
            }
        };
        self.set_state(next.clone());
        next
    }

    /// Whether the current viewer owns the loaded recipe.
    ///
    /// Signed-out viewers own nothing; an unloaded state owns nothing.
    pub async fn viewer_is_owner(&self) -> bool {
        let Some(owner_id) = self.state().recipe().map(|recipe| recipe.owner_id.clone()) else {
            return false;
        };
        self.resolver
            .current_identity()
            .await
            .is_some_and(|identity| identity.id == owner_id)
    }

    /// The loaded recipe, when the viewer may edit it.
    pub async fn edit_target(&self) -> Option<Recipe> {
        if self.viewer_is_owner().await {
            self.state().recipe().cloned()
        } else {
            None
        }
    }

    fn set_state(&self, next: DetailState) {
        if let Ok(mut state) = self.state.lock() {
            *state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use pretty_assertions::assert_eq;

    use super::super::testing::{make_recipe, recipe_id, MockGateway};
    use super::*;
    use crate::auth::{AuthSession, Identity, StaticIdentityResolver};

    fn session(user_id: &str) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: i64::MAX / 2000,
            user: Identity {
                id: user_id.to_string(),
                email: None,
            },
        }
    }

    #[tokio::test]
    async fn load_resolves_to_loaded_state() {
        let recipe = make_recipe("Борщ", "Супи", "owner-1", 0);
        let gateway = MockGateway::with_rows("owner-1", vec![recipe.clone()]);
        let controller = RecipeDetailController::new(
            Arc::new(gateway),
            StaticIdentityResolver::signed_out(),
            recipe.id.clone(),
        );

        assert_eq!(controller.state(), DetailState::Loading);
        let state = controller.load().await;
        assert_eq!(state, DetailState::Loaded(recipe));
    }

    #[tokio::test]
    async fn missing_row_reports_not_found() {
        let gateway = MockGateway::new("owner-1");
        let controller = RecipeDetailController::new(
            Arc::new(gateway),
            StaticIdentityResolver::signed_out(),
            recipe_id(),
        );

        let state = controller.load().await;
        assert_eq!(state, DetailState::Failed("Recipe not found".to_string()));
    }

    #[tokio::test]
    async fn transport_failure_reports_generic_message() {
        let recipe = make_recipe("Борщ", "Супи", "owner-1", 0);
        let gateway = MockGateway::with_rows("owner-1", vec![recipe.clone()]);
        gateway.fail_reads.store(true, Ordering::SeqCst);
        let controller = RecipeDetailController::new(
            Arc::new(gateway),
            StaticIdentityResolver::signed_out(),
            recipe.id.clone(),
        );

        let state = controller.load().await;
        assert_eq!(state, DetailState::Failed("Failed to load recipe".to_string()));
    }

    #[tokio::test]
    async fn owner_sees_edit_affordance() {
        let recipe = make_recipe("Борщ", "Супи", "owner-1", 0);
        let gateway = MockGateway::with_rows("owner-1", vec![recipe.clone()]);
        let controller = RecipeDetailController::new(
            Arc::new(gateway),
            StaticIdentityResolver::signed_in(session("owner-1")),
            recipe.id.clone(),
        );

        controller.load().await;
        assert!(controller.viewer_is_owner().await);
        assert_eq!(controller.edit_target().await, Some(recipe));
    }

    #[tokio::test]
    async fn non_owner_and_signed_out_get_no_edit_affordance() {
        let recipe = make_recipe("Борщ", "Супи", "owner-1", 0);
        let gateway = Arc::new(MockGateway::with_rows("owner-1", vec![recipe.clone()]));

        let stranger = RecipeDetailController::new(
            Arc::clone(&gateway),
            StaticIdentityResolver::signed_in(session("owner-2")),
            recipe.id.clone(),
        );
        stranger.load().await;
        assert!(!stranger.viewer_is_owner().await);
        assert_eq!(stranger.edit_target().await, None);

        let visitor = RecipeDetailController::new(
            gateway,
            StaticIdentityResolver::signed_out(),
            recipe.id,
        );
        visitor.load().await;
        assert!(!visitor.viewer_is_owner().await);
    }

    #[tokio::test]
    async fn reload_after_edit_reflects_updated_row() {
        let recipe = make_recipe("Борщ", "Супи", "owner-1", 0);
        let gateway = Arc::new(MockGateway::with_rows("owner-1", vec![recipe.clone()]));
        let controller = RecipeDetailController::new(
            Arc::clone(&gateway),
            StaticIdentityResolver::signed_in(session("owner-1")),
            recipe.id.clone(),
        );
        controller.load().await;

        gateway.rows.lock().unwrap()[0].title = "Борщ з пампушками".to_string();
        let state = controller.load().await;
        assert_eq!(state.recipe().unwrap().title, "Борщ з пампушками");
    }
}
