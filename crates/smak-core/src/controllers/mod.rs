//! View controllers: list, form, and detail state machines.

mod detail;
mod form;
mod list;

pub use detail::{DetailState, RecipeDetailController};
pub use form::{FormFields, RecipeFormController, SubmitOutcome};
pub use list::{RecipeListController, RefreshOutcome};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use crate::error::{Error, Result};
    use crate::gateway::{RecipeFields, RecipeFilter, RecipeGateway};
    use crate::models::{Recipe, RecipeId};

    pub fn recipe_id() -> RecipeId {
        uuid::Uuid::new_v4().to_string().parse().unwrap()
    }

    pub fn make_recipe(title: &str, category: &str, owner: &str, created_offset: i64) -> Recipe {
        Recipe {
            id: recipe_id(),
            owner_id: owner.to_string(),
            title: title.to_string(),
            description: "Опис".to_string(),
            ingredients: Some("Яйця\nБорошно".to_string()),
            instructions: Some("Змішати\nВипікати".to_string()),
            cooking_time: Some(30),
            category: category.to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000 + created_offset, 0).unwrap(),
        }
    }

    /// In-memory gateway with the remote store's filter/order semantics.
    #[derive(Default)]
    pub struct MockGateway {
        pub rows: Mutex<Vec<Recipe>>,
        pub owner_id: Mutex<String>,
        pub fail_mutations: AtomicBool,
        pub fail_list: AtomicBool,
        pub fail_reads: AtomicBool,
        pub list_delays: Mutex<VecDeque<Duration>>,
        pub create_delay: Mutex<Option<Duration>>,
        pub created_payloads: Mutex<Vec<RecipeFields>>,
        next_created_at: AtomicI64,
    }

    impl MockGateway {
        pub fn new(owner_id: &str) -> Self {
            Self {
                owner_id: Mutex::new(owner_id.to_string()),
                next_created_at: AtomicI64::new(1_800_000_000),
                ..Self::default()
            }
        }

        pub fn with_rows(owner_id: &str, rows: Vec<Recipe>) -> Self {
            let gateway = Self::new(owner_id);
            *gateway.rows.lock().unwrap() = rows;
            gateway
        }

        fn matches(filter: &RecipeFilter, recipe: &Recipe) -> bool {
            if let Some(term) = &filter.title_contains {
                if !recipe
                    .title
                    .to_lowercase()
                    .contains(&term.to_lowercase())
                {
                    return false;
                }
            }
            if let Some(category) = &filter.category {
                if &recipe.category != category {
                    return false;
                }
            }
            true
        }
    }

    impl RecipeGateway for MockGateway {
        async fn list(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
            let delay = self.list_delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.fail_list.load(Ordering::SeqCst) {
                return Err(Error::Remote("list failed".to_string()));
            }

            let mut rows: Vec<Recipe> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|recipe| Self::matches(filter, recipe))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn get_by_id(&self, id: &RecipeId) -> Result<Recipe> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Error::Remote("fetch failed".to_string()));
            }

            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|recipe| &recipe.id == id)
                .cloned()
                .ok_or_else(|| Error::NotFound(id.to_string()))
        }

        async fn create(&self, fields: RecipeFields) -> Result<Recipe> {
            let delay = *self.create_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Error::Remote("insert failed".to_string()));
            }

            self.created_payloads.lock().unwrap().push(fields.clone());
            let created_at = self.next_created_at.fetch_add(1, Ordering::SeqCst);
            let recipe = Recipe {
                id: recipe_id(),
                owner_id: self.owner_id.lock().unwrap().clone(),
                title: fields.title,
                description: fields.description,
                ingredients: Some(fields.ingredients),
                instructions: Some(fields.instructions),
                cooking_time: fields.cooking_time,
                category: fields.category,
                created_at: Utc.timestamp_opt(created_at, 0).unwrap(),
            };
            self.rows.lock().unwrap().push(recipe.clone());
            Ok(recipe)
        }

        async fn update(&self, id: &RecipeId, fields: RecipeFields) -> Result<Recipe> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Error::Remote("update failed".to_string()));
            }

            let mut rows = self.rows.lock().unwrap();
            let recipe = rows
                .iter_mut()
                .find(|recipe| &recipe.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            recipe.title = fields.title;
            recipe.description = fields.description;
            recipe.ingredients = Some(fields.ingredients);
            recipe.instructions = Some(fields.instructions);
            recipe.cooking_time = fields.cooking_time;
            recipe.category = fields.category;
            Ok(recipe.clone())
        }

        async fn delete(&self, id: &RecipeId) -> Result<()> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(Error::Remote("delete failed".to_string()));
            }

            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|recipe| &recipe.id != id);
            if rows.len() == before {
                return Err(Error::NotFound(id.to_string()));
            }
            Ok(())
        }
    }
}
