//! Recipe form controller: create/edit modes, validation, draft autosave.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::auth::IdentityResolver;
use crate::drafts::{DraftAutosaver, DraftStore};
use crate::error::{Error, Result};
use crate::gateway::{RecipeFields, RecipeGateway};
use crate::models::{is_known_category, parse_cooking_time, Recipe, RecipeDraft, RecipeId};
use crate::util::unix_timestamp_ms;

/// Raw typed-in field values, before any validation or parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: String,
    pub category: String,
}

impl FormFields {
    fn from_draft(draft: &RecipeDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            ingredients: draft.ingredients.clone(),
            instructions: draft.instructions.clone(),
            cooking_time: draft.cooking_time.clone(),
            category: draft.category.clone(),
        }
    }

    fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone().unwrap_or_default(),
            instructions: recipe.instructions.clone().unwrap_or_default(),
            cooking_time: recipe
                .cooking_time
                .map(|minutes| minutes.to_string())
                .unwrap_or_default(),
            category: recipe.category.clone(),
        }
    }

    fn to_draft(&self) -> RecipeDraft {
        RecipeDraft::captured_now(
            &self.title,
            &self.description,
            &self.ingredients,
            &self.instructions,
            &self.cooking_time,
            &self.category,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum FormMode {
    #[default]
    Create,
    Edit(RecipeId),
}

/// What a successful submit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Recipe),
    Updated(Recipe),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn recipe(&self) -> &Recipe {
        match self {
            Self::Created(recipe) | Self::Updated(recipe) => recipe,
        }
    }
}

/// Drives the create/edit recipe form.
///
/// In create mode every field edit schedules a debounced draft write; edit
/// mode never touches the draft slot beyond clearing it on entry. A submit
/// in flight blocks re-entry until it resolves.
pub struct RecipeFormController<G: RecipeGateway, R: IdentityResolver, S: DraftStore> {
    gateway: Arc<G>,
    resolver: R,
    store: S,
    autosaver: DraftAutosaver<S>,
    mode: Mutex<FormMode>,
    fields: Mutex<FormFields>,
    last_error: Mutex<Option<String>>,
    submitting: AtomicBool,
}

struct SubmitReset<'a>(&'a AtomicBool);

impl Drop for SubmitReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<G: RecipeGateway, R: IdentityResolver, S: DraftStore> RecipeFormController<G, R, S> {
    #[must_use]
    pub fn new(gateway: Arc<G>, resolver: R, store: S) -> Self {
        Self {
            autosaver: DraftAutosaver::new(store.clone()),
            gateway,
            resolver,
            store,
            mode: Mutex::new(FormMode::Create),
            fields: Mutex::new(FormFields::default()),
            last_error: Mutex::new(None),
            submitting: AtomicBool::new(false),
        }
    }

    /// Same as [`Self::new`] with a custom autosave quiet period.
    #[must_use]
    pub fn with_debounce(gateway: Arc<G>, resolver: R, store: S, delay: Duration) -> Self {
        Self {
            autosaver: DraftAutosaver::with_delay(store.clone(), delay),
            gateway,
            resolver,
            store,
            mode: Mutex::new(FormMode::Create),
            fields: Mutex::new(FormFields::default()),
            last_error: Mutex::new(None),
            submitting: AtomicBool::new(false),
        }
    }

    /// Enter create mode, restoring a fresh stored draft if one exists.
    ///
    /// A draft past its retention window is discarded rather than restored.
    pub fn open_create(&self) -> Result<()> {
        self.set_mode(FormMode::Create);
        self.set_last_error(None);

        match self.store.load()? {
            Some(draft) if draft.is_fresh(unix_timestamp_ms()) => {
                self.replace_fields(FormFields::from_draft(&draft));
            }
            Some(_) => {
                self.store.clear()?;
                self.replace_fields(FormFields::default());
            }
            None => self.replace_fields(FormFields::default()),
        }
        Ok(())
    }

    /// Enter edit mode prefilled from an existing recipe.
    ///
    /// Any stored draft is cleared so stale create-mode input can never leak
    /// into an edit.
    pub fn open_edit(&self, recipe: &Recipe) -> Result<()> {
        self.set_mode(FormMode::Edit(recipe.id.clone()));
        self.set_last_error(None);
        self.autosaver.cancel();
        self.store.clear()?;
        self.replace_fields(FormFields::from_recipe(recipe));
        Ok(())
    }

    pub fn set_title(&self, value: impl Into<String>) {
        self.edit_field(|fields| fields.title = value.into());
    }

    pub fn set_description(&self, value: impl Into<String>) {
        self.edit_field(|fields| fields.description = value.into());
    }

    pub fn set_ingredients(&self, value: impl Into<String>) {
        self.edit_field(|fields| fields.ingredients = value.into());
    }

    pub fn set_instructions(&self, value: impl Into<String>) {
        self.edit_field(|fields| fields.instructions = value.into());
    }

    pub fn set_cooking_time(&self, value: impl Into<String>) {
        self.edit_field(|fields| fields.cooking_time = value.into());
    }

    pub fn set_category(&self, value: impl Into<String>) {
        self.edit_field(|fields| fields.category = value.into());
    }

    #[must_use]
    pub fn fields(&self) -> FormFields {
        self.fields.lock().map_or_else(|_| FormFields::default(), |fields| fields.clone())
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|slot| slot.clone())
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.mode
            .lock()
            .is_ok_and(|mode| matches!(*mode, FormMode::Edit(_)))
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Validate and push the current field values to the remote store.
    ///
    /// Typed values survive every failure path so the user never loses
    /// input; they are cleared only after a successful create/update.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(Error::InvalidInput(
                "A submission is already in progress".to_string(),
            ));
        }
        let _reset = SubmitReset(&self.submitting);

        let payload = match validate_fields(&self.fields()) {
            Ok(payload) => payload,
            Err(error) => {
                self.set_last_error(Some(error.to_string()));
                return Err(error);
            }
        };

        if self.resolver.current_identity().await.is_none() {
            let error = Error::NotAuthenticated;
            self.set_last_error(Some(error.to_string()));
            return Err(error);
        }

        let mode = self.mode.lock().map_or(FormMode::Create, |mode| mode.clone());
        let outcome = match &mode {
            FormMode::Create => self.gateway.create(payload).await.map(SubmitOutcome::Created),
            FormMode::Edit(id) => self
                .gateway
                .update(id, payload)
                .await
                .map(SubmitOutcome::Updated),
        };

        match outcome {
            Ok(outcome) => {
                self.set_last_error(None);
                if mode == FormMode::Create {
                    self.autosaver.cancel();
                    self.store.clear()?;
                }
                self.replace_fields(FormFields::default());
                Ok(outcome)
            }
            Err(error) => {
                tracing::error!("Error saving recipe: {}", error);
                self.set_last_error(Some("Failed to save recipe".to_string()));
                Err(error)
            }
        }
    }

    fn edit_field(&self, apply: impl FnOnce(&mut FormFields)) {
        let snapshot = {
            let Ok(mut fields) = self.fields.lock() else {
                return;
            };
            apply(&mut fields);
            fields.to_draft()
        };

        if !self.is_editing() {
            self.autosaver.schedule(snapshot);
        }
    }

    fn replace_fields(&self, next: FormFields) {
        if let Ok(mut fields) = self.fields.lock() {
            *fields = next;
        }
    }

    fn set_mode(&self, next: FormMode) {
        if let Ok(mut mode) = self.mode.lock() {
            *mode = next;
        }
    }

    fn set_last_error(&self, message: Option<String>) {
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = message;
        }
    }
}

/// All six fields are required; category must be one of the known labels.
///
/// A non-numeric or non-positive cooking time passes validation but stores
/// as no value.
fn validate_fields(fields: &FormFields) -> Result<RecipeFields> {
    let required = [
        &fields.title,
        &fields.description,
        &fields.ingredients,
        &fields.instructions,
        &fields.cooking_time,
        &fields.category,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(Error::InvalidInput("All fields are required".to_string()));
    }

    let category = fields.category.trim();
    if !is_known_category(category) {
        return Err(Error::InvalidInput(format!("Unknown category: {category}")));
    }

    Ok(RecipeFields {
        title: fields.title.trim().to_string(),
        description: fields.description.trim().to_string(),
        ingredients: fields.ingredients.trim().to_string(),
        instructions: fields.instructions.trim().to_string(),
        cooking_time: parse_cooking_time(&fields.cooking_time),
        category: category.to_string(),
    })
}
