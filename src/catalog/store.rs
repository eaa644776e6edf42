use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::domain::{
    Difficulty, ProfileUpdate, Recipe, RecipeDraft, ShoppingListItem, User,
};
use crate::catalog::query::{self, CategoryFilter, Page, RecipeQuery, SortKey};
use crate::catalog::seed;
use crate::catalog::similarity;
use crate::config::Config;
use crate::db;
use crate::error::{CatalogError, CatalogResult};
use crate::persistence::{self, BlobStore, Snapshot, SqliteBlobStore, StorageKeys};

/// Browsing state driven by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search: String,
    pub category: CategoryFilter,
    pub difficulty: Option<Difficulty>,
    pub sort: SortKey,
    /// 1-based
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            difficulty: None,
            sort: SortKey::Rating,
            page: 1,
        }
    }
}

impl ViewState {
    pub fn query(&self) -> RecipeQuery {
        RecipeQuery::new(self.search.clone(), self.category, self.sort)
            .with_difficulty(self.difficulty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShoppingSummary {
    pub total: usize,
    pub checked: usize,
    pub unchecked: usize,
}

/// Owns the recipe catalog, the active user, and the shopping list.
///
/// Every mutation writes the affected collection back to the blob store.
/// Write failures are logged and the in-memory state stays authoritative.
pub struct CatalogStore<S: BlobStore> {
    recipes: Vec<Recipe>,
    user: User,
    shopping_list: Vec<ShoppingListItem>,
    view: ViewState,
    page_size: usize,
    blobs: S,
    keys: StorageKeys,
}

impl CatalogStore<SqliteBlobStore> {
    /// Open the SQLite-backed store described by a loaded config
    pub fn open_with_config(config: &Config) -> anyhow::Result<Self> {
        let db_path = config
            .db_path()
            .ok_or_else(|| anyhow::anyhow!("storage path not resolved; use Config::load"))?;

        let pool = db::create_pool(db_path)?;
        db::run_migrations(&pool)?;
        tracing::info!("Catalog database: {}", db_path.display());

        let mut store = Self::open(
            SqliteBlobStore::new(pool),
            StorageKeys::new(&config.storage.namespace),
            config.catalog.page_size,
        );

        if config.catalog.generated_recipes > 0 {
            store.ingest_generated(config.catalog.generated_recipes, &mut rand::thread_rng());
        }

        Ok(store)
    }
}

impl<S: BlobStore> CatalogStore<S> {
    /// Load persisted collections, falling back to seed data
    pub fn open(blobs: S, keys: StorageKeys, page_size: usize) -> Self {
        let snapshot = persistence::load_snapshot(&blobs, &keys);
        tracing::info!(
            "Loaded catalog with {} recipes and {} shopping list items",
            snapshot.recipes.len(),
            snapshot.shopping_list.len()
        );
        Self::from_snapshot(snapshot, blobs, keys, page_size)
    }

    pub fn from_snapshot(
        snapshot: Snapshot,
        blobs: S,
        keys: StorageKeys,
        page_size: usize,
    ) -> Self {
        Self {
            recipes: snapshot.recipes,
            user: snapshot.user,
            shopping_list: snapshot.shopping_list,
            view: ViewState::default(),
            page_size: page_size.max(1),
            blobs,
            keys,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn blob_store(&self) -> &S {
        &self.blobs
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            recipes: self.recipes.clone(),
            user: self.user.clone(),
            shopping_list: self.shopping_list.clone(),
        }
    }

    fn persist_recipes(&mut self) {
        if let Err(e) =
            persistence::save_collection(&mut self.blobs, &self.keys.recipes, &self.recipes)
        {
            tracing::warn!("Failed to persist recipes: {}", e);
        }
    }

    fn persist_user(&mut self) {
        if let Err(e) = persistence::save_collection(&mut self.blobs, &self.keys.user, &self.user) {
            tracing::warn!("Failed to persist user: {}", e);
        }
    }

    fn persist_shopping_list(&mut self) {
        if let Err(e) = persistence::save_collection(
            &mut self.blobs,
            &self.keys.shopping_list,
            &self.shopping_list,
        ) {
            tracing::warn!("Failed to persist shopping list: {}", e);
        }
    }

    // Queries

    pub fn query(&self, search: &str, category: CategoryFilter, sort: SortKey) -> Vec<&Recipe> {
        self.query_with(&RecipeQuery::new(search, category, sort))
    }

    pub fn query_with(&self, query: &RecipeQuery) -> Vec<&Recipe> {
        query.apply(&self.recipes)
    }

    pub fn get_recipe_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Uniform pick over the whole catalog, ignoring the current view
    pub fn get_random_recipe(&self) -> Option<&Recipe> {
        self.get_random_recipe_with(&mut rand::thread_rng())
    }

    pub fn get_random_recipe_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Recipe> {
        self.recipes.choose(rng)
    }

    /// Recipes whose titles are within edit-distance tolerance of `title`
    pub fn find_similar(&self, title: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| similarity::titles_look_alike(title, &r.title))
            .collect()
    }

    // View state

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
        self.view.page = 1;
        tracing::debug!("Search set to {:?}", self.view.search);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.view.category = category;
        self.view.page = 1;
        tracing::debug!("Category set to {}", category);
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.view.difficulty = difficulty;
        self.view.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.view.sort = sort;
    }

    /// Move to `page`, clamped to the pages the current view has
    pub fn set_page(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        self.view.page = page.clamp(1, last);
        self.view.page
    }

    pub fn current_view(&self) -> Page<&Recipe> {
        let filtered = self.query_with(&self.view.query());
        query::paginate(&filtered, self.view.page, self.page_size)
    }

    pub fn filtered_count(&self) -> usize {
        let query = self.view.query();
        self.recipes.iter().filter(|r| query.matches(r)).count()
    }

    pub fn total_pages(&self) -> usize {
        query::total_pages(self.filtered_count(), self.page_size)
    }

    pub fn total_recipes(&self) -> usize {
        self.recipes.len()
    }

    // Recipe mutations

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::now_v7().to_string();
            if self.get_recipe_by_id(&id).is_none() {
                return id;
            }
        }
    }

    /// Create a recipe authored by the current user.
    ///
    /// Rejected without side effects when it duplicates an existing recipe.
    pub fn add_recipe(&mut self, draft: RecipeDraft) -> CatalogResult<Recipe> {
        draft.validate()?;

        let duplicate =
            similarity::find_duplicate(&draft.title, &draft.ingredients, &self.recipes);
        if let Some(found) = duplicate {
            tracing::info!(
                "Rejected {:?} as duplicate of {} ({})",
                draft.title,
                found.existing.id,
                found.reason
            );
            return Err(CatalogError::DuplicateRecipe {
                existing_id: found.existing.id.clone(),
                reason: found.reason,
            });
        }

        let id = self.fresh_id();
        let recipe = draft.into_recipe(id, self.user.id.clone(), chrono::Utc::now());

        self.recipes.push(recipe.clone());
        self.user.my_recipes.push(recipe.id.clone());
        self.persist_recipes();
        self.persist_user();

        tracing::info!("Added recipe {} ({})", recipe.id, recipe.title);
        Ok(recipe)
    }

    /// Full replace by id, keeping the recipe's position
    pub fn update_recipe(&mut self, recipe: Recipe) -> CatalogResult<Recipe> {
        recipe.validate()?;

        let slot = self
            .recipes
            .iter_mut()
            .find(|r| r.id == recipe.id)
            .ok_or_else(|| CatalogError::NotFound(recipe.id.clone()))?;
        *slot = recipe.clone();

        self.persist_recipes();
        tracing::debug!("Updated recipe {}", recipe.id);
        Ok(recipe)
    }

    /// Remove by id. Absent ids are a no-op; returns whether anything was removed.
    pub fn delete_recipe(&mut self, id: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        if self.recipes.len() == before {
            return false;
        }
        self.persist_recipes();

        let authored = self.user.my_recipes.len();
        self.user.my_recipes.retain(|r| r != id);
        if self.user.my_recipes.len() != authored {
            self.persist_user();
        }

        tracing::info!("Deleted recipe {}", id);
        true
    }

    /// Ingest generated recipes through duplicate detection.
    ///
    /// Returns how many were inserted.
    pub fn ingest_generated<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        let mut inserted = 0;
        let mut skipped = 0;

        for mut recipe in seed::generate_recipes(count, rng) {
            let duplicate =
                similarity::find_duplicate(&recipe.title, &recipe.ingredients, &self.recipes);
            if duplicate.is_some() {
                skipped += 1;
                continue;
            }
            if self.get_recipe_by_id(&recipe.id).is_some() {
                recipe.id = self.fresh_id();
            }
            self.recipes.push(recipe);
            inserted += 1;
        }

        if inserted > 0 {
            self.persist_recipes();
        }
        tracing::info!(
            "Ingested {} generated recipes ({} duplicates skipped)",
            inserted,
            skipped
        );
        inserted
    }

    // Profile

    /// Flip favorite membership. The id is not checked against the catalog.
    pub fn toggle_favorite(&mut self, recipe_id: &str) -> bool {
        let favorite = self.user.toggle_favorite(recipe_id);
        self.persist_user();
        favorite
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.user.is_favorite(recipe_id)
    }

    /// Favorites that still resolve to a recipe
    pub fn favorite_recipes(&self) -> Vec<&Recipe> {
        self.user
            .favorite_recipes
            .iter()
            .filter_map(|id| self.get_recipe_by_id(id))
            .collect()
    }

    pub fn my_recipes(&self) -> Vec<&Recipe> {
        self.user
            .my_recipes
            .iter()
            .filter_map(|id| self.get_recipe_by_id(id))
            .collect()
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> &User {
        self.user.apply(update);
        self.persist_user();
        &self.user
    }

    // Shopping list

    pub fn shopping_list(&self) -> &[ShoppingListItem] {
        &self.shopping_list
    }

    /// Add one item per ingredient, skipping ids already on the list.
    ///
    /// Returns how many items were inserted.
    pub fn add_to_shopping_list(&mut self, recipe: &Recipe) -> usize {
        let mut inserted = 0;
        for ingredient in &recipe.ingredients {
            let item = ShoppingListItem::from_ingredient(recipe, ingredient);
            if self.shopping_list.iter().any(|existing| existing.id == item.id) {
                continue;
            }
            self.shopping_list.push(item);
            inserted += 1;
        }

        if inserted > 0 {
            self.persist_shopping_list();
        }
        inserted
    }

    /// Same as `add_to_shopping_list` for a recipe looked up by id
    pub fn add_recipe_to_shopping_list(&mut self, recipe_id: &str) -> CatalogResult<usize> {
        let recipe = self
            .get_recipe_by_id(recipe_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(recipe_id.to_string()))?;
        Ok(self.add_to_shopping_list(&recipe))
    }

    /// Flip one item's checked flag; returns the new flag, `None` if absent
    pub fn toggle_shopping_list_item(&mut self, item_id: &str) -> Option<bool> {
        let item = self.shopping_list.iter_mut().find(|i| i.id == item_id)?;
        item.checked = !item.checked;
        let checked = item.checked;
        self.persist_shopping_list();
        Some(checked)
    }

    pub fn remove_shopping_list_item(&mut self, item_id: &str) -> bool {
        let before = self.shopping_list.len();
        self.shopping_list.retain(|i| i.id != item_id);
        let removed = self.shopping_list.len() != before;
        if removed {
            self.persist_shopping_list();
        }
        removed
    }

    pub fn clear_shopping_list(&mut self) {
        self.shopping_list.clear();
        self.persist_shopping_list();
    }

    pub fn checked_items(&self) -> Vec<&ShoppingListItem> {
        self.shopping_list.iter().filter(|i| i.checked).collect()
    }

    pub fn unchecked_items(&self) -> Vec<&ShoppingListItem> {
        self.shopping_list.iter().filter(|i| !i.checked).collect()
    }

    pub fn shopping_summary(&self) -> ShoppingSummary {
        let checked = self.shopping_list.iter().filter(|i| i.checked).count();
        ShoppingSummary {
            total: self.shopping_list.len(),
            checked,
            unchecked: self.shopping_list.len() - checked,
        }
    }
}
