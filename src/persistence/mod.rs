// Persistence boundary - whole-collection JSON blobs under namespaced keys
pub mod memory;
pub mod sqlite;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::domain::{Recipe, ShoppingListItem, User};
use crate::catalog::seed;
use crate::error::StoreError;

pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

pub const DEFAULT_NAMESPACE: &str = "tastyNest";

/// Key-value blob store the catalog is persisted to
pub trait BlobStore {
    /// Read the blob under `key`, `None` when never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the blob under `key`
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: BlobStore + ?Sized> BlobStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

/// One key per logical collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub recipes: String,
    pub user: String,
    pub shopping_list: String,
}

impl StorageKeys {
    pub fn new(namespace: &str) -> Self {
        Self {
            recipes: format!("{}_recipes", namespace),
            user: format!("{}_user", namespace),
            shopping_list: format!("{}_shoppingList", namespace),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// Everything the catalog store persists
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub recipes: Vec<Recipe>,
    pub user: User,
    pub shopping_list: Vec<ShoppingListItem>,
}

impl Snapshot {
    pub fn seeded() -> Self {
        Self {
            recipes: seed::seed_recipes(),
            user: seed::sample_user(),
            shopping_list: Vec::new(),
        }
    }
}

fn load_or<T, S, F>(store: &S, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    S: BlobStore + ?Sized,
    F: FnOnce() -> T,
{
    match store.get(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Malformed blob under {}, using defaults: {}", key, e);
                fallback()
            }
        },
        Ok(None) => {
            tracing::debug!("No blob under {}, using defaults", key);
            fallback()
        }
        Err(e) => {
            tracing::warn!("Failed to read {}, using defaults: {}", key, e);
            fallback()
        }
    }
}

/// Drop later recipes that reuse an id already seen
fn dedupe_ids(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    let before = recipes.len();
    let unique: Vec<Recipe> = recipes
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();

    if unique.len() < before {
        tracing::warn!(
            "Dropped {} persisted recipes with repeated ids",
            before - unique.len()
        );
    }
    unique
}

/// Load each collection independently, falling back to seed data
pub fn load_snapshot<S: BlobStore + ?Sized>(store: &S, keys: &StorageKeys) -> Snapshot {
    let recipes = dedupe_ids(load_or(store, &keys.recipes, seed::seed_recipes));
    let user = load_or(store, &keys.user, seed::sample_user);
    let shopping_list = load_or(store, &keys.shopping_list, Vec::new);

    Snapshot {
        recipes,
        user,
        shopping_list,
    }
}

/// Serialize and overwrite one collection
pub fn save_collection<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: BlobStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.put(key, &json)
}
