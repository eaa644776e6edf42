pub mod domain;
pub mod query;
pub mod seed;
pub mod similarity;
pub mod store;

pub use domain::{
    Category, Difficulty, Ingredient, Instruction, ProfileUpdate, Recipe, RecipeDraft,
    ShoppingListItem, User,
};
pub use query::{paginate, CategoryFilter, Page, RecipeQuery, SortKey};
pub use store::{CatalogStore, ShoppingSummary, ViewState};
