// Derived views - pure filter, sort, and pagination over the catalog
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::domain::{Category, Difficulty, Recipe};
use crate::error::CatalogError;

/// Category filter; `All` disables filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => write!(f, "{}", category),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest rated first
    #[default]
    Rating,
    /// Shortest cook time first
    Time,
    /// Easy, then Medium, then Hard
    Difficulty,
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(Self::Rating),
            "time" => Ok(Self::Time),
            "difficulty" => Ok(Self::Difficulty),
            other => Err(CatalogError::Validation(format!(
                "Unknown sort key: {}",
                other
            ))),
        }
    }
}

/// Leading integer of a free-text cook time ("35 min" -> 35).
///
/// Anything without leading digits counts as 0, and compound durations
/// like "1 hr 30 min" only read the first number. Saturates at `u32::MAX`.
pub fn cook_minutes(cook_time: &str) -> u32 {
    cook_time
        .trim_start()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u32, |minutes, digit| {
            minutes.saturating_mul(10).saturating_add(digit)
        })
}

fn compare(sort: SortKey, a: &Recipe, b: &Recipe) -> Ordering {
    match sort {
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::Time => cook_minutes(&a.cook_time).cmp(&cook_minutes(&b.cook_time)),
        SortKey::Difficulty => a.difficulty.rank().cmp(&b.difficulty.rank()),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub difficulty: Option<Difficulty>,
    pub sort: SortKey,
}

impl RecipeQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter, sort: SortKey) -> Self {
        Self {
            search: search.into(),
            category,
            difficulty: None,
            sort,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_search(recipe)
            && self.category.matches(recipe.category)
            && self.difficulty.map_or(true, |d| d == recipe.difficulty)
    }

    fn matches_search(&self, recipe: &Recipe) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(&recipe.title)
            || recipe.ingredients.iter().any(|i| contains(&i.name))
            || recipe.author_id.as_deref().is_some_and(contains)
    }

    /// Filter then stable-sort; ties keep catalog order
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        let mut matched: Vec<&Recipe> = recipes.iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| compare(self.sort, a, b));
        matched
    }
}

/// One page of a derived view
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}

/// Slice out a 1-based page. Out-of-range pages are empty, never clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let pages = total_pages(items.len(), page_size);

    let slice = if page == 0 || page > pages {
        Vec::new()
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(items.len());
        items[start..end].to_vec()
    };

    Page {
        items: slice,
        page,
        page_size,
        total_pages: pages,
        total_items: items.len(),
    }
}
