//! Duplicate detection for incoming recipes.
//!
//! A candidate duplicates an existing recipe when the titles are equal
//! ignoring case, when the titles share more than 80% of their words, or
//! when the ingredient names overlap by more than 85%. Edit distance is
//! only used for fuzzy lookups, never to reject a recipe.

use std::collections::HashSet;

use crate::catalog::domain::{Ingredient, Recipe};
use crate::error::DuplicateReason;

pub const TITLE_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const INGREDIENT_SIMILARITY_THRESHOLD: f64 = 0.85;
pub const FUZZY_TITLE_THRESHOLD: f64 = 0.8;

/// An existing recipe matched by `find_duplicate`
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateMatch<'a> {
    pub existing: &'a Recipe,
    pub reason: DuplicateReason,
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Shared words over the longer title's word count
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();

    let longest = tokens_a.len().max(tokens_b.len());
    if longest == 0 {
        return 0.0;
    }

    let set_b: HashSet<&str> = tokens_b.iter().copied().collect();
    let shared = tokens_a.iter().filter(|t| set_b.contains(*t)).count();

    shared as f64 / longest as f64
}

fn ingredient_names(ingredients: &[Ingredient]) -> HashSet<String> {
    ingredients
        .iter()
        .map(|i| normalize(&i.name))
        .filter(|name| !name.is_empty())
        .collect()
}

/// |A ∩ B| / max(|A|, |B|) over lowercased ingredient names. Empty lists score 0.
pub fn ingredient_similarity(a: &[Ingredient], b: &[Ingredient]) -> f64 {
    let names_a = ingredient_names(a);
    let names_b = ingredient_names(b);

    let largest = names_a.len().max(names_b.len());
    if names_a.is_empty() || names_b.is_empty() {
        return 0.0;
    }

    names_a.intersection(&names_b).count() as f64 / largest as f64
}

pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// (max_len - distance) / max_len on trimmed, lowercased input
pub fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    (longest - levenshtein(&a, &b)) as f64 / longest as f64
}

pub fn titles_look_alike(a: &str, b: &str) -> bool {
    normalized_levenshtein(a, b) > FUZZY_TITLE_THRESHOLD
}

/// Classify a candidate against one existing recipe
pub fn duplicate_reason(
    title: &str,
    ingredients: &[Ingredient],
    existing: &Recipe,
) -> Option<DuplicateReason> {
    if !title.trim().is_empty() && normalize(title) == normalize(&existing.title) {
        return Some(DuplicateReason::SameTitle);
    }

    let title_score = title_similarity(title, &existing.title);
    if title_score > TITLE_SIMILARITY_THRESHOLD {
        return Some(DuplicateReason::SimilarTitle(title_score));
    }

    let ingredient_score = ingredient_similarity(ingredients, &existing.ingredients);
    if ingredient_score > INGREDIENT_SIMILARITY_THRESHOLD {
        return Some(DuplicateReason::SimilarIngredients(ingredient_score));
    }

    None
}

/// First recipe in `existing` that the candidate duplicates
pub fn find_duplicate<'a>(
    title: &str,
    ingredients: &[Ingredient],
    existing: &'a [Recipe],
) -> Option<DuplicateMatch<'a>> {
    existing.iter().find_map(|recipe| {
        duplicate_reason(title, ingredients, recipe).map(|reason| DuplicateMatch {
            existing: recipe,
            reason,
        })
    })
}
