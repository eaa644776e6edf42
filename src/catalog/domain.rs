// Domain types - plain data, no side effects
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Closed set of recipe categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Desserts,
    Snacks,
    Drinks,
    Salads,
    Soups,
    Vegan,
    Kids,
    #[serde(rename = "Quick Meals")]
    QuickMeals,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Desserts,
        Category::Snacks,
        Category::Drinks,
        Category::Salads,
        Category::Soups,
        Category::Vegan,
        Category::Kids,
        Category::QuickMeals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Desserts => "Desserts",
            Self::Snacks => "Snacks",
            Self::Drinks => "Drinks",
            Self::Salads => "Salads",
            Self::Soups => "Soups",
            Self::Vegan => "Vegan",
            Self::Kids => "Kids",
            Self::QuickMeals => "Quick Meals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CatalogError::Validation(format!("Unknown category: {}", s)))
    }
}

/// Difficulty level, ordered Easy < Medium < Hard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Sort rank: Easy=1, Medium=2, Hard=3
    pub fn rank(&self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Self::Easy),
            "Medium" => Ok(Self::Medium),
            "Hard" => Ok(Self::Hard),
            other => Err(CatalogError::Validation(format!(
                "Unknown difficulty: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    /// Free text, e.g. "1/2" or "to taste"
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: impl Into<String>,
        unit: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: amount.into(),
            unit: unit.filter(|u| !u.is_empty()).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: String,
    pub step: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Instruction {
    pub fn new(step: u32, description: impl Into<String>) -> Self {
        Self {
            id: step.to_string(),
            step,
            description: description.into(),
            duration: None,
            image: None,
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image: String,
    /// Free text such as "35 min"; see `query::cook_minutes`
    pub cook_time: String,
    pub servings: u32,
    pub rating: f64,
    pub category: Category,
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Check the invariants a published recipe must hold
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::Validation("Recipe id is required".into()));
        }
        validate_content(
            &self.title,
            self.servings,
            self.rating,
            &self.ingredients,
            &self.instructions,
        )?;

        for (position, instruction) in self.instructions.iter().enumerate() {
            if instruction.step as usize != position + 1 {
                return Err(CatalogError::Validation(format!(
                    "Instruction {} is numbered {}",
                    position + 1,
                    instruction.step
                )));
            }
        }

        Ok(())
    }
}

/// Authoring input: a recipe without identity, author, or timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub image: String,
    pub cook_time: String,
    pub servings: u32,
    pub rating: f64,
    pub category: Category,
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
}

impl RecipeDraft {
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_content(
            &self.title,
            self.servings,
            self.rating,
            &self.ingredients,
            &self.instructions,
        )
    }

    /// Materialize into a Recipe. Steps are renumbered from position.
    pub fn into_recipe(self, id: String, author_id: String, created_at: DateTime<Utc>) -> Recipe {
        let instructions = self
            .instructions
            .into_iter()
            .enumerate()
            .map(|(position, mut instruction)| {
                instruction.step = position as u32 + 1;
                instruction
            })
            .collect();

        Recipe {
            id,
            title: self.title.trim().to_string(),
            image: self.image,
            cook_time: self.cook_time,
            servings: self.servings,
            rating: self.rating,
            category: self.category,
            difficulty: self.difficulty,
            ingredients: self.ingredients,
            instructions,
            author_id: Some(author_id),
            created_at: Some(created_at),
        }
    }
}

fn validate_content(
    title: &str,
    servings: u32,
    rating: f64,
    ingredients: &[Ingredient],
    instructions: &[Instruction],
) -> Result<(), CatalogError> {
    if title.trim().is_empty() {
        return Err(CatalogError::Validation("Title is required".into()));
    }
    if servings == 0 {
        return Err(CatalogError::Validation(
            "Servings must be a positive number".into(),
        ));
    }
    if !(0.0..=5.0).contains(&rating) {
        return Err(CatalogError::Validation(format!(
            "Rating {} is outside 0.0-5.0",
            rating
        )));
    }
    if ingredients.is_empty() {
        return Err(CatalogError::Validation(
            "At least one ingredient is required".into(),
        ));
    }
    if instructions.is_empty() {
        return Err(CatalogError::Validation(
            "At least one instruction is required".into(),
        ));
    }
    if let Some(id) = first_repeated(ingredients.iter().map(|i| i.id.as_str())) {
        return Err(CatalogError::Validation(format!(
            "Ingredient id {} is used more than once",
            id
        )));
    }
    if let Some(id) = first_repeated(instructions.iter().map(|i| i.id.as_str())) {
        return Err(CatalogError::Validation(format!(
            "Instruction id {} is used more than once",
            id
        )));
    }
    Ok(())
}

fn first_repeated<'a>(mut ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.find(|id| !seen.insert(*id))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub name: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub checked: bool,
    pub recipe_id: String,
    pub recipe_name: String,
}

impl ShoppingListItem {
    /// Derived id, stable across repeated additions of the same recipe
    pub fn derive_id(recipe_id: &str, ingredient_id: &str) -> String {
        format!("{}-{}", recipe_id, ingredient_id)
    }

    pub fn from_ingredient(recipe: &Recipe, ingredient: &Ingredient) -> Self {
        Self {
            id: Self::derive_id(&recipe.id, &ingredient.id),
            name: ingredient.name.clone(),
            amount: ingredient.amount.clone(),
            unit: ingredient.unit.clone(),
            checked: false,
            recipe_id: recipe.id.clone(),
            recipe_name: recipe.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub avatar: String,
    /// Membership-tested; order only matters for display
    #[serde(default)]
    pub favorite_recipes: Vec<String>,
    #[serde(default)]
    pub my_recipes: Vec<String>,
}

impl User {
    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorite_recipes.iter().any(|id| id == recipe_id)
    }

    /// Flip membership, returning whether the id is now a favorite
    pub fn toggle_favorite(&mut self, recipe_id: &str) -> bool {
        if self.is_favorite(recipe_id) {
            self.favorite_recipes.retain(|id| id != recipe_id);
            false
        } else {
            self.favorite_recipes.push(recipe_id.to_string());
            true
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
    }
}

/// Profile edit; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}
