// Built-in catalog data and a bulk generator for large catalogs
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::domain::{Category, Difficulty, Ingredient, Instruction, Recipe, User};

type Item<'a> = (&'a str, &'a str, &'a str);

fn ingredients(items: &[Item<'_>]) -> Vec<Ingredient> {
    items
        .iter()
        .enumerate()
        .map(|(i, (name, amount, unit))| {
            Ingredient::new((i + 1).to_string(), *name, *amount, Some(*unit))
        })
        .collect()
}

fn instructions(steps: &[&str]) -> Vec<Instruction> {
    steps
        .iter()
        .enumerate()
        .map(|(i, description)| Instruction::new(i as u32 + 1, *description))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    title: &str,
    image: &str,
    cook_time: &str,
    servings: u32,
    rating: f64,
    category: Category,
    difficulty: Difficulty,
    items: &[Item<'_>],
    steps: &[&str],
) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        image: format!(
            "https://images.unsplash.com/{}?auto=format&fit=crop&w=600&q=80",
            image
        ),
        cook_time: cook_time.to_string(),
        servings,
        rating,
        category,
        difficulty,
        ingredients: ingredients(items),
        instructions: instructions(steps),
        author_id: None,
        created_at: None,
    }
}

/// Catalog used when nothing has been persisted yet
pub fn seed_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "1",
            "Creamy Mushroom Risotto with Fresh Herbs",
            "photo-1618160702438-9b02ab6515c9",
            "35 min",
            4,
            4.8,
            Category::Dinner,
            Difficulty::Medium,
            &[
                ("Arborio rice", "1", "cup"),
                ("Mixed mushrooms", "300", "g"),
                ("Vegetable broth", "4", "cups"),
                ("Parmesan cheese", "1/2", "cup"),
                ("Fresh herbs", "2", "tbsp"),
            ],
            &[
                "Heat broth in a separate pot and keep warm.",
                "Sauté mushrooms in olive oil until golden.",
                "Add rice and toast for 2 minutes.",
                "Add warm broth one ladle at a time, stirring constantly.",
                "Finish with cheese and herbs.",
            ],
        ),
        recipe(
            "2",
            "Fresh Berry Smoothie Bowl",
            "photo-1465146344425-f00d5f5c8f07",
            "10 min",
            2,
            4.6,
            Category::Breakfast,
            Difficulty::Easy,
            &[
                ("Mixed berries", "2", "cups"),
                ("Banana", "1", "large"),
                ("Greek yogurt", "1/2", "cup"),
                ("Honey", "2", "tbsp"),
                ("Granola", "1/4", "cup"),
            ],
            &[
                "Blend berries, banana, and yogurt until smooth.",
                "Pour into bowl and drizzle with honey.",
                "Top with granola and fresh berries.",
            ],
        ),
        recipe(
            "3",
            "Grilled Salmon with Lemon Butter",
            "photo-1506744038136-46273834b3fb",
            "25 min",
            3,
            4.9,
            Category::Lunch,
            Difficulty::Easy,
            &[
                ("Salmon fillets", "3", "pieces"),
                ("Butter", "3", "tbsp"),
                ("Lemon", "1", "large"),
                ("Fresh dill", "2", "tbsp"),
                ("Salt and pepper", "to taste", ""),
            ],
            &[
                "Season salmon with salt and pepper.",
                "Grill salmon for 4-5 minutes per side.",
                "Melt butter with lemon juice and dill.",
                "Serve salmon with lemon butter sauce.",
            ],
        ),
        recipe(
            "4",
            "Chocolate Chip Cookies",
            "photo-1721322800607-8c38375eef04",
            "20 min",
            12,
            4.7,
            Category::Desserts,
            Difficulty::Easy,
            &[
                ("All-purpose flour", "2", "cups"),
                ("Butter", "1", "cup"),
                ("Brown sugar", "3/4", "cup"),
                ("Chocolate chips", "1", "cup"),
                ("Vanilla extract", "1", "tsp"),
            ],
            &[
                "Cream butter and sugar together.",
                "Add flour and vanilla, mix well.",
                "Fold in chocolate chips.",
                "Bake at 350°F for 10-12 minutes.",
            ],
        ),
        recipe(
            "5",
            "Spicy Thai Green Curry",
            "photo-1455619452474-d2be8b1e70cd",
            "45 min",
            4,
            4.5,
            Category::Dinner,
            Difficulty::Hard,
            &[
                ("Green curry paste", "3", "tbsp"),
                ("Coconut milk", "400", "ml"),
                ("Chicken thighs", "500", "g"),
                ("Thai basil", "1", "handful"),
                ("Fish sauce", "1", "tbsp"),
            ],
            &[
                "Fry curry paste in a splash of coconut milk until fragrant.",
                "Add chicken and cook until sealed.",
                "Pour in remaining coconut milk and simmer for 20 minutes.",
                "Season with fish sauce and stir through basil.",
            ],
        ),
        recipe(
            "6",
            "Avocado Toast with Poached Egg",
            "photo-1541519227354-08fa5d50c44d",
            "15 min",
            1,
            4.3,
            Category::Breakfast,
            Difficulty::Easy,
            &[
                ("Sourdough bread", "1", "slice"),
                ("Avocado", "1", "ripe"),
                ("Egg", "1", "large"),
                ("Chili flakes", "1", "pinch"),
            ],
            &[
                "Toast the bread.",
                "Mash avocado and spread over toast.",
                "Poach the egg for 3 minutes and place on top.",
                "Finish with chili flakes.",
            ],
        ),
        recipe(
            "7",
            "Classic Tiramisu",
            "photo-1571877227200-a0d98ea607e9",
            "30 min",
            8,
            4.9,
            Category::Desserts,
            Difficulty::Medium,
            &[
                ("Mascarpone", "500", "g"),
                ("Ladyfingers", "24", "pieces"),
                ("Espresso", "1", "cup"),
                ("Eggs", "4", "large"),
                ("Cocoa powder", "2", "tbsp"),
            ],
            &[
                "Whisk egg yolks with mascarpone until smooth.",
                "Dip ladyfingers in espresso and layer in a dish.",
                "Spread mascarpone cream over the ladyfingers and repeat.",
                "Chill for at least 4 hours and dust with cocoa.",
            ],
        ),
        recipe(
            "8",
            "Mango Smoothie",
            "photo-1546173159-315724a31696",
            "5 min",
            2,
            4.4,
            Category::Drinks,
            Difficulty::Easy,
            &[
                ("Mango", "2", "cups"),
                ("Milk", "1", "cup"),
                ("Ice cubes", "6", ""),
            ],
            &["Blend everything until smooth.", "Serve immediately."],
        ),
    ]
}

/// Profile used when nothing has been persisted yet
pub fn sample_user() -> User {
    User {
        id: "1".to_string(),
        name: "Sarah Johnson".to_string(),
        bio: concat!(
            "Home cook passionate about healthy and delicious meals. ",
            "Love experimenting with new flavors!"
        )
        .to_string(),
        avatar: concat!(
            "https://images.unsplash.com/photo-1494790108755-2616b612b786",
            "?auto=format&fit=crop&w=150&q=80"
        )
        .to_string(),
        favorite_recipes: Vec::new(),
        my_recipes: Vec::new(),
    }
}

struct DishBase {
    name: &'static str,
    category: Category,
    ingredients: &'static [Item<'static>],
    steps: &'static [&'static str],
}

const DISHES: &[DishBase] = &[
    DishBase {
        name: "Chicken Curry",
        category: Category::Dinner,
        ingredients: &[
            ("Chicken breast", "500", "g"),
            ("Onion", "1", "large"),
            ("Curry powder", "2", "tbsp"),
            ("Coconut milk", "400", "ml"),
        ],
        steps: &[
            "Brown the chicken.",
            "Soften the onion with the curry powder.",
            "Simmer everything in coconut milk.",
        ],
    },
    DishBase {
        name: "Pasta Salad",
        category: Category::Salads,
        ingredients: &[
            ("Fusilli", "250", "g"),
            ("Cherry tomatoes", "1", "cup"),
            ("Cucumber", "1", ""),
            ("Olive oil", "3", "tbsp"),
        ],
        steps: &[
            "Cook and cool the pasta.",
            "Chop the vegetables.",
            "Toss with olive oil.",
        ],
    },
    DishBase {
        name: "Lentil Soup",
        category: Category::Soups,
        ingredients: &[
            ("Red lentils", "1", "cup"),
            ("Carrot", "2", ""),
            ("Vegetable stock", "1", "l"),
            ("Cumin", "1", "tsp"),
        ],
        steps: &[
            "Sweat the carrots with cumin.",
            "Add lentils and stock.",
            "Simmer until soft and blend.",
        ],
    },
    DishBase {
        name: "Banana Pancakes",
        category: Category::Breakfast,
        ingredients: &[
            ("Banana", "2", ""),
            ("Flour", "1", "cup"),
            ("Milk", "1", "cup"),
            ("Baking powder", "1", "tsp"),
        ],
        steps: &[
            "Mash the bananas.",
            "Whisk in flour, milk, and baking powder.",
            "Fry spoonfuls until golden.",
        ],
    },
    DishBase {
        name: "Veggie Wrap",
        category: Category::Lunch,
        ingredients: &[
            ("Tortilla", "2", ""),
            ("Hummus", "4", "tbsp"),
            ("Spinach", "1", "cup"),
            ("Bell pepper", "1", ""),
        ],
        steps: &[
            "Spread hummus over the tortillas.",
            "Layer the vegetables.",
            "Roll tightly and slice.",
        ],
    },
    DishBase {
        name: "Energy Bites",
        category: Category::Snacks,
        ingredients: &[
            ("Oats", "1", "cup"),
            ("Peanut butter", "1/2", "cup"),
            ("Dates", "8", ""),
            ("Chia seeds", "2", "tbsp"),
        ],
        steps: &[
            "Pulse dates until sticky.",
            "Mix in oats, peanut butter, and chia.",
            "Roll into balls and chill.",
        ],
    },
];

const STYLES: &[(&str, Item<'static>)] = &[
    ("Smoky", ("Smoked paprika", "1", "tsp")),
    ("Zesty", ("Lime zest", "1", "tbsp")),
    ("Herby", ("Fresh parsley", "2", "tbsp")),
    ("Spicy", ("Chili flakes", "1", "tsp")),
    ("Garlicky", ("Garlic", "3", "cloves")),
    ("Sweet", ("Maple syrup", "1", "tbsp")),
];

/// Produce `count` recipes by combining dish bases with styles.
///
/// The output may contain duplicates of each other or of an existing
/// catalog; callers run them through duplicate detection.
pub fn generate_recipes<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Recipe> {
    let difficulties = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    (0..count)
        .filter_map(|n| {
            let dish = DISHES.choose(rng)?;
            let (style, extra) = STYLES.choose(rng)?;
            let difficulty = *difficulties.choose(rng)?;

            let mut items: Vec<Item<'static>> = dish.ingredients.to_vec();
            items.push(*extra);

            let rating = (rng.gen_range(35..=50) as f64) / 10.0;
            let minutes = rng.gen_range(1..=12) * 5;

            Some(Recipe {
                id: format!("gen-{}", n + 1),
                title: format!("{} {}", style, dish.name),
                image: String::new(),
                cook_time: format!("{} min", minutes),
                servings: rng.gen_range(1..=6),
                rating,
                category: dish.category,
                difficulty,
                ingredients: ingredients(&items),
                instructions: instructions(dish.steps),
                author_id: None,
                created_at: None,
            })
        })
        .collect()
}
