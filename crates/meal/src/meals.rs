use std::sync::Arc;

use serde::Serialize;
use strum::VariantArray;

use crate::{FoodItem, MealType};

/// The four meal buckets. Each bucket is an immutable shared sequence, so
/// replacing one bucket leaves the others pointing at the same allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meals {
    pub breakfast: Arc<[FoodItem]>,
    pub lunch: Arc<[FoodItem]>,
    pub dinner: Arc<[FoodItem]>,
    pub snacks: Arc<[FoodItem]>,
}

impl Meals {
    pub fn get(&self, meal_type: MealType) -> &Arc<[FoodItem]> {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snacks => &self.snacks,
        }
    }

    /// Returns a copy with `meal_type` replaced by `items`.
    pub fn with(&self, meal_type: MealType, items: Arc<[FoodItem]>) -> Self {
        let mut meals = self.clone();
        match meal_type {
            MealType::Breakfast => meals.breakfast = items,
            MealType::Lunch => meals.lunch = items,
            MealType::Dinner => meals.dinner = items,
            MealType::Snacks => meals.snacks = items,
        }

        meals
    }

    /// Buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MealType, &[FoodItem])> {
        MealType::VARIANTS
            .iter()
            .map(|meal_type| (*meal_type, &self.get(*meal_type)[..]))
    }

    pub fn total_calories(&self) -> u32 {
        self.iter()
            .flat_map(|(_, items)| items.iter())
            .fold(0u32, |total, item| total.saturating_add(item.calories))
    }

    /// One line per consumed item, the form the alternate meals prompt expects.
    pub fn describe(&self) -> String {
        self.iter()
            .flat_map(|(meal_type, items)| {
                items.iter().map(move |food| {
                    format!(
                        "{meal_type}: {} ({}) - {} kcal",
                        food.name, food.quantity, food.calories
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn bucket_calories(items: &[FoodItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |total, item| total.saturating_add(item.calories))
}
