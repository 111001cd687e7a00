use std::sync::Arc;

use serde::Serialize;
use ulid::Ulid;

use crate::{DailySummary, FoodItem, MealType, Meals, NewFood};

pub const DEFAULT_DAILY_GOAL: u32 = 2000;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddFood { meal_type: MealType, food: NewFood },
    RemoveFood { meal_type: MealType, food_id: String },
}

impl Action {
    pub fn add(meal_type: MealType, food: NewFood) -> Self {
        Action::AddFood { meal_type, food }
    }

    pub fn remove(meal_type: MealType, food_id: impl Into<String>) -> Self {
        Action::RemoveFood {
            meal_type,
            food_id: food_id.into(),
        }
    }
}

/// Today's meals and the goal they are measured against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealState {
    pub meals: Meals,
    pub daily_goal: u32,
}

impl Default for MealState {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_GOAL)
    }
}

impl MealState {
    pub fn new(daily_goal: u32) -> Self {
        Self {
            meals: Meals::default(),
            daily_goal,
        }
    }

    /// Applies `action`, minting a ULID for added foods.
    pub fn reduce(&self, action: Action) -> MealState {
        self.reduce_with(action, || Ulid::new().to_string())
    }

    /// Applies `action`; `mint_id` is only called for `AddFood`.
    pub fn reduce_with(&self, action: Action, mint_id: impl FnOnce() -> String) -> MealState {
        match action {
            Action::AddFood { meal_type, food } => {
                let items: Arc<[FoodItem]> = self
                    .meals
                    .get(meal_type)
                    .iter()
                    .cloned()
                    .chain(std::iter::once(food.with_id(mint_id())))
                    .collect();

                MealState {
                    meals: self.meals.with(meal_type, items),
                    daily_goal: self.daily_goal,
                }
            }
            Action::RemoveFood { meal_type, food_id } => {
                let current = self.meals.get(meal_type);
                if !current.iter().any(|item| item.id == food_id) {
                    return self.clone();
                }

                let items: Arc<[FoodItem]> = current
                    .iter()
                    .filter(|item| item.id != food_id)
                    .cloned()
                    .collect();

                MealState {
                    meals: self.meals.with(meal_type, items),
                    daily_goal: self.daily_goal,
                }
            }
        }
    }

    pub fn total_calories(&self) -> u32 {
        self.meals.total_calories()
    }

    pub fn summary(&self) -> DailySummary {
        DailySummary::new(self.total_calories(), self.daily_goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(name: &str, calories: u32) -> NewFood {
        NewFood {
            name: name.to_owned(),
            quantity: "100 g".to_owned(),
            calories,
        }
    }

    #[test]
    fn add_appends_with_minted_id() {
        let state = MealState::default()
            .reduce_with(Action::add(MealType::Lunch, food("Soup", 180)), || {
                "a".to_owned()
            })
            .reduce_with(Action::add(MealType::Lunch, food("Bread", 90)), || {
                "b".to_owned()
            });

        let lunch = state.meals.get(MealType::Lunch);
        assert_eq!(lunch.len(), 2);
        assert_eq!(lunch[0].id, "a");
        assert_eq!(lunch[1].id, "b");
        assert_eq!(lunch[1].name, "Bread");
        assert_eq!(state.daily_goal, DEFAULT_DAILY_GOAL);
    }

    #[test]
    fn reduce_mints_distinct_ids() {
        let state = MealState::default()
            .reduce(Action::add(MealType::Snacks, food("Apple", 95)))
            .reduce(Action::add(MealType::Snacks, food("Apple", 95)));

        let snacks = state.meals.get(MealType::Snacks);
        assert_ne!(snacks[0].id, snacks[1].id);
    }

    #[test]
    fn remove_filters_matching_id() {
        let state = MealState::default()
            .reduce_with(Action::add(MealType::Dinner, food("Pasta", 600)), || {
                "1".to_owned()
            })
            .reduce_with(Action::add(MealType::Dinner, food("Salad", 120)), || {
                "2".to_owned()
            });

        let next = state.reduce(Action::remove(MealType::Dinner, "1"));
        let dinner = next.meals.get(MealType::Dinner);
        assert_eq!(dinner.len(), 1);
        assert_eq!(dinner[0].id, "2");
        assert_eq!(next.total_calories(), 120);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let state = MealState::default()
            .reduce_with(Action::add(MealType::Breakfast, food("Eggs", 140)), || {
                "1".to_owned()
            });

        let next = state.reduce(Action::remove(MealType::Breakfast, "missing"));
        assert_eq!(next, state);
        assert!(Arc::ptr_eq(&next.meals.breakfast, &state.meals.breakfast));

        let next = state.reduce(Action::remove(MealType::Lunch, "1"));
        assert_eq!(next.meals.get(MealType::Breakfast).len(), 1);
    }

    #[test]
    fn add_over_goal_makes_summary_over() {
        let state = MealState::new(2000).reduce(Action::add(MealType::Dinner, food("Feast", 2100)));
        let summary = state.summary();
        assert_eq!(summary.current, 2100);
        assert!(summary.is_over);
    }
}
