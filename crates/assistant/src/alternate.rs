use caloriewise_shared::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::flow::{Flow, render_prompt};

#[derive(Debug, Clone, PartialEq, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateMealsInput {
    /// Meals already consumed today, one `meal: name (quantity) - N kcal` line each.
    pub current_meals: String,
    #[validate(range(min = 1, message = "Daily calorie limit must be positive."))]
    pub daily_calorie_limit: u32,
    #[serde(default)]
    pub preferred_foods: Option<String>,
    #[serde(default)]
    pub food_restrictions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateMeals {
    pub suggested_meals: String,
}

#[derive(askama::Template)]
#[template(path = "prompts/alternate_meals.txt")]
struct AlternateMealsPrompt<'a> {
    current_meals: &'a str,
    daily_calorie_limit: u32,
    preferred_foods: Option<&'a str>,
    food_restrictions: Option<&'a str>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub struct AlternateMealsFlow;

impl Flow for AlternateMealsFlow {
    const NAME: &'static str = "suggestAlternateMeals";

    type Input = AlternateMealsInput;
    type Output = AlternateMeals;

    fn prompt(input: &Self::Input) -> Result<String> {
        render_prompt(AlternateMealsPrompt {
            current_meals: &input.current_meals,
            daily_calorie_limit: input.daily_calorie_limit,
            preferred_foods: present(&input.preferred_foods),
            food_restrictions: present(&input.food_restrictions),
        })
    }

    fn output_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "suggestedMeals": {
                    "type": "STRING",
                    "description": "A list of suggested alternate, lower-calorie meal options for the rest of the day. Include detailed food options and calorie estimations."
                }
            },
            "required": ["suggestedMeals"]
        })
    }
}
