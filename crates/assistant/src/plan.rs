use caloriewise_shared::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::flow::{Flow, render_prompt};

#[derive(Debug, Clone, PartialEq, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealPlanInput {
    /// Comma separated list of foods the user prefers.
    pub preferred_foods: String,
    /// Comma separated list of dietary restrictions.
    #[serde(default)]
    pub restrictions: String,
    #[validate(range(min = 1, message = "Calorie goal must be positive."))]
    pub calorie_goal: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealPlan {
    pub meal_plan: String,
}

#[derive(askama::Template)]
#[template(path = "prompts/daily_meal_plan.txt")]
struct DailyMealPlanPrompt<'a> {
    preferred_foods: &'a str,
    restrictions: &'a str,
    calorie_goal: u32,
}

pub struct DailyMealPlanFlow;

impl Flow for DailyMealPlanFlow {
    const NAME: &'static str = "generateDailyMealPlan";

    type Input = DailyMealPlanInput;
    type Output = DailyMealPlan;

    fn prompt(input: &Self::Input) -> Result<String> {
        render_prompt(DailyMealPlanPrompt {
            preferred_foods: &input.preferred_foods,
            restrictions: &input.restrictions,
            calorie_goal: input.calorie_goal,
        })
    }

    fn output_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "mealPlan": {
                    "type": "STRING",
                    "description": "A detailed meal plan for the next day, including specific meal suggestions and calorie counts for each item."
                }
            },
            "required": ["mealPlan"]
        })
    }
}
