use anyhow::Result;
use caloriewise::config::Config;
use caloriewise_assistant::{Assistant, DailyMealPlanInput};

/// Runs the meal plan flow once and prints the markdown answer.
pub async fn plan(
    config: Config,
    foods: String,
    restrictions: Option<String>,
    goal: Option<u32>,
) -> Result<()> {
    let assistant = Assistant::gemini(config.assistant.gemini_settings())?;

    let input = DailyMealPlanInput {
        preferred_foods: foods,
        restrictions: restrictions.unwrap_or_default(),
        calorie_goal: goal.unwrap_or(config.tracker.daily_goal),
    };

    let plan = assistant.daily_meal_plan(&input).await?;

    println!("{}", plan.meal_plan);

    Ok(())
}
