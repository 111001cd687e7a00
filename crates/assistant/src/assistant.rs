use std::sync::Arc;

use caloriewise_shared::Result;

use crate::{
    AlternateMeals, AlternateMealsFlow, AlternateMealsInput, DailyMealPlan, DailyMealPlanFlow,
    DailyMealPlanInput, GeminiModel, GeminiSettings, GenerativeModel, UnconfiguredModel, run,
};

#[derive(Clone)]
pub struct Assistant {
    model: Arc<dyn GenerativeModel>,
}

impl Assistant {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Gemini backed assistant, or one that always fails when no API key is set.
    pub fn gemini(settings: GeminiSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            tracing::warn!("no generative model API key configured, AI flows are disabled");

            return Ok(Self::new(Arc::new(UnconfiguredModel)));
        }

        Ok(Self::new(Arc::new(GeminiModel::new(settings)?)))
    }

    pub async fn daily_meal_plan(&self, input: &DailyMealPlanInput) -> Result<DailyMealPlan> {
        run::<DailyMealPlanFlow>(self.model.as_ref(), input).await
    }

    pub async fn alternate_meals(&self, input: &AlternateMealsInput) -> Result<AlternateMeals> {
        run::<AlternateMealsFlow>(self.model.as_ref(), input).await
    }
}
