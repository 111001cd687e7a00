use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::IntoResponse,
};
use caloriewise_assistant::DailyMealPlanInput;
use caloriewise_shared::{Error, FieldErrors};
use serde::Deserialize;
use validator::Validate;

use crate::{routes::AppState, template::Template};

pub const PLAN_FAILURE: &str =
    "Sorry, I couldn't generate a meal plan right now. Please try again later.";
pub const FOODS_MESSAGE: &str = "Please list at least one food.";
pub const GOAL_MESSAGE: &str = "Calorie goal must be at least 500.";

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerForm {
    #[serde(default)]
    pub preferred_foods: String,
    #[serde(default)]
    pub restrictions: String,
    #[serde(default)]
    pub calorie_goal: String,
}

#[derive(Debug, Validate)]
struct PlannerInput {
    #[validate(length(min = 3, message = "Please list at least one food."))]
    preferred_foods: String,
    #[validate(range(min = 500, message = "Calorie goal must be at least 500."))]
    calorie_goal: u32,
}

impl PlannerForm {
    fn with_goal(goal: u32) -> Self {
        Self {
            preferred_foods: String::new(),
            restrictions: String::new(),
            calorie_goal: goal.to_string(),
        }
    }

    fn parse(&self) -> Result<DailyMealPlanInput, FieldErrors> {
        let goal = self.calorie_goal.trim().parse::<u32>().ok();
        let input = PlannerInput {
            preferred_foods: self.preferred_foods.to_owned(),
            calorie_goal: goal.unwrap_or_default(),
        };

        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::default(),
            Err(err) => FieldErrors::from(&err),
        };

        if goal.is_none() {
            errors.insert("calorie_goal", GOAL_MESSAGE);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DailyMealPlanInput {
            preferred_foods: input.preferred_foods,
            restrictions: self.restrictions.to_owned(),
            calorie_goal: input.calorie_goal,
        })
    }
}

#[derive(askama::Template)]
#[template(path = "pages/planner.html")]
pub struct PlannerTemplate {
    pub form: PlannerForm,
    pub errors: FieldErrors,
    pub plan_html: Option<String>,
    pub failure: Option<&'static str>,
}

pub async fn page(template: Template, State(app_state): State<AppState>) -> impl IntoResponse {
    template.render(PlannerTemplate {
        form: PlannerForm::with_goal(app_state.config.tracker.daily_goal),
        errors: FieldErrors::default(),
        plan_html: None,
        failure: None,
    })
}

pub async fn action(
    template: Template,
    State(app_state): State<AppState>,
    Form(form): Form<PlannerForm>,
) -> impl IntoResponse {
    let input = match form.parse() {
        Ok(input) => input,
        Err(errors) => {
            return template.render_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                PlannerTemplate {
                    form,
                    errors,
                    plan_html: None,
                    failure: None,
                },
            );
        }
    };

    let (plan_html, failure) = match app_state.assistant.daily_meal_plan(&input).await {
        Ok(plan) => {
            let html = crate::try_page_response!(
                sync: crate::markdown::to_html(&plan.meal_plan),
                template
            );

            (Some(html), None)
        }
        Err(err @ (Error::Generation(_) | Error::Validate(_))) => {
            tracing::error!(err = %err, "meal plan generation failed");

            (None, Some(PLAN_FAILURE))
        }
        Err(err) => {
            tracing::error!("{err}");

            return template.server_error();
        }
    };

    template.render(PlannerTemplate {
        form,
        errors: FieldErrors::default(),
        plan_html,
        failure,
    })
}
