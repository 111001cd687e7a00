use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};
use caloriewise_assistant::AlternateMealsInput;
use caloriewise_meal::DailySummary;
use caloriewise_shared::Error;
use serde::Deserialize;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

pub const SUGGESTIONS_FAILURE: &str =
    "Sorry, I couldn't get suggestions right now. Please try again later.";

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SuggestionsForm {
    #[serde(default)]
    pub preferred_foods: String,
    #[serde(default)]
    pub food_restrictions: String,
}

#[derive(askama::Template)]
#[template(path = "pages/suggestions.html")]
pub struct SuggestionsTemplate {
    pub summary: DailySummary,
    pub form: SuggestionsForm,
    pub suggestions_html: Option<String>,
    pub failure: Option<&'static str>,
}

pub async fn page(template: Template, State(app_state): State<AppState>) -> impl IntoResponse {
    let summary = app_state.session.read().await.state().summary();

    template.render(SuggestionsTemplate {
        summary,
        form: SuggestionsForm::default(),
        suggestions_html: None,
        failure: None,
    })
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();

    (!value.is_empty()).then(|| value.to_owned())
}

pub async fn action(
    template: Template,
    State(app_state): State<AppState>,
    Form(form): Form<SuggestionsForm>,
) -> impl IntoResponse {
    // Snapshot under the lock, the model call runs without it.
    let state = {
        let mut session = app_state.session.write().await;
        session.dismiss_suggestion();
        session.state().clone()
    };

    let input = AlternateMealsInput {
        current_meals: state.meals.describe(),
        daily_calorie_limit: state.daily_goal,
        preferred_foods: optional(&form.preferred_foods),
        food_restrictions: optional(&form.food_restrictions),
    };

    let (suggestions_html, failure) = match app_state.assistant.alternate_meals(&input).await {
        Ok(meals) => {
            let html = crate::try_page_response!(
                sync: crate::markdown::to_html(&meals.suggested_meals),
                template
            );

            (Some(html), None)
        }
        Err(err @ (Error::Generation(_) | Error::Validate(_))) => {
            tracing::error!(err = %err, "alternate meal suggestions failed");

            (None, Some(SUGGESTIONS_FAILURE))
        }
        Err(err) => {
            tracing::error!("{err}");

            return template.server_error();
        }
    };

    template.render(SuggestionsTemplate {
        summary: state.summary(),
        form,
        suggestions_html,
        failure,
    })
}

pub async fn dismiss(State(app_state): State<AppState>) -> impl IntoResponse {
    app_state.session.write().await.dismiss_suggestion();

    Redirect::to("/")
}
