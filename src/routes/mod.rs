use std::sync::Arc;

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use caloriewise_assistant::Assistant;
use caloriewise_meal::{MonthlyHistory, NutritionLookup};
use tokio::sync::RwLock;

use crate::{session::Session, template::Template};

mod api;
mod health;
mod index;
mod meals;
mod planner;
mod suggestions;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub session: Arc<RwLock<Session>>,
    pub assistant: Assistant,
    pub nutrition: Arc<dyn NutritionLookup>,
    pub history: Arc<MonthlyHistory>,
}

impl AppState {
    pub fn new(
        config: crate::config::Config,
        assistant: Assistant,
        nutrition: Arc<dyn NutritionLookup>,
        history: MonthlyHistory,
    ) -> Self {
        let session = Session::new(config.tracker.daily_goal);

        Self {
            config,
            session: Arc::new(RwLock::new(session)),
            assistant,
            nutrition,
            history: Arc::new(history),
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.not_found()
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(index::page))
        .route("/meals/{meal_type}/foods", post(meals::add))
        .route("/meals/{meal_type}/foods/{id}/delete", post(meals::remove))
        .route("/planner", get(planner::page).post(planner::action))
        .route(
            "/suggestions",
            get(suggestions::page).post(suggestions::action),
        )
        .route("/suggestions/dismiss", post(suggestions::dismiss))
        .route("/api/state", get(api::state))
        .nest_service("/static", crate::assets::AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
