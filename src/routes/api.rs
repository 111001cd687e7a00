use axum::{Json, extract::State, response::IntoResponse};
use caloriewise_meal::Meals;
use serde::Serialize;

use crate::routes::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySnapshot {
    pub current: u32,
    pub goal: u32,
    pub percentage: f64,
    pub is_over: bool,
    pub remaining: u32,
    pub exceeded_by: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub meals: Meals,
    pub daily_goal: u32,
    pub total_calories: u32,
    pub summary: SummarySnapshot,
    pub suggestion_pending: bool,
}

/// GET /api/state - JSON snapshot of the session
pub async fn state(State(app_state): State<AppState>) -> impl IntoResponse {
    let session = app_state.session.read().await;
    let state = session.state();
    let summary = state.summary();

    Json(StateSnapshot {
        meals: state.meals.clone(),
        daily_goal: state.daily_goal,
        total_calories: summary.current,
        summary: SummarySnapshot {
            current: summary.current,
            goal: summary.goal,
            percentage: summary.percentage,
            is_over: summary.is_over,
            remaining: summary.remaining(),
            exceeded_by: summary.exceeded_by(),
        },
        suggestion_pending: session.suggestion_pending(),
    })
}
