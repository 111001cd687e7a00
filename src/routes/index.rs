use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response};
use caloriewise_meal::{ChartBar, DailySummary, FoodItem, MealType, Unit, bucket_calories};
use caloriewise_shared::FieldErrors;
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

/// Raw add-food form fields, kept as typed so they can be redisplayed.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AddFoodForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
}

impl AddFoodForm {
    pub fn is_unit(&self, unit: &Unit) -> bool {
        let tag: &str = unit.as_ref();
        self.unit == tag
    }
}

pub struct MealCard {
    pub meal_type: MealType,
    pub items: Vec<FoodItem>,
    pub total: u32,
    pub form: AddFoodForm,
    pub errors: FieldErrors,
}

impl MealCard {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn empty_message(&self) -> String {
        format!("No {} items added yet.", self.meal_type)
    }
}

#[derive(askama::Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub summary: DailySummary,
    pub cards: Vec<MealCard>,
    pub average: u32,
    pub bars: Vec<ChartBar>,
    pub suggestion_pending: bool,
    pub suggestion_delay_ms: u64,
    pub units: &'static [Unit],
}

/// Rejected add-food submission, shown on its card.
pub struct Rejected {
    pub meal_type: MealType,
    pub form: AddFoodForm,
    pub errors: FieldErrors,
}

pub async fn dashboard(
    template: &Template,
    app_state: &AppState,
    mut rejected: Option<Rejected>,
) -> IndexTemplate {
    let (state, suggestion_pending) = {
        let mut session = app_state.session.write().await;
        (session.state().clone(), session.take_suggestion())
    };

    let cards = MealType::VARIANTS
        .iter()
        .map(|meal_type| {
            let items = state.meals.get(*meal_type);
            let (form, errors) = match rejected.take_if(|r| r.meal_type == *meal_type) {
                Some(r) => (r.form, r.errors),
                None => (AddFoodForm::default(), FieldErrors::default()),
            };

            MealCard {
                meal_type: *meal_type,
                items: items.to_vec(),
                total: bucket_calories(items),
                form,
                errors,
            }
        })
        .collect();

    IndexTemplate {
        summary: state.summary(),
        cards,
        average: app_state.history.average(),
        bars: app_state.history.bars(),
        suggestion_pending,
        suggestion_delay_ms: template.suggestion_delay_ms,
        units: Unit::VARIANTS,
    }
}

pub async fn render(
    template: &Template,
    app_state: &AppState,
    status: StatusCode,
    rejected: Option<Rejected>,
) -> Response {
    let page = dashboard(template, app_state, rejected).await;

    template.render_status(status, page)
}

pub async fn page(template: Template, State(app_state): State<AppState>) -> impl IntoResponse {
    render(&template, &app_state, StatusCode::OK, None).await
}
