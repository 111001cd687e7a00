use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use caloriewise_meal::{Action, AddFoodInput, MealType};

use crate::{
    routes::{
        AppState,
        index::{AddFoodForm, Rejected},
    },
    template::Template,
};

pub async fn add(
    template: Template,
    State(app_state): State<AppState>,
    Path(meal_type): Path<String>,
    Form(form): Form<AddFoodForm>,
) -> impl IntoResponse {
    let meal_type = crate::try_page_response!(opt: meal_type.parse::<MealType>().ok(), template);

    let input = match AddFoodInput::parse(&form.name, &form.quantity, &form.unit) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(%meal_type, "add food rejected");

            return super::index::render(
                &template,
                &app_state,
                StatusCode::UNPROCESSABLE_ENTITY,
                Some(Rejected {
                    meal_type,
                    form,
                    errors,
                }),
            )
            .await;
        }
    };

    let food = crate::try_page_response!(
        input.into_new_food(app_state.nutrition.as_ref()),
        template
    );

    tracing::info!(%meal_type, food = %food.name, calories = food.calories, "food added");

    app_state
        .session
        .write()
        .await
        .dispatch(Action::add(meal_type, food));

    Redirect::to("/").into_response()
}

pub async fn remove(
    template: Template,
    State(app_state): State<AppState>,
    Path((meal_type, id)): Path<(String, String)>,
) -> impl IntoResponse {
    let meal_type = crate::try_page_response!(opt: meal_type.parse::<MealType>().ok(), template);

    app_state
        .session
        .write()
        .await
        .dispatch(Action::remove(meal_type, id));

    Redirect::to("/").into_response()
}
