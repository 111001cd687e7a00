#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use caloriewise::{
    config::{AssistantConfig, Config, ObservabilityConfig, ServerConfig, TrackerConfig},
    routes::AppState,
};
use caloriewise_assistant::{Assistant, GenerationRequest, GenerativeModel};
use caloriewise_meal::{MonthlyHistory, SimulatedNutrition};
use caloriewise_shared::{Error, Result};
use http_body_util::BodyExt;
use rand::{SeedableRng, rngs::StdRng};
use time::macros::date;
use tower::ServiceExt;

/// Generative model returning a fixed payload and counting calls.
#[derive(Clone)]
pub struct FakeModel {
    reply: std::result::Result<serde_json::Value, String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeModel {
    pub fn replying(value: serde_json::Value) -> Self {
        Self {
            reply: Ok(value),
            prompts: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err("model unavailable".to_owned()),
            prompts: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, request: GenerationRequest) -> Result<serde_json::Value> {
        self.prompts.lock().unwrap().push(request.prompt);

        self.reply.clone().map_err(Error::Generation)
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        observability: ObservabilityConfig::default(),
        tracker: TrackerConfig::default(),
        assistant: AssistantConfig::default(),
    }
}

pub struct TestApp {
    pub state: AppState,
    pub model: FakeModel,
}

impl TestApp {
    pub fn new(model: FakeModel) -> Self {
        Self::with_goal(model, 2000)
    }

    pub fn with_goal(model: FakeModel, daily_goal: u32) -> Self {
        let mut config = test_config();
        config.tracker.daily_goal = daily_goal;

        let history = MonthlyHistory::simulate(date!(2024 - 10 - 30), &mut StdRng::seed_from_u64(7));
        let state = AppState::new(
            config,
            Assistant::new(Arc::new(model.clone())),
            Arc::new(SimulatedNutrition::seeded(42)),
            history,
        );

        Self { state, model }
    }

    pub fn router(&self) -> Router {
        caloriewise::routes::router(self.state.clone())
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        self.router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn state_json(&self) -> serde_json::Value {
        let body = body_string(self.get("/api/state").await).await;
        serde_json::from_str(&body).unwrap()
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
