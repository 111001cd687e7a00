use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use caloriewise_assistant::{GenerationRequest, GenerativeModel};
use caloriewise_shared::{Error, Result};

/// Returns a fixed reply and records every request it receives.
#[derive(Clone)]
pub struct ScriptedModel {
    reply: std::result::Result<serde_json::Value, String>,
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

#[allow(dead_code)]
impl ScriptedModel {
    pub fn replying(value: serde_json::Value) -> Self {
        Self {
            reply: Ok(value),
            requests: Arc::default(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_owned()),
            requests: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|request| request.prompt.clone())
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: GenerationRequest) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(request);

        self.reply.clone().map_err(Error::Generation)
    }
}
