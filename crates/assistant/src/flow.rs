use caloriewise_shared::{Error, Result};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{GenerationRequest, GenerativeModel};

/// A prompt template with typed input and output.
pub trait Flow {
    const NAME: &'static str;

    type Input: Validate + Sync;
    type Output: DeserializeOwned;

    fn prompt(input: &Self::Input) -> Result<String>;

    fn output_schema() -> serde_json::Value;
}

/// Validates `input`, renders the prompt, calls `model` once and checks the
/// payload against the flow output. There are no retries.
#[tracing::instrument(skip_all, fields(flow = F::NAME))]
pub async fn run<F: Flow>(model: &dyn GenerativeModel, input: &F::Input) -> Result<F::Output> {
    input.validate()?;

    let prompt = F::prompt(input)?;
    tracing::debug!(prompt_len = prompt.len(), "prompt rendered");

    let payload = model
        .generate(GenerationRequest {
            flow: F::NAME,
            prompt,
            output_schema: F::output_schema(),
        })
        .await?;

    serde_json::from_value(payload).map_err(|err| {
        tracing::error!(err = %err, "model output does not match schema");

        Error::generation(format!("output does not match schema: {err}"))
    })
}

pub(crate) fn render_prompt(template: impl askama::Template) -> Result<String> {
    template
        .render()
        .map_err(|err| Error::Unknown(anyhow::Error::new(err)))
}
