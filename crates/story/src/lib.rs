#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod parse;
mod prompt;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use dreamfairy_auth::Authenticated;
use dreamfairy_core::{JsonBody, method_not_allowed};

pub use parse::parse_story_node;
pub use server::{Server, StorySettings};
pub use types::{StoryGenerationRequest, StoryGenerationResult, StoryPrompt};

/// Build the story server from configuration
pub fn build_server(config: &dreamfairy_config::Config) -> anyhow::Result<Arc<Server>> {
    Ok(Arc::new(Server::from_config(&config.story)))
}

/// Create the endpoint router for story generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/generate-story", post(generate).fallback(method_not_allowed))
}

/// Handle story generation requests
async fn generate(
    State(server): State<Arc<Server>>,
    Authenticated(user): Authenticated,
    JsonBody(request): JsonBody<StoryGenerationRequest>,
) -> dreamfairy_core::Result<Json<StoryGenerationResult>> {
    let prompt = request.validate()?;

    tracing::debug!(
        user_id = %user.id,
        history = prompt.history.len(),
        language = prompt.language.code(),
        "story generation handler called"
    );

    let node = server.generate(&prompt).await?;

    tracing::debug!(choices = node.choices.len(), "story node generated");

    Ok(Json(node))
}
