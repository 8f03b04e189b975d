#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use dreamfairy_auth::Authenticated;
use dreamfairy_core::{JsonBody, method_not_allowed};

pub use provider::{ImageProvider, getimg::GetImgProvider};
pub use server::Server;
pub use types::{ImageGenerationRequest, ImageGenerationResult, ImagePrompt};

/// Build the illustration server from configuration
pub fn build_server(config: &dreamfairy_config::Config) -> anyhow::Result<Arc<Server>> {
    Ok(Arc::new(Server::from_config(&config.imagegen)))
}

/// Create the endpoint router for illustrations
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/generate-image", post(generate).fallback(method_not_allowed))
}

/// Handle image generation requests
async fn generate(
    State(server): State<Arc<Server>>,
    Authenticated(user): Authenticated,
    JsonBody(request): JsonBody<ImageGenerationRequest>,
) -> dreamfairy_core::Result<Json<ImageGenerationResult>> {
    let prompt = request.validate()?;

    tracing::debug!(
        user_id = %user.id,
        width = prompt.width,
        height = prompt.height,
        "image generation handler called"
    );

    let image_url = server.generate(&prompt).await?;

    Ok(Json(ImageGenerationResult { image_url }))
}
