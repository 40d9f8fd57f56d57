//! JSON HTTP API over the action layer.

use crate::{
    ActionError, ActionResult, AppState, AudioForm, HashtagsForm, Operation, OptimizeForm,
    PackageForm, PostForm, PublishForm, SuggestedHashtags, TitlesForm, ToneForm,
};
use autopx_core::{PublishOutcome, PublishPlatform};
use autopx_generation::{
    AdjustedTone, ContentPackage, GeneratedPosts, NarratedAudio, OptimizedContent, Titles,
};
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::json;

/// Creates the studio API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/posts/generate", post(generate_post))
        .route("/api/posts/adjust-tone", post(adjust_tone))
        .route("/api/posts/optimize", post(optimize))
        .route("/api/posts/titles", post(generate_titles))
        .route("/api/posts/hashtags", post(suggest_hashtags))
        .route("/api/packages/generate", post(generate_package))
        .route("/api/audio/generate", post(generate_audio))
        .route("/api/publish/facebook", post(publish_facebook))
        .route("/api/publish/x", post(publish_x))
        .with_state(state)
}

type Payload<F> = Result<Json<F>, JsonRejection>;

fn read_form<F>(operation: Operation, payload: Payload<F>) -> ActionResult<F> {
    payload
        .map(|Json(form)| form)
        .map_err(|rejection| ActionError::unreadable(operation, rejection.body_text()))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn generate_post(
    State(state): State<AppState>,
    payload: Payload<PostForm>,
) -> ActionResult<Json<GeneratedPosts>> {
    let form = read_form(Operation::GeneratePost, payload)?;
    state.studio().generate_post(form).await.map(Json)
}

async fn adjust_tone(
    State(state): State<AppState>,
    payload: Payload<ToneForm>,
) -> ActionResult<Json<AdjustedTone>> {
    let form = read_form(Operation::AdjustTone, payload)?;
    state.studio().adjust_tone(form).await.map(Json)
}

async fn optimize(
    State(state): State<AppState>,
    payload: Payload<OptimizeForm>,
) -> ActionResult<Json<OptimizedContent>> {
    let form = read_form(Operation::Optimize, payload)?;
    state.studio().optimize(form).await.map(Json)
}

async fn generate_titles(
    State(state): State<AppState>,
    payload: Payload<TitlesForm>,
) -> ActionResult<Json<Titles>> {
    let form = read_form(Operation::GenerateTitles, payload)?;
    state.studio().generate_titles(form).await.map(Json)
}

async fn suggest_hashtags(
    State(state): State<AppState>,
    payload: Payload<HashtagsForm>,
) -> ActionResult<Json<SuggestedHashtags>> {
    let form = read_form(Operation::SuggestHashtags, payload)?;
    state.studio().suggest_hashtags(form).await.map(Json)
}

async fn generate_package(
    State(state): State<AppState>,
    payload: Payload<PackageForm>,
) -> ActionResult<Json<ContentPackage>> {
    let form = read_form(Operation::GeneratePackage, payload)?;
    state.studio().generate_package(form).await.map(Json)
}

async fn generate_audio(
    State(state): State<AppState>,
    payload: Payload<AudioForm>,
) -> ActionResult<Json<NarratedAudio>> {
    let form = read_form(Operation::GenerateAudio, payload)?;
    state.studio().generate_audio(form).await.map(Json)
}

async fn publish_facebook(
    State(state): State<AppState>,
    payload: Payload<PublishForm>,
) -> ActionResult<Json<PublishOutcome>> {
    let form = read_form(Operation::PublishFacebook, payload)?;
    state
        .studio()
        .publish(PublishPlatform::Facebook, form)
        .await
        .map(Json)
}

async fn publish_x(
    State(state): State<AppState>,
    payload: Payload<PublishForm>,
) -> ActionResult<Json<PublishOutcome>> {
    let form = read_form(Operation::PublishX, payload)?;
    state.studio().publish(PublishPlatform::X, form).await.map(Json)
}
