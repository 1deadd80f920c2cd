use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::careers::chat::ChatError;
use crate::careers::detail::CareerRequest;
use crate::careers::models::{
    CareerChatRequest, CareerChatResponse, CareerDetail, CareerTransitionGraph, Profession,
    Region, TransitionPlan,
};
use crate::careers::transition::TransitionRequest;
use crate::errors::AppError;
use crate::models::api::ApiResponse;
use crate::state::AppState;

const IMAGE_CACHE_CONTROL: &str = "public, max-age=604800";

#[derive(Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

impl RegionQuery {
    fn region(&self) -> Region {
        Region::normalize(self.region.as_deref())
    }
}

fn find_profession<'a>(state: &'a AppState, id: &str) -> Result<&'a Profession, AppError> {
    state
        .careers
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Profession '{id}' not found")))
}

/// GET /api/v1/careers
pub async fn handle_list_careers(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<Profession>>> {
    ApiResponse::ok(state.careers.professions().to_vec())
}

/// GET /api/v1/careers/transitions
pub async fn handle_transition_graph(
    State(state): State<AppState>,
) -> Json<ApiResponse<CareerTransitionGraph>> {
    ApiResponse::ok(state.careers.graph())
}

/// GET /api/v1/careers/:id?region=
pub async fn handle_get_career_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RegionQuery>,
) -> Result<Json<ApiResponse<CareerDetail>>, AppError> {
    let profession = find_profession(&state, &id)?;
    let request = CareerRequest::new(profession.clone(), params.region());
    let detail = state
        .career_details
        .get_or_generate(&request)
        .await
        .map_err(|e| AppError::generation("Failed to generate career detail", e))?;
    Ok(ApiResponse::ok(detail))
}

/// GET /api/v1/careers/:id/image
pub async fn handle_get_career_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let profession = find_profession(&state, &id)?;
    let bytes = state
        .images
        .get_or_generate(&profession.id, &profession.title)
        .await
        .map_err(|e| AppError::generation("Image generation failed", e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/careers/:id/chat?region=
pub async fn handle_career_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RegionQuery>,
    Json(req): Json<CareerChatRequest>,
) -> Result<Json<ApiResponse<CareerChatResponse>>, AppError> {
    let profession = find_profession(&state, &id)?;
    let reply = state
        .chat
        .reply(profession, &req.messages, params.region())
        .await
        .map_err(|e| match e {
            ChatError::Invalid(msg) => AppError::Validation(msg),
            ChatError::Generation(source) => AppError::generation("Chat failed", source),
        })?;
    Ok(ApiResponse::ok(CareerChatResponse { reply }))
}

/// GET /api/v1/careers/:from/transition/:to
pub async fn handle_get_transition_plan(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<ApiResponse<TransitionPlan>>, AppError> {
    let source = find_profession(&state, &from)?;
    let target = find_profession(&state, &to)?;
    let request =
        TransitionRequest::new(source.clone(), target.clone()).map_err(AppError::Validation)?;
    let plan = state
        .transition_plans
        .get_or_generate(&request)
        .await
        .map_err(|e| AppError::generation("Failed to generate transition plan", e))?;
    Ok(ApiResponse::ok(plan))
}
