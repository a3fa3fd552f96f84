use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{model, model_video, video};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::model::*;
use crate::models::shared::{empty_to_none, escape_like, parse_date, parse_index};
use crate::models::sort::apply_model_sort;
use crate::state::AppState;

/// Default page size for model listings.
const DEFAULT_TAKE: u64 = 12;

#[utoipa::path(
    get,
    path = "/",
    tag = "Models",
    operation_id = "listModels",
    summary = "List models with search, filtering, and pagination",
    description = "Returns a page of models with their linked videos plus the total count of matches. `search` is a case-insensitive substring match on name, `ethnicity` an exact-match filter; all active filters are AND-composed. `sort` reorders only the returned page. Non-numeric `skip`/`take` fall back to their defaults; out-of-range values yield an empty page, not an error.",
    params(ModelListQuery),
    responses(
        (status = 200, description = "Page of models", body = ModelListResponse),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ModelListQuery>,
) -> Result<Json<ModelListResponse>, AppError> {
    let skip = parse_index(query.skip.as_deref(), 0);
    let take = parse_index(query.take.as_deref(), DEFAULT_TAKE);

    let mut select = model::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(model::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    if let Some(ref ethnicity) = query.ethnicity
        && !ethnicity.is_empty()
    {
        select = select.filter(model::Column::Ethnicity.eq(ethnicity.clone()));
    }

    let total = select.clone().count(&state.db).await?;

    let rows = select
        .order_by_desc(model::Column::CreatedAt)
        .offset(Some(skip))
        .limit(Some(take))
        .all(&state.db)
        .await?;

    let mut videos_by_model = load_videos(&state.db, rows.iter().map(|m| m.id).collect()).await?;
    let mut data: Vec<ModelResponse> = rows
        .into_iter()
        .map(|m| {
            let videos = videos_by_model.remove(&m.id).unwrap_or_default();
            ModelResponse::from_parts(m, videos)
        })
        .collect();

    apply_model_sort(&mut data, query.sort.as_deref());

    Ok(Json(ModelListResponse {
        data,
        total,
        skip,
        take,
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Models",
    operation_id = "createModel",
    summary = "Create a new model",
    description = "Creates a model. `name` is required; every other field is optional and an empty string reads back as null.",
    request_body = ModelPayload,
    responses(
        (status = 201, description = "Model created", body = ModelResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_model(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ModelPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_model_payload(&payload)?;

    let date_of_birth = parse_date(payload.date_of_birth)?;
    let now = chrono::Utc::now();
    let new_model = model::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name.trim().to_string()),
        ethnicity: Set(empty_to_none(payload.ethnicity)),
        gender: Set(empty_to_none(payload.gender)),
        image: Set(empty_to_none(payload.image)),
        bio: Set(empty_to_none(payload.bio)),
        date_of_birth: Set(date_of_birth),
        measurements: Set(empty_to_none(payload.measurements)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let m = new_model.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(ModelResponse::from_parts(m, Vec::new())),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Models",
    operation_id = "getModel",
    summary = "Get a model by ID",
    description = "Returns the model with its linked videos.",
    params(("id" = Uuid, Path, description = "Model ID")),
    responses(
        (status = 200, description = "Model details", body = ModelResponse),
        (status = 404, description = "Model not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ModelResponse>, AppError> {
    let m = find_model(&state.db, id).await?;
    let videos = videos_for_model(&state.db, id).await?;
    Ok(Json(ModelResponse::from_parts(m, videos)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Models",
    operation_id = "updateModel",
    summary = "Replace a model",
    description = "Full-replace update: every mutable field is taken from the body, and an absent optional field is cleared to null rather than preserved.",
    params(("id" = Uuid, Path, description = "Model ID")),
    request_body = ModelPayload,
    responses(
        (status = 200, description = "Model updated", body = ModelResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Model not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ModelPayload>,
) -> Result<Json<ModelResponse>, AppError> {
    validate_model_payload(&payload)?;

    let date_of_birth = parse_date(payload.date_of_birth)?;

    let txn = state.db.begin().await?;
    let existing = find_model(&txn, id).await?;

    let mut active: model::ActiveModel = existing.into();
    active.name = Set(payload.name.trim().to_string());
    active.ethnicity = Set(empty_to_none(payload.ethnicity));
    active.gender = Set(empty_to_none(payload.gender));
    active.image = Set(empty_to_none(payload.image));
    active.bio = Set(empty_to_none(payload.bio));
    active.date_of_birth = Set(date_of_birth);
    active.measurements = Set(empty_to_none(payload.measurements));
    active.updated_at = Set(chrono::Utc::now());

    let m = active.update(&txn).await?;
    txn.commit().await?;

    let videos = videos_for_model(&state.db, id).await?;
    Ok(Json(ModelResponse::from_parts(m, videos)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Models",
    operation_id = "deleteModel",
    summary = "Delete a model",
    description = "Deletes the model and its video links. Linked videos themselves are left untouched.",
    params(("id" = Uuid, Path, description = "Model ID")),
    responses(
        (status = 204, description = "Model deleted"),
        (status = 404, description = "Model not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_model(&txn, id).await?;

    model_video::Entity::delete_many()
        .filter(model_video::Column::ModelId.eq(id))
        .exec(&txn)
        .await?;
    model::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_model<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<model::Model, AppError> {
    model::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Model not found".into()))
}

/// Fetch the linked videos for a set of models in one junction query.
async fn load_videos<C: ConnectionTrait>(
    db: &C,
    model_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<video::Model>>, AppError> {
    if model_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = model_video::Entity::find()
        .filter(model_video::Column::ModelId.is_in(model_ids))
        .find_also_related(video::Entity)
        .all(db)
        .await?;

    let mut by_model: HashMap<Uuid, Vec<video::Model>> = HashMap::new();
    for (link, related) in rows {
        if let Some(v) = related {
            by_model.entry(link.model_id).or_default().push(v);
        }
    }

    Ok(by_model)
}

async fn videos_for_model<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Vec<video::Model>, AppError> {
    Ok(load_videos(db, vec![id]).await?.remove(&id).unwrap_or_default())
}
