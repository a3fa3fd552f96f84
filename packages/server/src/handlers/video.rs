use std::collections::{HashMap, HashSet};

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, Query as SeaQuery};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{model, model_video, video};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::shared::{empty_to_none, escape_like, parse_index};
use crate::models::sort::apply_video_sort;
use crate::models::video::*;
use crate::state::AppState;

/// Default page size for video listings.
const DEFAULT_TAKE: u64 = 10;

#[utoipa::path(
    get,
    path = "/",
    tag = "Videos",
    operation_id = "listVideos",
    summary = "List videos with search, filtering, and pagination",
    description = "Returns a page of videos with their linked models plus the total count of matches, newest upload first. `search` is a case-insensitive substring match on title; `modelId` keeps only videos linked to that model (at-least-one semantics); all active filters are AND-composed. `sort` reorders only the returned page. Non-numeric `skip`/`take` fall back to their defaults; out-of-range values yield an empty page, not an error.",
    params(VideoListQuery),
    responses(
        (status = 200, description = "Page of videos", body = VideoListResponse),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoListQuery>,
) -> Result<Json<VideoListResponse>, AppError> {
    let skip = parse_index(query.skip.as_deref(), 0);
    let take = parse_index(query.take.as_deref(), DEFAULT_TAKE);

    let mut select = video::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(video::Column::Title)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    if let Some(ref model_id) = query.model_id
        && !model_id.is_empty()
    {
        match model_id.trim().parse::<Uuid>() {
            Ok(model_id) => {
                select = select.filter(
                    video::Column::Id.in_subquery(
                        SeaQuery::select()
                            .column(model_video::Column::VideoId)
                            .from(model_video::Entity)
                            .and_where(model_video::Column::ModelId.eq(model_id))
                            .to_owned(),
                    ),
                );
            }
            // A value that is not a UUID can never match a link row.
            Err(_) => select = select.filter(Expr::value(false)),
        }
    }

    let total = select.clone().count(&state.db).await?;

    let rows = select
        .order_by_desc(video::Column::UploadedAt)
        .offset(Some(skip))
        .limit(Some(take))
        .all(&state.db)
        .await?;

    let mut models_by_video = load_models(&state.db, rows.iter().map(|v| v.id).collect()).await?;
    let mut data: Vec<VideoResponse> = rows
        .into_iter()
        .map(|v| {
            let models = models_by_video.remove(&v.id).unwrap_or_default();
            VideoResponse::from_parts(v, models)
        })
        .collect();

    apply_video_sort(&mut data, query.sort.as_deref());

    Ok(Json(VideoListResponse {
        data,
        total,
        skip,
        take,
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Videos",
    operation_id = "createVideo",
    summary = "Create a new video",
    description = "Creates a video and links it to the models in `modelIds`. `title` and `url` are required; `views` defaults to 0; `duration` and `views` accept numbers or numeric strings.",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "A linked model does not exist (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_video(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_video(&payload)?;

    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;

    let new_video = video::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(payload.title.trim().to_string()),
        description: Set(empty_to_none(payload.description)),
        url: Set(payload.url.trim().to_string()),
        preview_url: Set(empty_to_none(payload.preview_url)),
        thumbnail: Set(empty_to_none(payload.thumbnail)),
        duration: Set(payload.duration),
        views: Set(payload.views.unwrap_or(0)),
        uploaded_at: Set(now),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let v = new_video.insert(&txn).await?;

    let linked = match payload.model_ids {
        Some(ref model_ids) => link_models(&txn, v.id, model_ids).await?,
        None => Vec::new(),
    };

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(VideoResponse::from_parts(v, linked)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Videos",
    operation_id = "getVideo",
    summary = "Get a video by ID",
    description = "Returns the video with its linked models.",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video details", body = VideoResponse),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VideoResponse>, AppError> {
    let v = find_video(&state.db, id).await?;
    let models = models_for_video(&state.db, id).await?;
    Ok(Json(VideoResponse::from_parts(v, models)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Videos",
    operation_id = "updateVideo",
    summary = "Replace a video",
    description = "Full-replace update with two exceptions: an absent `views` leaves the counter unchanged, and an absent `modelIds` leaves the link set unchanged. When `modelIds` is present the link set is replaced wholesale.",
    params(("id" = Uuid, Path, description = "Video ID")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Video or linked model not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateVideoRequest>,
) -> Result<Json<VideoResponse>, AppError> {
    validate_update_video(&payload)?;

    let txn = state.db.begin().await?;
    let existing = find_video(&txn, id).await?;

    let mut active: video::ActiveModel = existing.into();
    active.title = Set(payload.title.trim().to_string());
    active.description = Set(empty_to_none(payload.description));
    active.url = Set(payload.url.trim().to_string());
    active.preview_url = Set(empty_to_none(payload.preview_url));
    active.thumbnail = Set(empty_to_none(payload.thumbnail));
    active.duration = Set(payload.duration);
    if let Some(views) = payload.views {
        active.views = Set(views);
    }
    active.updated_at = Set(chrono::Utc::now());

    let v = active.update(&txn).await?;

    let models = match payload.model_ids {
        Some(ref model_ids) => {
            model_video::Entity::delete_many()
                .filter(model_video::Column::VideoId.eq(id))
                .exec(&txn)
                .await?;
            link_models(&txn, id, model_ids).await?
        }
        None => models_for_video(&txn, id).await?,
    };

    txn.commit().await?;

    Ok(Json(VideoResponse::from_parts(v, models)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Videos",
    operation_id = "deleteVideo",
    summary = "Delete a video",
    description = "Deletes the video and its model links. Linked models themselves are left untouched.",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Persistence failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_video(&txn, id).await?;

    model_video::Entity::delete_many()
        .filter(model_video::Column::VideoId.eq(id))
        .exec(&txn)
        .await?;
    video::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_video<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<video::Model, AppError> {
    video::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))
}

/// Link a video to each model in `model_ids`, skipping duplicates. Every id
/// must resolve to an existing model.
async fn link_models(
    txn: &DatabaseTransaction,
    video_id: Uuid,
    model_ids: &[Uuid],
) -> Result<Vec<model::Model>, AppError> {
    let mut linked = Vec::with_capacity(model_ids.len());
    let mut seen = HashSet::new();

    for &model_id in model_ids {
        if !seen.insert(model_id) {
            continue;
        }
        let m = model::Entity::find_by_id(model_id)
            .one(txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Model not found".into()))?;

        let link = model_video::ActiveModel {
            model_id: Set(model_id),
            video_id: Set(video_id),
            ..Default::default()
        };
        link.insert(txn).await?;
        linked.push(m);
    }

    Ok(linked)
}

/// Fetch the linked models for a set of videos in one junction query.
async fn load_models<C: ConnectionTrait>(
    db: &C,
    video_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<model::Model>>, AppError> {
    if video_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = model_video::Entity::find()
        .filter(model_video::Column::VideoId.is_in(video_ids))
        .find_also_related(model::Entity)
        .all(db)
        .await?;

    let mut by_video: HashMap<Uuid, Vec<model::Model>> = HashMap::new();
    for (link, related) in rows {
        if let Some(m) = related {
            by_video.entry(link.video_id).or_default().push(m);
        }
    }

    Ok(by_video)
}

async fn models_for_video<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Vec<model::Model>, AppError> {
    Ok(load_models(db, vec![id]).await?.remove(&id).unwrap_or_default())
}
