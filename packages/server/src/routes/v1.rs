use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/models", model_routes())
        .nest("/videos", video_routes())
}

fn model_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::model::list_models,
            handlers::model::create_model
        ))
        .routes(routes!(
            handlers::model::get_model,
            handlers::model::update_model,
            handlers::model::delete_model
        ))
}

fn video_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::video::list_videos,
            handlers::video::create_video
        ))
        .routes(routes!(
            handlers::video::get_video,
            handlers::video::update_video,
            handlers::video::delete_video
        ))
}
