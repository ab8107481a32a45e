use std::sync::Arc;

use axum::extract::Extension;
use axum::routing;
use axum::Router;
use common::http::Json;
use common::http::Path;

use crate::projects::CreateProjectRequest;
use crate::projects::Project;
use crate::projects::Projects;
use crate::projects::UpdateProjectRequest;
use crate::Result;
use crate::SuccessResponse;

async fn create(
    Extension(provider): Extension<Arc<Projects>>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<Project>> {
    Ok(Json(provider.create(request).await?))
}

async fn get_by_id(
    Extension(provider): Extension<Arc<Projects>>,
    Path(project_id): Path<u64>,
) -> Result<Json<Project>> {
    Ok(Json(provider.get_by_id(project_id).await?))
}

async fn list(Extension(provider): Extension<Arc<Projects>>) -> Result<Json<Vec<Project>>> {
    Ok(Json(provider.list().await?))
}

async fn update(
    Extension(provider): Extension<Arc<Projects>>,
    Path(project_id): Path<u64>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<Project>> {
    Ok(Json(provider.update(project_id, request).await?))
}

async fn reorder(
    Extension(provider): Extension<Arc<Projects>>,
    Json(request): Json<Vec<Project>>,
) -> Result<Json<SuccessResponse>> {
    provider.reorder(request).await?;

    Ok(Json(SuccessResponse::ok()))
}

async fn toggle_favorite(
    Extension(provider): Extension<Arc<Projects>>,
    Path(project_id): Path<u64>,
) -> Result<Json<Project>> {
    Ok(Json(provider.toggle_favorite(project_id).await?))
}

async fn delete(
    Extension(provider): Extension<Arc<Projects>>,
    Path(project_id): Path<u64>,
) -> Result<Json<SuccessResponse>> {
    provider.delete(project_id).await?;

    Ok(Json(SuccessResponse::ok()))
}

pub fn attach_routes(router: Router) -> Router {
    router.nest(
        "/api/projects",
        Router::new()
            .route("/", routing::post(create).get(list))
            .route("/reorder", routing::put(reorder))
            .route(
                "/:project_id",
                routing::get(get_by_id).delete(delete).put(update),
            )
            .route("/:project_id/favorite", routing::patch(toggle_favorite)),
    )
}
