//! Catalog soft-delete endpoints.
//!
//! The list views drive the state machine through these routes: request a
//! delete, undo it during the grace window, and resolve the cascade branch
//! when the gateway reports dependent records.

use actix_web::{web, HttpResponse};
use std::str::FromStr;

use crate::core::error::AppError;
use crate::modules::deletions::models::{DeletableEntity, ResourceKind};
use crate::modules::deletions::services::SoftDeleteList;

fn parse_resource(resource: &str) -> Result<ResourceKind, AppError> {
    ResourceKind::from_str(resource).map_err(AppError::NotFound)
}

/// List entities of one resource kind, including ones inside their grace
/// window (flagged, still present).
///
/// GET /catalog/{resource}
pub async fn list_entities(
    list: web::Data<SoftDeleteList>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let resource = parse_resource(&path)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "entities": list.entities(Some(resource)),
    })))
}

/// Seed entities fetched from the upstream API into the list.
///
/// POST /catalog/{resource}
pub async fn seed_entities(
    list: web::Data<SoftDeleteList>,
    path: web::Path<String>,
    body: web::Json<Vec<DeletableEntity>>,
) -> Result<HttpResponse, AppError> {
    let resource = parse_resource(&path)?;

    let mut count = 0;
    for mut entity in body.into_inner() {
        entity.resource = resource;
        entity.is_temporarily_deleted = false;
        list.insert(entity);
        count += 1;
    }

    Ok(HttpResponse::Created().json(serde_json::json!({ "seeded": count })))
}

/// Start a soft delete with its grace window.
///
/// POST /catalog/{resource}/{id}/delete
pub async fn request_delete(
    list: web::Data<SoftDeleteList>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource, id) = path.into_inner();
    parse_resource(&resource)?;

    list.request_delete(&id)?;

    Ok(HttpResponse::Accepted().json(serde_json::json!({
        "id": id,
        "state": list.state_of(&id),
    })))
}

/// Undo a pending delete. Always succeeds; `reverted` reports whether there
/// was anything to undo.
///
/// POST /catalog/{resource}/{id}/undo
pub async fn undo_delete(
    list: web::Data<SoftDeleteList>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource, id) = path.into_inner();
    parse_resource(&resource)?;

    let reverted = list.undo(&id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "reverted": reverted,
        "state": list.state_of(&id),
    })))
}

/// Confirm the cascading delete after a conflict.
///
/// POST /catalog/{resource}/{id}/cascade/confirm
pub async fn confirm_cascade(
    list: web::Data<SoftDeleteList>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource, id) = path.into_inner();
    parse_resource(&resource)?;

    list.confirm_cascade(&id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "state": list.state_of(&id),
    })))
}

/// Abandon the cascade and restore the entity.
///
/// POST /catalog/{resource}/{id}/cascade/cancel
pub async fn cancel_cascade(
    list: web::Data<SoftDeleteList>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (resource, id) = path.into_inner();
    parse_resource(&resource)?;

    list.cancel_cascade(&id)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "state": list.state_of(&id),
    })))
}

/// Configure catalog deletion routes
pub fn configure_deletion_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/catalog")
            .route("/{resource}", web::get().to(list_entities))
            .route("/{resource}", web::post().to(seed_entities))
            .route("/{resource}/{id}/delete", web::post().to(request_delete))
            .route("/{resource}/{id}/undo", web::post().to(undo_delete))
            .route(
                "/{resource}/{id}/cascade/confirm",
                web::post().to(confirm_cascade),
            )
            .route(
                "/{resource}/{id}/cascade/cancel",
                web::post().to(cancel_cascade),
            ),
    );
}
