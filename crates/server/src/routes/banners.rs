use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::banner::{Banner, BannerPatch, BannerStatus, NewBanner};
use service::errors::ServiceError;
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, metrics, state::ServerState};

/// Admin request body. Every field is optional at the wire level so that a
/// missing field can be reported as a validation error instead of a
/// deserialization failure.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BannerForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

struct CompleteForm {
    title: String,
    image: String,
    link: String,
    status: BannerStatus,
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn parse_status(raw: &str) -> Result<BannerStatus, JsonApiError> {
    BannerStatus::parse(raw).map_err(|e| JsonApiError::from(ServiceError::from(e)))
}

impl BannerForm {
    /// Create and replace require all four fields.
    fn complete(self) -> Result<CompleteForm, JsonApiError> {
        let (Some(title), Some(image), Some(link), Some(status)) =
            (present(self.title), present(self.image), present(self.link), present(self.status))
        else {
            return Err(JsonApiError::missing_fields());
        };
        Ok(CompleteForm { title, image, link, status: parse_status(&status)? })
    }

    fn into_patch(self) -> Result<BannerPatch, JsonApiError> {
        Ok(BannerPatch {
            title: self.title,
            image: self.image,
            link: self.link,
            status: self.status.as_deref().map(parse_status).transpose()?,
        })
    }
}

fn body(payload: Result<Json<BannerForm>, JsonRejection>) -> Result<BannerForm, JsonApiError> {
    payload
        .map(|Json(form)| form)
        .map_err(|rej| JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON", Some(rej.body_text())))
}

fn banner_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, JsonApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| JsonApiError::validation("banner id must be a UUID"))
}

#[utoipa::path(
    get, path = "/admin/banners", tag = "admin",
    responses(
        (status = 200, description = "All banners in creation order", body = [crate::openapi::BannerDoc]),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Banner>>, JsonApiError> {
    let banners = state.banners.list().await?;
    info!(count = banners.len(), "list banners");
    Ok(Json(banners))
}

#[utoipa::path(
    post, path = "/admin/banners", tag = "admin",
    request_body = crate::openapi::BannerInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::BannerDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict"),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<BannerForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Banner>), JsonApiError> {
    let form = body(payload)?.complete()?;
    let input = NewBanner::new(form.title, form.image, form.link).with_status(form.status);
    let banner = state.banners.create(input).await?;
    metrics::record_mutation("create");
    Ok((StatusCode::CREATED, Json(banner)))
}

#[utoipa::path(
    get, path = "/admin/banners/{id}", tag = "admin",
    params(("id" = Uuid, Path, description = "Banner id")),
    responses(
        (status = 200, description = "Banner", body = crate::openapi::BannerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Banner>, JsonApiError> {
    let id = banner_id(path)?;
    Ok(Json(state.banners.get(id).await?))
}

#[utoipa::path(
    put, path = "/admin/banners/{id}", tag = "admin",
    params(("id" = Uuid, Path, description = "Banner id")),
    request_body = crate::openapi::BannerInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::BannerDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BannerForm>, JsonRejection>,
) -> Result<Json<Banner>, JsonApiError> {
    let id = banner_id(path)?;
    let form = body(payload)?.complete()?;
    let patch = BannerPatch {
        title: Some(form.title),
        image: Some(form.image),
        link: Some(form.link),
        status: Some(form.status),
    };
    let banner = state.banners.update(id, patch).await?;
    metrics::record_mutation("update");
    Ok(Json(banner))
}

#[utoipa::path(
    patch, path = "/admin/banners/{id}", tag = "admin",
    params(("id" = Uuid, Path, description = "Banner id")),
    request_body = crate::openapi::BannerPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BannerDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn patch(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BannerForm>, JsonRejection>,
) -> Result<Json<Banner>, JsonApiError> {
    let id = banner_id(path)?;
    let patch = body(payload)?.into_patch()?;
    let banner = state.banners.update(id, patch).await?;
    metrics::record_mutation("update");
    Ok(Json(banner))
}

#[utoipa::path(
    delete, path = "/admin/banners/{id}", tag = "admin",
    params(("id" = Uuid, Path, description = "Banner id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = banner_id(path)?;
    state.banners.delete(id).await?;
    metrics::record_mutation("delete");
    Ok(StatusCode::NO_CONTENT)
}
