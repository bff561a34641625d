use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

pub use models::banner::BannerStatus;

/// Banner as seen by callers (admin and storefront).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub link: String,
    pub status: BannerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::banner::Model> for Banner {
    fn from(m: models::banner::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            image: m.image,
            link: m.link,
            status: m.status,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// Create input. `status` defaults to `Draft` when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBanner {
    pub title: String,
    pub image: String,
    pub link: String,
    #[serde(default)]
    pub status: Option<BannerStatus>,
}

impl NewBanner {
    pub fn new(title: impl Into<String>, image: impl Into<String>, link: impl Into<String>) -> Self {
        Self { title: title.into(), image: image.into(), link: link.into(), status: None }
    }

    pub fn with_status(mut self, status: BannerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn resolved_status(&self) -> BannerStatus {
        self.status.unwrap_or_default()
    }

    /// Trim every field, reject empties, and pin the status default.
    pub fn normalized(self) -> Result<Self, ServiceError> {
        Ok(Self {
            title: required("title", &self.title)?,
            image: required("image", &self.image)?,
            link: required("link", &self.link)?,
            status: Some(self.resolved_status()),
        })
    }
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub status: Option<BannerStatus>,
}

impl BannerPatch {
    pub fn status(status: BannerStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.image.is_none() && self.link.is_none() && self.status.is_none()
    }

    /// Whether applying this patch makes the target the active banner.
    pub fn promotes(&self) -> bool {
        self.status.map(|s| s.is_active()).unwrap_or(false)
    }

    pub fn normalized(self) -> Result<Self, ServiceError> {
        Ok(Self {
            title: self.title.as_deref().map(|v| required("title", v)).transpose()?,
            image: self.image.as_deref().map(|v| required("image", v)).transpose()?,
            link: self.link.as_deref().map(|v| required("link", v)).transpose()?,
            status: self.status,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    Ok(models::banner::validate_required(field, value)?)
}
