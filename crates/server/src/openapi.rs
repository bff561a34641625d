use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerDoc {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub link: String,
    /// `Active` or `Draft`
    pub status: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct BannerInputDoc {
    pub title: String,
    pub image: String,
    pub link: String,
    pub status: String,
}

#[derive(ToSchema)]
pub struct BannerPatchDoc {
    pub title: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBannerDoc {
    pub active_banner: Option<BannerDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::active::get_active,
        crate::routes::banners::list,
        crate::routes::banners::create,
        crate::routes::banners::get,
        crate::routes::banners::replace,
        crate::routes::banners::patch,
        crate::routes::banners::delete,
    ),
    components(
        schemas(
            HealthResponse,
            BannerDoc,
            BannerInputDoc,
            BannerPatchDoc,
            ActiveBannerDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "storefront"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
