//! OpenAPI document for the REST DTOs

use super::dto::*;
use super::error::Problem;
use utoipa::OpenApi;

pub const OPENAPI_PATH: &str = "/api/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Marketplace API", description = "Wedding marketplace REST API"),
    components(schemas(
        Problem,
        UserDto,
        GuestGroupDto,
        CountValue,
        CreateGuestGroupRequest,
        MediaDto,
        StorefrontDto,
        EstablishmentImageDto,
        EstablishmentDto,
        ConsultedStorefrontDto,
        SearchHistoryDto,
        CustomerDto,
        SubscriptionPlanDto,
        AlbumDto,
        CreateAlbumRequest,
        CreateTestPartnerRequest,
        TestPartnerDto,
        ResetDatabaseResponse,
        TableCountDto,
        DatabaseStatusDto,
        SocketStatusDto,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dto_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.map(|c| c.schemas).unwrap_or_default();

        for name in ["Problem", "GuestGroupDto", "StorefrontDto", "DatabaseStatusDto", "SocketStatusDto"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
        assert!(schemas.len() >= 21);
    }
}
