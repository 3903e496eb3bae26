use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::{CompanyRegistry, RegistryError};
use crate::workflows::intake::identifiers::{IdentifierKind, Nip};
use crate::workflows::intake::issues::FieldFailure;

/// Router prefilling the company step from a registry lookup by NIP.
pub fn registry_router<G>(registry: Arc<G>) -> Router
where
    G: CompanyRegistry + 'static,
{
    Router::new()
        .route(
            "/api/v1/registry/companies/:nip",
            get(lookup_handler::<G>),
        )
        .with_state(registry)
}

pub(crate) async fn lookup_handler<G>(
    State(registry): State<Arc<G>>,
    Path(raw_nip): Path<String>,
) -> Response
where
    G: CompanyRegistry + 'static,
{
    let nip = match Nip::parse(&raw_nip) {
        Ok(nip) => nip,
        Err(error) => {
            let payload = json!({
                "error": error.message(),
                "result": IdentifierKind::Nip.validate(&raw_nip),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match registry.lookup(&nip) {
        Ok(Some(company)) => {
            let payload = json!({
                "source": company.source,
                "companyData": company.to_company_draft(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "nip": nip,
                "error": "company not found in registry",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(RegistryError::Unavailable(reason)) => {
            let payload = json!({
                "error": format!("company registry unavailable: {reason}"),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::registry::{RegistryCompany, RegistrySource};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    struct SingleCompany;

    impl CompanyRegistry for SingleCompany {
        fn lookup(&self, nip: &Nip) -> Result<Option<RegistryCompany>, RegistryError> {
            if nip.as_str() != "1234563218" {
                return Ok(None);
            }
            Ok(Some(RegistryCompany {
                source: RegistrySource::Ceidg,
                name: "Jan Kowalski Usługi".to_string(),
                nip: nip.to_string(),
                regon: "123456785".to_string(),
                krs: None,
                street: "ul. Długa".to_string(),
                building_number: "5".to_string(),
                apartment_number: Some("2".to_string()),
                city: "Gdańsk".to_string(),
                postal_code: "80827".to_string(),
            }))
        }
    }

    struct OfflineRegistry;

    impl CompanyRegistry for OfflineRegistry {
        fn lookup(&self, _nip: &Nip) -> Result<Option<RegistryCompany>, RegistryError> {
            Err(RegistryError::Unavailable("timeout".to_string()))
        }
    }

    async fn get_status<G: CompanyRegistry + 'static>(registry: G, nip: &str) -> (StatusCode, Value) {
        let response = registry_router(Arc::new(registry))
            .oneshot(
                Request::get(format!("/api/v1/registry/companies/{nip}"))
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("json payload"))
    }

    #[tokio::test]
    async fn known_company_is_returned_as_draft() {
        let (status, body) = get_status(SingleCompany, "1234563218").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "ceidg");
        assert_eq!(body["companyData"]["registrySignature"], "CEIDG");
        assert_eq!(body["companyData"]["address"]["postalCode"], "80-827");
    }

    #[tokio::test]
    async fn invalid_missing_and_offline_lookups_map_to_statuses() {
        let (status, body) = get_status(SingleCompany, "1234563219").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["result"]["isValid"], false);

        let (status, _) = get_status(SingleCompany, "5260250274").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_status(OfflineRegistry, "1234563218").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
