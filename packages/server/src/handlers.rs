//! HTTP handler functions for the member map API.

use actix_web::{HttpResponse, web};
use member_map_directory::{DirectoryError, save_raw_location};
use member_map_geocoder::service_registry::ProviderConfig;
use member_map_geocoder::{GeocodeError, amap, nominatim};
use member_map_location_models::{BoundingBox, GeoPoint};
use member_map_region::{RawRegion, reconcile_region};
use member_map_server_models::{
    ApiHealth, ApiMember, MembersQueryParams, ReverseQueryParams, SaveLocationRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/members`
///
/// Returns the visible member set, optionally filtered by bounding box.
/// Members without a location are excluded from bbox filtering results
/// only when a bbox is given; otherwise they are returned as-is.
pub async fn members(
    state: web::Data<AppState>,
    params: web::Query<MembersQueryParams>,
) -> HttpResponse {
    let bbox = params.bbox.as_deref().and_then(parse_bbox);

    let members: Vec<ApiMember> = state
        .store
        .visible_members()
        .await
        .into_iter()
        .filter(|member| {
            bbox.is_none_or(|bbox| {
                member
                    .location
                    .as_ref()
                    .is_some_and(|location| bbox.contains(location.point()))
            })
        })
        .map(ApiMember::from)
        .collect();

    HttpResponse::Ok().json(members)
}

/// `GET /api/regions`
///
/// Returns merged region stats for the filter sidebar.
pub async fn regions(state: web::Data<AppState>) -> HttpResponse {
    let stats = member_map_directory::region_stats(state.store.as_ref()).await;
    HttpResponse::Ok().json(stats)
}

/// `PUT /api/members/{id}/location`
///
/// Accepts a raw geocoder result and stores the normalized,
/// privacy-fuzzed location. This handler is the only write path for
/// locations, so the privacy transform runs exactly once per raw input.
pub async fn save_location(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SaveLocationRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    let request = body.into_inner();

    match save_raw_location(
        state.store.as_ref(),
        &id,
        request.lat,
        request.lng,
        &request.region,
    )
    .await
    {
        Ok(location) => HttpResponse::Ok().json(location),
        Err(DirectoryError::MemberNotFound { id }) => {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Member not found: {id}")
            }))
        }
        Err(DirectoryError::Privacy(e)) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        })),
    }
}

/// `GET /api/geocode/reverse?lat=..&lng=..`
///
/// Resolves a coordinate through the enabled providers in priority
/// order and returns the normalized region. Providers that fail or
/// return nothing are skipped; no retries.
pub async fn reverse_geocode(
    state: web::Data<AppState>,
    params: web::Query<ReverseQueryParams>,
) -> HttpResponse {
    let point = GeoPoint::new(params.lat, params.lng);
    if !point.is_valid() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid coordinate"
        }));
    }

    for service in &state.services {
        let result = query_provider(&state, service, point.lat, point.lng).await;
        match result {
            Ok(Some(raw)) => return HttpResponse::Ok().json(reconcile_region(&raw)),
            Ok(None) => {}
            Err(e) => log::warn!("Reverse geocode via {} failed: {e}", service.id),
        }
    }

    HttpResponse::NotFound().json(serde_json::json!({
        "error": "No provider could resolve the coordinate"
    }))
}

/// Queries a single provider for a reverse geocode.
async fn query_provider(
    state: &AppState,
    service: &member_map_geocoder::service_registry::GeocodingService,
    lat: f64,
    lng: f64,
) -> Result<Option<RawRegion>, GeocodeError> {
    match &service.provider {
        ProviderConfig::Amap {
            base_url,
            api_key_env,
        } => {
            let Ok(api_key) = std::env::var(api_key_env) else {
                log::debug!("Skipping {}: {api_key_env} not set", service.id);
                return Ok(None);
            };
            amap::reverse_geocode(&state.http, base_url, &api_key, lat, lng).await
        }
        ProviderConfig::Nominatim { base_url, .. } => {
            nominatim::reverse_geocode(&state.http, base_url, lat, lng).await
        }
    }
}

/// Parses a bounding box string `"west,south,east,north"` into a
/// [`BoundingBox`].
fn parse_bbox(s: &str) -> Option<BoundingBox> {
    let parts: Vec<f64> = s.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if parts.len() == 4 {
        Some(BoundingBox::new(parts[0], parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bbox() {
        let bbox = parse_bbox("113.5, 22.1, 114.5, 23.0").expect("valid bbox");
        assert!((bbox.west - 113.5).abs() < f64::EPSILON);
        assert!((bbox.north - 23.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_malformed_bbox() {
        assert!(parse_bbox("1,2,3").is_none());
        assert!(parse_bbox("a,b,c,d").is_none());
    }
}
