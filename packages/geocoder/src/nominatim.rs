//! Nominatim / OpenStreetMap geocoder client.
//!
//! Global fallback provider. Nominatim has strict rate limits:
//! **1 request per second** maximum on the public instance; the caller
//! is responsible for pacing (see `rate_limit_ms` in the service TOML
//! configuration).
//!
//! See <https://nominatim.org/release-docs/develop/api/Reverse/>

use member_map_location_models::GeoPoint;
use member_map_region::{RawField, RawRegion};

use crate::GeocodeError;

/// Reverse-geocodes a coordinate to a raw region triple.
///
/// Returns `Ok(None)` when Nominatim has no result for the coordinate
/// (open ocean, poles).
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails, or [`GeocodeError::RateLimited`] on HTTP 429.
pub async fn reverse_geocode(
    client: &reqwest::Client,
    base_url: &str,
    lat: f64,
    lng: f64,
) -> Result<Option<RawRegion>, GeocodeError> {
    let resp = client
        .get(format!("{base_url}/reverse"))
        .query(&[
            ("lat", lat.to_string()),
            ("lon", lng.to_string()),
            ("format", "jsonv2".to_string()),
            ("zoom", "10".to_string()),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    Ok(parse_reverse(&body))
}

/// Geocodes a free-form query to a coordinate.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails, or [`GeocodeError::RateLimited`] on HTTP 429.
pub async fn geocode(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Option<GeoPoint>, GeocodeError> {
    let resp = client
        .get(format!("{base_url}/search"))
        .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_search(&body)
}

/// Parses a Nominatim reverse response into a raw region.
///
/// The city can live under `city`, `town`, or `village` depending on
/// the place type; the first present key wins.
fn parse_reverse(body: &serde_json::Value) -> Option<RawRegion> {
    let address = body.get("address")?.as_object()?;

    let field = |keys: &[&str]| -> Option<RawField> {
        keys.iter()
            .filter_map(|key| address.get(*key))
            .filter_map(serde_json::Value::as_str)
            .find(|v| !v.is_empty())
            .map(|v| RawField::Scalar(v.to_string()))
    };

    Some(RawRegion {
        country: field(&["country"]),
        province: field(&["state", "province"]),
        city: field(&["city", "town", "village"]),
    })
}

/// Parses a Nominatim search response into a coordinate.
fn parse_search(body: &serde_json::Value) -> Result<Option<GeoPoint>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let coord = |key: &str| -> Result<f64, GeocodeError> {
        first[key]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| GeocodeError::Parse {
                message: format!("Missing {key} in Nominatim response"),
            })
    };

    Ok(Some(GeoPoint::new(coord("lat")?, coord("lon")?)))
}
