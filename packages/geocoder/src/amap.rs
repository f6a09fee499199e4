//! AMap (高德地图) geocoder client.
//!
//! Primary provider for coordinates inside China. AMap's response shape
//! is loose: a missing `city` arrives as an empty **array** rather than
//! an empty string (direct-administered municipalities do this every
//! time), which is exactly the scalar-vs-array variance [`RawField`]
//! models.
//!
//! See <https://lbs.amap.com/api/webservice/guide/api/georegeo>

use member_map_location_models::GeoPoint;
use member_map_region::{RawField, RawRegion};

use crate::GeocodeError;

/// Reverse-geocodes a coordinate to a raw region triple.
///
/// Returns `Ok(None)` when AMap has no regeocode for the coordinate.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request fails, the response is
/// malformed, or AMap reports a non-success status.
pub async fn reverse_geocode(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    lat: f64,
    lng: f64,
) -> Result<Option<RawRegion>, GeocodeError> {
    let resp = client
        .get(format!("{base_url}/v3/geocode/regeo"))
        .query(&[
            ("key", api_key.to_string()),
            // AMap wants "lng,lat" order.
            ("location", format!("{lng:.6},{lat:.6}")),
            ("extensions", "base".to_string()),
        ])
        .send()
        .await?;

    let body: serde_json::Value = resp.json().await?;
    parse_regeo(&body)
}

/// Geocodes a free-form address to a coordinate.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request fails or the response
/// is malformed.
pub async fn geocode(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    address: &str,
) -> Result<Option<GeoPoint>, GeocodeError> {
    let resp = client
        .get(format!("{base_url}/v3/geocode/geo"))
        .query(&[("key", api_key), ("address", address)])
        .send()
        .await?;

    let body: serde_json::Value = resp.json().await?;
    parse_geo(&body)
}

/// Parses an AMap regeo response into a raw region.
fn parse_regeo(body: &serde_json::Value) -> Result<Option<RawRegion>, GeocodeError> {
    if body["status"].as_str() != Some("1") {
        return Err(GeocodeError::Parse {
            message: format!(
                "AMap error: {}",
                body["info"].as_str().unwrap_or("unknown")
            ),
        });
    }

    let Some(component) = body["regeocode"].get("addressComponent") else {
        return Ok(None);
    };

    // Fields may be strings or arrays; deserialize through RawField and
    // let the normalizer collapse them.
    let field = |key: &str| -> Option<RawField> {
        component
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    };

    Ok(Some(RawRegion {
        country: field("country"),
        province: field("province"),
        city: field("city"),
    }))
}

/// Parses an AMap geo response into a coordinate.
fn parse_geo(body: &serde_json::Value) -> Result<Option<GeoPoint>, GeocodeError> {
    if body["status"].as_str() != Some("1") {
        return Err(GeocodeError::Parse {
            message: format!(
                "AMap error: {}",
                body["info"].as_str().unwrap_or("unknown")
            ),
        });
    }

    let Some(location) = body["geocodes"]
        .as_array()
        .and_then(|codes| codes.first())
        .and_then(|first| first["location"].as_str())
    else {
        return Ok(None);
    };

    let mut parts = location.split(',');
    let lng = parts.next().and_then(|p| p.parse::<f64>().ok());
    let lat = parts.next().and_then(|p| p.parse::<f64>().ok());

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(GeoPoint::new(lat, lng))),
        _ => Err(GeocodeError::Parse {
            message: format!("Malformed AMap location: {location}"),
        }),
    }
}
