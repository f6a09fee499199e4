#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region normalization for the member map.
//!
//! Geocoding providers disagree about almost everything: casing, language,
//! administrative suffixes, whether a field is a string or an array, and
//! whether direct-administered Chinese municipalities carry a country at
//! all. This crate is the single boundary that collapses all of that into
//! a canonical vocabulary before anything is stored or aggregated.
//!
//! Normalization never fails — unrecognized input degrades to
//! [`UNKNOWN_REGION`] or passes through cleaned.

pub mod normalize;
pub mod stats;
pub mod synonyms;

use serde::{Deserialize, Serialize};

pub use normalize::{is_chinese_province, normalize_city, normalize_country, normalize_province};

/// Sentinel for regions that could not be determined.
///
/// Downstream grouping keys on this value explicitly; it is never the
/// empty string.
pub const UNKNOWN_REGION: &str = "未知";

/// The canonical country value for China.
pub const CHINA: &str = "中国";

/// A region field as returned by a geocoding provider.
///
/// Some providers return scalars, some return arrays (e.g. every admin
/// level that matched). This union is collapsed to a scalar here, at the
/// normalizer boundary, so everything downstream works with plain
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// A single value.
    Scalar(String),
    /// Multiple candidate values; the first non-empty one wins.
    List(Vec<String>),
}

impl RawField {
    /// Collapses the field to its scalar value.
    #[must_use]
    pub fn as_scalar(&self) -> &str {
        match self {
            Self::Scalar(value) => value,
            Self::List(values) => values
                .iter()
                .map(String::as_str)
                .find(|v| !v.trim().is_empty())
                .unwrap_or(""),
        }
    }
}

/// A raw region triple as returned by a geocoding provider, before
/// normalization. Any field may be missing, scalar, or an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRegion {
    /// Country field, if the provider returned one.
    #[serde(default)]
    pub country: Option<RawField>,
    /// Province/state field, if the provider returned one.
    #[serde(default)]
    pub province: Option<RawField>,
    /// City field, if the provider returned one.
    #[serde(default)]
    pub city: Option<RawField>,
}

/// A fully normalized and reconciled region triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRegion {
    /// Canonical country name, or [`UNKNOWN_REGION`].
    pub country: String,
    /// Canonical province name, or [`UNKNOWN_REGION`].
    pub province: String,
    /// Canonical city name, or [`UNKNOWN_REGION`].
    pub city: String,
}

impl NormalizedRegion {
    /// Converts a field to `Option`, mapping the unknown sentinel to
    /// `None` for storage in optional columns.
    #[must_use]
    pub fn known(value: &str) -> Option<String> {
        (value != UNKNOWN_REGION).then(|| value.to_string())
    }
}

/// Normalizes and reconciles a raw provider region.
///
/// Applies [`normalize_country`], [`normalize_province`], and
/// [`normalize_city`], then two correction rules for inconsistent
/// provider responses:
///
/// * if the province is a recognized Chinese province but the country is
///   not [`CHINA`] (mislabeled or missing), the country is corrected to
///   [`CHINA`];
/// * if the province is a direct-administered municipality and the city
///   is unknown, the municipality name doubles as the city.
#[must_use]
pub fn reconcile_region(raw: &RawRegion) -> NormalizedRegion {
    let scalar = |field: &Option<RawField>| {
        field
            .as_ref()
            .map_or_else(String::new, |f| f.as_scalar().to_string())
    };

    let mut country = normalize_country(&scalar(&raw.country));
    let province = normalize_province(&scalar(&raw.province));
    let mut city = normalize_city(&scalar(&raw.city));

    if synonyms::is_china_province(&province) && country != CHINA {
        country = CHINA.to_string();
    }

    if synonyms::is_municipality(&province) && city == UNKNOWN_REGION {
        city.clone_from(&province);
    }

    NormalizedRegion {
        country,
        province,
        city,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(value: &str) -> Option<RawField> {
        Some(RawField::Scalar(value.to_string()))
    }

    #[test]
    fn corrects_country_for_chinese_province() {
        let raw = RawRegion {
            country: scalar("United States"),
            province: scalar("广东省"),
            city: scalar("深圳市"),
        };
        let region = reconcile_region(&raw);
        assert_eq!(region.country, CHINA);
        assert_eq!(region.province, "广东");
        assert_eq!(region.city, "深圳");
    }

    #[test]
    fn direct_administered_city_correction() {
        // Reverse geocoders routinely omit both country and city for
        // municipalities like Beijing.
        let raw = RawRegion {
            country: scalar(""),
            province: scalar("北京市"),
            city: scalar(""),
        };
        let region = reconcile_region(&raw);
        assert_eq!(region.country, "中国");
        assert_eq!(region.province, "北京");
        assert_eq!(region.city, "北京");
    }

    #[test]
    fn missing_fields_become_unknown() {
        let region = reconcile_region(&RawRegion::default());
        assert_eq!(region.country, UNKNOWN_REGION);
        assert_eq!(region.province, UNKNOWN_REGION);
        assert_eq!(region.city, UNKNOWN_REGION);
    }

    #[test]
    fn array_fields_collapse_to_first_non_empty() {
        let raw = RawRegion {
            country: Some(RawField::List(vec![
                String::new(),
                "China".to_string(),
                "PRC".to_string(),
            ])),
            province: Some(RawField::List(vec!["浙江省".to_string()])),
            city: None,
        };
        let region = reconcile_region(&raw);
        assert_eq!(region.country, CHINA);
        assert_eq!(region.province, "浙江");
    }

    #[test]
    fn deserializes_scalar_and_array_shapes() {
        let raw: RawRegion = serde_json::from_value(serde_json::json!({
            "country": "China",
            "province": ["广东省", "广州市"],
            "city": "广州市",
        }))
        .expect("valid raw region");
        let region = reconcile_region(&raw);
        assert_eq!(region.country, CHINA);
        assert_eq!(region.province, "广东");
        assert_eq!(region.city, "广州");
    }

    #[test]
    fn non_chinese_region_untouched() {
        let raw = RawRegion {
            country: scalar("Japan"),
            province: scalar("Tokyo"),
            city: scalar("Shibuya"),
        };
        let region = reconcile_region(&raw);
        assert_eq!(region.country, "Japan");
        assert_eq!(region.province, "Tokyo");
    }

    #[test]
    fn known_maps_sentinel_to_none() {
        assert_eq!(NormalizedRegion::known(UNKNOWN_REGION), None);
        assert_eq!(NormalizedRegion::known("广东"), Some("广东".to_string()));
    }
}
