//! Region name normalization.
//!
//! Provides a deterministic normalization pipeline applied wherever
//! country/province/city text enters the system. The pipeline is
//! idempotent: feeding its own output back in produces the same value,
//! which lets callers re-normalize defensively without drift.

use regex::Regex;
use std::sync::LazyLock;

use crate::{UNKNOWN_REGION, synonyms};

/// Regex to collapse multiple whitespace characters into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Administrative suffixes stripped from province and city names,
/// longest first so `自治区` wins over `区` and the ethnic autonomous
/// region forms win over the plain one.
const ADMIN_SUFFIXES: &[&str] = &[
    "维吾尔自治区",
    "壮族自治区",
    "回族自治区",
    "特别行政区",
    "自治区",
    "自治州",
    "地区",
    "省",
    "市",
    "县",
];

/// Trims and collapses interior whitespace.
fn clean(input: &str) -> String {
    WHITESPACE_RE.replace_all(input.trim(), " ").to_string()
}

/// Strips one trailing administrative suffix, if doing so leaves a
/// non-empty name. `"北京市"` becomes `"北京"`; a bare `"市"` is left
/// alone.
fn strip_admin_suffix(input: &str) -> &str {
    for suffix in ADMIN_SUFFIXES {
        if let Some(stem) = input.strip_suffix(suffix) {
            if !stem.is_empty() {
                return stem;
            }
        }
    }
    input
}

/// Normalizes a country name to its canonical form.
///
/// Empty input degrades to [`UNKNOWN_REGION`]; unrecognized countries
/// pass through cleaned but otherwise untouched. Never fails.
#[must_use]
pub fn normalize_country(raw: &str) -> String {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return UNKNOWN_REGION.to_string();
    }

    synonyms::lookup_country(&cleaned.to_uppercase())
        .map_or(cleaned, ToString::to_string)
}

/// Normalizes a province name to its canonical short form.
///
/// Strips administrative suffixes (`省`, `市`, `自治区`, ...) and maps
/// English/pinyin spellings of Chinese provinces to the short Chinese
/// name. Empty input degrades to [`UNKNOWN_REGION`]. Never fails.
#[must_use]
pub fn normalize_province(raw: &str) -> String {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return UNKNOWN_REGION.to_string();
    }

    let stripped = strip_admin_suffix(&cleaned);
    synonyms::lookup_province(&stripped.to_uppercase())
        .map_or_else(|| stripped.to_string(), ToString::to_string)
}

/// Normalizes a city name.
///
/// Strips administrative suffixes; empty input degrades to
/// [`UNKNOWN_REGION`]. Never fails.
#[must_use]
pub fn normalize_city(raw: &str) -> String {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return UNKNOWN_REGION.to_string();
    }

    strip_admin_suffix(&cleaned).to_string()
}

/// Whether the raw province string names a Chinese province-level
/// division (after normalization).
#[must_use]
pub fn is_chinese_province(province: &str) -> bool {
    synonyms::is_china_province(&normalize_province(province))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_country_synonyms() {
        assert_eq!(normalize_country("China"), "中国");
        assert_eq!(normalize_country("中华人民共和国"), "中国");
        assert_eq!(normalize_country(" usa "), "United States");
    }

    #[test]
    fn strips_province_suffixes() {
        assert_eq!(normalize_province("广东省"), "广东");
        assert_eq!(normalize_province("北京市"), "北京");
        assert_eq!(normalize_province("广西壮族自治区"), "广西");
        assert_eq!(normalize_province("新疆维吾尔自治区"), "新疆");
        assert_eq!(normalize_province("香港特别行政区"), "香港");
    }

    #[test]
    fn maps_pinyin_provinces() {
        assert_eq!(normalize_province("Guangdong"), "广东");
        assert_eq!(normalize_province("inner mongolia"), "内蒙古");
    }

    #[test]
    fn empty_input_is_unknown_not_blank() {
        assert_eq!(normalize_country(""), UNKNOWN_REGION);
        assert_eq!(normalize_province("   "), UNKNOWN_REGION);
        assert_eq!(normalize_city(""), UNKNOWN_REGION);
        assert!(!normalize_country("").is_empty());
    }

    #[test]
    fn country_normalization_is_idempotent() {
        for raw in ["China", "中国", "usa", "Atlantis", "", "英国"] {
            let once = normalize_country(raw);
            assert_eq!(normalize_country(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn province_normalization_is_idempotent() {
        for raw in ["广东省", "Guangdong", "北京市", "Bavaria", "", "未知"] {
            let once = normalize_province(raw);
            assert_eq!(normalize_province(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn unrecognized_passes_through_cleaned() {
        assert_eq!(normalize_country("  Atlantis  "), "Atlantis");
        assert_eq!(normalize_province("Bavaria"), "Bavaria");
    }

    #[test]
    fn bare_suffix_left_alone() {
        assert_eq!(normalize_city("市"), "市");
    }

    #[test]
    fn detects_chinese_provinces() {
        assert!(is_chinese_province("广东省"));
        assert!(is_chinese_province("Guangdong"));
        assert!(is_chinese_province("北京市"));
        assert!(!is_chinese_province("California"));
        assert!(!is_chinese_province(""));
    }
}
