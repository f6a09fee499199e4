#![allow(clippy::too_many_lines)]
//! Country and province synonym tables.
//!
//! These tables map the assorted spellings that geocoding providers return
//! to one canonical form. They are applied symmetrically wherever region
//! text enters the system, so `"China"`, `"中华人民共和国"`, and `"中国"`
//! all group together.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Maps uppercased country spellings to their canonical form.
///
/// Canonical values map to themselves so lookups are idempotent.
static COUNTRIES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("中国", "中国"),
        ("CHINA", "中国"),
        ("CN", "中国"),
        ("CHN", "中国"),
        ("PRC", "中国"),
        ("中华人民共和国", "中国"),
        ("PEOPLE'S REPUBLIC OF CHINA", "中国"),
        ("UNITED STATES", "United States"),
        ("UNITED STATES OF AMERICA", "United States"),
        ("USA", "United States"),
        ("US", "United States"),
        ("美国", "United States"),
        ("UNITED KINGDOM", "United Kingdom"),
        ("UK", "United Kingdom"),
        ("GREAT BRITAIN", "United Kingdom"),
        ("英国", "United Kingdom"),
        ("JAPAN", "Japan"),
        ("日本", "Japan"),
        ("SOUTH KOREA", "South Korea"),
        ("REPUBLIC OF KOREA", "South Korea"),
        ("韩国", "South Korea"),
        ("CANADA", "Canada"),
        ("加拿大", "Canada"),
        ("AUSTRALIA", "Australia"),
        ("澳大利亚", "Australia"),
        ("NEW ZEALAND", "New Zealand"),
        ("新西兰", "New Zealand"),
        ("SINGAPORE", "Singapore"),
        ("新加坡", "Singapore"),
        ("MALAYSIA", "Malaysia"),
        ("马来西亚", "Malaysia"),
        ("GERMANY", "Germany"),
        ("德国", "Germany"),
        ("FRANCE", "France"),
        ("法国", "France"),
        ("NETHERLANDS", "Netherlands"),
        ("荷兰", "Netherlands"),
        ("THAILAND", "Thailand"),
        ("泰国", "Thailand"),
    ])
});

/// The canonical short names of all Chinese province-level divisions,
/// including autonomous regions, municipalities, and SARs.
static CHINA_PROVINCES: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    BTreeSet::from([
        "北京", "天津", "上海", "重庆", "河北", "山西", "辽宁", "吉林", "黑龙江", "江苏",
        "浙江", "安徽", "福建", "江西", "山东", "河南", "湖北", "湖南", "广东", "海南",
        "四川", "贵州", "云南", "陕西", "甘肃", "青海", "广西", "内蒙古", "西藏", "宁夏",
        "新疆", "香港", "澳门", "台湾",
    ])
});

/// Maps uppercased English/pinyin province spellings to the canonical
/// short Chinese name.
static PROVINCES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("BEIJING", "北京"),
        ("TIANJIN", "天津"),
        ("SHANGHAI", "上海"),
        ("CHONGQING", "重庆"),
        ("HEBEI", "河北"),
        ("SHANXI", "山西"),
        ("LIAONING", "辽宁"),
        ("JILIN", "吉林"),
        ("HEILONGJIANG", "黑龙江"),
        ("JIANGSU", "江苏"),
        ("ZHEJIANG", "浙江"),
        ("ANHUI", "安徽"),
        ("FUJIAN", "福建"),
        ("JIANGXI", "江西"),
        ("SHANDONG", "山东"),
        ("HENAN", "河南"),
        ("HUBEI", "湖北"),
        ("HUNAN", "湖南"),
        ("GUANGDONG", "广东"),
        ("HAINAN", "海南"),
        ("SICHUAN", "四川"),
        ("GUIZHOU", "贵州"),
        ("YUNNAN", "云南"),
        ("SHAANXI", "陕西"),
        ("GANSU", "甘肃"),
        ("QINGHAI", "青海"),
        ("GUANGXI", "广西"),
        ("INNER MONGOLIA", "内蒙古"),
        ("NEI MONGOL", "内蒙古"),
        ("TIBET", "西藏"),
        ("XIZANG", "西藏"),
        ("NINGXIA", "宁夏"),
        ("XINJIANG", "新疆"),
        ("HONG KONG", "香港"),
        ("HONGKONG", "香港"),
        ("MACAU", "澳门"),
        ("MACAO", "澳门"),
        ("TAIWAN", "台湾"),
    ])
});

/// The four direct-administered municipalities. For these, the province
/// name doubles as the city name when the provider omits the city.
static MUNICIPALITIES: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| BTreeSet::from(["北京", "天津", "上海", "重庆"]));

/// Looks up the canonical country name for an uppercased spelling.
#[must_use]
pub fn lookup_country(upper: &str) -> Option<&'static str> {
    COUNTRIES.get(upper).copied()
}

/// Looks up the canonical province name for an uppercased spelling.
#[must_use]
pub fn lookup_province(upper: &str) -> Option<&'static str> {
    PROVINCES.get(upper).copied()
}

/// Whether the given canonical short name is a Chinese province-level
/// division.
#[must_use]
pub fn is_china_province(canonical: &str) -> bool {
    CHINA_PROVINCES.contains(canonical)
}

/// Whether the given canonical short name is a direct-administered
/// municipality.
#[must_use]
pub fn is_municipality(canonical: &str) -> bool {
    MUNICIPALITIES.contains(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn china_synonyms_merge() {
        assert_eq!(lookup_country("CHINA"), Some("中国"));
        assert_eq!(lookup_country("中华人民共和国"), Some("中国"));
        assert_eq!(lookup_country("中国"), Some("中国"));
    }

    #[test]
    fn canonical_countries_map_to_themselves() {
        for canonical in COUNTRIES.values() {
            let upper = canonical.to_uppercase();
            assert_eq!(
                lookup_country(&upper),
                Some(*canonical),
                "{canonical} should round-trip"
            );
        }
    }

    #[test]
    fn pinyin_provinces() {
        assert_eq!(lookup_province("GUANGDONG"), Some("广东"));
        assert_eq!(lookup_province("INNER MONGOLIA"), Some("内蒙古"));
    }

    #[test]
    fn province_membership() {
        assert!(is_china_province("广东"));
        assert!(is_china_province("香港"));
        assert!(!is_china_province("California"));
    }

    #[test]
    fn municipalities_are_provinces() {
        for m in ["北京", "天津", "上海", "重庆"] {
            assert!(is_municipality(m));
            assert!(is_china_province(m));
        }
        assert!(!is_municipality("广东"));
    }
}
