//! Region statistic merging for the filter sidebar.
//!
//! Raw stats arrive keyed by whatever spelling the member's geocoder
//! produced, so `{"中国", "广东省"}` and `{"China", "广东"}` show up as
//! separate rows. Merging normalizes the keys and sums the counts.

use std::collections::HashMap;

use member_map_location_models::RegionStat;

use crate::normalize::{normalize_country, normalize_province};

/// Merges region stats whose keys normalize to the same
/// (country, province) pair, summing their counts.
///
/// Output preserves first-seen order, so the sidebar stays stable across
/// refreshes that only reorder the input.
#[must_use]
pub fn merge_region_stats(stats: &[RegionStat]) -> Vec<RegionStat> {
    let mut merged: Vec<RegionStat> = Vec::new();
    let mut index: HashMap<(String, Option<String>), usize> = HashMap::new();

    for stat in stats {
        let country = normalize_country(&stat.country);
        let province = stat.province.as_deref().map(normalize_province);
        let key = (country.clone(), province.clone());

        if let Some(&slot) = index.get(&key) {
            merged[slot].count += stat.count;
        } else {
            index.insert(key, merged.len());
            merged.push(RegionStat {
                country,
                province,
                count: stat.count,
            });
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(country: &str, province: Option<&str>, count: u64) -> RegionStat {
        RegionStat {
            country: country.to_string(),
            province: province.map(String::from),
            count,
        }
    }

    #[test]
    fn merges_duplicate_spellings() {
        let merged = merge_region_stats(&[
            stat("中国", Some("广东省"), 3),
            stat("China", Some("广东"), 2),
        ]);
        assert_eq!(merged, vec![stat("中国", Some("广东"), 5)]);
    }

    #[test]
    fn distinct_regions_stay_separate() {
        let merged = merge_region_stats(&[
            stat("中国", Some("广东省"), 3),
            stat("中国", Some("浙江省"), 1),
            stat("Japan", None, 4),
        ]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], stat("中国", Some("广东"), 3));
        assert_eq!(merged[1], stat("中国", Some("浙江"), 1));
        assert_eq!(merged[2], stat("Japan", None, 4));
    }

    #[test]
    fn preserves_first_seen_order() {
        let merged = merge_region_stats(&[
            stat("Japan", None, 1),
            stat("中国", Some("广东"), 1),
            stat("日本", None, 1),
        ]);
        assert_eq!(merged[0].country, "Japan");
        assert_eq!(merged[0].count, 2);
        assert_eq!(merged[1].country, "中国");
    }

    #[test]
    fn empty_input() {
        assert!(merge_region_stats(&[]).is_empty());
    }
}
