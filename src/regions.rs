use crate::models::{ProvinceStat, RegionRecord};
use tracing::warn;

/// Province-level regions shown as single cities on the city map.
/// Taiwan is included for convenience.
pub const MUNICIPALITIES: [&str; 5] = ["北京", "上海", "天津", "重庆", "台湾"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionTables {
    pub provinces: Vec<RegionRecord>,
    pub cities: Vec<RegionRecord>,
    // provinces with no city list, left out of the city table
    pub skipped: Vec<String>,
}

pub fn intensity(confirmed: u64) -> f64 {
    (confirmed as f64).ln_1p()
}

/// Strips trailing `省` then `市` so the name matches the boundary features.
pub fn join_key(name: &str) -> &str {
    name.trim_end_matches('省').trim_end_matches('市')
}

pub fn is_municipality(short_name: &str) -> bool {
    MUNICIPALITIES.contains(&short_name)
}

fn record(name: &str, confirmed: u64, suspected: u64, cured: u64, dead: u64) -> RegionRecord {
    RegionRecord {
        name: name.to_string(),
        confirmed,
        suspected,
        cured,
        dead,
        intensity: intensity(confirmed),
    }
}

fn short_name(province: &ProvinceStat) -> &str {
    province
        .province_short_name
        .as_deref()
        .unwrap_or_else(|| join_key(&province.province_name))
}

pub fn province_table(provinces: &[ProvinceStat]) -> Vec<RegionRecord> {
    provinces
        .iter()
        .map(|p| {
            record(
                join_key(&p.province_name),
                p.confirmed_count,
                p.suspected_count,
                p.cured_count,
                p.dead_count,
            )
        })
        .collect()
}

pub fn city_table(provinces: &[ProvinceStat]) -> (Vec<RegionRecord>, Vec<String>) {
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for province in provinces {
        let short = short_name(province);
        if is_municipality(short) {
            rows.push(record(
                short,
                province.confirmed_count,
                province.suspected_count,
                province.cured_count,
                province.dead_count,
            ));
            continue;
        }

        let Some(cities) = &province.cities else {
            warn!(province = %province.province_name, "province has no city list, skipping");
            skipped.push(province.province_name.clone());
            continue;
        };

        rows.extend(cities.iter().map(|c| {
            record(
                &c.city_name,
                c.confirmed_count,
                c.suspected_count,
                c.cured_count,
                c.dead_count,
            )
        }));
    }

    (rows, skipped)
}

pub fn build_tables(provinces: &[ProvinceStat]) -> RegionTables {
    let (cities, skipped) = city_table(provinces);
    RegionTables {
        provinces: province_table(provinces),
        cities,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CityStat;

    fn city(name: &str, confirmed: u64) -> CityStat {
        CityStat {
            city_name: name.to_string(),
            confirmed_count: confirmed,
            suspected_count: 1,
            cured_count: 2,
            dead_count: 3,
        }
    }

    fn province(name: &str, short: &str, confirmed: u64, cities: Option<Vec<CityStat>>) -> ProvinceStat {
        ProvinceStat {
            province_name: name.to_string(),
            province_short_name: Some(short.to_string()),
            confirmed_count: confirmed,
            suspected_count: 10,
            cured_count: 20,
            dead_count: 30,
            cities,
        }
    }

    #[test]
    fn join_key_strips_administrative_suffixes() {
        assert_eq!(join_key("湖北省"), "湖北");
        assert_eq!(join_key("北京市"), "北京");
        assert_eq!(join_key("广西壮族自治区"), "广西壮族自治区");
    }

    #[test]
    fn intensity_is_log_of_confirmed_plus_one() {
        assert_eq!(intensity(0), 0.0);
        assert!((intensity(1000) - 1001f64.ln()).abs() < 1e-12);
        assert!((intensity(1000) - 6.909).abs() < 1e-3);
    }

    #[test]
    fn province_scenario() {
        let raw = serde_json::json!({
            "provinceName": "湖北省",
            "provinceShortName": "湖北",
            "confirmedCount": 1000,
            "suspectedCount": 0,
            "curedCount": 0,
            "deadCount": 0,
            "cities": []
        });
        let stat: ProvinceStat = serde_json::from_value(raw).unwrap();
        let rows = province_table(&[stat]);
        assert_eq!(rows[0].name, "湖北");
        assert!((rows[0].intensity - 6.909).abs() < 1e-3);
    }

    #[test]
    fn municipalities_use_province_counts_verbatim() {
        for (i, short) in MUNICIPALITIES.into_iter().enumerate() {
            let confirmed = 100 * (i as u64 + 1);
            let full = format!("{short}市");
            let listed = Some(vec![city("甲区", 7), city("乙区", 9)]);
            for cities in [listed, Some(vec![]), None] {
                let (rows, skipped) = city_table(&[province(&full, short, confirmed, cities)]);
                assert!(skipped.is_empty(), "{short}");
                assert_eq!(rows, vec![record(short, confirmed, 10, 20, 30)], "{short}");
            }
        }
    }

    #[test]
    fn other_provinces_emit_one_row_per_city() {
        let provinces = vec![
            province("湖北省", "湖北", 1000, Some(vec![city("武汉", 800), city("孝感", 0), city("黄冈", 5)])),
            province("西藏自治区", "西藏", 0, Some(vec![])),
        ];
        let (rows, _) = city_table(&provinces);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].name, "孝感");
        assert_eq!(rows[1].intensity, 0.0);
        for row in &rows {
            assert_eq!(row.intensity, intensity(row.confirmed));
        }
    }

    #[test]
    fn province_without_cities_is_skipped() {
        let provinces = vec![
            province("湖北省", "湖北", 1000, None),
            province("广东省", "广东", 50, Some(vec![city("深圳", 20)])),
        ];
        let tables = build_tables(&provinces);
        assert_eq!(tables.skipped, vec!["湖北省".to_string()]);
        assert_eq!(tables.cities.len(), 1);
        assert_eq!(tables.provinces.len(), 2);
    }

    #[test]
    fn short_name_falls_back_to_join_key() {
        let mut shanghai = province("上海市", "", 7, None);
        shanghai.province_short_name = None;
        let (rows, skipped) = city_table(&[shanghai]);
        assert!(skipped.is_empty());
        assert_eq!(rows[0].name, "上海");
    }
}
