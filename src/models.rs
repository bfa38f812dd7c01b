use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// Upstream payloads. Decoding into these is the schema check at the client boundary.
// Trend entries stay raw until each output decodes the part it reads.

#[derive(Debug, Clone, Deserialize)]
pub struct TrendPayload {
    pub data: TrendData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendData {
    #[serde(rename = "wuwei_ww_cn_day_counts")]
    pub day_counts: Vec<serde_json::Value>,
    #[serde(rename = "wuwei_ww_global_vars")]
    pub global_vars: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDayCount {
    pub date: String,
    #[serde(deserialize_with = "count")]
    pub confirm: u64,
    #[serde(deserialize_with = "count")]
    pub suspect: u64,
    #[serde(deserialize_with = "count")]
    pub dead: u64,
    #[serde(deserialize_with = "count")]
    pub heal: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalVars {
    #[serde(rename = "confirmCount", deserialize_with = "count")]
    pub confirm_count: u64,
    #[serde(rename = "suspectCount", deserialize_with = "count")]
    pub suspect_count: u64,
    #[serde(rename = "deadCount", deserialize_with = "count")]
    pub dead_count: u64,
    #[serde(deserialize_with = "count")]
    pub cure: u64,
    #[serde(default)]
    pub update_time: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaPayload {
    pub data: AreaData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaData {
    #[serde(rename = "getAreaStat")]
    pub area_stat: Vec<ProvinceStat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceStat {
    pub province_name: String,
    #[serde(default)]
    pub province_short_name: Option<String>,
    #[serde(deserialize_with = "count")]
    pub confirmed_count: u64,
    #[serde(deserialize_with = "count")]
    pub suspected_count: u64,
    #[serde(deserialize_with = "count")]
    pub cured_count: u64,
    #[serde(deserialize_with = "count")]
    pub dead_count: u64,
    #[serde(default)]
    pub cities: Option<Vec<CityStat>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStat {
    pub city_name: String,
    #[serde(deserialize_with = "count")]
    pub confirmed_count: u64,
    #[serde(deserialize_with = "count")]
    pub suspected_count: u64,
    #[serde(deserialize_with = "count")]
    pub cured_count: u64,
    #[serde(deserialize_with = "count")]
    pub dead_count: u64,
}

/// Counts arrive as JSON integers and occasionally as integer strings.
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Int(u64),
        Text(String),
    }

    match RawCount::deserialize(deserializer)? {
        RawCount::Int(value) => Ok(value),
        RawCount::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid count {text:?}"))),
    }
}

// Aggregated outputs handed to the presentation layer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub confirmed: u64,
    pub suspected: u64,
    pub dead: u64,
    pub cured: u64,
}

// Index-aligned, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub dates: Vec<String>,
    pub confirmed: Vec<u64>,
    pub suspected: Vec<u64>,
    pub dead: Vec<u64>,
    pub cured: Vec<u64>,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeriesMeta {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub panel: u8,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse<'a> {
    #[serde(flatten)]
    pub data: &'a TrendSeries,
    pub series: &'static [SeriesMeta],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    pub name: String,
    pub confirmed: u64,
    pub suspected: u64,
    pub cured: u64,
    pub dead: u64,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub confirmed: u64,
    pub suspected: u64,
    pub dead: u64,
    pub cured: u64,
    pub upstream_update_time: Option<String>,
    pub as_of: String,
    pub display: CounterDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterDisplay {
    pub confirmed: String,
    pub suspected: String,
    pub dead: String,
    pub cured: String,
    pub update_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapSettings {
    pub style: &'static str,
    pub zoom: u8,
    pub center_lat: f64,
    pub center_lon: f64,
    pub colorscale: &'static str,
    pub reversescale: bool,
    pub marker_opacity: f64,
    pub marker_line_width: f64,
    pub province_feature_key: String,
    pub city_feature_key: String,
    pub access_token: Option<String>,
}
