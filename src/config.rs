use crate::errors::ConfigError;
use std::{
    env,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

pub const DEFAULT_TREND_URL: &str =
    "https://service-n9zsbooc-1252957949.gz.apigw.tencentcs.com/release/qq";
pub const DEFAULT_AREA_URL: &str =
    "https://service-0gg71fu4-1252957949.gz.apigw.tencentcs.com/release/dingxiangyuan";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub trend_url: String,
    pub area_url: String,
    pub refresh_interval: Duration,
    pub upstream_timeout: Duration,
    pub city_csv_path: PathBuf,
    pub province_geojson_path: PathBuf,
    pub city_geojson_path: PathBuf,
    pub mapbox_token_path: PathBuf,
    pub series_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 9102,
            trend_url: DEFAULT_TREND_URL.to_string(),
            area_url: DEFAULT_AREA_URL.to_string(),
            refresh_interval: Duration::from_secs(10 * 60),
            upstream_timeout: Duration::from_secs(10),
            city_csv_path: PathBuf::from("cities_data.csv"),
            province_geojson_path: PathBuf::from("china_provinces.geojson"),
            city_geojson_path: PathBuf::from("china_cities_github.geojson"),
            mapbox_token_path: PathBuf::from(".mapboxtoken"),
            series_year: 2020,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = parsed(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(url) = lookup("TREND_API_URL") {
            config.trend_url = url;
        }
        if let Some(url) = lookup("AREA_API_URL") {
            config.area_url = url;
        }
        if let Some(secs) = positive_secs(&lookup, "REFRESH_INTERVAL_SECS")? {
            config.refresh_interval = secs;
        }
        if let Some(secs) = positive_secs(&lookup, "UPSTREAM_TIMEOUT_SECS")? {
            config.upstream_timeout = secs;
        }
        if let Some(path) = lookup("CITY_CSV_PATH") {
            config.city_csv_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("PROVINCE_GEOJSON_PATH") {
            config.province_geojson_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("CITY_GEOJSON_PATH") {
            config.city_geojson_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("MAPBOX_TOKEN_PATH") {
            config.mapbox_token_path = PathBuf::from(path);
        }
        if let Some(year) = parsed(&lookup, "SERIES_YEAR")? {
            config.series_year = year;
        }

        Ok(config)
    }
}

// A missing token file means no token.
pub fn read_map_token(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let token = text.trim();
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn positive_secs<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parsed::<F, u64>(lookup, key)? {
        Some(0) => Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
        }),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}
