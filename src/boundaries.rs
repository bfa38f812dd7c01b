use crate::errors::ConfigError;
use crate::models::RegionRecord;
use geojson::GeoJson;
use std::{collections::BTreeSet, io::ErrorKind, path::Path};
use tracing::{info, warn};

pub const PROVINCE_FEATURE_KEY: &str = "NL_NAME_1";
pub const CITY_FEATURE_KEY: &str = "NAME";

#[derive(Debug, Clone, Default)]
pub struct BoundaryDataset {
    feature_key: String,
    names: BTreeSet<String>,
    raw: Option<String>,
}

impl BoundaryDataset {
    pub fn load(path: &Path, feature_key: &str) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "boundary dataset not found, joins will not be checked");
                return Ok(Self::empty(feature_key));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let dataset = Self::parse(&text, feature_key).map_err(|reason| ConfigError::Boundary {
            path: path.display().to_string(),
            reason,
        })?;
        info!(
            path = %path.display(),
            features = dataset.names.len(),
            "loaded boundary dataset"
        );
        Ok(dataset)
    }

    pub fn parse(text: &str, feature_key: &str) -> Result<Self, String> {
        let collection = match text.parse::<GeoJson>().map_err(|err| err.to_string())? {
            GeoJson::FeatureCollection(collection) => collection,
            _ => return Err("expected a FeatureCollection".to_string()),
        };

        let names = collection
            .features
            .iter()
            .filter_map(|feature| feature.property(feature_key))
            .filter_map(|value| value.as_str())
            .map(str::to_string)
            .collect();

        Ok(Self {
            feature_key: feature_key.to_string(),
            names,
            raw: Some(text.to_string()),
        })
    }

    pub fn empty(feature_key: &str) -> Self {
        Self {
            feature_key: feature_key.to_string(),
            ..Self::default()
        }
    }

    pub fn feature_id_key(&self) -> String {
        format!("properties.{}", self.feature_key)
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    // Nothing is reported for an unloaded dataset.
    pub fn missing(&self, records: &[RegionRecord]) -> Vec<String> {
        if self.names.is_empty() {
            return Vec::new();
        }
        records
            .iter()
            .filter(|record| !self.contains(&record.name))
            .map(|record| record.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Boundaries {
    pub provinces: BoundaryDataset,
    pub cities: BoundaryDataset,
}

impl Default for Boundaries {
    fn default() -> Self {
        Self {
            provinces: BoundaryDataset::empty(PROVINCE_FEATURE_KEY),
            cities: BoundaryDataset::empty(CITY_FEATURE_KEY),
        }
    }
}

impl Boundaries {
    pub fn load(province_path: &Path, city_path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            provinces: BoundaryDataset::load(province_path, PROVINCE_FEATURE_KEY)?,
            cities: BoundaryDataset::load(city_path, CITY_FEATURE_KEY)?,
        })
    }
}
