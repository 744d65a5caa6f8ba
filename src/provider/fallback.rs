//! Static hotel table for recognized cities.
//!
//! Served when the live lookup resolves a city but returns no hotels. The
//! built-in table is compiled into the binary; `TRAVEL_FALLBACK_HOTELS_PATH`
//! swaps in a YAML file of the same shape (`city: [hotel, ...]`).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::models::HotelRecord;

const BUILTIN_TABLE: &str = include_str!("../../data/fallback_hotels.yaml");

#[derive(Debug, Clone, Default)]
pub struct FallbackCatalog {
    cities: BTreeMap<String, Vec<String>>,
}

impl FallbackCatalog {
    pub fn builtin() -> Result<Self, serde_yaml::Error> {
        Self::from_yaml(BUILTIN_TABLE)
    }

    /// Keys are normalized to trimmed lower case; blank names are dropped.
    pub fn from_yaml(src: &str) -> Result<Self, serde_yaml::Error> {
        let raw: BTreeMap<String, Vec<String>> = serde_yaml::from_str(src)?;
        let cities = raw
            .into_iter()
            .map(|(city, hotels)| {
                let hotels = hotels
                    .into_iter()
                    .map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty())
                    .collect();
                (normalize(&city), hotels)
            })
            .collect();
        Ok(Self { cities })
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fallback hotel table {}", path.display()))?;
        Self::from_yaml(&src)
            .with_context(|| format!("invalid fallback hotel table {}", path.display()))
    }

    /// The file at `path` when given, otherwise the built-in table.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin().context("built-in fallback hotel table is invalid"),
        }
    }

    pub fn is_known(&self, city: &str) -> bool {
        self.cities.contains_key(&normalize(city))
    }

    /// Hotel records for `city`, or an empty list for unknown cities.
    pub fn hotels_for(&self, city: &str) -> Vec<HotelRecord> {
        self.cities
            .get(&normalize(city))
            .map(|names| names.iter().map(HotelRecord::named).collect())
            .unwrap_or_default()
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}
