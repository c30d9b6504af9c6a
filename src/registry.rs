//! City → trip data source mapping.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Published data files for the cities the tool knows out of the box.
pub const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps lower-case city keys to trip data files.
///
/// The default set can be replaced by a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "boston": "/srv/bikeshare/boston.csv"
/// }
/// ```
/// Relative file names are resolved against the data directory.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    entries: BTreeMap<String, PathBuf>,
}

impl CityRegistry {
    /// The built-in city set, rooted at `data_dir`.
    pub fn builtin(data_dir: &Path) -> Self {
        Self::from_pairs(
            data_dir,
            DEFAULT_CITIES.iter().map(|(city, file)| (*city, *file)),
        )
    }

    /// Loads a registry from a JSON file at `path`.
    pub fn load(path: &Path, data_dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read city registry {}", path.display()))?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid city registry {}", path.display()))?;
        if entries.is_empty() {
            anyhow::bail!("City registry {} lists no cities", path.display());
        }
        Ok(Self::from_pairs(
            data_dir,
            entries.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ))
    }

    fn from_pairs<'a>(data_dir: &Path, pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .map(|(city, file)| (city.trim().to_lowercase(), data_dir.join(file)))
            .collect();
        Self { entries }
    }

    /// Returns the data source for `city`, if one is registered.
    pub fn get(&self, city: &str) -> Option<&Path> {
        self.entries
            .get(&city.trim().to_lowercase())
            .map(PathBuf::as_path)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.get(city).is_some()
    }

    /// Registered city keys in sorted order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over all `(city, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }
}
