use crate::bio::taxonomy::rank_order;
use crate::core::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Directory holding the taxonomy dump and the graph snapshot
    pub database_dir: Option<String>,
    /// Dump archive (or extracted directory) name inside `database_dir`
    pub taxdump_name: String,
    /// Snapshot file name inside `database_dir`
    pub snapshot_name: String,
    /// Reuse and write graph snapshots
    pub use_snapshot: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Lift every taxon to this rank before expanding
    pub level: Option<String>,
    /// Stop descendant expansion at species
    pub species_only: bool,
    /// Expand taxa to their descendants
    pub include_descendants: bool,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            database_dir: None, // Will default to ~/.taxgraph/databases/
            taxdump_name: "taxdump.tar.gz".to_string(),
            snapshot_name: "taxon_graph".to_string(),
            use_snapshot: true,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            level: None,
            species_only: false,
            include_descendants: true,
        }
    }
}

impl TaxonomyConfig {
    pub fn database_dir(&self) -> PathBuf {
        self.database_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(paths::taxgraph_databases_dir)
    }

    pub fn taxdump_path(&self) -> PathBuf {
        self.database_dir().join(&self.taxdump_name)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.database_dir().join(&self.snapshot_name)
    }
}

impl Config {
    fn validate(&self) -> Result<(), crate::TaxGraphError> {
        if let Some(level) = &self.selection.level {
            if rank_order(level) == 0 {
                return Err(crate::TaxGraphError::Config(format!(
                    "selection.level '{}' is not a known rank",
                    level
                )));
            }
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::TaxGraphError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::TaxGraphError::Config(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Load `path` when given, otherwise the default config file if it exists,
/// otherwise the built-in defaults
pub fn load_or_default(path: Option<&Path>) -> Result<Config, crate::TaxGraphError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = paths::default_config_path();
            if default_path.is_file() {
                load_config(default_path)
            } else {
                Ok(default_config())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[selection]\nlevel = \"genus\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.selection.level.as_deref(), Some("genus"));
        assert!(config.selection.include_descendants);
        assert_eq!(config.taxonomy.taxdump_name, "taxdump.tar.gz");
    }

    #[test]
    fn test_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[taxonomy]\ndatabase_dir = \"/data/taxonomy\"\nuse_snapshot = false\n\n\
             [selection]\nspecies_only = true\ninclude_descendants = false\n",
        )
        .unwrap();

        let loaded = load_config(&path).unwrap();
        let mut config = default_config();
        config.taxonomy.database_dir = Some("/data/taxonomy".to_string());
        config.taxonomy.use_snapshot = false;
        config.selection.species_only = true;
        config.selection.include_descendants = false;
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.taxonomy.snapshot_path(),
            PathBuf::from("/data/taxonomy/taxon_graph")
        );
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        for level in ["clade", "no rank", "varietas"] {
            std::fs::write(&path, format!("[selection]\nlevel = \"{}\"\n", level)).unwrap();
            assert!(
                matches!(load_config(&path), Err(crate::TaxGraphError::Config(_))),
                "{}",
                level
            );
        }
    }

    #[test]
    fn test_unparsable_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[taxonomy\n").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(crate::TaxGraphError::Config(_))
        ));
    }
}
