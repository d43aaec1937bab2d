use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static TAXGRAPH_HOME: OnceLock<PathBuf> = OnceLock::new();
static TAXGRAPH_DATABASES_DIR: OnceLock<PathBuf> = OnceLock::new();

pub const CONFIG_FILE: &str = "config.toml";

/// Get the taxgraph home directory
/// Checks TAXGRAPH_HOME environment variable, falls back to ${HOME}/.taxgraph
pub fn taxgraph_home() -> PathBuf {
    TAXGRAPH_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("TAXGRAPH_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".taxgraph")
            }
        })
        .clone()
}

/// Get the directory holding taxonomy dumps and graph snapshots
/// Checks TAXGRAPH_DATABASES_DIR environment variable, falls back to TAXGRAPH_HOME/databases
pub fn taxgraph_databases_dir() -> PathBuf {
    TAXGRAPH_DATABASES_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("TAXGRAPH_DATABASES_DIR") {
                PathBuf::from(path)
            } else {
                taxgraph_home().join("databases")
            }
        })
        .clone()
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    taxgraph_home().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_databases_dir_is_stable() {
        assert_eq!(taxgraph_databases_dir(), taxgraph_databases_dir());
    }

    #[test]
    fn test_config_path_uses_home() {
        let path = default_config_path();
        assert!(path.starts_with(taxgraph_home()));
        assert!(path.ends_with(CONFIG_FILE));
    }
}
