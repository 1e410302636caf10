//! Configuration loading.
//!
//! Layered with figment: a TOML file (either given explicitly or found at
//! the platform config location) underneath `DOJOSCOUT_`-prefixed
//! environment variables. Everything is optional; an absent config file
//! just yields the defaults.

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory trees scanned when no paths are given on the command line,
    /// e.g. an editor's configured search paths.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration, preferring `explicit` over the default file
    /// location over nothing at all.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = explicit.map(Path::to_path_buf).or_else(default_config_file);
        let mut figment = Figment::new();
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "reading configuration");
            figment = figment.merge(Toml::file(file));
        }
        figment
            .merge(Env::prefixed("DOJOSCOUT_"))
            .extract()
            .or_raise(|| ErrorKind::Config)
    }
}

fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dojoscout").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"search_paths = ["/srv/dojo", "/srv/extras"]"#).unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.search_paths, [Path::new("/srv/dojo"), Path::new("/srv/extras")]);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(config.search_paths.is_empty());
    }
}
