use crate::encode::{EccLevel, HexColor};
use serde::Deserialize;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE: &str = "qrgen.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub out: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub strict_url: Option<bool>,
    #[serde(default)]
    pub style: StyleConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct StyleConfig {
    pub ecc: Option<EccLevel>,
    pub box_size: Option<NonZeroU32>,
    pub border: Option<u32>,
    pub fill: Option<HexColor>,
    pub back: Option<HexColor>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };

    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?.to_path_buf();
    }
}

/// Loads `explicit` if given, otherwise the nearest `qrgen.toml` above `start`.
/// With `disabled` set, or when nothing is found, the defaults are returned.
pub fn resolve_config(
    explicit: Option<&Path>,
    disabled: bool,
    start: &Path,
) -> Result<Config, ConfigError> {
    if disabled {
        return Ok(Config::default());
    }

    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config(start) {
            Some(found) => found,
            None => return Ok(Config::default()),
        },
    };

    debug!(path = %path.display(), "loading config");
    load_config(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_config_walks_up() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("project");
        let nested = project.join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(project.join(CONFIG_FILE), "quiet = true\n").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, project.join(CONFIG_FILE));
    }

    #[test]
    fn parses_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r##"
out = "codes/site.png"
quiet = true
[style]
ecc = "h"
box_size = 12
border = 2
fill = "#0a0"
"##,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.out, Some(PathBuf::from("codes/site.png")));
        assert_eq!(config.quiet, Some(true));
        assert_eq!(config.strict_url, None);
        assert_eq!(config.style.ecc, Some(EccLevel::High));
        assert_eq!(config.style.box_size, NonZeroU32::new(12));
        assert_eq!(config.style.border, Some(2));
        assert_eq!(config.style.fill.map(|c| c.0), Some(Rgb([0, 0xaa, 0])));
        assert_eq!(config.style.back, None);
    }

    #[test]
    fn rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        for body in ["[style]\nbox_size = 0\n", "[style]\nback = \"white\"\n"] {
            fs::write(&path, body).unwrap();
            let err = load_config(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Parse { .. }), "{body}");
        }
    }

    #[test]
    fn disabled_config_ignores_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "quiet = true\n").unwrap();

        let config = resolve_config(None, true, dir.path()).unwrap();
        assert_eq!(config.quiet, None);

        let config = resolve_config(None, false, dir.path()).unwrap();
        assert_eq!(config.quiet, Some(true));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = resolve_config(Some(&dir.path().join("nope.toml")), false, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
