//! Startup configuration.
//!
//! Server settings come from the environment. The catalog (known routes and
//! emission factors) is either the built-in default or a JSON file read once
//! at startup. Nothing is written back.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::DomainError;
use crate::emission::EmissionFactorTable;
use crate::store::{RouteStore, RouteStoreBuilder, default_routes};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default static assets directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable holds an unusable value
    #[error("invalid value for {var}: {message}")]
    InvalidEnv { var: &'static str, message: String },

    /// Catalog file could not be read
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON for the expected shape
    #[error("failed to parse catalog {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog content violates a domain invariant
    #[error("invalid catalog: {0}")]
    Domain(#[from] DomainError),
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`CO2_BIND_ADDR`)
    pub bind_addr: SocketAddr,

    /// Directory served under `/static` (`CO2_STATIC_DIR`)
    pub static_dir: String,

    /// Optional catalog file (`CO2_CATALOG`)
    pub catalog_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("CO2_BIND_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnv {
                var: "CO2_BIND_ADDR",
                message: format!("{bind_addr:?}: {e}"),
            })?;

        let static_dir = lookup("CO2_STATIC_DIR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        let catalog_path = lookup("CO2_CATALOG")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            static_dir,
            catalog_path,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            catalog_path: None,
        }
    }
}

/// One route row in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDto {
    pub origin: String,
    pub destination: String,
    /// Distance in kilometres
    pub distance: f64,
}

/// On-disk catalog shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub routes: Vec<RouteDto>,
    pub emission_factors: BTreeMap<String, f64>,
}

/// Known routes and emission factors for a session.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub routes: RouteStore,
    pub factors: EmissionFactorTable,
}

impl Catalog {
    /// Load the catalog from `path`, or use the built-in one if `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("using built-in catalog");
                Ok(Self::default())
            }
        }
    }

    /// Load a catalog from a JSON file.
    ///
    /// Invalid route rows are skipped with a warning; an invalid emission
    /// factor fails the whole load.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_file(file)?;
        info!(
            path = %path.display(),
            routes = catalog.routes.len(),
            modes = catalog.factors.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Build a catalog from its parsed file form.
    pub fn from_file(file: CatalogFile) -> Result<Self, DomainError> {
        let routes = file
            .routes
            .iter()
            .fold(RouteStoreBuilder::new(), |builder, r| {
                builder.add(&r.origin, &r.destination, r.distance)
            })
            .build();
        let factors = EmissionFactorTable::new(file.emission_factors)?;

        Ok(Self { routes, factors })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            routes: default_routes(),
            factors: EmissionFactorTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.static_dir, "static");
        assert!(config.catalog_path.is_none());

        let default = ServerConfig::default();
        assert_eq!(default.bind_addr, config.bind_addr);
    }

    #[test]
    fn server_config_from_env() {
        let config = ServerConfig::from_lookup(env(&[
            ("CO2_BIND_ADDR", "0.0.0.0:8080"),
            ("CO2_STATIC_DIR", "/srv/assets"),
            ("CO2_CATALOG", "/etc/co2/catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.static_dir, "/srv/assets");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/co2/catalog.json"))
        );
    }

    #[test]
    fn blank_env_values_use_defaults() {
        let config =
            ServerConfig::from_lookup(env(&[("CO2_BIND_ADDR", " "), ("CO2_CATALOG", "")]))
                .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn invalid_bind_addr() {
        let err = ServerConfig::from_lookup(env(&[("CO2_BIND_ADDR", "localhost")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                var: "CO2_BIND_ADDR",
                ..
            }
        ));
    }

    #[test]
    fn default_catalog() {
        let catalog = Catalog::load_or_default(None).unwrap();
        assert_eq!(catalog.routes.len(), 4);
        assert_eq!(catalog.factors, EmissionFactorTable::default());
    }

    #[test]
    fn load_catalog_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "routes": [
                    { "origin": "Recife", "destination": "Natal", "distance": 286 },
                    { "origin": "", "destination": "Natal", "distance": 10 },
                    { "origin": "Recife", "destination": "Maceió", "distance": 255.5 }
                ],
                "emission_factors": { "car": 0.12, "bus": 0.089, "train": 0.04 }
            }"#,
        )
        .unwrap();

        let catalog = Catalog::load_or_default(Some(path.as_path())).unwrap();
        assert_eq!(catalog.routes.len(), 2);
        assert_eq!(catalog.routes.find_distance("natal", "recife"), Some(286.0));
        assert_eq!(catalog.factors.factor("train"), Some(0.04));
        assert_eq!(catalog.factors.factor("bicycle"), None);
    }

    #[test]
    fn missing_catalog_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_catalog_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{ "routes": [] }"#).unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn negative_factor_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{ "routes": [], "emission_factors": { "car": -1 } }"#,
        )
        .unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Domain(DomainError::InvalidFactor { .. })
        ));
    }

    #[test]
    fn catalog_file_roundtrip_shape() {
        let file = CatalogFile {
            routes: vec![RouteDto {
                origin: "A".into(),
                destination: "B".into(),
                distance: 1.5,
            }],
            emission_factors: BTreeMap::from([("car".to_string(), 0.12)]),
        };
        let json = serde_json::to_string(&file).unwrap();
        let parsed: CatalogFile = serde_json::from_str(&json).unwrap();
        let catalog = Catalog::from_file(parsed).unwrap();
        assert_eq!(catalog.routes.find_distance("b", "a"), Some(1.5));
    }
}
