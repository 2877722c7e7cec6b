use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stellar_kernel::BodyTemplate;
use stellar_mutation::{CatalogError, Mutation, MutationCatalog};
use stellar_population::PopulationConfig;

/// Errors from loading or validating a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid population settings: {0}")]
    Population(#[from] stellar_population::ConfigError),
    #[error("invalid mutation catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
}

/// Everything a session needs at startup.
///
/// All fields default; a config file overrides only what it names. Setting a
/// template to `null` disables that kind of spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the shared random source. Unset draws from OS entropy.
    pub seed: Option<u64>,
    /// Bodies seeded around the origin at startup.
    pub initial_population: usize,
    pub player_mass: f32,
    pub player_template: Option<BodyTemplate>,
    pub body_template: Option<BodyTemplate>,
    pub population: PopulationConfig,
    /// Replaces the stock catalog when set.
    pub mutations: Option<Vec<Mutation>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_population: 30,
            player_mass: 1.0,
            player_template: Some(BodyTemplate::default()),
            body_template: Some(BodyTemplate::default()),
            population: PopulationConfig::default(),
            mutations: None,
        }
    }
}

impl GameConfig {
    /// Load and validate a config file. The format follows the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.population.validate()?;
        if !(self.player_mass.is_finite() && self.player_mass > 0.0) {
            return Err(ConfigError::NotPositive {
                name: "player_mass",
                value: self.player_mass,
            });
        }
        self.catalog()?;
        Ok(())
    }

    /// The configured catalog, or the stock one.
    pub fn catalog(&self) -> Result<MutationCatalog, CatalogError> {
        match &self.mutations {
            Some(list) => MutationCatalog::from_mutations(list.iter().cloned()),
            None => Ok(MutationCatalog::standard()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        let c = GameConfig::default();
        assert_eq!(c.initial_population, 30);
        assert!(c.player_template.is_some());
        assert!(c.validate().is_ok());
        assert_eq!(c.catalog().unwrap().len(), 7);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let c = GameConfig::from_yaml_str(
            "seed: 7\npopulation:\n  max_population: 10\n  spawn_ring_radius: 12.5\n",
        )
        .unwrap();
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.population.max_population, 10);
        assert_eq!(c.population.spawn_ring_radius, 12.5);
        assert_eq!(c.population.low_water_mark, 20);
        assert_eq!(c.initial_population, 30);
    }

    #[test]
    fn null_template_disables_spawns() {
        let c = GameConfig::from_yaml_str("body_template: null\n").unwrap();
        assert!(c.body_template.is_none());
        assert!(c.player_template.is_some());
    }

    #[test]
    fn json_with_custom_catalog() {
        let c = GameConfig::from_json_str(
            r#"{"mutations":[{"name":"Heavy","description":"","category":"Physical","mass_bonus":1.0}]}"#,
        )
        .unwrap();
        let catalog = c.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("Heavy").is_some());
    }

    #[test]
    fn invalid_population_rejected() {
        let err = GameConfig::from_yaml_str("population:\n  min_mass: 9.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Population(_)));
    }

    #[test]
    fn duplicate_catalog_names_rejected() {
        let err = GameConfig::from_yaml_str(
            "mutations:\n  - {name: A, description: '', category: Physical}\n  - {name: A, description: '', category: Ecology}\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Catalog(CatalogError::DuplicateName(_))));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("game.yml");
        std::fs::File::create(&yaml)
            .unwrap()
            .write_all(b"initial_population: 4\n")
            .unwrap();
        assert_eq!(GameConfig::load(&yaml).unwrap().initial_population, 4);

        let json = dir.path().join("game.json");
        std::fs::write(&json, r#"{"initial_population": 9}"#).unwrap();
        assert_eq!(GameConfig::load(&json).unwrap().initial_population, 9);

        let toml = dir.path().join("game.toml");
        std::fs::write(&toml, "initial_population = 1").unwrap();
        assert!(matches!(
            GameConfig::load(&toml),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GameConfig::load("/nonexistent/stellar.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/stellar.yaml"));
    }
}
