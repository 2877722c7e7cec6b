use serde::{Deserialize, Serialize};

/// Errors found while validating population settings.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name}: min {min} exceeds max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Designer-tunable population settings.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Cap on live ring-spawned bodies.
    pub max_population: usize,
    /// Seconds that must pass between ring spawns.
    pub spawn_interval_seconds: f32,
    /// Distance from the reference point at which ring bodies appear.
    pub spawn_ring_radius: f32,
    /// Ring spawn mass range.
    pub min_mass: f32,
    pub max_mass: f32,
    /// Annulus around the origin used by seeding and the low-water top-up.
    pub spawn_range_min: f32,
    pub spawn_range_max: f32,
    /// Below this many live bodies, one extra body is spawned per tick.
    pub low_water_mark: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            max_population: 50,
            spawn_interval_seconds: 2.0,
            spawn_ring_radius: 30.0,
            min_mass: 0.3,
            max_mass: 5.0,
            spawn_range_min: 10.0,
            spawn_range_max: 50.0,
            low_water_mark: 20,
        }
    }
}

impl PopulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_mass", self.min_mass)?;
        positive("max_mass", self.max_mass)?;
        positive("spawn_ring_radius", self.spawn_ring_radius)?;
        non_negative("spawn_interval_seconds", self.spawn_interval_seconds)?;
        non_negative("spawn_range_min", self.spawn_range_min)?;
        positive("spawn_range_max", self.spawn_range_max)?;
        ordered("mass", self.min_mass, self.max_mass)?;
        ordered("spawn_range", self.spawn_range_min, self.spawn_range_max)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_table() {
        let c = PopulationConfig::default();
        assert_eq!(c.max_population, 50);
        assert_eq!(c.spawn_interval_seconds, 2.0);
        assert_eq!(c.spawn_ring_radius, 30.0);
        assert_eq!((c.min_mass, c.max_mass), (0.3, 5.0));
        assert_eq!((c.spawn_range_min, c.spawn_range_max), (10.0, 50.0));
        assert_eq!(c.low_water_mark, 20);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn inverted_mass_range_rejected() {
        let c = PopulationConfig {
            min_mass: 6.0,
            ..PopulationConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvertedRange {
                name: "mass",
                min: 6.0,
                max: 5.0
            })
        );
    }

    #[test]
    fn zero_radius_rejected() {
        let c = PopulationConfig {
            spawn_ring_radius: 0.0,
            ..PopulationConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NotPositive {
                name: "spawn_ring_radius",
                ..
            })
        ));
    }

    #[test]
    fn negative_interval_rejected() {
        let c = PopulationConfig {
            spawn_interval_seconds: -1.0,
            ..PopulationConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn degenerate_ranges_allowed() {
        let c = PopulationConfig {
            min_mass: 1.0,
            max_mass: 1.0,
            spawn_range_min: 0.0,
            spawn_range_max: 5.0,
            ..PopulationConfig::default()
        };
        assert!(c.validate().is_ok());
    }
}
