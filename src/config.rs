//! Tuning constants for a run. `GameConfig::default()` is the classic game; with the
//! `serde` feature a config can be loaded from (partial) JSON.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// y of the ground line; sky is drawn above it, grass below.
    pub ground_y: f64,

    pub vehicle_x: f64,
    pub vehicle_width: f64,
    pub vehicle_height: f64,
    /// Distance from the ground line up to the vehicle's top edge when parked.
    pub vehicle_ground_offset: f64,
    pub jump_velocity: f64, // negative = upward
    pub gravity: f64,

    pub initial_speed: f64,
    pub speed_increment: f64, // per frame, uncapped
    pub tree_speed_factor: f64,
    pub hitbox_padding: f64,

    /// Frames that must pass after an obstacle spawn before the next may roll.
    pub obstacle_min_spacing: u32,
    pub obstacle_chance: f64,
    pub tree_chance: f64,
    pub cloud_chance: f64,
    pub raindrop_chance: f64,

    pub biome_period: u32,
    pub weather_period: u32,

    pub road_marking_speed: f64,
    pub road_marking_cycle: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 300.0,
            ground_y: 230.0,
            vehicle_x: 50.0,
            vehicle_width: 60.0,
            vehicle_height: 30.0,
            vehicle_ground_offset: 45.0,
            jump_velocity: -15.0,
            gravity: 0.8,
            initial_speed: 5.0,
            speed_increment: 0.001,
            tree_speed_factor: 0.7,
            hitbox_padding: 5.0,
            obstacle_min_spacing: 100,
            obstacle_chance: 0.04,
            tree_chance: 0.02,
            cloud_chance: 0.005,
            raindrop_chance: 0.3,
            biome_period: 300,
            weather_period: 600,
            road_marking_speed: 1.5,
            road_marking_cycle: 40.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("{name} must be a positive number of frames")]
    ZeroPeriod { name: &'static str },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("ground line {ground_y} lies outside the {canvas_height}px canvas")]
    GroundOutsideCanvas { ground_y: f64, canvas_height: f64 },
}

impl GameConfig {
    /// y of the vehicle's top edge while it sits on the road.
    pub fn rest_y(&self) -> f64 {
        self.ground_y - self.vehicle_ground_offset
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("obstacle_chance", self.obstacle_chance),
            ("tree_chance", self.tree_chance),
            ("cloud_chance", self.cloud_chance),
            ("raindrop_chance", self.raindrop_chance),
        ] {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        for (name, period) in [
            ("biome_period", self.biome_period),
            ("weather_period", self.weather_period),
        ] {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
        }
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("gravity", self.gravity),
            ("road_marking_cycle", self.road_marking_cycle),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(0.0..=self.canvas_height).contains(&self.ground_y) {
            return Err(ConfigError::GroundOutsideCanvas {
                ground_y: self.ground_y,
                canvas_height: self.canvas_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert!((GameConfig::default().rest_y() - 185.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let cfg = GameConfig {
            raindrop_chance: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Probability {
                name: "raindrop_chance",
                value: 1.5
            })
        );
    }

    #[test]
    fn rejects_zero_period_and_bad_ground() {
        let cfg = GameConfig {
            weather_period: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroPeriod {
                name: "weather_period"
            })
        );

        let cfg = GameConfig {
            ground_y: 400.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GroundOutsideCanvas { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::NonPositive {
            name: "gravity",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "gravity must be positive, got 0");
    }
}
