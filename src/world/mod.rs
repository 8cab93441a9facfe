//! Simulation state for one run of the game and its per-frame update.
//!
//! Everything the renderer reads lives on [`World`]; the browser glue owns one and
//! calls [`World::update`] once per animation frame. Steps are fixed per call (no
//! wall-clock delta), so the game runs faster on faster displays just like the
//! canvas original.

mod collision;
mod entities;

pub use collision::{collides, hitbox};
pub use entities::{Cloud, Obstacle, Raindrop, Tree, Vehicle};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::input::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Biome {
    Plains,
    Forest,
}

impl Biome {
    pub fn toggled(self) -> Self {
        match self {
            Biome::Plains => Biome::Forest,
            Biome::Forest => Biome::Plains,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Weather {
    Sunny,
    Rainy,
}

impl Weather {
    pub fn toggled(self) -> Self {
        match self {
            Weather::Sunny => Weather::Rainy,
            Weather::Rainy => Weather::Sunny,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    Running,
    /// Terminal until a restart; update is suspended, render keeps going.
    GameOver,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct World {
    pub config: GameConfig,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    rng: SmallRng,
    pub phase: Phase,
    pub vehicle: Vehicle,
    pub obstacles: Vec<Obstacle>,
    pub trees: Vec<Tree>,
    pub clouds: Vec<Cloud>,
    pub raindrops: Vec<Raindrop>,
    pub score: u32,
    pub speed: f64,
    pub biome: Biome,
    pub biome_timer: u32,
    pub weather: Weather,
    pub weather_timer: u32,
    /// Frames since the last obstacle spawned.
    pub obstacle_cooldown: u32,
    /// Dash offset of the road centre line, kept in [0, road_marking_cycle).
    pub road_offset: f64,
}

impl World {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: SmallRng) -> Self {
        Self {
            phase: Phase::Running,
            vehicle: Vehicle::parked(&config),
            obstacles: Vec::new(),
            trees: Vec::new(),
            clouds: Vec::new(),
            raindrops: Vec::new(),
            score: 0,
            speed: config.initial_speed,
            biome: Biome::Plains,
            biome_timer: 0,
            weather: Weather::Sunny,
            weather_timer: 0,
            obstacle_cooldown: 0,
            road_offset: 0.0,
            rng,
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Apply a player command. Returns whether it had any effect.
    pub fn apply(&mut self, command: Command) -> bool {
        match (command, self.phase) {
            (Command::Jump, Phase::Running) => self.vehicle.jump(&self.config),
            (Command::Restart, Phase::GameOver) => {
                self.restart();
                true
            }
            _ => false,
        }
    }

    /// Back to a fresh run with the same config; the RNG stream continues.
    pub fn restart(&mut self) {
        let rng = std::mem::replace(&mut self.rng, SmallRng::seed_from_u64(0));
        let config = self.config.clone();
        *self = Self::with_rng(config, rng);
        info!("restart");
    }

    /// Advance the simulation by one frame. No-op once the game is over.
    pub fn update(&mut self) {
        if self.is_over() {
            return;
        }
        self.advance_road_marking();
        self.vehicle.step(&self.config);
        self.advance_obstacles();
        self.advance_trees();
        self.check_collisions();
        self.spawn_obstacles();
        if self.rng.gen_bool(self.config.tree_chance) {
            self.trees.push(Tree::spawn(&self.config, &mut self.rng));
        }
        self.advance_biome();
        self.speed += self.config.speed_increment;
        self.advance_weather();
        self.advance_clouds();
        self.advance_rain();
    }

    fn advance_road_marking(&mut self) {
        let cycle = self.config.road_marking_cycle;
        self.road_offset = (self.road_offset + self.config.road_marking_speed).rem_euclid(cycle);
    }

    fn advance_obstacles(&mut self) {
        let speed = self.speed;
        for o in &mut self.obstacles {
            o.x -= speed;
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.x + o.width >= 0.0);
        // one point per obstacle that scrolled off the left edge
        self.score += (before - self.obstacles.len()) as u32;
    }

    fn advance_trees(&mut self) {
        let speed = self.speed * self.config.tree_speed_factor;
        for t in &mut self.trees {
            t.x -= speed;
        }
        self.trees.retain(|t| t.x + t.width >= 0.0);
    }

    fn check_collisions(&mut self) {
        let padding = self.config.hitbox_padding;
        if self
            .obstacles
            .iter()
            .any(|o| collides(&self.vehicle, o, padding))
        {
            self.phase = Phase::GameOver;
            info!("game over with score {}", self.score);
        }
    }

    fn spawn_obstacles(&mut self) {
        self.obstacle_cooldown += 1;
        if self.obstacle_cooldown > self.config.obstacle_min_spacing
            && self.rng.gen_bool(self.config.obstacle_chance)
        {
            self.obstacles
                .push(Obstacle::spawn(&self.config, &mut self.rng));
            self.obstacle_cooldown = 0;
        }
    }

    fn advance_biome(&mut self) {
        self.biome_timer += 1;
        if self.biome_timer >= self.config.biome_period {
            self.biome_timer = 0;
            self.biome = self.biome.toggled();
            debug!("biome -> {:?}", self.biome);
        }
    }

    fn advance_weather(&mut self) {
        self.weather_timer += 1;
        if self.weather_timer >= self.config.weather_period {
            self.weather_timer = 0;
            self.weather = self.weather.toggled();
            debug!("weather -> {:?}", self.weather);
        }
    }

    fn advance_clouds(&mut self) {
        for c in &mut self.clouds {
            c.x -= c.speed;
        }
        self.clouds.retain(|c| c.x + c.width >= 0.0);
        if self.rng.gen_bool(self.config.cloud_chance) {
            self.clouds.push(Cloud::spawn(&self.config, &mut self.rng));
        }
    }

    fn advance_rain(&mut self) {
        if self.weather != Weather::Rainy {
            self.raindrops.clear();
            return;
        }
        if self.rng.gen_bool(self.config.raindrop_chance) {
            self.raindrops
                .push(Raindrop::spawn(&self.config, &mut self.rng));
        }
        let ground = self.config.ground_y;
        for d in &mut self.raindrops {
            d.y += d.speed;
        }
        self.raindrops.retain(|d| d.y <= ground);
    }
}
