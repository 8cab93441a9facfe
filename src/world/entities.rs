// Entity records and their randomized factories.

use rand::Rng;

use crate::config::GameConfig;
use crate::geom::Rect;

const OBSTACLE_WIDTH: f64 = 20.0;
const OBSTACLE_HEIGHT: (f64, f64) = (20.0, 40.0);
const OBSTACLE_LIFT: f64 = 5.0; // gap between obstacle base and ground line

const TREE_WIDTH: f64 = 30.0;
const TREE_HEIGHT: (f64, f64) = (80.0, 180.0);
const TREE_SINK: f64 = 40.0; // how far the trunk base sits below the ground line
const TREE_JITTER: f64 = 10.0;

const CLOUD_Y: (f64, f64) = (30.0, 80.0);
const CLOUD_WIDTH: (f64, f64) = (60.0, 100.0);
const CLOUD_HEIGHT: (f64, f64) = (20.0, 40.0);
const CLOUD_SPEED: (f64, f64) = (1.0, 1.5);

const RAIN_SPEED: (f64, f64) = (7.0, 12.0);
const RAIN_LENGTH: (f64, f64) = (10.0, 20.0);

fn between<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.gen_range(0.0..1.0) * (hi - lo)
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vehicle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity_y: f64,
    pub jumping: bool,
}

impl Vehicle {
    pub fn parked(config: &GameConfig) -> Self {
        Self {
            x: config.vehicle_x,
            y: config.rest_y(),
            width: config.vehicle_width,
            height: config.vehicle_height,
            velocity_y: 0.0,
            jumping: false,
        }
    }

    /// Start a jump unless one is already underway.
    pub fn jump(&mut self, config: &GameConfig) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.velocity_y = config.jump_velocity;
        true
    }

    pub(crate) fn step(&mut self, config: &GameConfig) {
        if !self.jumping {
            return;
        }
        self.y += self.velocity_y;
        self.velocity_y += config.gravity;
        let rest = config.rest_y();
        if self.y >= rest {
            self.y = rest;
            self.jumping = false;
            self.velocity_y = 0.0;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn spawn<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let height = between(rng, OBSTACLE_HEIGHT);
        Self {
            x: config.canvas_width,
            y: config.ground_y - height - OBSTACLE_LIFT,
            width: OBSTACLE_WIDTH,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Scenery only; trees never collide.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tree {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Tree {
    pub fn spawn<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let height = between(rng, TREE_HEIGHT);
        let jitter = between(rng, (0.0, TREE_JITTER));
        Self {
            x: config.canvas_width,
            y: config.ground_y - height + TREE_SINK + jitter,
            width: TREE_WIDTH,
            height,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Cloud {
    pub fn spawn<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        Self {
            x: config.canvas_width,
            y: between(rng, CLOUD_Y),
            width: between(rng, CLOUD_WIDTH),
            height: between(rng, CLOUD_HEIGHT),
            speed: between(rng, CLOUD_SPEED),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Raindrop {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub length: f64,
}

impl Raindrop {
    pub fn spawn<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        Self {
            x: between(rng, (0.0, config.canvas_width)),
            y: 0.0,
            speed: between(rng, RAIN_SPEED),
            length: between(rng, RAIN_LENGTH),
        }
    }
}
