//! Bus Runner core crate.
//!
//! A side-scrolling endless runner for the browser: a bus hops roadblocks while
//! clouds, rain, trees and the road roll past. Simulation (`world`), drawing
//! (`render`) and texture generation (`texture`) are plain Rust and run natively
//! under `cargo test`; `browser` binds them to a canvas via `web_sys`.

use wasm_bindgen::prelude::*;

mod browser;
pub mod config;
pub mod frame_loop;
pub mod geom;
pub mod input;
pub mod render;
pub mod texture;
pub mod world;

pub use config::{ConfigError, GameConfig};
pub use frame_loop::FrameLoop;
pub use input::Command;
pub use render::{Painter, render};
pub use world::{Biome, Phase, Weather, World};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // a second init (hot reload) only fails because a logger is already set
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    browser::start(GameConfig::default())
}

/// Start with a JSON config; missing fields fall back to the defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = parse_config(json).map_err(|e| JsValue::from_str(&e))?;
    browser::start(config)
}

/// Current world state as JSON, or `undefined` before `start_game`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_snapshot() -> Option<String> {
    browser::snapshot()
}

#[cfg(feature = "serde_json")]
pub fn parse_config(json: &str) -> Result<GameConfig, String> {
    let config: GameConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
