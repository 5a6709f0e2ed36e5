//! Static game configuration.
//!
//! `Settings::default()` is the stock tuning.  Any subset of the fields can be
//! overridden from a JSON file; missing fields keep their defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::fleet::fleet_layout;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "ALIEN_INVASION_CONFIG";

/// Largest accepted screen or sprite dimension, in pixels.
pub const MAX_DIMENSION: i32 = 16384;

/// Largest accepted `ship_limit`; the HUD draws one heart per ship.
pub const MAX_SHIP_LIMIT: u32 = 99;

/// Largest accepted `bullets_allowed`.
pub const MAX_BULLETS_ALLOWED: usize = 1000;

/// An RGB triple.
pub type Rgb = [u8; 3];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Screen ───────────────────────────────────────────────────────────────
    /// Logical surface size in pixels.
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Rgb,

    // ── Ship ─────────────────────────────────────────────────────────────────
    /// Pixels per frame.
    pub ship_speed: f32,
    /// Spare ships granted at the start of a game.
    pub ship_limit: u32,
    pub ship_width: i32,
    pub ship_height: i32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Rgb,
    /// Maximum number of bullets on screen at once.
    pub bullets_allowed: usize,

    // ── Aliens ───────────────────────────────────────────────────────────────
    pub alien_width: i32,
    pub alien_height: i32,
    pub alien_speed: f32,
    /// Pixels the whole fleet drops when it touches a screen edge.
    pub fleet_drop_speed: i32,
    /// 1 moves the fleet right, -1 moves it left.  The only field that changes
    /// during play.
    pub fleet_direction: i32,

    // ── Timing ───────────────────────────────────────────────────────────────
    /// Frames the simulation stays frozen after the ship is hit.
    pub ship_hit_pause_frames: u32,
    /// Target frame length in milliseconds.
    pub frame_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            bg_color: [230, 230, 230],

            ship_speed: 12.0,
            ship_limit: 3,
            ship_width: 60,
            ship_height: 48,

            bullet_speed: 20.0,
            bullet_width: 3,
            bullet_height: 15,
            bullet_color: [60, 60, 60],
            bullets_allowed: 3,

            alien_width: 40,
            alien_height: 40,
            alien_speed: 4.0,
            fleet_drop_speed: 20,
            fleet_direction: 1,

            ship_hit_pause_frames: 15,
            frame_millis: 33,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).context("settings file is not valid JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`.  A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json_str(&json)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `$ALIEN_INVASION_CONFIG`, else `~/.alien_invasion.json`.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&config_path())
    }

    /// Reject configurations the game loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            bail!(
                "screen size must be positive, got {}x{}",
                self.screen_width,
                self.screen_height
            );
        }
        if self.ship_width <= 0 || self.ship_height <= 0 {
            bail!("ship size must be positive");
        }
        if self.bullet_width <= 0 || self.bullet_height <= 0 {
            bail!("bullet size must be positive");
        }
        if self.alien_width <= 0 || self.alien_height <= 0 {
            bail!("alien size must be positive");
        }
        for (name, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("fleet_drop_speed", self.fleet_drop_speed),
        ] {
            if value > MAX_DIMENSION {
                bail!("{name} must be at most {MAX_DIMENSION}, got {value}");
            }
        }
        if self.ship_limit > MAX_SHIP_LIMIT {
            bail!("ship_limit must be at most {MAX_SHIP_LIMIT}, got {}", self.ship_limit);
        }
        if self.bullets_allowed > MAX_BULLETS_ALLOWED {
            bail!(
                "bullets_allowed must be at most {MAX_BULLETS_ALLOWED}, got {}",
                self.bullets_allowed
            );
        }
        if self.fleet_direction != 1 && self.fleet_direction != -1 {
            bail!("fleet_direction must be 1 or -1, got {}", self.fleet_direction);
        }
        for (name, speed) in [
            ("ship_speed", self.ship_speed),
            ("bullet_speed", self.bullet_speed),
            ("alien_speed", self.alien_speed),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                bail!("{name} must be a positive number, got {speed}");
            }
        }
        if self.fleet_drop_speed < 0 {
            bail!("fleet_drop_speed must not be negative");
        }
        if self.frame_millis == 0 {
            bail!("frame_millis must be at least 1");
        }
        // An empty fleet is immediately rebuilt, so a layout with no room for
        // aliens would start a new wave every frame.
        let layout = fleet_layout(self);
        if layout.columns == 0 || layout.rows == 0 {
            bail!(
                "screen {}x{} has no room for a fleet of {}x{} aliens",
                self.screen_width,
                self.screen_height,
                self.alien_width,
                self.alien_height
            );
        }
        Ok(())
    }
}

/// Where settings are read from when no explicit path is given.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".alien_invasion.json")
}
