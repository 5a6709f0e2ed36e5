//! Game entity types and the geometry they share.
//!
//! Entities keep floating-point positions so slow speeds still accumulate;
//! their bounding rectangles are integer and always derived from the position.

use crate::settings::Settings;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer axis-aligned rectangle in logical screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// True when the two rectangles share interior area.  Touching edges do
    /// not count, and an empty rectangle never collides.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Anything that lives on the screen and moves once per frame.
pub trait Sprite {
    /// Top-left corner with sub-pixel precision.
    fn position(&self) -> (f32, f32);

    fn rect(&self) -> Rect;

    /// Move by `dt` frames' worth of motion.
    fn advance(&mut self, settings: &Settings, dt: f32);
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A stationary ship at the bottom centre of the screen.
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            x: 0.0,
            y: 0.0,
            width: settings.ship_width,
            height: settings.ship_height,
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    /// Put the ship back at the bottom centre.  Movement flags are kept so a
    /// held key keeps working after a respawn.
    pub fn center(&mut self, settings: &Settings) {
        self.x = (settings.screen_width / 2 - self.width / 2) as f32;
        self.y = (settings.screen_height - self.height) as f32;
    }
}

impl Sprite for Ship {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, self.width, self.height)
    }

    fn advance(&mut self, settings: &Settings, dt: f32) {
        let step = settings.ship_speed * dt;
        // Both flags may be set; the moves then cancel out.
        if self.moving_right && self.rect().right() < settings.screen_width {
            self.x += step;
        }
        if self.moving_left && self.rect().left() > 0 {
            self.x -= step;
        }
        let max_x = (settings.screen_width - self.width).max(0) as f32;
        self.x = self.x.clamp(0.0, max_x);
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
}

impl Bullet {
    /// A bullet leaving the nose of `ship`.
    pub fn fired_from(ship: &Ship, settings: &Settings) -> Self {
        let ship_rect = ship.rect();
        Bullet {
            x: (ship_rect.center_x() - settings.bullet_width / 2) as f32,
            y: ship_rect.top() as f32,
            width: settings.bullet_width,
            height: settings.bullet_height,
        }
    }
}

impl Sprite for Bullet {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, self.width, self.height)
    }

    fn advance(&mut self, settings: &Settings, dt: f32) {
        self.y -= settings.bullet_speed * dt;
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
}

impl Alien {
    pub fn new(x: f32, y: f32, settings: &Settings) -> Self {
        Alien {
            x,
            y,
            width: settings.alien_width,
            height: settings.alien_height,
        }
    }

    /// True if the alien touches the left or right screen edge.  Uses the
    /// float position, so a sub-pixel step away from an edge clears it.
    pub fn at_edge(&self, settings: &Settings) -> bool {
        self.x <= 0.0 || self.x + self.width as f32 >= settings.screen_width as f32
    }
}

impl Sprite for Alien {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, self.width, self.height)
    }

    fn advance(&mut self, settings: &Settings, dt: f32) {
        self.x += settings.alien_speed * settings.fleet_direction as f32 * dt;
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub ships_left: u32,
    pub game_active: bool,
}

impl GameStats {
    /// Fresh stats for a game that starts immediately.
    pub fn new(settings: &Settings) -> Self {
        let mut stats = GameStats {
            ships_left: 0,
            game_active: true,
        };
        stats.reset(settings);
        stats
    }

    /// Restore the values that change during a game.
    pub fn reset(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Owned so the fleet direction can flip during play.
    pub settings: Settings,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    /// The fleet: every live alien of the current wave.
    pub aliens: Vec<Alien>,
    pub stats: GameStats,
    /// Frames left in the post-hit pause; the simulation is frozen while > 0.
    pub stunned_frames: u32,
    /// 1-based wave number, bumped each time a fleet is cleared.
    pub wave: u32,
    pub frame: u64,
}
