//! The `AlienInvasion` controller.
//!
//! Owns the game state and turns key presses into state transitions.  The
//! terminal front end feeds it keys and calls [`AlienInvasion::step`] once per
//! frame; it never reads the terminal itself.

use crate::compute::{
    fire_bullet, init_state, set_moving_left, set_moving_right, start_new_game, tick,
};
use crate::entities::GameState;
use crate::settings::Settings;

/// Game-level keys, independent of the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Restart,
    Quit,
}

pub struct AlienInvasion {
    state: GameState,
    quit: bool,
}

impl AlienInvasion {
    pub fn new(settings: Settings) -> Self {
        log::info!(
            "starting Alien Invasion on a {}x{} screen",
            settings.screen_width,
            settings.screen_height
        );
        Self {
            state: init_state(settings),
            quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Window close, Ctrl-C and the like.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// React to a key going down (`pressed`) or up.
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        match (key, pressed) {
            (Key::Left, _) => self.state = set_moving_left(&self.state, pressed),
            (Key::Right, _) => self.state = set_moving_right(&self.state, pressed),
            (Key::Fire, true) => self.state = fire_bullet(&self.state),
            (Key::Restart, true) if !self.state.stats.game_active => {
                self.state = start_new_game(&self.state);
            }
            (Key::Quit, true) => self.request_quit(),
            _ => {}
        }
    }

    /// Run one frame of simulation.
    pub fn step(&mut self) {
        self.state = tick(&self.state);
    }
}
