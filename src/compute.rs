//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  Nothing here touches the
//! terminal or the clock, so a frame can be replayed exactly in tests.

use crate::entities::{Bullet, GameState, GameStats, Ship, Sprite};
use crate::fleet::{create_fleet, update_fleet};
use crate::settings::Settings;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A new, active game: full fleet, centred ship, no bullets.
pub fn init_state(settings: Settings) -> GameState {
    GameState {
        ship: Ship::new(&settings),
        bullets: Vec::new(),
        aliens: create_fleet(&settings),
        stats: GameStats::new(&settings),
        stunned_frames: 0,
        wave: 1,
        frame: 0,
        settings,
    }
}

/// Start over after a game over.  The fleet direction carries over, like it
/// does between waves.
pub fn start_new_game(state: &GameState) -> GameState {
    let mut stats = state.stats.clone();
    stats.reset(&state.settings);
    stats.game_active = true;

    let mut ship = state.ship.clone();
    ship.center(&state.settings);

    log::info!("new game started with {} ships", stats.ships_left);
    GameState {
        ship,
        bullets: Vec::new(),
        aliens: create_fleet(&state.settings),
        stats,
        stunned_frames: 0,
        wave: 1,
        ..state.clone()
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// True while the post-hit pause is running.
pub fn is_stunned(state: &GameState) -> bool {
    state.stunned_frames > 0
}

/// True when simulation updates and firing are allowed.
pub fn is_playing(state: &GameState) -> bool {
    state.stats.game_active && !is_stunned(state)
}

// ── Input-driven state transitions ───────────────────────────────────────────

pub fn set_moving_left(state: &GameState, moving: bool) -> GameState {
    GameState {
        ship: Ship {
            moving_left: moving,
            ..state.ship.clone()
        },
        ..state.clone()
    }
}

pub fn set_moving_right(state: &GameState, moving: bool) -> GameState {
    GameState {
        ship: Ship {
            moving_right: moving,
            ..state.ship.clone()
        },
        ..state.clone()
    }
}

/// Fire a bullet from the ship, unless the bullet allowance is used up or
/// the game is not running.
pub fn fire_bullet(state: &GameState) -> GameState {
    if !is_playing(state) || state.bullets.len() >= state.settings.bullets_allowed {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::fired_from(&state.ship, &state.settings));
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Per-frame updates ────────────────────────────────────────────────────────

pub fn update_ship(state: &GameState) -> GameState {
    let mut ship = state.ship.clone();
    ship.advance(&state.settings, 1.0);
    GameState {
        ship,
        ..state.clone()
    }
}

/// Move bullets up and drop those that have left the top of the screen.
pub fn update_bullets(state: &GameState) -> GameState {
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let mut moved = b.clone();
            moved.advance(&state.settings, 1.0);
            (moved.rect().bottom() > 0).then_some(moved)
        })
        .collect();
    GameState {
        bullets,
        ..state.clone()
    }
}

/// Remove every bullet/alien pair that overlaps.  A bullet destroys at most
/// one alien and an alien absorbs at most one bullet.  Clearing the fleet
/// starts the next wave.
pub fn check_bullet_alien_collisions(state: &GameState) -> GameState {
    let mut killed_aliens: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bullet_rect = bullet.rect();
        let hit = state
            .aliens
            .iter()
            .enumerate()
            .find(|(ai, alien)| !killed_aliens.contains(ai) && bullet_rect.collides(&alien.rect()));
        if let Some((ai, _)) = hit {
            killed_aliens.push(ai);
            used_bullets.push(bi);
        }
    }

    if killed_aliens.is_empty() {
        return state.clone();
    }

    let aliens: Vec<_> = state
        .aliens
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_aliens.contains(i))
        .map(|(_, a)| a.clone())
        .collect();

    let bullets: Vec<_> = state
        .bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    log::trace!("{} aliens shot down", killed_aliens.len());

    if aliens.is_empty() {
        return next_wave(state);
    }

    GameState {
        aliens,
        bullets,
        ..state.clone()
    }
}

/// Clear outstanding bullets and bring in a fresh fleet.  The ship stays put.
pub fn next_wave(state: &GameState) -> GameState {
    let wave = state.wave + 1;
    log::info!("wave {} cleared, starting wave {}", state.wave, wave);
    GameState {
        bullets: Vec::new(),
        aliens: create_fleet(&state.settings),
        wave,
        ..state.clone()
    }
}

/// Move the fleet, then check whether it reached the ship or the bottom of
/// the screen.  At most one ship-hit is processed per frame.
pub fn update_aliens(state: &GameState) -> GameState {
    let (aliens, fleet_direction) = update_fleet(&state.aliens, &state.settings);
    let moved = GameState {
        aliens,
        settings: Settings {
            fleet_direction,
            ..state.settings.clone()
        },
        ..state.clone()
    };

    let ship_rect = moved.ship.rect();
    let screen_bottom = moved.settings.screen_height;
    let touched_ship = moved.aliens.iter().any(|a| a.rect().collides(&ship_rect));
    let reached_bottom = moved
        .aliens
        .iter()
        .any(|a| a.rect().bottom() >= screen_bottom);

    if touched_ship || reached_bottom {
        ship_hit(&moved)
    } else {
        moved
    }
}

/// Respond to the ship being hit.  With ships to spare the wave restarts
/// after a short pause; otherwise the game ends.
pub fn ship_hit(state: &GameState) -> GameState {
    if state.stats.ships_left == 0 {
        log::info!("game over on wave {}", state.wave);
        return GameState {
            stats: GameStats {
                game_active: false,
                ..state.stats.clone()
            },
            ..state.clone()
        };
    }

    let ships_left = state.stats.ships_left - 1;
    log::info!("ship hit, {} ships left", ships_left);

    let mut ship = state.ship.clone();
    ship.center(&state.settings);

    GameState {
        ship,
        bullets: Vec::new(),
        aliens: create_fleet(&state.settings),
        stats: GameStats {
            ships_left,
            ..state.stats.clone()
        },
        stunned_frames: state.settings.ship_hit_pause_frames,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  An inactive game is returned as is;
/// a stunned game only counts down its pause.
pub fn tick(state: &GameState) -> GameState {
    if !state.stats.game_active {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    if is_stunned(&next) {
        next.stunned_frames -= 1;
        return next;
    }

    let next = update_ship(&next);
    let next = update_bullets(&next);
    let next = check_bullet_alien_collisions(&next);
    update_aliens(&next)
}
