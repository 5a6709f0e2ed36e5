//! Fleet layout and fleet-wide movement.

use crate::entities::{Alien, Sprite};
use crate::settings::Settings;

/// How many aliens a full fleet has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FleetLayout {
    pub columns: u32,
    pub rows: u32,
}

impl FleetLayout {
    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Aliens are spaced one alien apart in both directions, with a one-alien
/// margin on the sides and room above the ship at the bottom.
pub fn fleet_layout(settings: &Settings) -> FleetLayout {
    // Widened so unvalidated sizes cannot overflow.
    let w = settings.alien_width.max(1) as i64;
    let h = settings.alien_height.max(1) as i64;

    let available_space_x = settings.screen_width as i64 - 2 * w;
    let columns = (available_space_x / (2 * w)).clamp(0, u32::MAX as i64);

    let available_space_y = settings.screen_height as i64 - 3 * h - settings.ship_height as i64;
    let rows = (available_space_y / (2 * h)).clamp(0, u32::MAX as i64);

    FleetLayout {
        columns: columns as u32,
        rows: rows as u32,
    }
}

/// The alien at `column` in `row` of a freshly built fleet.
pub fn create_alien(settings: &Settings, column: u32, row: u32) -> Alien {
    let w = settings.alien_width as i64;
    let h = settings.alien_height as i64;
    let x = w + 2 * w * column as i64;
    let y = h + 2 * h * row as i64;
    Alien::new(x as f32, y as f32, settings)
}

/// A full rectangular fleet, row by row.
pub fn create_fleet(settings: &Settings) -> Vec<Alien> {
    let layout = fleet_layout(settings);
    let mut aliens = Vec::with_capacity(layout.len());
    for row in 0..layout.rows {
        for column in 0..layout.columns {
            aliens.push(create_alien(settings, column, row));
        }
    }
    aliens
}

/// True if any alien touches a side of the screen.  Stops at the first hit.
pub fn fleet_at_edge(aliens: &[Alien], settings: &Settings) -> bool {
    aliens.iter().any(|a| a.at_edge(settings))
}

/// Move every alien down by the configured drop distance.
pub fn drop_fleet(aliens: &[Alien], settings: &Settings) -> Vec<Alien> {
    aliens
        .iter()
        .map(|a| Alien {
            y: a.y + settings.fleet_drop_speed as f32,
            ..a.clone()
        })
        .collect()
}

/// Move every alien sideways in the current fleet direction.
pub fn advance_fleet(aliens: &[Alien], settings: &Settings) -> Vec<Alien> {
    aliens
        .iter()
        .map(|a| {
            let mut moved = a.clone();
            moved.advance(settings, 1.0);
            moved
        })
        .collect()
}

/// One frame of fleet motion.  On edge contact the fleet drops and turns
/// around before moving, so it leaves the edge in the same frame and the turn
/// happens once.  Returns the moved fleet and the direction now in effect.
pub fn update_fleet(aliens: &[Alien], settings: &Settings) -> (Vec<Alien>, i32) {
    let mut settings = settings.clone();
    let aliens = if fleet_at_edge(aliens, &settings) {
        settings.fleet_direction = -settings.fleet_direction;
        drop_fleet(aliens, &settings)
    } else {
        aliens.to_vec()
    };
    let aliens = advance_fleet(&aliens, &settings);
    (aliens, settings.fleet_direction)
}
