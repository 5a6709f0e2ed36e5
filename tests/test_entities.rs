use alien_invasion::entities::*;
use alien_invasion::settings::Settings;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(10, 20, 30, 40);
    assert_eq!(r.left(), 10);
    assert_eq!(r.right(), 40);
    assert_eq!(r.top(), 20);
    assert_eq!(r.bottom(), 60);
    assert_eq!(r.center_x(), 25);
}

#[test]
fn rect_overlap_collides() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.collides(&Rect::new(5, 5, 10, 10)));
    assert!(a.collides(&Rect::new(2, 2, 3, 3)));
}

#[test]
fn rect_touching_edges_do_not_collide() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.collides(&Rect::new(10, 0, 10, 10)));
    assert!(!a.collides(&Rect::new(0, 10, 10, 10)));
}

#[test]
fn empty_rect_never_collides() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.collides(&Rect::new(5, 5, 0, 3)));
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[test]
fn ship_starts_centred() {
    let settings = Settings::default();
    let ship = Ship::new(&settings);
    assert_eq!(ship.position(), (610.0, 672.0));
    assert_eq!(ship.rect().bottom(), settings.screen_height);
}

#[test]
fn ship_idle_does_not_move() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.advance(&settings, 1.0);
    assert_eq!(ship.x, 610.0);
}

#[test]
fn ship_stops_at_right_edge() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_right = true;
    ship.x = 1215.0;
    ship.advance(&settings, 1.0);
    assert_eq!(ship.x, 1220.0); // clamped to width - ship width
    ship.advance(&settings, 1.0);
    assert_eq!(ship.x, 1220.0);
}

#[test]
fn ship_stops_at_left_edge() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_left = true;
    ship.x = 5.0;
    ship.advance(&settings, 1.0);
    assert_eq!(ship.x, 0.0);
    ship.advance(&settings, 1.0);
    assert_eq!(ship.x, 0.0);
}

#[test]
fn ship_both_flags_cancel() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_left = true;
    ship.moving_right = true;
    ship.advance(&settings, 1.0);
    assert_eq!(ship.x, 610.0);
}

#[test]
fn ship_accumulates_sub_pixel_motion() {
    let settings = Settings {
        ship_speed: 0.5,
        ..Settings::default()
    };
    let mut ship = Ship::new(&settings);
    ship.moving_right = true;
    ship.advance(&settings, 1.0);
    assert_eq!(ship.rect().x, 610);
    ship.advance(&settings, 1.0);
    assert_eq!(ship.rect().x, 611);
}

#[test]
fn center_keeps_movement_flags() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_left = true;
    ship.x = 3.0;
    ship.center(&settings);
    assert_eq!(ship.x, 610.0);
    assert!(ship.moving_left);
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_fired_from_ship_nose() {
    let settings = Settings::default();
    let ship = Ship::new(&settings);
    let bullet = Bullet::fired_from(&ship, &settings);
    assert_eq!(bullet.rect(), Rect::new(639, 672, 3, 15));
}

#[test]
fn bullet_moves_straight_up() {
    let settings = Settings::default();
    let mut bullet = Bullet::fired_from(&Ship::new(&settings), &settings);
    bullet.advance(&settings, 2.0);
    assert_eq!(bullet.position(), (639.0, 632.0));
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[test]
fn alien_moves_with_fleet_direction() {
    let mut settings = Settings::default();
    let mut alien = Alien::new(100.0, 50.0, &settings);
    alien.advance(&settings, 1.0);
    assert_eq!(alien.x, 104.0);
    settings.fleet_direction = -1;
    alien.advance(&settings, 1.0);
    assert_eq!(alien.x, 100.0);
    assert_eq!(alien.y, 50.0);
}

#[test]
fn alien_edge_detection() {
    let settings = Settings::default();
    assert!(Alien::new(0.0, 50.0, &settings).at_edge(&settings));
    assert!(Alien::new(1240.0, 50.0, &settings).at_edge(&settings));
    assert!(!Alien::new(1.0, 50.0, &settings).at_edge(&settings));
    assert!(!Alien::new(1239.0, 50.0, &settings).at_edge(&settings));
}

#[test]
fn alien_sub_pixel_step_leaves_the_edge() {
    let settings = Settings::default();
    assert!(!Alien::new(0.5, 50.0, &settings).at_edge(&settings));
    assert!(!Alien::new(1239.5, 50.0, &settings).at_edge(&settings));
    assert!(Alien::new(-0.5, 50.0, &settings).at_edge(&settings));
    assert!(Alien::new(1240.5, 50.0, &settings).at_edge(&settings));
}

// ── GameStats ─────────────────────────────────────────────────────────────────

#[test]
fn stats_start_active_with_full_lives() {
    let stats = GameStats::new(&Settings::default());
    assert_eq!(stats, GameStats { ships_left: 3, game_active: true });
}

#[test]
fn stats_reset_restores_lives_only() {
    let settings = Settings {
        ship_limit: 5,
        ..Settings::default()
    };
    let mut stats = GameStats { ships_left: 0, game_active: false };
    stats.reset(&settings);
    assert_eq!(stats.ships_left, 5);
    assert!(!stats.game_active);
}

#[test]
fn sprites_work_through_trait_objects() {
    let settings = Settings::default();
    let ship = Ship::new(&settings);
    let sprites: Vec<Box<dyn Sprite>> = vec![
        Box::new(ship.clone()),
        Box::new(Bullet::fired_from(&ship, &settings)),
        Box::new(Alien::new(40.0, 40.0, &settings)),
    ];
    let tops: Vec<i32> = sprites.iter().map(|s| s.rect().top()).collect();
    assert_eq!(tops, vec![672, 672, 40]);
}
