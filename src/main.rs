mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use alien_invasion::game::{AlienInvasion, Key};
use alien_invasion::settings::Settings;

const TITLE: &str = "Alien Invasion";
const LOG_ENV: &str = "ALIEN_INVASION_LOG";

/// Terminals without key-release events only send repeated presses while a
/// key is held, so a movement key counts as released once it goes quiet.
/// Before the first repeat arrives the OS repeat delay applies (commonly
/// 250-600 ms); after that the gap is the repeat interval.
const FIRST_REPEAT_MILLIS: u64 = 600;
const REPEAT_GAP_MILLIS: u64 = 150;

// ── Runtime context ───────────────────────────────────────────────────────────

/// Owns the terminal for the lifetime of the game: raw mode, alternate
/// screen, hidden cursor and (when supported) key-release reporting.
/// Everything is restored on drop.
struct TerminalContext {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl TerminalContext {
    fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on a failed step still restores the terminal via Drop.
        let mut ctx = Self {
            out: BufWriter::new(stdout()),
            keyboard_enhanced: false,
        };
        ctx.out.execute(terminal::EnterAlternateScreen)?;
        ctx.out.execute(cursor::Hide)?;
        ctx.out.execute(terminal::SetTitle(TITLE))?;

        // Ghostty / kitty-protocol terminals report releases; others fall back
        // to the hold window.
        ctx.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && ctx
                .out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        log::debug!("keyboard enhancement: {}", ctx.keyboard_enhanced);

        Ok(ctx)
    }
}

impl Drop for TerminalContext {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(Key::Restart)
        }
        _ => None,
    }
}

/// A movement key believed to be down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HeldKey {
    /// Frame of the last press or repeat.
    last_seen: u64,
    /// True once a second press or repeat has arrived.
    repeating: bool,
}

/// Silence allowed before a held key is released, in frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HoldWindows {
    first: u64,
    repeat: u64,
}

impl HoldWindows {
    fn new(frame_millis: u64) -> Self {
        let frames = |millis: u64| millis.div_ceil(frame_millis.max(1));
        Self {
            first: frames(FIRST_REPEAT_MILLIS),
            repeat: frames(REPEAT_GAP_MILLIS),
        }
    }

    fn expired(&self, held: HeldKey, frame: u64) -> bool {
        let window = if held.repeating { self.repeat } else { self.first };
        frame.saturating_sub(held.last_seen) > window
    }
}

fn is_movement(key: Key) -> bool {
    matches!(key, Key::Left | Key::Right)
}

/// Record a press or repeat of a movement key.
fn note_held(held: &mut HashMap<Key, HeldKey>, key: Key, frame: u64) {
    held.entry(key)
        .and_modify(|h| {
            h.last_seen = frame;
            h.repeating = true;
        })
        .or_insert(HeldKey {
            last_seen: frame,
            repeating: false,
        });
}

/// Drain every pending terminal event without blocking.
fn poll_input(
    game: &mut AlienInvasion,
    held: &mut HashMap<Key, HeldKey>,
    frame: u64,
) -> Result<()> {
    while event::poll(Duration::ZERO)? {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event::read()?
        else {
            continue;
        };
        let Some(key) = map_key(code, modifiers) else {
            continue;
        };
        match kind {
            KeyEventKind::Press => {
                if is_movement(key) {
                    note_held(held, key, frame);
                }
                game.handle_key(key, true);
            }
            // Keep a held key down; no re-fire.
            KeyEventKind::Repeat => {
                if is_movement(key) {
                    note_held(held, key, frame);
                }
            }
            KeyEventKind::Release => {
                held.remove(&key);
                game.handle_key(key, false);
            }
        }
    }
    Ok(())
}

/// Release movement keys that have gone quiet (no key-release support).
fn expire_held_keys(
    game: &mut AlienInvasion,
    held: &mut HashMap<Key, HeldKey>,
    windows: HoldWindows,
    frame: u64,
) {
    for key in [Key::Left, Key::Right] {
        let expired = held.get(&key).is_some_and(|&h| windows.expired(h, frame));
        if expired {
            held.remove(&key);
            game.handle_key(key, false);
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop(ctx: &mut TerminalContext, game: &mut AlienInvasion) -> Result<()> {
    let frame_millis = game.state().settings.frame_millis;
    let frame_len = Duration::from_millis(frame_millis);
    let windows = HoldWindows::new(frame_millis);
    let mut held: HashMap<Key, HeldKey> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        poll_input(game, &mut held, frame)?;
        if game.should_quit() {
            log::info!("quit requested");
            return Ok(());
        }
        if !ctx.keyboard_enhanced {
            expire_held_keys(game, &mut held, windows, frame);
        }

        game.step();
        display::render(&mut ctx.out, game.state())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            std::thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log lines go to a file.
fn init_logging() -> Result<()> {
    let path = std::env::var(LOG_ENV).unwrap_or_else(|_| "alien_invasion.log".to_string());
    let file = File::create(&path).with_context(|| format!("failed to create log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let settings = Settings::load().context("failed to load settings")?;
    let mut game = AlienInvasion::new(settings);

    let mut ctx = TerminalContext::new()?;
    let result = game_loop(&mut ctx, &mut game);
    // Restore the terminal before any error is printed.
    drop(ctx);

    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_windows_at_default_frame_rate() {
        // 600 / 33 and 150 / 33, rounded up.
        assert_eq!(HoldWindows::new(33), HoldWindows { first: 19, repeat: 5 });
    }

    #[test]
    fn first_press_survives_the_repeat_delay() {
        let mut game = AlienInvasion::new(Settings::default());
        let mut held = HashMap::new();
        let windows = HoldWindows::new(33);

        note_held(&mut held, Key::Left, 1);
        game.handle_key(Key::Left, true);

        // Still inside the OS repeat delay.
        expire_held_keys(&mut game, &mut held, windows, 15);
        assert!(game.state().ship.moving_left);

        // First repeat arrives; from now on the short window applies.
        note_held(&mut held, Key::Left, 16);
        expire_held_keys(&mut game, &mut held, windows, 21);
        assert!(game.state().ship.moving_left);

        expire_held_keys(&mut game, &mut held, windows, 22);
        assert!(!game.state().ship.moving_left);
        assert!(held.is_empty());
    }

    #[test]
    fn lone_tap_is_released_after_the_first_window() {
        let mut game = AlienInvasion::new(Settings::default());
        let mut held = HashMap::new();
        let windows = HoldWindows::new(33);

        note_held(&mut held, Key::Right, 10);
        game.handle_key(Key::Right, true);
        expire_held_keys(&mut game, &mut held, windows, 29);
        assert!(game.state().ship.moving_right);
        expire_held_keys(&mut game, &mut held, windows, 30);
        assert!(!game.state().ship.moving_right);
    }

    #[test]
    fn quit_keys_map_to_quit() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(map_key(code, KeyModifiers::NONE), Some(Key::Quit));
        }
        assert_eq!(
            map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Key::Quit)
        );
        assert_eq!(map_key(KeyCode::Char('x'), KeyModifiers::NONE), None);
    }
}
