mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use side_shooter::platform::{Clock, MonotonicClock, TickInput};
use side_shooter::{Game, GameConfig};

use display::TerminalRenderer;

// ── Held-key detection ────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// many milliseconds.  Covers terminals that never report key releases: the
/// OS key-repeat rate is ≥ 15 Hz, so the window is refreshed before it lapses.
const HOLD_WINDOW_MS: u64 = 150;

const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

fn is_held(key_seen: &HashMap<KeyCode, u64>, keys: &[KeyCode], now: u64) -> bool {
    keys.iter().any(|key| {
        key_seen
            .get(key)
            .map(|&last| now.saturating_sub(last) <= HOLD_WINDOW_MS)
            .unwrap_or(false)
    })
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn log_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".side_shooter.log")
}

/// The terminal is in raw alternate-screen mode, so logs go to a file.
fn init_logging() {
    let Ok(file) = std::fs::File::create(log_path()) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Input is drained without blocking each
/// tick; the only wait is the fixed delay between ticks.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    let clock = MonotonicClock::new();
    let mut rng = thread_rng();
    let tick_delay = Duration::from_millis(game.config().tick_delay_ms);

    // Maps each held key → the time it was last seen (press or repeat).
    let mut key_seen: HashMap<KeyCode, u64> = HashMap::new();

    loop {
        let tick_start = Instant::now();
        let now = clock.now_millis();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            _ => {}
                        }
                        key_seen.insert(code, now);
                    }
                    // Keyboard-enhancement terminals report releases; drop the key at once.
                    KeyEventKind::Release => {
                        key_seen.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        let mut input = TickInput {
            up: is_held(&key_seen, &UP_KEYS, now),
            down: is_held(&key_seen, &DOWN_KEYS, now),
        };
        game.tick(&clock, &mut input, renderer, &mut rng)?;

        let elapsed = tick_start.elapsed();
        if elapsed < tick_delay {
            thread::sleep(tick_delay - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config() -> io::Result<GameConfig> {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
        None => Ok(GameConfig::default()),
    }
}

fn main() -> io::Result<()> {
    init_logging();
    let config = load_config()?;
    log::info!(
        "Starting on a {}x{} field",
        config.field.width,
        config.field.height
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = terminal::size().and_then(|(cols, rows)| {
        let mut renderer = TerminalRenderer::new(&mut out, &config.field, cols, rows);
        let mut game = Game::new(config.clone(), 0);
        game_loop(&mut renderer, &mut game, &rx)
    });
    if let Err(e) = &result {
        log::error!("Game loop failed: {}", e);
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
