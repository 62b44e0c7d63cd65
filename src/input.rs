//! Keyboard input with DAS (Delayed Auto Shift) and ARR (Auto Repeat Rate)
//!
//! Uses a polling-based approach that doesn't rely on key release events,
//! which are unreliable on Linux terminals.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_block_game::game::{DownResult, Game};
use rust_block_game::settings::Settings;
use std::time::{Duration, Instant};

/// Time after which we consider a key "released" if no repeat received
const KEY_TIMEOUT: Duration = Duration::from_millis(100);

/// Input actions the frontend forwards to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    RotateCcw,
    Restart,
    Quit,
}

impl Action {
    /// Forward the action to the controller. Returns false for `Quit`.
    pub fn apply(self, game: &mut Game) -> bool {
        match self {
            Action::MoveLeft => {
                game.move_left();
            }
            Action::MoveRight => {
                game.move_right();
            }
            Action::MoveDown => {
                if let DownResult::Locked { lines_cleared } = game.move_down() {
                    if lines_cleared > 0 {
                        tracing::info!("Cleared {} line(s)", lines_cleared);
                    }
                }
            }
            Action::Rotate => {
                game.rotate();
            }
            Action::RotateCcw => {
                game.rotate_ccw();
            }
            Action::Restart => {
                game.reset();
                game.spawn_test_mino();
            }
            Action::Quit => return false,
        }
        true
    }
}

/// Input handler with DAS/ARR support
pub struct InputHandler {
    /// Last press time for movement keys (for DAS)
    left_state: Option<KeyPressState>,
    right_state: Option<KeyPressState>,
    down_state: Option<KeyPressState>,
    bindings: KeyBindings,
    das: Duration,
    arr: Duration,
}

#[derive(Debug, Clone)]
struct KeyPressState {
    first_press: Instant,
    last_seen: Instant,
    das_triggered: bool,
    last_arr: Option<Instant>,
}

impl KeyPressState {
    fn new(now: Instant) -> Self {
        Self {
            first_press: now,
            last_seen: now,
            das_triggered: false,
            last_arr: None,
        }
    }
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub move_down: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub rotate_ccw: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let key = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let key = Self::parse_key(s);
                if key.is_none() {
                    tracing::warn!("Unknown key name in settings: {:?}", s);
                }
                key
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            move_down: Self::parse_keys(&settings.keys.move_down),
            rotate: Self::parse_keys(&settings.keys.rotate),
            rotate_ccw: Self::parse_keys(&settings.keys.rotate_ccw),
            restart: Self::parse_keys(&settings.keys.restart),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            left_state: None,
            right_state: None,
            down_state: None,
            bindings: KeyBindings::from_settings(settings),
            das: Duration::from_millis(settings.gameplay.das_ms),
            arr: Duration::from_millis(settings.gameplay.arr_ms),
        }
    }

    /// Handle a key press event - returns immediate actions
    pub fn key_down(&mut self, key: KeyEvent) -> Vec<Action> {
        self.key_down_at(key, Instant::now())
    }

    fn key_down_at(&mut self, key: KeyEvent, now: Instant) -> Vec<Action> {
        let mut actions = Vec::new();

        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            actions.push(Action::Quit);
            return actions;
        }

        let code = normalize_key(key.code);

        // Movement keys fire once, then repeat through `update`
        if self.bindings.move_left.contains(&code) {
            if let Some(state) = &mut self.left_state {
                state.last_seen = now;
            } else {
                actions.push(Action::MoveLeft);
                self.left_state = Some(KeyPressState::new(now));
            }
            // Cancel opposite direction
            self.right_state = None;
        } else if self.bindings.move_right.contains(&code) {
            if let Some(state) = &mut self.right_state {
                state.last_seen = now;
            } else {
                actions.push(Action::MoveRight);
                self.right_state = Some(KeyPressState::new(now));
            }
            self.left_state = None;
        } else if self.bindings.move_down.contains(&code) {
            if let Some(state) = &mut self.down_state {
                state.last_seen = now;
            } else {
                actions.push(Action::MoveDown);
                self.down_state = Some(KeyPressState::new(now));
            }
        } else if self.bindings.rotate.contains(&code) {
            actions.push(Action::Rotate);
        } else if self.bindings.rotate_ccw.contains(&code) {
            actions.push(Action::RotateCcw);
        } else if self.bindings.restart.contains(&code) {
            self.clear();
            actions.push(Action::Restart);
        } else if self.bindings.quit.contains(&code) {
            actions.push(Action::Quit);
        }

        actions
    }

    /// Handle a key release event (may not be called on Linux)
    pub fn key_up(&mut self, key: KeyEvent) {
        let code = normalize_key(key.code);

        if self.bindings.move_left.contains(&code) {
            self.left_state = None;
        } else if self.bindings.move_right.contains(&code) {
            self.right_state = None;
        } else if self.bindings.move_down.contains(&code) {
            self.down_state = None;
        }
    }

    /// Update held keys and return repeat actions (call every frame)
    pub fn update(&mut self) -> Vec<Action> {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> Vec<Action> {
        let mut actions = Vec::new();
        let (das, arr) = (self.das, self.arr);

        for (slot, action) in [
            (&mut self.left_state, Action::MoveLeft),
            (&mut self.right_state, Action::MoveRight),
            (&mut self.down_state, Action::MoveDown),
        ] {
            // No recent key event = released
            if slot
                .as_ref()
                .is_some_and(|state| now.duration_since(state.last_seen) > KEY_TIMEOUT)
            {
                *slot = None;
            }
            if let Some(state) = slot {
                if process_das_arr(state, now, das, arr) {
                    actions.push(action);
                }
            }
        }

        actions
    }

    /// Clear all held keys
    pub fn clear(&mut self) {
        self.left_state = None;
        self.right_state = None;
        self.down_state = None;
    }
}

/// Process DAS/ARR logic for a key state, returns true if should trigger action
fn process_das_arr(state: &mut KeyPressState, now: Instant, das: Duration, arr: Duration) -> bool {
    let held_duration = now.duration_since(state.first_press);

    if held_duration >= das {
        if !state.das_triggered {
            // First trigger after DAS
            state.das_triggered = true;
            state.last_arr = Some(now);
            return true;
        } else if let Some(last) = state.last_arr {
            // Subsequent ARR triggers
            if now.duration_since(last) >= arr {
                state.last_arr = Some(now);
                return true;
            }
        }
    }

    false
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn handler() -> InputHandler {
        InputHandler::from_settings(&Settings::default())
    }

    #[test]
    fn test_arrow_keys_map_to_controller_calls() {
        let mut input = handler();
        assert_eq!(input.key_down(press(KeyCode::Left)), vec![Action::MoveLeft]);
        assert_eq!(input.key_down(press(KeyCode::Right)), vec![Action::MoveRight]);
        assert_eq!(input.key_down(press(KeyCode::Down)), vec![Action::MoveDown]);
        assert_eq!(input.key_down(press(KeyCode::Up)), vec![Action::Rotate]);
        assert_eq!(input.key_down(press(KeyCode::Char('Z'))), vec![Action::RotateCcw]);
        assert!(input.key_down(press(KeyCode::Char('m'))).is_empty());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut input = handler();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), vec![Action::Quit]);
    }

    #[test]
    fn test_held_key_repeats_after_das() {
        let mut input = handler();
        let start = Instant::now();
        assert_eq!(input.key_down_at(press(KeyCode::Left), start), vec![Action::MoveLeft]);

        // Terminal key repeat keeps the key alive
        let mut t = start;
        let mut repeats = 0;
        while t < start + Duration::from_millis(300) {
            t += Duration::from_millis(30);
            assert!(input.key_down_at(press(KeyCode::Left), t).is_empty());
            repeats += input.update_at(t).len();
        }
        assert!(repeats >= 2, "expected DAS then ARR repeats, got {}", repeats);
    }

    #[test]
    fn test_key_times_out_without_repeat() {
        let mut input = handler();
        let start = Instant::now();
        input.key_down_at(press(KeyCode::Right), start);
        assert!(input.update_at(start + Duration::from_millis(500)).is_empty());
        // Pressing again fires immediately, the old state is gone
        assert_eq!(
            input.key_down_at(press(KeyCode::Right), start + Duration::from_millis(510)),
            vec![Action::MoveRight]
        );
    }

    #[test]
    fn test_unknown_key_names_are_skipped() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["PageUp".to_string(), "w".to_string()];
        let bindings = KeyBindings::from_settings(&settings);
        assert_eq!(bindings.rotate, vec![KeyCode::Char('w')]);
    }

    #[test]
    fn test_apply_drives_game() {
        let mut game = Game::default();
        game.spawn_test_mino();
        assert!(Action::MoveDown.apply(&mut game));
        assert_eq!(game.active_piece().map(|p| p.row), Some(1));
        assert!(Action::Restart.apply(&mut game));
        assert_eq!(game.active_piece().map(|p| p.row), Some(0));
        assert!(!Action::Quit.apply(&mut game));
    }
}
