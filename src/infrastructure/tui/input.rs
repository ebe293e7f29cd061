use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::domain::primitive::{InputEvent, ScanCode};
use crate::interface_adapter::controller::session_controller::AppAction;

/// Same key arriving again within this window counts as auto-repeat when the
/// terminal does not report event kinds. Auto-repeat pulses come every 30-40ms;
/// a fast double tap of one key is slower than this.
pub const REPEAT_WINDOW: Duration = Duration::from_millis(50);

/// Converts crossterm `KeyEvent`s into `AppAction`s.
///
/// Every key press yields a `KeyDown` carrying the key's scan code and a
/// repeat flag, followed by the text-level event it produces (character,
/// submit, cancel, backspace). Ctrl+C quits.
///
/// Repeat detection has two modes:
/// - the terminal reports press/repeat/release (kitty keyboard protocol):
///   `KeyEventKind::Repeat` is a repeat.
/// - otherwise every event arrives as a press, and the same key arriving
///   again within `REPEAT_WINDOW` is treated as a repeat.
pub struct InputHandler {
    reports_event_kinds: bool,
    last_press: Option<(KeyCode, Instant)>,
}

impl InputHandler {
    pub fn new(reports_event_kinds: bool) -> Self {
        Self {
            reports_event_kinds,
            last_press: None,
        }
    }

    /// Translate one key event received at `now`.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<AppAction> {
        if key.kind == KeyEventKind::Release {
            if matches!(self.last_press, Some((code, _)) if code == key.code) {
                self.last_press = None;
            }
            return Vec::new();
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return vec![AppAction::Quit];
        }

        let is_repeat = self.is_repeat(&key, now);
        self.last_press = Some((key.code, now));

        let mut actions = vec![AppAction::Input(InputEvent::KeyDown {
            scan_code: scan_code_for(key.code),
            is_repeat,
        })];
        if let Some(event) = text_event_for(&key) {
            actions.push(AppAction::Input(event));
        }
        actions
    }

    // =========================================================================
    // Private helpers
    // =========================================================================

    fn is_repeat(&self, key: &KeyEvent, now: Instant) -> bool {
        if self.reports_event_kinds {
            return key.kind == KeyEventKind::Repeat;
        }
        match self.last_press {
            Some((code, at)) => code == key.code && now.duration_since(at) < REPEAT_WINDOW,
            None => false,
        }
    }
}

/// The text-level event a key produces, if any.
fn text_event_for(key: &KeyEvent) -> Option<InputEvent> {
    match key.code {
        KeyCode::Char(_)
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            None
        }
        KeyCode::Char(c) => Some(InputEvent::Character(c)),
        KeyCode::Enter => Some(InputEvent::Submit),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Esc => Some(InputEvent::Cancel),
        _ => None,
    }
}

/// Map a key to the set-1 scan code numbering used by keyboard sound packs.
///
/// Characters map by their US-layout key position, so `a` and `A` (or `1` and
/// `!`) share a code. Unmapped keys yield `ScanCode::UNMAPPED`.
pub fn scan_code_for(code: KeyCode) -> ScanCode {
    let value = match code {
        KeyCode::Esc => 1,
        KeyCode::Backspace => 14,
        KeyCode::Tab | KeyCode::BackTab => 15,
        KeyCode::Enter => 28,
        KeyCode::CapsLock => 58,
        KeyCode::F(n @ 1..=10) => 58 + n as u32,
        KeyCode::F(11) => 87,
        KeyCode::F(12) => 88,
        KeyCode::NumLock => 69,
        KeyCode::ScrollLock => 70,
        KeyCode::Home => 3655,
        KeyCode::PageUp => 3657,
        KeyCode::End => 3663,
        KeyCode::PageDown => 3665,
        KeyCode::Insert => 3666,
        KeyCode::Delete => 3667,
        KeyCode::Up => 57416,
        KeyCode::Left => 57419,
        KeyCode::Right => 57421,
        KeyCode::Down => 57424,
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftControl => 29,
            ModifierKeyCode::LeftShift => 42,
            ModifierKeyCode::RightShift => 54,
            ModifierKeyCode::LeftAlt => 56,
            ModifierKeyCode::RightControl => 3613,
            ModifierKeyCode::RightAlt => 3640,
            _ => 0,
        },
        KeyCode::Char(c) => char_scan_code(c),
        _ => 0,
    };
    ScanCode::new(value)
}

fn char_scan_code(c: char) -> u32 {
    match c.to_ascii_lowercase() {
        '1' | '!' => 2,
        '2' | '@' => 3,
        '3' | '#' => 4,
        '4' | '$' => 5,
        '5' | '%' => 6,
        '6' | '^' => 7,
        '7' | '&' => 8,
        '8' | '*' => 9,
        '9' | '(' => 10,
        '0' | ')' => 11,
        '-' | '_' => 12,
        '=' | '+' => 13,
        'q' => 16,
        'w' => 17,
        'e' => 18,
        'r' => 19,
        't' => 20,
        'y' => 21,
        'u' => 22,
        'i' => 23,
        'o' => 24,
        'p' => 25,
        '[' | '{' => 26,
        ']' | '}' => 27,
        'a' => 30,
        's' => 31,
        'd' => 32,
        'f' => 33,
        'g' => 34,
        'h' => 35,
        'j' => 36,
        'k' => 37,
        'l' => 38,
        ';' | ':' => 39,
        '\'' | '"' => 40,
        '`' | '~' => 41,
        '\\' | '|' => 43,
        'z' => 44,
        'x' => 45,
        'c' => 46,
        'v' => 47,
        'b' => 48,
        'n' => 49,
        'm' => 50,
        ',' | '<' => 51,
        '.' | '>' => 52,
        '/' | '?' => 53,
        ' ' => 57,
        _ => 0,
    }
}

// =============================================================================
// Tests
// =============================================================================
