// Keyshortcut Terminal Intake
// Crossterm key events converted into dispatcher key events

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers, ModifierKeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use keyshortcut_core::{EventSource, KeyEvent, KeyEventKind, Modifiers};

/// Key value for a crossterm key code, using the host names the dispatcher expects
fn key_value(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::F(n) => return Some(format!("F{}", n)),
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Esc => "Escape",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::ScrollLock => "ScrollLock",
        KeyCode::NumLock => "NumLock",
        KeyCode::PrintScreen => "PrintScreen",
        KeyCode::Pause => "Pause",
        KeyCode::Menu => "ContextMenu",
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "Shift",
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "Control",
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "Alt",
            ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper
            | ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta => "Meta",
            _ => return None,
        },
        _ => return None,
    };
    Some(name.to_string())
}

/// Convert a crossterm key event; keys without a host name yield `None`
pub fn convert_key_event(event: event::KeyEvent) -> Option<KeyEvent> {
    let key = key_value(event.code)?;
    let modifiers = Modifiers {
        alt: event.modifiers.contains(KeyModifiers::ALT),
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        shift: event.modifiers.contains(KeyModifiers::SHIFT) || event.code == KeyCode::BackTab,
        meta: event.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    };
    let kind = match event.kind {
        event::KeyEventKind::Press => KeyEventKind::Press,
        event::KeyEventKind::Repeat => KeyEventKind::Repeat,
        event::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent::new(key, modifiers).with_kind(kind))
}

/// Terminal key events, until `running` is cleared
pub struct CrosstermSource {
    running: Arc<AtomicBool>,
    poll_interval: Duration,
}

impl CrosstermSource {
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self {
            running,
            poll_interval: Duration::from_millis(200),
        }
    }
}

impl EventSource for CrosstermSource {
    type Error = io::Error;

    fn next_event(&mut self) -> io::Result<Option<KeyEvent>> {
        while self.running.load(Ordering::SeqCst) {
            if !event::poll(self.poll_interval)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if let Some(converted) = convert_key_event(key) {
                return Ok(Some(converted));
            }
        }
        Ok(None)
    }
}

/// Raw mode for as long as the guard lives
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
