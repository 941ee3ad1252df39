/// Input decoding.
///
/// Drains pending terminal events without blocking and turns key presses
/// into discrete commands, one per press, in arrival order. Nothing is
/// buffered across frames: whatever the player cannot accept right now is
/// dropped by the simulation, not queued here.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::player::Command;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Input {
    Move(Command),
    Quit,
}

pub struct InputState {
    /// Directional commands decoded during the last `drain_events()`.
    pub commands: Vec<Command>,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            commands: Vec::with_capacity(8),
            quit: false,
        }
    }

    /// Read all available events. Call once per frame, before the tick.
    pub fn drain_events(&mut self) {
        self.commands.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                match decode_key(key) {
                    Some(Input::Move(cmd)) => self.commands.push(cmd),
                    Some(Input::Quit) => self.quit = true,
                    None => {}
                }
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Map one key event. Releases and unbound keys decode to nothing.
pub fn decode_key(key: KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Input::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Input::Move(Command::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Input::Move(Command::Down)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Input::Move(Command::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Input::Move(Command::Right)),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Input::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd() {
        assert_eq!(decode_key(press(KeyCode::Up)), Some(Input::Move(Command::Up)));
        assert_eq!(decode_key(press(KeyCode::Char('a'))), Some(Input::Move(Command::Left)));
        assert_eq!(decode_key(press(KeyCode::Char('S'))), Some(Input::Move(Command::Down)));
        assert_eq!(decode_key(press(KeyCode::Right)), Some(Input::Move(Command::Right)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(decode_key(press(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(decode_key(press(KeyCode::Char('q'))), Some(Input::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(decode_key(ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn unbound_and_released_keys_are_ignored() {
        assert_eq!(decode_key(press(KeyCode::Enter)), None);
        assert_eq!(decode_key(press(KeyCode::Char('x'))), None);
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(decode_key(ctrl_w), None);
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(decode_key(release), None);
    }
}
