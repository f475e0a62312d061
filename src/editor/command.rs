use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    StartOfLine,
    EndOfLine,
}

impl TryFrom<KeyEvent> for Move {
    type Error = String;

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        match (event.code, event.modifiers) {
            (KeyCode::Up, KeyModifiers::NONE) => Ok(Self::Up),
            (KeyCode::Down, KeyModifiers::NONE) => Ok(Self::Down),
            (KeyCode::Left, KeyModifiers::NONE) => Ok(Self::Left),
            (KeyCode::Right, KeyModifiers::NONE) => Ok(Self::Right),
            (KeyCode::PageUp, KeyModifiers::NONE) => Ok(Self::PageUp),
            (KeyCode::PageDown, KeyModifiers::NONE) => Ok(Self::PageDown),
            (KeyCode::Home, KeyModifiers::NONE) => Ok(Self::StartOfLine),
            (KeyCode::End, KeyModifiers::NONE) => Ok(Self::EndOfLine),
            _ => Err(format!("Not a move command: {event:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    InsertNewline,
    Delete,
    DeleteBackward,
}

impl TryFrom<KeyEvent> for Edit {
    type Error = String;

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        match (event.code, event.modifiers) {
            (KeyCode::Char(character), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Ok(Self::Insert(character))
            }
            (KeyCode::Tab, KeyModifiers::NONE) => Ok(Self::Insert('\t')),
            (KeyCode::Enter, KeyModifiers::NONE) => Ok(Self::InsertNewline),
            (KeyCode::Backspace, KeyModifiers::NONE) => Ok(Self::DeleteBackward),
            (KeyCode::Delete, KeyModifiers::NONE) => Ok(Self::Delete),
            _ => Err(format!("Not an edit command: {event:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum System {
    Save,
    Quit,
    Resize(Size),
}

impl TryFrom<KeyEvent> for System {
    type Error = String;

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        match (event.code, event.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Ok(Self::Save),
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Ok(Self::Quit),
            _ => Err(format!("Not a system command: {event:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Edit(Edit),
    System(System),
}

// clippy::as_conversions: Will run into problems for rare edge case systems where usize < u16
#[allow(clippy::as_conversions)]
impl TryFrom<Event> for Command {
    type Error = String;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        match event {
            Event::Key(key_event) => System::try_from(key_event)
                .map(Command::System)
                .or_else(|_| Edit::try_from(key_event).map(Command::Edit))
                .or_else(|_| Move::try_from(key_event).map(Command::Move))
                .map_err(|_err| format!("Event not supported: {key_event:?}")),
            Event::Resize(width_u16, height_u16) => Ok(Self::System(System::Resize(Size {
                height: height_u16 as usize,
                width: width_u16 as usize,
            }))),
            _ => Err(format!("Event not supported: {event:?}")),
        }
    }
}

#[cfg(test)]
mod command_tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn printable_characters_decode_to_insert() {
        assert_eq!(
            Command::try_from(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Ok(Command::Edit(Edit::Insert('x')))
        );
        assert_eq!(
            Command::try_from(key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Ok(Command::Edit(Edit::Insert('X')))
        );
        assert_eq!(
            Command::try_from(key(KeyCode::Tab, KeyModifiers::NONE)),
            Ok(Command::Edit(Edit::Insert('\t')))
        );
    }

    #[test]
    fn control_keys_decode_to_system() {
        assert_eq!(
            Command::try_from(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Ok(Command::System(System::Quit))
        );
        assert_eq!(
            Command::try_from(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Ok(Command::System(System::Save))
        );
    }

    #[test]
    fn navigation_keys_decode_to_move() {
        assert_eq!(
            Command::try_from(key(KeyCode::Left, KeyModifiers::NONE)),
            Ok(Command::Move(Move::Left))
        );
        assert_eq!(
            Command::try_from(key(KeyCode::End, KeyModifiers::NONE)),
            Ok(Command::Move(Move::EndOfLine))
        );
    }

    #[test]
    fn resize_events_carry_the_new_size() {
        assert_eq!(
            Command::try_from(Event::Resize(80, 24)),
            Ok(Command::System(System::Resize(Size {
                width: 80,
                height: 24
            })))
        );
    }

    #[test]
    fn unsupported_keys_are_rejected() {
        assert!(Command::try_from(key(KeyCode::Char('x'), KeyModifiers::ALT)).is_err());
        assert!(Command::try_from(key(KeyCode::F(5), KeyModifiers::NONE)).is_err());
    }
}
