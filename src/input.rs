//! Key bindings: arrows and vim-style keys map onto engine commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use opentris::Command;

/// Map a key press to an engine command. `None` for unbound keys.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return None;
    }
    match code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('p' | 'P') => Some(Command::TogglePause),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::MoveRight),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Rotate),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SoftDrop),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::SoftDrop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_vim_keys() {
        assert_eq!(key_to_command(press(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(key_to_command(press(KeyCode::Char('l'))), Some(Command::MoveRight));
        assert_eq!(key_to_command(press(KeyCode::Up)), Some(Command::Rotate));
        assert_eq!(key_to_command(press(KeyCode::Char('j'))), Some(Command::SoftDrop));
    }

    #[test]
    fn control_keys() {
        assert_eq!(key_to_command(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(key_to_command(press(KeyCode::Char('p'))), Some(Command::TogglePause));
        assert_eq!(key_to_command(press(KeyCode::Char('R'))), Some(Command::Restart));
        assert_eq!(
            key_to_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(key_to_command(press(KeyCode::Char('x'))), None);
        assert_eq!(
            key_to_command(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT)),
            None
        );
    }
}
