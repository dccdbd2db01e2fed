use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::direction::Direction::*;
use crate::game::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(InputEvent),
    Quit,
}

pub fn map_key(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let input = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => InputEvent::Move(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => InputEvent::Move(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => InputEvent::Move(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => InputEvent::Move(Right),
        KeyCode::Enter | KeyCode::Char(' ') => InputEvent::Click,
        KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
        _ => return None,
    };

    Some(Command::Input(input))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_wasd() {
        let pairs = [
            (KeyCode::Up, Up),
            (KeyCode::Down, Down),
            (KeyCode::Left, Left),
            (KeyCode::Right, Right),
            (KeyCode::Char('w'), Up),
            (KeyCode::Char('s'), Down),
            (KeyCode::Char('a'), Left),
            (KeyCode::Char('d'), Right),
        ];

        for (code, dir) in pairs.iter() {
            assert_eq!(map_key(&key(*code)), Some(Command::Input(InputEvent::Move(*dir))));
        }
    }

    #[test]
    fn test_click() {
        assert_eq!(map_key(&key(KeyCode::Enter)), Some(Command::Input(InputEvent::Click)));
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(Command::Input(InputEvent::Click)));
    }

    #[test]
    fn test_quit() {
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(map_key(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(map_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&key(KeyCode::Tab)), None);
    }
}
