use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A user input, decoded from a key press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Home,
    End,
    Next,
    Prev,
    M,
    O,
    P,
    Q,
    R,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            (KeyModifiers::NONE, KeyCode::Char('o')) => Some(Command::O),
            (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::P),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Up, Command::Up)]
    #[case(KeyCode::Char('w'), Command::Up)]
    #[case(KeyCode::Char('k'), Command::Up)]
    #[case(KeyCode::Down, Command::Down)]
    #[case(KeyCode::Char('s'), Command::Down)]
    #[case(KeyCode::Char('j'), Command::Down)]
    #[case(KeyCode::Left, Command::Left)]
    #[case(KeyCode::Char('a'), Command::Left)]
    #[case(KeyCode::Char('h'), Command::Left)]
    #[case(KeyCode::Right, Command::Right)]
    #[case(KeyCode::Char('d'), Command::Right)]
    #[case(KeyCode::Char('l'), Command::Right)]
    #[case(KeyCode::Esc, Command::Esc)]
    #[case(KeyCode::Char('p'), Command::P)]
    #[case(KeyCode::Char('r'), Command::R)]
    fn plain_keys(#[case] code: KeyCode, #[case] cmd: Command) {
        assert_eq!(
            Command::from_key_event(KeyEvent::new(code, KeyModifiers::NONE)),
            Some(cmd)
        );
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            Command::from_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn modified_letters_are_ignored() {
        assert_eq!(
            Command::from_key_event(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            Command::from_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }
}
