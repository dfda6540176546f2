use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Home,
    End,
    Next,
    Prev,
    M,
    P,
    Q,
    R,
    X,
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
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::P),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            (KeyModifiers::NONE, KeyCode::Char('x')) => Some(Command::X),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Up, Some(Command::Up))]
    #[case(KeyCode::Char('w'), Some(Command::Up))]
    #[case(KeyCode::Down, Some(Command::Down))]
    #[case(KeyCode::Char('s'), Some(Command::Down))]
    #[case(KeyCode::Left, Some(Command::Left))]
    #[case(KeyCode::Char('a'), Some(Command::Left))]
    #[case(KeyCode::Right, Some(Command::Right))]
    #[case(KeyCode::Char('d'), Some(Command::Right))]
    #[case(KeyCode::Char('r'), Some(Command::R))]
    #[case(KeyCode::Char('x'), Some(Command::X))]
    #[case(KeyCode::Char('z'), None)]
    fn plain_keys(#[case] code: KeyCode, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(KeyEvent::from(code)), cmd);
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key_event(ev), Some(Command::Quit));
    }

    #[test]
    fn modified_letters_ignored() {
        let ev = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::ALT);
        assert_eq!(Command::from_key_event(ev), None);
    }
}
