use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for the pop-up shown once the snake has bitten itself
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    /// The final score of the game that just ended
    score: u32,

    /// The currently-selected item in the pop-up menu
    selection: GameOverOpt,
}

impl GameOver {
    /// The height that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) const HEIGHT: u16 = 6;

    /// The width that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) const WIDTH: u16 = 21;

    pub(super) fn new(score: u32) -> GameOver {
        GameOver {
            score,
            selection: GameOverOpt::min(),
        }
    }

    /// Handle a command.  Returns `Some` if the user made a choice.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<GameOverOpt> {
        match cmd {
            Command::R => return Some(GameOverOpt::Restart),
            Command::M => return Some(GameOverOpt::MainMenu),
            Command::Q | Command::Quit => return Some(GameOverOpt::Quit),
            Command::Enter | Command::Space => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => {
                self.selection = self.selection.next().unwrap_or_else(GameOverOpt::min);
            }
            Command::Prev => {
                self.selection = self.selection.prev().unwrap_or_else(GameOverOpt::max);
            }
            Command::Home => self.selection = GameOverOpt::min(),
            Command::End => self.selection = GameOverOpt::max(),
            _ => (),
        }
        None
    }
}

/// The choices in the game-over pop-up
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum GameOverOpt {
    /// Start a new game at the same difficulty
    Restart,

    /// Return to the main menu
    MainMenu,

    /// Quit the application
    Quit,
}

impl GameOverOpt {
    /// Render the option as a `Line` for display in the pop-up.  If
    /// `selected` is `true`, this option is the currently-selected one.
    fn to_line(self, selected: bool) -> Line<'static> {
        let mut line = Line::default();
        if selected {
            line.push_span("» ");
        } else {
            line.push_span("  ");
        }
        let (label, key) = match self {
            GameOverOpt::Restart => ("Restart (", "r"),
            GameOverOpt::MainMenu => ("Main Menu (", "m"),
            GameOverOpt::Quit => ("Quit (", "q"),
        };
        line.push_span(label);
        line.push_span(Span::styled(key, consts::KEY_STYLE));
        line.push_span(")");
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

impl Widget for GameOver {
    /*
     * ┌──── GAME OVER ────┐
     * │ Final score: 7    │
     * │ » Restart (r)     │
     * │   Main Menu (m)   │
     * │   Quit (q)        │
     * └───────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Line::from(format!("Final score: {}", self.score)).render(row, buf);
        }
        for (opt, row) in GameOverOpt::iter().zip(rows) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_initial() {
        let area = Rect::new(0, 0, GameOver::WIDTH, GameOver::HEIGHT);
        let mut buffer = Buffer::empty(area);
        GameOver::new(7).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌──── GAME OVER ────┐",
            "│ Final score: 7    │",
            "│ » Restart (r)     │",
            "│   Main Menu (m)   │",
            "│   Quit (q)        │",
            "└───────────────────┘",
        ]);
        expected.set_style(Rect::new(13, 2, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(2, 2, 17, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(15, 3, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(10, 4, 1, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn navigate_and_choose() {
        let mut popup = GameOver::new(0);
        assert_eq!(popup.handle_command(Command::Down), None);
        assert_eq!(popup.selection, GameOverOpt::MainMenu);
        assert_eq!(popup.handle_command(Command::Down), None);
        assert_eq!(popup.handle_command(Command::Down), None);
        assert_eq!(popup.selection, GameOverOpt::Quit);
        assert_eq!(popup.handle_command(Command::Next), None);
        assert_eq!(popup.selection, GameOverOpt::Restart);
        assert_eq!(popup.handle_command(Command::Prev), None);
        assert_eq!(popup.selection, GameOverOpt::Quit);
        assert_eq!(popup.handle_command(Command::Up), None);
        assert_eq!(
            popup.handle_command(Command::Enter),
            Some(GameOverOpt::MainMenu)
        );
    }

    #[test]
    fn shortcut_keys() {
        let mut popup = GameOver::new(3);
        assert_eq!(popup.handle_command(Command::R), Some(GameOverOpt::Restart));
        assert_eq!(popup.handle_command(Command::M), Some(GameOverOpt::MainMenu));
        assert_eq!(popup.handle_command(Command::Q), Some(GameOverOpt::Quit));
        assert_eq!(popup.handle_command(Command::Left), None);
    }
}
