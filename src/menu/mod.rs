mod widgets;
use self::widgets::{Instructions, Logo};
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::{get_display_area, EnumExt};
use crossterm::event::Event;
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

/// The mode selector shown while no game is in progress
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
    options: OptionsMenu,

    /// Best score on record, as of the last call to `sync()`
    high: u32,

    /// Worst final score on record, as of the last call to `sync()`
    low: Option<u32>,
}

impl MainMenu {
    pub(crate) fn new(options: Options) -> Self {
        MainMenu {
            selection: Selection::default(),
            options: OptionsMenu::new(options),
            high: 0,
            low: None,
        }
    }

    /// Refresh the displayed scores and sound setting from `game`
    pub(crate) fn sync<R>(&mut self, game: &Game<R>) {
        self.high = game.scores().high();
        self.low = game.scores().low();
        self.options.settings[OptKey::Sound] = OptValue::Bool(!game.muted());
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Handle an input event.  Returns `Some` if the user chose to play or
    /// quit.
    pub(crate) fn handle_event(&mut self, event: Event) -> Option<MenuOutcome> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(MenuOutcome::Quit),
            (_, Command::Home) => self.select(Selection::PlayButton, None),
            (_, Command::End) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Enter | Command::Space) | (_, Command::P) => {
                return Some(MenuOutcome::Play(self.options.to_options()))
            }
            (Selection::PlayButton, Command::Up | Command::Prev) => {
                self.select(Selection::QuitButton, None);
            }
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.select(Selection::Options, Some(true));
            }
            (Selection::Options, Command::Up | Command::Prev) => {
                if let Some(sel) = self.options.move_up() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Down | Command::Next) => {
                if let Some(sel) = self.options.move_down() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Left) => self.options.move_left(),
            (Selection::Options, Command::Right) => self.options.move_right(),
            (Selection::Options, Command::Space | Command::Enter) => self.options.toggle(),
            (Selection::QuitButton, Command::Enter | Command::Space) | (_, Command::Q) => {
                return Some(MenuOutcome::Quit);
            }
            (Selection::QuitButton, Command::Down | Command::Next) => {
                self.select(Selection::PlayButton, None);
            }
            (Selection::QuitButton, Command::Up | Command::Prev) => {
                self.select(Selection::Options, Some(false));
            }
            (_, Command::X) => self.options.toggle_sound(),
            _ => (),
        }
        None
    }

    fn select(&mut self, selection: Selection, first_option: Option<bool>) {
        self.selection = selection;
        self.options.selection = match (selection, first_option) {
            (Selection::Options, Some(true)) => Some(OptKey::min()),
            (Selection::Options, Some(false)) => Some(OptKey::max()),
            _ => None,
        };
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, options_area, scores_area, quit_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                OptionsMenu::HEIGHT,
                1,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play (", "p", self.selection == Selection::PlayButton).render(play_area, buf);

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        let low = self
            .low
            .map_or_else(|| String::from("-"), |low| format!("{low}"));
        Line::from(format!("Best: {}   Worst: {low}", self.high))
            .centered()
            .render(scores_area, buf);

        button("Quit (", "q", self.selection == Selection::QuitButton).render(quit_area, buf);
    }
}

fn button(label: &'static str, key: &'static str, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled("[", style),
        Span::styled(label, style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
}

/// What the user chose on the main menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MenuOutcome {
    Play(Options),
    Quit,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Options,
    QuitButton,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// If the currently-selected main menu item is an element of this menu,
    /// then `selection` is `Some(key)`, where `key` is the key of the selected
    /// item within the `OptionsMenu`.
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> Self {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: None,
            settings,
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }

    fn move_up(&mut self) -> Option<Selection> {
        self.selection = self.selection?.prev();
        self.selection.is_none().then_some(Selection::PlayButton)
    }

    fn move_down(&mut self) -> Option<Selection> {
        self.selection = self.selection?.next();
        self.selection.is_none().then_some(Selection::QuitButton)
    }

    fn move_left(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].decrease();
        }
    }

    fn move_right(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].increase();
        }
    }

    fn toggle(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].toggle();
        }
    }

    fn toggle_sound(&mut self) {
        self.settings[OptKey::Sound].toggle();
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in OptKey::iter()
            .map(|key| (key, self.settings[key]))
            .zip(menu_area.rows())
        {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}
