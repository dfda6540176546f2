use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const WRAP_WIDTH: u16 = 16;
    const SNAKE_WIDTH: u16 = 20;
    const SNAKE_BODY_LENGTH: u16 = 12;
    const SNAKE_FOOD_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 3;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::WRAP_WIDTH + Self::SNAKE_WIDTH;

    const WRAP: [&'static str; Self::TEXT_HEIGHT as usize] = [
        "╻ ╻ ┏━┓ ┏━┓ ┏━┓ ",
        "┃╻┃ ┣┳┛ ┣━┫ ┣━┛ ",
        "┗┻┛ ╹┗╸ ╹ ╹ ╹   ",
    ];

    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
        "┏━┓ ┏┓╻ ┏━┓ ╻┏  ┏━╸ ",
        "┗━┓ ┃┗┫ ┣━┫ ┣┻┓ ┣╸  ",
        "┗━┛ ╹ ╹ ╹ ╹ ╹ ╹ ┗━╸ ",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [wrap_area, snake_area] = Layout::horizontal([Self::WRAP_WIDTH, Self::SNAKE_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::WRAP)
            .style(consts::FOOD_STYLE)
            .render(wrap_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_HEAD_STYLE)
            .render(snake_area, buf);
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FOOD_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        fill(buf, body_area, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_BODY_STYLE);
        fill(buf, head_area, consts::SNAKE_HEAD_SYMBOL, consts::SNAKE_HEAD_STYLE);
        fill(buf, food_area, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
    }
}

fn fill(buf: &mut Buffer, area: Rect, symbol: char, style: Style) {
    for p in area.positions() {
        if let Some(cell) = buf.cell_mut(p) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys_line("       ", ["←", "↓", "↑", "→"]),
            keys_line("   or: ", ["a", "s", "w", "d"]),
            keys_line("   or: ", ["h", "j", "k", "l"]),
            Line::from("Eat the food, but"),
            Line::from("don't bite yourself!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}

fn keys_line(lead: &'static str, keys: [&'static str; 4]) -> Line<'static> {
    let mut line = Line::from(lead);
    for (i, k) in keys.into_iter().enumerate() {
        if i > 0 {
            line.push_span(" ");
        }
        line.push_span(Span::styled(k, consts::KEY_STYLE));
    }
    line
}
