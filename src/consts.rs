//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Side length of one grid cell in logical board units
pub(crate) const CELL_SIZE: u16 = 20;

/// Side length of the (square) board in logical units.  The board is
/// `BOARD_EXTENT / CELL_SIZE` cells wide and high.
pub(crate) const BOARD_EXTENT: u16 = 400;

/// Number of cells along each side of the board
pub(crate) const GRID_CELLS: u16 = BOARD_EXTENT / CELL_SIZE;

/// Number of terminal columns used to draw a single grid cell, so that cells
/// look roughly square
pub(crate) const CELL_COLUMNS: u16 = 2;

/// Where the snake's lone segment is placed at the start of a game
pub(crate) const SNAKE_START: Position = Position {
    x: 9 * CELL_SIZE,
    y: 10 * CELL_SIZE,
};

/// Tick period for [`Difficulty::Easy`][crate::options::Difficulty::Easy]
/// when not overridden by the configuration file
pub(crate) const EASY_TICK_PERIOD: Duration = Duration::from_millis(150);

/// Tick period for [`Difficulty::Normal`][crate::options::Difficulty::Normal]
/// when not overridden by the configuration file
pub(crate) const NORMAL_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Tick period for [`Difficulty::Hard`][crate::options::Difficulty::Hard]
/// when not overridden by the configuration file
pub(crate) const HARD_TICK_PERIOD: Duration = Duration::from_millis(70);

/// The game speeds up each time the score reaches a multiple of this
pub(crate) const SPEEDUP_EVERY: u32 = 5;

/// How much the tick period shrinks on each speed-up
pub(crate) const SPEEDUP_STEP: Duration = Duration::from_millis(5);

/// The tick period only shrinks while it is strictly greater than this
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(40);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: char = '█';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '▓';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '█';

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the snake's body
pub(crate) const SNAKE_BODY_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the food.  The bold modifier stands in for a glow.
pub(crate) const FOOD_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for one-line notices, such as a failure to save scores
pub(crate) const NOTICE_STYLE: Style = Style::new().fg(Color::LightRed);
