mod direction;
mod gameover;
mod snake;
mod surface;
use self::direction::{Bounds, Direction};
use self::gameover::{GameOver, GameOverOpt};
use self::snake::Snake;
use self::surface::{Canvas, Fill, Surface};
use crate::audio::{Audio, Cue};
use crate::command::Command;
use crate::consts;
use crate::options::{Difficulty, Intervals};
use crate::scores::{SaveError, ScoreBook};
use crate::ticker::{Tick, Ticker};
use crate::util::{center_rect, error_chain, get_display_area};
use crossterm::event::Event;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect, Size},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::{Duration, Instant};

/// The game loop controller.  Owns the snake, the food, the score, the tick
/// schedule, and the ports through which scores are persisted and sounds are
/// played.
#[derive(Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    difficulty: Difficulty,
    intervals: Intervals,
    state: GameState,
    snake: Snake,
    food: Position,

    /// The direction the snake moved in on the last tick
    direction: Option<Direction>,

    /// A turn requested since the last tick, applied at the start of the next
    pending: Option<Direction>,
    score: u32,
    ticker: Ticker,
    scores: ScoreBook,
    audio: Audio,

    /// One-line message shown in place of the key hints, e.g., after a
    /// failure to save scores
    notice: Option<String>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(intervals: Intervals, scores: ScoreBook, audio: Audio) -> Self {
        Game::new_with_rng(intervals, scores, audio, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(
        intervals: Intervals,
        scores: ScoreBook,
        audio: Audio,
        mut rng: R,
    ) -> Game<R> {
        let food = Bounds::BOARD.random_cell(&mut rng);
        Game {
            rng,
            difficulty: Difficulty::default(),
            intervals,
            state: GameState::Idle,
            snake: Snake::new(consts::SNAKE_START),
            food,
            direction: None,
            pending: None,
            score: 0,
            ticker: Ticker::default(),
            scores,
            audio,
            notice: None,
        }
    }

    /// Begin a new round at the given difficulty, discarding any round in
    /// progress
    pub(crate) fn start(&mut self, difficulty: Difficulty, now: Instant) {
        self.difficulty = difficulty;
        self.reset_round();
        self.notice = None;
        let period = self.intervals.get(difficulty);
        self.ticker.start(period, now);
        self.state = GameState::Running;
        tracing::info!(%difficulty, ?period, "Starting game");
        self.audio.cue(Cue::Start);
    }

    /// Begin a new round at the current difficulty
    pub(crate) fn restart(&mut self, now: Instant) {
        self.start(self.difficulty, now);
    }

    /// Stop play and discard the current round
    pub(crate) fn go_home(&mut self) {
        self.ticker.stop();
        self.state = GameState::Idle;
        self.reset_round();
        tracing::debug!("Returning to main menu");
    }

    fn reset_round(&mut self) {
        self.snake = Snake::new(consts::SNAKE_START);
        self.direction = None;
        self.pending = None;
        self.score = 0;
        self.food = Bounds::BOARD.random_cell(&mut self.rng);
    }

    /// Advance the game by one tick, provided `tick` was issued by the
    /// current schedule
    pub(crate) fn tick(&mut self, tick: Tick) -> TickOutcome {
        if !self.ticker.is_current(tick) {
            tracing::trace!(?tick, "Ignoring stale tick");
            return TickOutcome::Stale;
        }
        self.step(tick.at())
    }

    fn step(&mut self, now: Instant) -> TickOutcome {
        if !self.running() {
            return TickOutcome::Idle;
        }
        if let Some(requested) = self.pending.take() {
            self.direction = Some(requested);
        }
        let Some(direction) = self.direction else {
            return TickOutcome::Waiting;
        };
        let head = direction.advance(self.snake.head(), Bounds::BOARD);
        if self.snake.body().contains(&head) {
            self.game_over();
            return TickOutcome::Crashed;
        }
        self.snake.push_head(head);
        if head == self.food {
            self.eat(now);
            TickOutcome::Ate
        } else {
            self.snake.pop_tail();
            TickOutcome::Moved
        }
    }

    fn eat(&mut self, now: Instant) {
        self.audio.cue(Cue::Eat);
        self.score += 1;
        self.food = Bounds::BOARD.random_cell(&mut self.rng);
        let period = self.ticker.period();
        if self.score % consts::SPEEDUP_EVERY == 0 && period > consts::MIN_TICK_PERIOD {
            let faster = period.saturating_sub(consts::SPEEDUP_STEP);
            tracing::debug!(score = self.score, ?faster, "Speeding up");
            self.ticker.start(faster, now);
        }
        if let Err(e) = self.scores.record_high(self.score) {
            self.report_save_error(&e);
        }
    }

    fn game_over(&mut self) {
        self.ticker.stop();
        self.audio.cue(Cue::GameOver);
        tracing::info!(score = self.score, length = self.snake.len(), "Game over");
        if let Err(e) = self.scores.record_final(self.score) {
            self.report_save_error(&e);
        }
        self.state = GameState::Over(GameOver::new(self.score));
    }

    /// Handle an input event.  Returns `Some` if control should leave the
    /// game screen.
    pub(crate) fn handle_event(&mut self, event: Event) -> Option<GameOutcome> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match self.state {
            GameState::Idle => None,
            GameState::Running => {
                match cmd {
                    Command::Quit | Command::Q => return Some(GameOutcome::Quit),
                    Command::Up => self.set_direction(Direction::Up),
                    Command::Down => self.set_direction(Direction::Down),
                    Command::Left => self.set_direction(Direction::Left),
                    Command::Right => self.set_direction(Direction::Right),
                    Command::R => self.restart(Instant::now()),
                    Command::M => {
                        self.go_home();
                        return Some(GameOutcome::MainMenu);
                    }
                    Command::X => {
                        let muted = self.audio.toggle_mute();
                        tracing::debug!(muted, "Toggled sound");
                    }
                    _ => (),
                }
                None
            }
            GameState::Over(ref mut popup) => match popup.handle_command(cmd)? {
                GameOverOpt::Restart => {
                    self.restart(Instant::now());
                    None
                }
                GameOverOpt::MainMenu => {
                    self.go_home();
                    Some(GameOutcome::MainMenu)
                }
                GameOverOpt::Quit => Some(GameOutcome::Quit),
            },
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Turn the snake on the next tick, unless `requested` would reverse
    /// the direction it last moved in.  A later request before that tick
    /// replaces an earlier one.  Requests made while no round is running are
    /// ignored.
    pub(crate) fn set_direction(&mut self, requested: Direction) {
        if self.running() && self.direction.is_none_or(|d| d.reverse() != requested) {
            self.pending = Some(requested);
        }
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.state == GameState::Idle
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    /// How long until the next tick is due, or `None` if no round is running
    pub(crate) fn wait(&self, now: Instant) -> Option<Duration> {
        self.ticker.wait(now)
    }

    /// Fire the ticker if a tick is due at `now`
    pub(crate) fn poll_tick(&mut self, now: Instant) -> Option<Tick> {
        self.ticker.fire(now)
    }

    pub(crate) fn scores(&self) -> &ScoreBook {
        &self.scores
    }

    pub(crate) fn muted(&self) -> bool {
        self.audio.muted()
    }

    pub(crate) fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    fn report_save_error(&mut self, e: &SaveError) {
        let msg = error_chain(e);
        tracing::warn!(error = %msg, "Could not save scores");
        self.notice = Some(msg);
    }

    /// Draw the snake & food on `surface`, head first
    fn draw_board<S: Surface>(&self, surface: &mut S) {
        let cell = consts::CELL_SIZE;
        surface.clear();
        for (i, Position { x, y }) in self.snake.segments().enumerate() {
            let fill = if i == 0 { Fill::Head } else { Fill::Body };
            surface.fill_rect(x, y, cell, cell, fill);
        }
        surface.fill_rect(self.food.x, self.food.y, cell, cell, Fill::Food);
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {}   High: {}   Sound: {}",
                self.score,
                self.scores.high(),
                if self.audio.muted() { "Off" } else { "On" }
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_size = Size {
            width: (consts::GRID_CELLS * consts::CELL_COLUMNS).saturating_add(2),
            height: consts::GRID_CELLS.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        let block = Block::bordered();
        let inner = block.inner(block_area);
        block.render(block_area, buf);
        self.draw_board(&mut Canvas {
            area: inner,
            buf,
            cell: consts::CELL_SIZE,
        });

        if let GameState::Over(popup) = self.state {
            let popup_area = center_rect(
                display,
                Size {
                    width: GameOver::WIDTH,
                    height: GameOver::HEIGHT,
                },
            );
            popup.render(popup_area, buf);
        }

        if let Some(ref notice) = self.notice {
            Line::styled(format!(" {notice}"), consts::NOTICE_STYLE).render(hint_area, buf);
        } else {
            Line::from_iter([
                Span::raw(" Arrows/WASD: move   Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(")   Menu ("),
                Span::styled("m", consts::KEY_STYLE),
                Span::raw(")   Sound ("),
                Span::styled("x", consts::KEY_STYLE),
                Span::raw(")   Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(hint_area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    /// No round in progress; the main menu is showing
    Idle,
    Running,
    /// The snake bit itself.  Nothing moves until a new round is started.
    Over(GameOver),
}

/// What happened on a call to [`Game::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The tick came from a schedule that has since been replaced or stopped
    Stale,
    /// No round is running
    Idle,
    /// No direction has been chosen yet, so the snake stayed put
    Waiting,
    Moved,
    Ate,
    Crashed,
}

/// Ways of leaving the game screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameOutcome {
    MainMenu,
    Quit,
}
