use crate::game::{Game, GameOutcome};
use crate::menu::{MainMenu, MenuOutcome};
use crossterm::event::{poll, read};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Debug)]
pub(crate) struct App {
    game: Game,
    menu: MainMenu,
    quitting: bool,
}

impl App {
    pub(crate) fn new(game: Game, mut menu: MainMenu) -> App {
        menu.sync(&game);
        App {
            game,
            menu,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        if self.game.is_idle() {
            terminal.draw(|frame| self.menu.draw(frame))?;
        } else {
            terminal.draw(|frame| self.game.draw(frame))?;
        }
        Ok(())
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first, and act on it
    fn process_input(&mut self) -> io::Result<()> {
        if self.game.is_idle() {
            if let Some(outcome) = self.menu.handle_event(read()?) {
                self.handle_menu_outcome(outcome);
            }
            return Ok(());
        }
        match self.game.wait(Instant::now()) {
            Some(wait) if wait.is_zero() || !poll(wait)? => {
                if let Some(tick) = self.game.poll_tick(Instant::now()) {
                    let outcome = self.game.tick(tick);
                    tracing::trace!(?outcome, "Ticked");
                }
            }
            _ => {
                if let Some(outcome) = self.game.handle_event(read()?) {
                    self.handle_game_outcome(outcome);
                }
            }
        }
        Ok(())
    }

    fn handle_menu_outcome(&mut self, outcome: MenuOutcome) {
        match outcome {
            MenuOutcome::Play(options) => {
                self.game.set_muted(!options.sound);
                self.game.start(options.difficulty, Instant::now());
            }
            MenuOutcome::Quit => self.quitting = true,
        }
    }

    fn handle_game_outcome(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::MainMenu => self.menu.sync(&self.game),
            GameOutcome::Quit => self.quitting = true,
        }
    }
}
