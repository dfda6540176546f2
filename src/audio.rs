//! Sound cues for game events
use std::fmt;
use std::io::{self, Write};

/// The events that are accompanied by a sound
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    Start,
    Eat,
    GameOver,
}

/// Something that can make noise
pub(crate) trait CueSink: fmt::Debug {
    fn play(&mut self, cue: Cue);
}

/// A [`CueSink`] together with a mute switch
#[derive(Debug)]
pub(crate) struct Audio {
    sink: Box<dyn CueSink>,
    muted: bool,
}

impl Audio {
    pub(crate) fn new(sink: Box<dyn CueSink>, muted: bool) -> Audio {
        Audio { sink, muted }
    }

    /// Play `cue` unless muted
    pub(crate) fn cue(&mut self, cue: Cue) {
        if self.muted {
            tracing::trace!(?cue, "Muted; not playing cue");
        } else {
            self.sink.play(cue);
        }
    }

    pub(crate) fn muted(&self) -> bool {
        self.muted
    }

    pub(crate) fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute switch and return the new setting
    pub(crate) fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}

/// Rings the terminal bell once for every cue.  Terminals merge bells
/// written back to back, so no cue gets more than one.
#[derive(Debug)]
pub(crate) struct TerminalBell<W = io::Stdout> {
    out: W,
}

impl TerminalBell {
    pub(crate) fn stdout() -> TerminalBell {
        TerminalBell { out: io::stdout() }
    }
}

impl<W: Write + fmt::Debug> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        if let Err(e) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            tracing::debug!(?cue, error = %e, "Failed to ring terminal bell");
        }
    }
}

/// Plays nothing
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// A sink that records every cue it receives, for inspection by tests
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct Recorder(std::rc::Rc<std::cell::RefCell<Vec<Cue>>>);

#[cfg(test)]
impl Recorder {
    pub(crate) fn played(&self) -> Vec<Cue> {
        self.0.borrow().clone()
    }
}

#[cfg(test)]
impl CueSink for Recorder {
    fn play(&mut self, cue: Cue) {
        self.0.borrow_mut().push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_when_unmuted() {
        let rec = Recorder::default();
        let mut audio = Audio::new(Box::new(rec.clone()), false);
        audio.cue(Cue::Start);
        audio.cue(Cue::Eat);
        audio.cue(Cue::GameOver);
        assert_eq!(rec.played(), [Cue::Start, Cue::Eat, Cue::GameOver]);
    }

    #[test]
    fn mute_suppresses_cues() {
        let rec = Recorder::default();
        let mut audio = Audio::new(Box::new(rec.clone()), false);
        assert!(audio.toggle_mute());
        assert!(audio.muted());
        audio.cue(Cue::Eat);
        assert!(rec.played().is_empty());
        assert!(!audio.toggle_mute());
        audio.cue(Cue::Eat);
        assert_eq!(rec.played(), [Cue::Eat]);
    }

    #[test]
    fn bell_rings_once_per_cue() {
        let mut bell = TerminalBell { out: Vec::new() };
        bell.play(Cue::Start);
        assert_eq!(bell.out, b"\x07");
        bell.play(Cue::GameOver);
        assert_eq!(bell.out, b"\x07\x07");
        bell.play(Cue::Eat);
        assert_eq!(bell.out, b"\x07\x07\x07");
    }

    #[test]
    fn starts_muted() {
        let rec = Recorder::default();
        let mut audio = Audio::new(Box::new(rec.clone()), true);
        audio.cue(Cue::Start);
        assert!(rec.played().is_empty());
        audio.set_muted(false);
        audio.cue(Cue::Start);
        assert_eq!(rec.played(), [Cue::Start]);
    }
}
