use crate::consts;
use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

/// Choices made on the main menu before starting a game
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Options {
    pub(crate) difficulty: Difficulty,
    pub(crate) sound: bool,
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Difficulty => self.difficulty.into(),
            OptKey::Sound => self.sound.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Difficulty => {
                self.difficulty = value
                    .try_into()
                    .expect("Options::set(Difficulty, value) called with non-Difficulty value");
            }
            OptKey::Sound => {
                self.sound = value
                    .try_into()
                    .expect("Options::set(Sound, value) called with non-Bool value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        };
        f.pad(name)
    }
}

impl Adjustable for Difficulty {
    fn increase(&mut self) {
        if let Some(d) = self.next() {
            *self = d;
        }
    }

    fn decrease(&mut self) {
        if let Some(d) = self.prev() {
            *self = d;
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        *self != Self::max()
    }

    fn can_decrease(&self) -> bool {
        *self != Self::min()
    }
}

/// Starting tick period for each difficulty, in milliseconds
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Intervals {
    easy: NonZeroU64,
    normal: NonZeroU64,
    hard: NonZeroU64,
}

impl Intervals {
    pub(crate) fn get(&self, difficulty: Difficulty) -> Duration {
        let ms = match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        };
        Duration::from_millis(ms.get())
    }
}

impl Default for Intervals {
    fn default() -> Intervals {
        Intervals {
            easy: period_millis(consts::EASY_TICK_PERIOD),
            normal: period_millis(consts::NORMAL_TICK_PERIOD),
            hard: period_millis(consts::HARD_TICK_PERIOD),
        }
    }
}

fn period_millis(d: Duration) -> NonZeroU64 {
    u64::try_from(d.as_millis())
        .ok()
        .and_then(NonZeroU64::new)
        .unwrap_or(NonZeroU64::MIN)
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Difficulty,
    Sound,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Difficulty => "Difficulty",
            OptKey::Sound => "Sound",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    Difficulty,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(false) => write!(f, "   [ ]    "),
            OptValue::Bool(true) => write!(f, "   [✓]    "),
            OptValue::Difficulty(d) => {
                write!(
                    f,
                    "{left} {d:6} {right}",
                    left = if d.can_decrease() { '◀' } else { '◁' },
                    right = if d.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod opt_key {
        use super::*;

        #[test]
        fn display_width() {
            let actual_width = OptKey::iter()
                .map(|key| key.as_str().chars().count())
                .max()
                .unwrap();
            assert_eq!(actual_width, usize::from(OptKey::DISPLAY_WIDTH));
        }

        #[test]
        fn fmt_width() {
            assert_eq!(
                format!(
                    "{:width$}",
                    OptKey::Sound,
                    width = usize::from(OptKey::DISPLAY_WIDTH)
                ),
                "Sound     "
            );
        }
    }

    mod opt_value {
        use super::*;

        #[test]
        fn display_width() {
            let widths = [
                OptValue::Bool(false),
                OptValue::Bool(true),
                OptValue::Difficulty(Difficulty::Easy),
                OptValue::Difficulty(Difficulty::Normal),
                OptValue::Difficulty(Difficulty::Hard),
            ]
            .iter()
            .map(|value| value.to_string().chars().count())
            .collect::<Vec<_>>();
            assert!(
                widths
                    .iter()
                    .all(|&w| w == usize::from(OptValue::DISPLAY_WIDTH)),
                "{widths:?}"
            );
        }

        #[test]
        fn difficulty_arrows() {
            assert_eq!(
                OptValue::Difficulty(Difficulty::Easy).to_string(),
                "◁ Easy   ▶"
            );
            assert_eq!(
                OptValue::Difficulty(Difficulty::Hard).to_string(),
                "◀ Hard   ▷"
            );
        }
    }

    mod difficulty {
        use super::*;

        #[rstest]
        #[case(Difficulty::Easy, Difficulty::Normal, Difficulty::Easy)]
        #[case(Difficulty::Normal, Difficulty::Hard, Difficulty::Easy)]
        #[case(Difficulty::Hard, Difficulty::Hard, Difficulty::Normal)]
        fn adjust(#[case] d: Difficulty, #[case] up: Difficulty, #[case] down: Difficulty) {
            let mut d1 = d;
            d1.increase();
            assert_eq!(d1, up);
            let mut d2 = d;
            d2.decrease();
            assert_eq!(d2, down);
        }

        #[test]
        fn default_intervals() {
            let intervals = Intervals::default();
            assert_eq!(
                intervals.get(Difficulty::Easy),
                Duration::from_millis(150)
            );
            assert_eq!(
                intervals.get(Difficulty::Normal),
                Duration::from_millis(100)
            );
            assert_eq!(intervals.get(Difficulty::Hard), Duration::from_millis(70));
        }
    }

    #[test]
    fn roundtrip_through_keys() {
        let opts = Options {
            difficulty: Difficulty::Hard,
            sound: true,
        };
        let mut copy = Options::default();
        for key in OptKey::iter() {
            copy.set(key, opts.get(key));
        }
        assert_eq!(copy, opts);
    }
}
