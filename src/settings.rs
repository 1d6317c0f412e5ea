use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::style::Color;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// A setting that can be stepped up and down in the settings view
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Time between two moves of the snake
    pub(crate) fn tick_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(650),
            Difficulty::Normal => Duration::from_millis(350),
            Difficulty::Hard => Duration::from_millis(250),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
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

    fn can_increase(&self) -> bool {
        *self != Self::max()
    }

    fn can_decrease(&self) -> bool {
        *self != Self::min()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SnakeColor {
    Flat(Color),
    /// Cycle through the colors of the rainbow
    Rainbow,
}

/// A named entry in the list of snake colors
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ColorChoice {
    pub(crate) name: &'static str,
    pub(crate) color: SnakeColor,
}

/// A color that becomes selectable once the high score reaches `threshold`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ColorUnlock {
    threshold: u32,
    choice: ColorChoice,
}

/// Colors that are always available
static BASE_COLORS: &[ColorChoice] = &[
    ColorChoice {
        name: "White",
        color: SnakeColor::Flat(Color::Rgb(255, 255, 255)),
    },
    ColorChoice {
        name: "Green",
        color: SnakeColor::Flat(Color::Rgb(80, 220, 100)),
    },
    ColorChoice {
        name: "Cyan",
        color: SnakeColor::Flat(Color::Rgb(0, 200, 220)),
    },
];

/// Colors unlocked by high score, in unlock order
static COLOR_UNLOCKS: &[ColorUnlock] = &[
    ColorUnlock {
        threshold: 100,
        choice: ColorChoice {
            name: "Gold",
            color: SnakeColor::Flat(Color::Rgb(255, 200, 40)),
        },
    },
    ColorUnlock {
        threshold: 250,
        choice: ColorChoice {
            name: "Magenta",
            color: SnakeColor::Flat(Color::Rgb(230, 60, 200)),
        },
    },
    ColorUnlock {
        threshold: 500,
        choice: ColorChoice {
            name: "Rainbow",
            color: SnakeColor::Rainbow,
        },
    },
];

/// The list of currently selectable colors and which one is selected.
/// Stepping through the list wraps around at both ends.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ColorPicker {
    choices: Vec<ColorChoice>,
    selected: usize,
}

impl ColorPicker {
    pub(crate) fn new(high_score: u32) -> ColorPicker {
        ColorPicker {
            choices: unlocked_colors(high_score),
            selected: 0,
        }
    }

    pub(crate) fn selected(&self) -> ColorChoice {
        self.choices[self.selected]
    }

    #[cfg(test)]
    pub(crate) fn choices(&self) -> &[ColorChoice] {
        &self.choices
    }

    /// Rebuild the list for `high_score`, keeping the current selection if it
    /// is still unlocked
    pub(crate) fn refresh(&mut self, high_score: u32) {
        let current = self.selected();
        self.choices = unlocked_colors(high_score);
        self.selected = self
            .choices
            .iter()
            .position(|&c| c == current)
            .unwrap_or(0);
    }
}

impl Adjustable for ColorPicker {
    fn increase(&mut self) {
        self.selected = (self.selected + 1) % self.choices.len();
    }

    fn decrease(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.choices.len() - 1);
    }

    fn can_increase(&self) -> bool {
        self.choices.len() > 1
    }

    fn can_decrease(&self) -> bool {
        self.choices.len() > 1
    }
}

fn unlocked_colors(high_score: u32) -> Vec<ColorChoice> {
    BASE_COLORS
        .iter()
        .copied()
        .chain(
            COLOR_UNLOCKS
                .iter()
                .filter(|u| u.threshold <= high_score)
                .map(|u| u.choice),
        )
        .collect()
}

/// The score at which the next color unlocks, if any are still locked
pub(crate) fn next_unlock(high_score: u32) -> Option<u32> {
    COLOR_UNLOCKS
        .iter()
        .map(|u| u.threshold)
        .find(|&t| t > high_score)
}

/// Simulation parameters produced by confirming the settings
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SettingsChange {
    pub(crate) difficulty: Difficulty,
    pub(crate) tick_interval: Duration,
    pub(crate) color: SnakeColor,
}

/// Difficulty and color selection, plus the rainbow effect when that color
/// is in use
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    difficulty: Difficulty,
    colors: ColorPicker,
    /// Running color cycle; `Some` only after confirming the rainbow color
    rainbow: Option<Rainbow>,
}

impl Settings {
    pub(crate) fn new(difficulty: Difficulty, high_score: u32) -> Settings {
        Settings {
            difficulty,
            colors: ColorPicker::new(high_score),
            rainbow: None,
        }
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub(crate) fn colors(&self) -> &ColorPicker {
        &self.colors
    }

    pub(crate) fn increase_difficulty(&mut self) {
        self.difficulty.increase();
    }

    pub(crate) fn decrease_difficulty(&mut self) {
        self.difficulty.decrease();
    }

    pub(crate) fn next_color(&mut self) {
        self.colors.increase();
    }

    pub(crate) fn previous_color(&mut self) {
        self.colors.decrease();
    }

    pub(crate) fn refresh_unlocks(&mut self, high_score: u32) {
        self.colors.refresh(high_score);
    }

    #[cfg(test)]
    pub(crate) fn rainbow_active(&self) -> bool {
        self.rainbow.is_some()
    }

    /// Commit the current selection.  Selecting the rainbow color starts the
    /// color cycle (unless it's already running); any other color stops it.
    pub(crate) fn confirm(&mut self) -> SettingsChange {
        let choice = self.colors.selected();
        match choice.color {
            SnakeColor::Rainbow => {
                if self.rainbow.is_none() {
                    self.rainbow = Some(Rainbow::new());
                }
            }
            SnakeColor::Flat(_) => self.rainbow = None,
        }
        log::info!(
            "Settings confirmed: difficulty {}, color {}",
            self.difficulty,
            choice.name
        );
        SettingsChange {
            difficulty: self.difficulty,
            tick_interval: self.difficulty.tick_interval(),
            color: choice.color,
        }
    }

    /// Advance the rainbow effect by one frame.  Returns the color to paint
    /// the snake with, or `None` if the effect isn't active.
    pub(crate) fn update(&mut self, dt: Duration) -> Option<Color> {
        self.rainbow.as_mut().map(|r| r.advance(dt))
    }
}

const RAINBOW_PALETTE: [(u8, u8, u8); 6] = [
    (255, 0, 0),
    (255, 140, 0),
    (255, 230, 0),
    (0, 200, 60),
    (0, 120, 255),
    (150, 0, 220),
];

/// Continuous color cycle that fades linearly from each palette color to
/// the next over [`RAINBOW_STEP`][consts::RAINBOW_STEP]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Rainbow {
    /// Position within one full cycle
    phase: Duration,
}

impl Rainbow {
    pub(crate) fn new() -> Rainbow {
        Rainbow::default()
    }

    pub(crate) fn advance(&mut self, dt: Duration) -> Color {
        let cycle = consts::RAINBOW_STEP.as_nanos() * (RAINBOW_PALETTE.len() as u128);
        let phase = (self.phase.as_nanos() + dt.as_nanos()) % cycle;
        self.phase = Duration::from_nanos(u64::try_from(phase).unwrap_or_default());
        self.current()
    }

    pub(crate) fn current(&self) -> Color {
        let step = consts::RAINBOW_STEP.as_nanos();
        let phase = self.phase.as_nanos();
        let i = usize::try_from(phase / step).unwrap_or_default() % RAINBOW_PALETTE.len();
        let (r1, g1, b1) = RAINBOW_PALETTE[i];
        let (r2, g2, b2) = RAINBOW_PALETTE[(i + 1) % RAINBOW_PALETTE.len()];
        let within = phase % step;
        Color::Rgb(
            lerp(r1, r2, within, step),
            lerp(g1, g2, within, step),
            lerp(b1, b2, within, step),
        )
    }
}

fn lerp(a: u8, b: u8, num: u128, den: u128) -> u8 {
    let value = (u128::from(a) * (den - num) + u128::from(b) * num) / den;
    u8::try_from(value).unwrap_or(u8::MAX)
}
