use crate::command::Command;
use crate::consts;
use crate::settings::{Adjustable, Settings, SettingsChange, SnakeColor};
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// The settings screen: a difficulty row and a color row
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SettingsMenu {
    selection: SettingsRow,

    /// The settings as they were when the menu was opened, restored on cancel
    saved: Settings,
}

impl SettingsMenu {
    const HORIZONTAL_PADDING: u16 = 1;
    const POINTER_WIDTH: usize = 2;
    const LABEL_WIDTH: usize = 10;
    const VALUE_WIDTH: usize = 7;
    const HEIGHT: u16 = 4;
    const WIDTH: u16 = 29;

    /// Open the menu, first unlocking any colors that `high_score` has
    /// earned
    pub(crate) fn open(settings: &mut Settings, high_score: u32) -> SettingsMenu {
        settings.refresh_unlocks(high_score);
        SettingsMenu {
            selection: SettingsRow::default(),
            saved: settings.clone(),
        }
    }

    /// Handle a command, adjusting `settings` in place.  Returns `Some` once
    /// the user has confirmed or abandoned their changes.
    pub(crate) fn handle_command(
        &mut self,
        cmd: Command,
        settings: &mut Settings,
    ) -> Option<SettingsOutcome> {
        match (self.selection, cmd) {
            (_, Command::Enter) => return Some(SettingsOutcome::Confirmed(settings.confirm())),
            (_, Command::Esc) => {
                *settings = self.saved.clone();
                return Some(SettingsOutcome::Cancelled);
            }
            (_, Command::Quit) => return Some(SettingsOutcome::Quit),
            (_, Command::Up) => {
                if let Some(row) = self.selection.prev() {
                    self.selection = row;
                }
            }
            (_, Command::Down) => {
                if let Some(row) = self.selection.next() {
                    self.selection = row;
                }
            }
            (_, Command::Next) => {
                self.selection = self.selection.next().unwrap_or_else(SettingsRow::min);
            }
            (_, Command::Prev) => {
                self.selection = self.selection.prev().unwrap_or_else(SettingsRow::max);
            }
            (SettingsRow::Difficulty, Command::Left) => settings.decrease_difficulty(),
            (SettingsRow::Difficulty, Command::Right) => settings.increase_difficulty(),
            (SettingsRow::Color, Command::Left) => settings.previous_color(),
            (SettingsRow::Color, Command::Right) => settings.next_color(),
            _ => (),
        }
        None
    }
}

/// How the user left the settings menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SettingsOutcome {
    Confirmed(SettingsChange),
    Cancelled,
    Quit,
}

#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum SettingsRow {
    #[default]
    Difficulty,
    Color,
}

/// Widget for drawing a [`SettingsMenu`] along with the values it's editing
#[derive(Clone, Copy, Debug)]
pub(crate) struct SettingsView<'a> {
    pub(crate) menu: &'a SettingsMenu,
    pub(crate) settings: &'a Settings,
}

impl SettingsView<'_> {
    /// The height that should be used for the `Rect` passed to `render()`
    pub(crate) const HEIGHT: u16 = SettingsMenu::HEIGHT + 2;

    /// The width that should be used for the `Rect` passed to `render()`
    pub(crate) const WIDTH: u16 = SettingsMenu::WIDTH + 4;

    fn row_line(&self, row: SettingsRow) -> Line<'static> {
        let (label, value, value_style, can_dec, can_inc) = match row {
            SettingsRow::Difficulty => {
                let d = self.settings.difficulty();
                (
                    "Difficulty",
                    d.as_str(),
                    Style::new(),
                    d.can_decrease(),
                    d.can_increase(),
                )
            }
            SettingsRow::Color => {
                let colors = self.settings.colors();
                let choice = colors.selected();
                let style = match choice.color {
                    SnakeColor::Flat(c) => Style::new().fg(c),
                    SnakeColor::Rainbow => consts::RECORD_STYLE,
                };
                (
                    "Color",
                    choice.name,
                    style,
                    colors.can_decrease(),
                    colors.can_increase(),
                )
            }
        };
        let selected = self.menu.selection == row;
        let line = Line::from_iter([
            Span::raw(format!(
                "{pointer:pwidth$}{label:lwidth$}  {left} ",
                pointer = if selected { "»" } else { "" },
                pwidth = SettingsMenu::POINTER_WIDTH,
                lwidth = SettingsMenu::LABEL_WIDTH,
                left = if can_dec { '◀' } else { '◁' },
            )),
            Span::styled(
                format!("{value:vwidth$}", vwidth = SettingsMenu::VALUE_WIDTH),
                value_style,
            ),
            Span::raw(format!(" {}", if can_inc { '▶' } else { '▷' })),
        ]);
        if selected {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [block_area, _, hint_area] =
            Layout::vertical([SettingsMenu::HEIGHT, 1, 1]).areas(area);
        let [block_area] = Layout::horizontal([SettingsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(block_area);
        let block = Block::bordered()
            .title(" Settings: ")
            .padding(Padding::horizontal(SettingsMenu::HORIZONTAL_PADDING));
        let inner = block.inner(block_area);
        block.render(block_area, buf);
        for (row, row_area) in SettingsRow::iter().zip(inner.rows()) {
            self.row_line(row).render(row_area, buf);
        }
        Line::from_iter([
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(": Confirm   "),
            Span::styled("Esc", consts::KEY_STYLE),
            Span::raw(": Cancel"),
        ])
        .centered()
        .render(hint_area, buf);
    }
}
