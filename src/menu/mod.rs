mod settings;
mod widgets;
pub(crate) use self::settings::{SettingsMenu, SettingsOutcome, SettingsView};
use self::widgets::{Instructions, Title};
use crate::command::Command;
use crate::consts;
use crate::game::Records;
use crate::settings::next_unlock;
use crate::util::{format_time, EnumExt};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

/// The title screen, with buttons for playing, changing settings, and
/// quitting, plus the records set so far
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: MenuOpt,
    records: Records,
}

impl MainMenu {
    pub(crate) fn new(records: Records) -> MainMenu {
        MainMenu {
            selection: MenuOpt::default(),
            records,
        }
    }

    /// Handle a command.  Returns `Some` if the user chose a button.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<MenuOpt> {
        match cmd {
            Command::Enter => return Some(self.selection),
            Command::P => return Some(MenuOpt::Play),
            Command::O => return Some(MenuOpt::Settings),
            Command::Q | Command::Quit => return Some(MenuOpt::Quit),
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
            Command::Next => self.selection = self.selection.next().unwrap_or_else(MenuOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(MenuOpt::max),
            Command::Home => self.selection = MenuOpt::min(),
            Command::End => self.selection = MenuOpt::max(),
            _ => (),
        }
        None
    }

    fn records_lines(&self) -> [Line<'static>; 2] {
        let best = Line::from(format!(
            "High score: {}   Best time: {}",
            self.records.high_score,
            format_time(self.records.longest_survival)
        ));
        let unlock = match next_unlock(self.records.high_score) {
            Some(score) => Line::from(format!("Next color unlocks at {score} points")),
            None => Line::styled("All colors unlocked!", consts::RECORD_STYLE),
        };
        [best.centered(), unlock.centered()]
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, instructions_area, play_area, settings_area, quit_area, records_area] =
            Layout::vertical([Title::HEIGHT, Instructions::HEIGHT, 1, 1, 1, 2])
                .flex(Flex::Center)
                .spacing(1)
                .areas(area);

        let [title_area] = Layout::horizontal([Title::WIDTH])
            .flex(Flex::Center)
            .areas(title_area);
        Title.render(title_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        for (opt, button_area) in MenuOpt::iter().zip([play_area, settings_area, quit_area]) {
            opt.to_line(self.selection == opt).render(button_area, buf);
        }

        let [best_area, unlock_area] = Layout::vertical([1, 1]).areas(records_area);
        let [best, unlock] = self.records_lines();
        best.render(best_area, buf);
        unlock.render(unlock_area, buf);
    }
}

/// The buttons on the main menu
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(crate) enum MenuOpt {
    #[default]
    Play,
    Settings,
    Quit,
}

impl MenuOpt {
    fn to_line(self, selected: bool) -> Line<'static> {
        let (label, key) = match self {
            MenuOpt::Play => ("Play", "p"),
            MenuOpt::Settings => ("Settings", "o"),
            MenuOpt::Quit => ("Quit", "q"),
        };
        let style = if selected {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        Line::from_iter([
            Span::styled(format!("[{label} ("), style),
            Span::styled(key, consts::KEY_STYLE.patch(style)),
            Span::styled(")]", style),
        ])
        .centered()
    }
}
