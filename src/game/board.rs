use super::paused::PauseMenu;
use super::{DeathReason, Game, GameState, Grid, Position, Records};
use crate::consts;
use crate::events::{GameEvent, GameSummary};
use crate::store::KeyValueStore;
use crate::util::{center_rect, format_time};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::time::Duration;

/// What the score bar & game-over panel show, kept current solely from the
/// game's published events
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Hud {
    score: u32,
    time: Duration,
    paused: bool,
    summary: Option<GameSummary>,
}

impl Hud {
    pub(crate) fn new() -> Hud {
        Hud::default()
    }

    pub(crate) fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::TimeChanged(time) => self.time = time,
            GameEvent::PauseChanged(paused) => self.paused = paused,
            GameEvent::GameOver(summary) => self.summary = Some(summary),
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn time(&self) -> Duration {
        self.time
    }

    pub(crate) fn paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn summary(&self) -> Option<GameSummary> {
        self.summary
    }
}

/// The game screen: score bar, playfield, and either the pause menu or the
/// game-over panel when relevant
#[derive(Debug)]
pub(crate) struct Board<'a, S, R> {
    pub(crate) game: &'a Game<S, R>,
    pub(crate) hud: &'a Hud,
    pub(crate) pause_menu: &'a PauseMenu,
}

impl<S: KeyValueStore, R> Widget for Board<'_, S, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, block_area, msg1_area, msg2_area, msg3_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let mut status = format!(
            " Score: {}    Time: {}",
            self.hud.score(),
            format_time(self.hud.time())
        );
        if self.hud.paused() {
            status.push_str("    PAUSED");
        }
        Line::styled(status, consts::SCORE_BAR_STYLE).render(score_area, buf);

        let grid = self.game.snake().grid();
        let block_area = center_rect(block_area, board_size(grid));
        Block::bordered().render(block_area, buf);
        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            grid,
            buf,
        };
        let snake_style = Style::new().fg(self.game.snake().color());
        for pos in self.game.snake().segments().skip(1) {
            canvas.draw_cell(pos, consts::SNAKE_SYMBOL, snake_style);
        }
        if let Some(pos) = self.game.food() {
            canvas.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // The head goes last so a collision overwrites what it hit
        let head = self.game.snake().head();
        match self.game.death_reason() {
            Some(DeathReason::SelfCollision) => {
                canvas.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            }
            // The head is off the grid; mark the cell it left
            Some(DeathReason::Wall) => {
                let last = self.game.snake().direction().reverse().advance(head);
                canvas.draw_cell(last, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            }
            _ => canvas.draw_cell(head, consts::SNAKE_SYMBOL, snake_style),
        }

        match self.game.state() {
            GameState::Paused => {
                let popup = center_rect(area, Size::new(PauseMenu::WIDTH, PauseMenu::HEIGHT));
                self.pause_menu.render(popup, buf);
            }
            GameState::GameOver => {
                game_over_line(self.game.death_reason(), self.hud.summary()).render(msg1_area, buf);
                if let Some(summary) = self.hud.summary() {
                    final_stats_line(summary, self.game.records()).render(msg2_area, buf);
                }
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg3_area, buf);
            }
            GameState::Playing | GameState::MainMenu => (),
        }
    }
}

/// Size of the bordered playfield; each grid cell is two columns wide
fn board_size(grid: Grid) -> Size {
    Size::new(
        grid.width().saturating_mul(2).saturating_add(2),
        grid.height().saturating_add(2),
    )
}

fn game_over_line(reason: Option<DeathReason>, summary: Option<GameSummary>) -> Line<'static> {
    let why = match reason {
        Some(DeathReason::Wall) => "hit the wall",
        Some(DeathReason::SelfCollision) => "bit yourself",
        Some(DeathReason::BoardFull) => "board full!",
        None => "",
    };
    let mut line = Line::from(format!(" — GAME OVER: {why} —"));
    if let Some(summary) = summary {
        if summary.new_high_score {
            line.push_span(Span::styled(" New high score!", consts::RECORD_STYLE));
        }
        if summary.new_best_time {
            line.push_span(Span::styled(" New best time!", consts::RECORD_STYLE));
        }
    }
    line
}

fn final_stats_line(summary: GameSummary, records: Records) -> Line<'static> {
    Line::from(format!(
        " Final score: {} (best {})    Time: {} (best {})",
        summary.score,
        records.high_score,
        format_time(summary.survival_time),
        format_time(records.longest_survival),
    ))
}

/// Draws two-column grid cells into a buffer area, with the grid's y axis
/// pointing up
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    grid: Grid,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        if !self.grid.contains(pos) {
            return;
        }
        let (Ok(col), Ok(row)) = (
            u16::try_from(pos.x * 2),
            u16::try_from(i32::from(self.grid.height()) - 1 - pos.y),
        ) else {
            return;
        };
        let Some(x) = self.area.x.checked_add(col) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if x < self.area.right() && y < self.area.bottom() {
            self.buf
                .set_string(x, y, symbol, Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Color;
    use std::num::NonZeroU16;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn small_game() -> Game<JsonStore, ChaCha12Rng> {
        Game::new_with_rng(
            Grid::new(NonZeroU16::new(4).unwrap(), NonZeroU16::new(3).unwrap()),
            10,
            JsonStore::in_memory(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    #[test]
    fn hud_follows_events() {
        let mut hud = Hud::new();
        hud.apply(GameEvent::ScoreChanged(30));
        hud.apply(GameEvent::TimeChanged(Duration::from_secs(65)));
        hud.apply(GameEvent::PauseChanged(true));
        assert_eq!(hud.score(), 30);
        assert_eq!(format_time(hud.time()), "1:05");
        assert!(hud.paused());
        assert_eq!(hud.summary(), None);
        let summary = GameSummary {
            score: 30,
            survival_time: Duration::from_secs(65),
            new_high_score: true,
            new_best_time: false,
        };
        hud.apply(GameEvent::GameOver(summary));
        assert_eq!(hud.summary(), Some(summary));
    }

    #[test]
    fn render_board() {
        let mut game = small_game();
        game.start_game();
        game.food.place(Position::new(0, 2));
        let hud = Hud::new();
        let area = Rect::new(0, 0, 24, 9);
        let mut buffer = Buffer::empty(area);
        Board {
            game: &game,
            hud: &hud,
            pause_menu: &PauseMenu::new(),
        }
        .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 0    Time: 0:00",
            "       ┌────────┐       ",
            "       │()      │       ",
            "       │    ██  │       ",
            "       │        │       ",
            "       └────────┘       ",
            "",
            "",
            "",
        ]);
        expected.set_style(Rect::new(0, 0, 24, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(8, 2, 2, 1), Style::reset().patch(consts::FOOD_STYLE));
        expected.set_style(
            Rect::new(12, 3, 2, 1),
            Style::reset().fg(Color::Rgb(255, 255, 255)),
        );
        assert_eq!(buffer, expected);
    }

    #[test]
    fn game_over_panel() {
        assert_eq!(
            game_over_line(Some(DeathReason::Wall), None).to_string(),
            " — GAME OVER: hit the wall —"
        );
        let summary = GameSummary {
            score: 10,
            survival_time: Duration::from_secs(3),
            new_high_score: true,
            new_best_time: true,
        };
        assert_eq!(
            game_over_line(Some(DeathReason::BoardFull), Some(summary)).to_string(),
            " — GAME OVER: board full! — New high score! New best time!"
        );
    }

    #[test]
    fn final_stats_against_records() {
        let summary = GameSummary {
            score: 30,
            survival_time: Duration::from_secs(15),
            new_high_score: false,
            new_best_time: false,
        };
        let records = Records {
            high_score: 120,
            longest_survival: Duration::from_secs(95),
        };
        assert_eq!(
            final_stats_line(summary, records).to_string(),
            " Final score: 30 (best 120)    Time: 0:15 (best 1:35)"
        );
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_owned()))
            .collect()
    }

    #[test]
    fn wall_death_marks_last_cell() {
        let mut game = small_game();
        game.start_game();
        game.food.place(Position::new(0, 2));
        let (_, events) = game.subscribe();
        game.update(Duration::from_secs(5));
        assert_eq!(game.death_reason(), Some(DeathReason::Wall));
        assert_eq!(game.snake().head(), Position::new(4, 1));
        let mut hud = Hud::new();
        for ev in events.try_iter() {
            hud.apply(ev);
        }
        let area = Rect::new(0, 0, 60, 9);
        let mut buffer = Buffer::empty(area);
        Board {
            game: &game,
            hud: &hud,
            pause_menu: &PauseMenu::new(),
        }
        .render(area, &mut buffer);
        assert_eq!(row_text(&buffer, 3).trim(), "│      ><│");
        assert!(row_text(&buffer, 6).starts_with(" — GAME OVER: hit the wall —"));
        assert!(row_text(&buffer, 7)
            .starts_with(" Final score: 0 (best 0)    Time: 0:05 (best 0:05)"));
        assert!(row_text(&buffer, 8).starts_with(" Choose One: Restart (r)"));
    }
}
