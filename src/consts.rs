//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// How long the host waits for input on each frame
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Default playfield width & height, in cells
pub(crate) const DEFAULT_GRID_SIZE: u16 = 20;

/// Points per food before scaling by the snake's length
pub(crate) const DEFAULT_BASE_SCORE_PER_FOOD: u32 = 10;

/// Random cells to try when placing food before falling back to scanning
/// the whole grid for free cells
pub(crate) const FOOD_SPAWN_ATTEMPTS: usize = 64;

/// Color of the snake before any settings have been confirmed
pub(crate) const DEFAULT_SNAKE_COLOR: Color = Color::Rgb(255, 255, 255);

/// Time the rainbow effect takes to fade from one color to the next
pub(crate) const RAINBOW_STEP: Duration = Duration::from_millis(300);

/// Glyph for one grid cell of the snake; every cell is two columns wide
pub(crate) const SNAKE_SYMBOL: &str = "██";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "()";

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "><";

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the title in the menus
pub(crate) const TITLE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for "new record" notices on the game over screen
pub(crate) const RECORD_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
