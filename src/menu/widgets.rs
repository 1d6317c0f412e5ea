use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The game's name above a little picture of a snake chasing its food
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Title;

impl Title {
    pub(super) const HEIGHT: u16 = 3;
    pub(super) const WIDTH: u16 = 17;
}

impl Widget for Title {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snake_style = Style::new().fg(consts::DEFAULT_SNAKE_COLOR);
        Text::from_iter([
            Line::styled("G R I D S N A K E", consts::TITLE_STYLE),
            Line::default(),
            Line::from_iter([
                Span::raw("   "),
                Span::styled(consts::SNAKE_SYMBOL.repeat(3), snake_style),
                Span::raw("  "),
                Span::styled(consts::FOOD_SYMBOL, consts::FOOD_STYLE),
            ]),
        ])
        .render(area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 21;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let keys = |prefix: &'static str, ks: [&'static str; 4]| {
            let mut line = Line::from(prefix);
            for (i, k) in ks.into_iter().enumerate() {
                if i > 0 {
                    line.push_span(" ");
                }
                line.push_span(Span::styled(k, consts::KEY_STYLE));
            }
            line
        };
        let text = Text::from_iter([
            Line::from("Steer the snake with:"),
            keys("      ", ["←", "↓", "↑", "→"]),
            keys("  or: ", ["h", "j", "k", "l"]),
            keys("  or: ", ["a", "s", "w", "d"]),
            Line::from_iter([
                Span::raw("Pause with "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(" or "),
                Span::styled("p", consts::KEY_STYLE),
            ]),
            Line::from("Eat the food, but"),
            Line::from("don't hit anything!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
