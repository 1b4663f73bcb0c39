use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const SNAKE_BODY_LENGTH: u16 = 12;
    const SNAKE_FOOD_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = 28;

    #[rustfmt::skip]
    const TEXT: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        Text::from_iter(Self::TEXT)
            .style(consts::SNAKE_STYLE)
            .render(words_area, buf);
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FOOD_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        for (rect, symbol, style) in [
            (body_area, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE),
            (head_area, consts::SNAKE_HEAD_SYMBOL, consts::SNAKE_STYLE),
            (food_area, consts::FOOD_SYMBOL, consts::FOOD_STYLE),
        ] {
            for p in rect.positions() {
                if let Some(cell) = buf.cell_mut(p) {
                    cell.set_char(symbol);
                    cell.set_style(style);
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 20;
}

fn key_row(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
    let mut spans = vec![Span::raw(prefix)];
    for (i, k) in keys.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(k, consts::KEY_STYLE));
    }
    Line::from(spans)
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            key_row("       ", ["←", "↓", "↑", "→"]),
            key_row("   or: ", ["h", "j", "k", "l"]),
            key_row("   or: ", ["a", "s", "w", "d"]),
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

#[cfg(test)]
mod tests {
    use super::*;

    mod logo {
        use super::*;

        #[test]
        fn test_render() {
            let mut buffer = Buffer::empty(Rect::new(0, 0, 34, 9));
            Logo.render(Rect::new(3, 1, Logo::WIDTH, Logo::HEIGHT), &mut buffer);
            #[rustfmt::skip]
            let mut expected = Buffer::with_lines([
                 "",
                 "    ____              _           ",
                 "   / ___| _ __   __ _| | _____    ",
                r"   \___ \| '_ \ / _` | |/ / _ \   ",
                 "    ___) | | | | (_| |   <  __/   ",
                r"   |____/|_| |_|\__,_|_|\_\___|   ",
                 "",
                 "         ⚬⚬⚬⚬⚬⚬⚬⚬⚬⚬⚬⚬@  ●         ",
                 "",
            ]);
            expected.set_style(Rect::new(3, 1, 28, 5), consts::SNAKE_STYLE);
            expected.set_style(Rect::new(9, 7, 13, 1), consts::SNAKE_STYLE);
            expected.set_style(Rect::new(24, 7, 1, 1), consts::FOOD_STYLE);
            pretty_assertions::assert_eq!(buffer, expected);
        }

        #[test]
        fn text_width() {
            assert!(Logo::TEXT
                .iter()
                .all(|ln| ln.len() == usize::from(Logo::WIDTH)));
        }
    }

    mod instructions {
        use super::*;

        #[test]
        fn test_render() {
            let area = Rect::new(0, 0, Instructions::WIDTH, Instructions::HEIGHT);
            let mut buffer = Buffer::empty(area);
            Instructions.render(area, &mut buffer);
            let mut expected = Buffer::with_lines([
                "Move the snake with:",
                "       ← ↓ ↑ →      ",
                "   or: h j k l      ",
                "   or: a s w d      ",
                "Eat the food, but   ",
                "don't hit anything! ",
            ]);
            for y in 1..4 {
                for x in [7, 9, 11, 13] {
                    expected.set_style(Rect::new(x, y, 1, 1), consts::KEY_STYLE);
                }
            }
            pretty_assertions::assert_eq!(buffer, expected);
        }
    }
}
