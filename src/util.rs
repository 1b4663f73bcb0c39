use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};
use unicode_width::UnicodeWidthChar;

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [inner] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [inner] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(inner);
    inner
}

/// Truncate `s` to at most `width` terminal columns and pad it with spaces
/// to exactly `width` columns
pub(crate) fn fit_width(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Render an error and all of its sources as a single `": "`-separated
/// string
pub(crate) trait ErrorChain {
    fn source_chain(&self) -> String;
}

impl<E: std::error::Error + ?Sized> ErrorChain for E {
    fn source_chain(&self) -> String {
        let mut s = self.to_string();
        let mut source = self.source();
        while let Some(e) = source {
            s.push_str(": ");
            s.push_str(&e.to_string());
            source = e.source();
        }
        s
    }
}
