use crate::consts;
use crate::leaderboard::LeaderboardEntry;
use crate::util::fit_width;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// A bordered, ranked list of leaderboard entries
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LeaderboardTable<'a> {
    entries: &'a [LeaderboardEntry],
}

impl<'a> LeaderboardTable<'a> {
    const RANK_WIDTH: u16 = 4;
    const NAME_WIDTH: u16 = 16;
    const SCORE_WIDTH: u16 = 5;
    pub(crate) const WIDTH: u16 = 2 /* for border */ + 2 /* for padding */ + Self::RANK_WIDTH + Self::NAME_WIDTH + 1 + Self::SCORE_WIDTH;
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const HEIGHT: u16 = (consts::LEADERBOARD_CAPACITY as u16) + 2 /* for border */;

    pub(crate) fn new(entries: &'a [LeaderboardEntry]) -> Self {
        LeaderboardTable { entries }
    }
}

impl Widget for LeaderboardTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" High Scores ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        if self.entries.is_empty() {
            Line::from("No scores yet.").render(inner, buf);
            return;
        }
        for ((i, entry), row) in self.entries.iter().enumerate().zip(inner.rows()) {
            Line::from_iter([
                Span::raw(format!("{:>2}. ", i + 1)),
                Span::raw(fit_width(&entry.name, usize::from(Self::NAME_WIDTH))),
                Span::raw(" "),
                Span::styled(
                    format!("{:>width$}", entry.score, width = usize::from(Self::SCORE_WIDTH)),
                    consts::SCORE_STYLE,
                ),
            ])
            .render(row, buf);
        }
    }
}
