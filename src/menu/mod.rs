mod widgets;
use self::widgets::{Instructions, Logo};
use crate::command::Command;
use crate::consts;
use crate::leaderboard::LeaderboardEntry;
use crate::session::ValidationError;
use crate::util::{fit_width, get_display_area};
use crate::widgets::LeaderboardTable;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_segmentation::UnicodeSegmentation;

/// What the player asked for from the main menu
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum MenuAction {
    /// Start a game under the given (not yet validated) name
    Play(String),
    Quit,
}

/// The main menu: name entry, instructions, and the leaderboard
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    name: String,
    selection: Selection,
    /// Why the last attempt to start a game was refused
    problem: Option<ValidationError>,
}

impl MainMenu {
    pub(crate) fn new(name: &str) -> Self {
        MainMenu {
            name: name.to_owned(),
            selection: Selection::default(),
            problem: None,
        }
    }

    pub(crate) fn handle_event(&mut self, event: Event) -> Option<MenuAction> {
        let ev = event.as_key_press_event()?;
        if self.selection == Selection::NameField && self.edit_name(ev) {
            return None;
        }
        match (self.selection, Command::from_key_event(ev)?) {
            (_, Command::Quit) => return Some(MenuAction::Quit),
            (_, Command::Home) => self.selection = Selection::NameField,
            (_, Command::End) => self.selection = Selection::QuitButton,
            (Selection::NameField | Selection::PlayButton, Command::Enter)
            | (Selection::PlayButton | Selection::QuitButton, Command::P) => {
                return Some(MenuAction::Play(self.name.clone()));
            }
            (Selection::QuitButton, Command::Enter)
            | (Selection::PlayButton | Selection::QuitButton, Command::Q) => {
                return Some(MenuAction::Quit);
            }
            (_, Command::Down | Command::Next) => self.selection = self.selection.next(),
            (_, Command::Up | Command::Prev) => self.selection = self.selection.prev(),
            _ => (),
        }
        None
    }

    /// Show why the name was not accepted
    pub(crate) fn reject(&mut self, problem: ValidationError) {
        self.problem = Some(problem);
        self.selection = Selection::NameField;
    }

    /// Apply a key press to the name field.  Returns `true` if the key was
    /// consumed.
    fn edit_name(&mut self, ev: KeyEvent) -> bool {
        match ev.code {
            KeyCode::Char(c)
                if ev.modifiers.difference(KeyModifiers::SHIFT).is_empty() && !c.is_control() =>
            {
                if self.name.graphemes(true).count() < consts::MAX_NAME_LEN {
                    self.name.push(c);
                }
                self.problem = None;
                true
            }
            KeyCode::Backspace => {
                if let Some((i, _)) = self.name.grapheme_indices(true).next_back() {
                    self.name.truncate(i);
                }
                self.problem = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    NameField,
    PlayButton,
    QuitButton,
}

impl Selection {
    fn next(self) -> Selection {
        match self {
            Selection::NameField => Selection::PlayButton,
            Selection::PlayButton => Selection::QuitButton,
            Selection::QuitButton => Selection::NameField,
        }
    }

    fn prev(self) -> Selection {
        match self {
            Selection::NameField => Selection::QuitButton,
            Selection::PlayButton => Selection::NameField,
            Selection::QuitButton => Selection::PlayButton,
        }
    }

    fn style(self, current: Selection) -> Style {
        if self == current {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        }
    }
}

/// The main menu screen, drawn alongside the current standings
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MenuView<'a> {
    menu: &'a MainMenu,
    standings: &'a [LeaderboardEntry],
}

impl<'a> MenuView<'a> {
    const FORM_WIDTH: u16 = 40;

    pub(crate) fn new(menu: &'a MainMenu, standings: &'a [LeaderboardEntry]) -> Self {
        MenuView { menu, standings }
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, body_area] =
            Layout::vertical([Constraint::Length(Logo::HEIGHT), Constraint::Fill(1)])
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [form_area, table_area] =
            Layout::horizontal([MenuView::FORM_WIDTH, LeaderboardTable::WIDTH])
                .flex(Flex::Center)
                .spacing(2)
                .areas(body_area);
        let [table_area] = Layout::vertical([LeaderboardTable::HEIGHT])
            .flex(Flex::Start)
            .areas(table_area);
        LeaderboardTable::new(self.standings).render(table_area, buf);

        let [instructions_area, name_area, problem_area, play_area, quit_area] =
            Layout::vertical([Instructions::HEIGHT, 1, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(form_area);
        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        let sel = self.menu.selection;
        Line::from_iter([
            Span::raw("Name: ["),
            Span::styled(
                fit_width(&self.menu.name, consts::MAX_NAME_LEN),
                Selection::NameField.style(sel),
            ),
            Span::raw("]"),
        ])
        .centered()
        .render(name_area, buf);

        if let Some(problem) = self.menu.problem {
            Line::styled(problem.to_string(), consts::ERROR_STYLE)
                .centered()
                .render(problem_area, buf);
        }

        for (button, label, key, rect) in [
            (Selection::PlayButton, "Play", "p", play_area),
            (Selection::QuitButton, "Quit", "q", quit_area),
        ] {
            let style = button.style(sel);
            Line::from_iter([
                Span::styled(format!("[{label} ("), style),
                Span::styled(key, consts::KEY_STYLE.patch(style)),
                Span::styled(")]", style),
            ])
            .centered()
            .render(rect, buf);
        }
    }
}
