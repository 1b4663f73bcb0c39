use crate::game::{self, BoardView, GameView};
use crate::menu::{MainMenu, MenuAction, MenuView};
use crate::session::{IntervalTicker, Session};
use crate::store::KeyValueStore;
use crossterm::event::{poll, read, Event};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub(crate) type TuiSession = Session<Box<dyn KeyValueStore>, IntervalTicker, BoardView>;

#[derive(Debug)]
pub(crate) struct App {
    session: TuiSession,
    screen: Screen,
}

impl App {
    pub(crate) fn new(session: TuiSession) -> App {
        App {
            session,
            screen: Screen::Menu(MainMenu::new("")),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Menu(ref menu) => {
                let view = MenuView::new(menu, self.session.standings());
                terminal.draw(|frame| frame.render_widget(view, frame.area()))?;
            }
            Screen::Game => {
                let view = GameView::new(&self.session);
                terminal.draw(|frame| frame.render_widget(view, frame.area()))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    /// Wait for either an input event or the next tick of a running game,
    /// whichever comes first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if let Some(wait) = self.session.until_next_tick() {
            if poll(wait)? {
                self.handle_event(read()?);
            }
            self.session.poll_tick();
        } else {
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let next = match self.screen {
            Screen::Menu(ref mut menu) => match menu.handle_event(event) {
                Some(MenuAction::Play(name)) => match self.session.start(&name) {
                    Ok(()) => Some(Screen::Game),
                    Err(e) => {
                        menu.reject(e);
                        None
                    }
                },
                Some(MenuAction::Quit) => Some(Screen::Quit),
                None => None,
            },
            Screen::Game => game::handle_event(&mut self.session, event),
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Screen {
    Menu(MainMenu),
    Game,
    Quit,
}
