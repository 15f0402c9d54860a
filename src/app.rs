//! App state and main loop: input handling, port refresh, and drawing.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::time::sleep;
use tracing::warn;

use crate::ports;
use crate::session::Session;
use crate::types::{ConnectionState, Sample};
use crate::ui;

/// The dashboard and the compact status line are two views over the same
/// session; nothing else differs between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Compact,
}

pub struct App {
    session: Session,
    ports: Vec<String>,
    selected: usize,
    view: View,
    should_quit: bool,

    last_ports_poll: Instant,
    ports_interval: Duration,

    // Snapshots copied from the session once per frame
    state: ConnectionState,
    latest: Option<Sample>,
}

impl App {
    pub fn new(baud: u32, preselect: Option<String>) -> Self {
        let ports = ports::list_ports();
        let selected = ports::reselect(preselect.as_deref(), &ports);
        Self {
            session: Session::new(baud),
            ports,
            selected,
            view: View::Dashboard,
            should_quit: false,
            last_ports_poll: Instant::now(),
            ports_interval: Duration::from_secs(5),
            state: ConnectionState::Disconnected,
            latest: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal).await;

        // The device must never be left streaming into a dead window.
        self.session.disconnect().await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    self.handle_key(k).await;
                }
            }
            if self.should_quit {
                break;
            }

            // Replace the port list wholesale every 5s while disconnected.
            if self.state == ConnectionState::Disconnected
                && self.last_ports_poll.elapsed() >= self.ports_interval
            {
                self.refresh_ports();
            }

            self.state = self.session.state().await;
            self.latest = self.session.latest().await;

            terminal.draw(|f| self.draw(f))?;

            // Tick rate
            sleep(Duration::from_millis(250)).await;
        }
        Ok(())
    }

    async fn handle_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') | KeyCode::Enter => self.connect_selected().await,
            KeyCode::Char('d') => self.session.disconnect().await,
            KeyCode::Char('m') => {
                self.view = match self.view {
                    View::Dashboard => View::Compact,
                    View::Compact => View::Dashboard,
                };
            }
            KeyCode::Char('r') => self.refresh_ports(),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.ports.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }

    async fn connect_selected(&mut self) {
        let Some(port) = self.ports.get(self.selected).cloned() else {
            return;
        };
        if let Err(err) = self.session.connect(&port).await {
            // Stay disconnected; the port may be gone or busy.
            warn!(%err, port, "connect failed");
        }
        self.state = self.session.state().await;
    }

    fn refresh_ports(&mut self) {
        let current = self.ports.get(self.selected).cloned();
        self.ports = ports::list_ports();
        self.selected = ports::reselect(current.as_deref(), &self.ports);
        self.last_ports_poll = Instant::now();
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        if self.view == View::Compact {
            ui::compact::draw(f, area, self.state, self.latest.as_ref());
            return;
        }

        // Root rows: header, three gauges, port selector
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // cpu
                Constraint::Length(3), // ram
                Constraint::Length(3), // gpu
                Constraint::Min(4),    // ports
            ])
            .split(area);

        ui::header::draw(f, rows[0], self.state, self.session.port());
        ui::cpu::draw(f, rows[1], self.latest.as_ref());
        ui::mem::draw(f, rows[2], self.latest.as_ref());
        ui::gpu::draw(f, rows[3], self.latest.as_ref());
        ui::ports::draw(
            f,
            rows[4],
            &self.ports,
            self.selected,
            self.state == ConnectionState::Connected,
        );
    }
}
