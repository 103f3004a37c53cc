use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};

use crate::api::CensistaLookup;
use crate::search::{SearchOutcome, SearchState};
use crate::tui::theme::Theme;

const SPINNER_INTERVAL: Duration = Duration::from_millis(150);
const CTRL_C_WINDOW: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Dni,
    Nombre,
    Button,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Dni => Focus::Nombre,
            Focus::Nombre => Focus::Button,
            Focus::Button => Focus::Dni,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Dni => Focus::Button,
            Focus::Nombre => Focus::Dni,
            Focus::Button => Focus::Nombre,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub struct ConsoleApp {
    pub search: SearchState,
    pub focus: Focus,
    pub theme: Theme,
    pub endpoint: String,
    pub mask_passwords: bool,
    pub spinner_state: usize,
    /// First visible row of result cards.
    pub scroll: usize,
    /// Card rows that fit on screen, as of the last draw.
    pub page_rows: usize,
    pub notice: Option<String>,
    lookup: Arc<dyn CensistaLookup>,
    inbox_tx: UnboundedSender<SearchOutcome>,
    inbox_rx: UnboundedReceiver<SearchOutcome>,
    last_ctrl_c_at: Option<Instant>,
    dirty: bool,
}

impl ConsoleApp {
    pub fn new(lookup: Arc<dyn CensistaLookup>, endpoint: impl Into<String>) -> Self {
        let (inbox_tx, inbox_rx) = unbounded_channel();
        Self {
            search: SearchState::new(),
            focus: Focus::default(),
            theme: Theme::dark(),
            endpoint: endpoint.into(),
            mask_passwords: false,
            spinner_state: 0,
            scroll: 0,
            page_rows: 1,
            notice: None,
            lookup,
            inbox_tx,
            inbox_rx,
            last_ctrl_c_at: None,
            dirty: true,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_masked_passwords(mut self, mask: bool) -> Self {
        self.mask_passwords = mask;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        struct TuiGuard;
        impl Drop for TuiGuard {
            fn drop(&mut self) {
                let mut stdout = io::stdout();
                let _ = execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show);
                let _ = terminal::disable_raw_mode();
            }
        }

        info!(endpoint = %self.endpoint, theme = %self.theme.name, "starting console");
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().context("enable raw mode")?;
        let _guard = TuiGuard;
        execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
        terminal.clear()?;
        self.event_loop(&mut terminal)
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut last_spinner_update = Instant::now();
        loop {
            if self.search.is_loading() && last_spinner_update.elapsed() >= SPINNER_INTERVAL {
                self.spinner_state = self.spinner_state.wrapping_add(1);
                last_spinner_update = Instant::now();
                self.dirty = true;
            }

            if self.drain_inbox() {
                self.dirty = true;
            }

            if self.dirty {
                terminal.draw(|f| self.view(f))?;
                self.dirty = false;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(k) => {
                        if self.handle_key(k) == KeyOutcome::Quit {
                            info!("console closed by user");
                            return Ok(());
                        }
                    }
                    Event::Resize(_, _) => self.dirty = true,
                    _ => {}
                }
            }
        }
    }

    /// Applies every outcome that has arrived. Returns true if the state changed.
    pub fn drain_inbox(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.inbox_rx.try_recv() {
            changed |= self.search.settle(outcome);
        }
        changed
    }

    /// Confirms the filters and, if they are active, starts the lookup on a task.
    pub fn submit(&mut self) {
        self.scroll = 0;
        self.spinner_state = 0;
        let Some(pending) = self.search.submit() else {
            debug!(filters = ?self.search.confirmed(), "filters empty, nothing to search");
            return;
        };
        let lookup = Arc::clone(&self.lookup);
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let outcome = pending.run(lookup.as_ref()).await;
            // A closed inbox means the console has already exited.
            let _ = tx.send(outcome);
        });
    }

    pub fn handle_key(&mut self, k: KeyEvent) -> KeyOutcome {
        if k.kind != KeyEventKind::Press {
            return KeyOutcome::Continue;
        }
        self.dirty = true;

        if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
            let now = Instant::now();
            if let Some(prev) = self.last_ctrl_c_at
                && now.duration_since(prev) <= CTRL_C_WINDOW
            {
                return KeyOutcome::Quit;
            }
            self.last_ctrl_c_at = Some(now);
            self.notice = Some("Presiona Ctrl+C otra vez en 3s para salir".to_string());
            return KeyOutcome::Continue;
        }
        self.notice = None;

        match k.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => self.submit(),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(self.page_rows.max(1)),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(self.page_rows.max(1)),
            KeyCode::Home => self.scroll = 0,
            // clamped on the next draw
            KeyCode::End => self.scroll = usize::MAX,
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input_mut() {
                    input.pop();
                }
            }
            KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(input) = self.focused_input_mut() {
                    input.clear();
                }
            }
            KeyCode::Char(c)
                if !k
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(input) = self.focused_input_mut() {
                    input.push(c);
                }
            }
            other => debug!(key = ?other, "unhandled key"),
        }
        KeyOutcome::Continue
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Dni => Some(&mut self.search.dni_input),
            Focus::Nombre => Some(&mut self.search.nombre_input),
            Focus::Button => None,
        }
    }
}
