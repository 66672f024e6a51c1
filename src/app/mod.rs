use anyhow::Result;
use chrono::{Months, NaiveDate, Weekday};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datepick::{ConfigError, Intent, Outcome, Picker, Session, Step, GRID_CELLS};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::{
    config::AppConfig,
    theme::ThemeConfig,
    ui::{draw, long_date, short_date},
};

// ─── Panel focus model ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Fields,
    Picker,
    Help,
}

// ─── Date fields ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Birth,
    Subscription,
    Transaction,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::Birth, FieldKind::Subscription, FieldKind::Transaction];

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Birth        => "Birth Date",
            FieldKind::Subscription => "Subscription Date",
            FieldKind::Transaction  => "Transaction Date",
        }
    }

    /// Fixed palette for this field's picker; `None` follows the app theme.
    pub fn palette(self) -> Option<ThemeConfig> {
        match self {
            FieldKind::Birth        => Some(ThemeConfig::mahogany()),
            FieldKind::Subscription => Some(ThemeConfig::dark()),
            FieldKind::Transaction  => None,
        }
    }

    /// Value shown before the user has picked anything.
    pub fn initial(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            FieldKind::Birth => None,
            FieldKind::Subscription | FieldKind::Transaction => Some(today),
        }
    }

    /// Anchor, bounds and exclusions for this field, relative to `today`.
    pub fn picker(self, today: NaiveDate) -> Result<Picker, ConfigError> {
        let back  = |m: u32| today.checked_sub_months(Months::new(m)).unwrap_or(today);
        let ahead = |m: u32| today.checked_add_months(Months::new(m)).unwrap_or(today);

        let picker = match self {
            FieldKind::Birth => {
                let mut p = Picker::new(back(65 * 12));
                p.latest(back(21 * 12))?;
                p
            }
            FieldKind::Subscription => {
                let mut p = Picker::new(today);
                p.earliest(today)?.latest(ahead(12))?;
                p
            }
            FieldKind::Transaction => {
                let mut p = Picker::new(today);
                p.earliest(back(3))?
                    .latest(ahead(1))?
                    .exclude([Weekday::Sat, Weekday::Sun]);
                p
            }
        };
        Ok(picker)
    }
}

#[derive(Debug, Clone)]
pub struct DateField {
    pub kind:  FieldKind,
    pub value: Option<NaiveDate>,
}

/// The picker popup currently on screen.
pub struct PickerView {
    pub field:   usize,
    pub session: Session,
    pub focus:   usize,
    pub palette: ThemeConfig,
}

impl PickerView {
    fn refocus(&mut self) {
        let grid = self.session.grid();
        if grid.resolve(self.focus).is_none() {
            self.focus = grid.highlighted().or_else(|| grid.first_enabled()).unwrap_or(self.focus);
        }
    }
}

// ─── App state ────────────────────────────────────────────────────────────────

pub struct App {
    pub config:       AppConfig,
    pub theme:        ThemeConfig,
    pub theme_idx:    usize,
    pub today:        NaiveDate,
    pub fields:       Vec<DateField>,
    pub field_cursor: usize,
    pub picker:       Option<PickerView>,
    pub active_panel: Panel,
    pub status:       String,
    pub running:      bool,
}

impl App {
    pub fn new(config: AppConfig, theme: ThemeConfig, today: NaiveDate) -> Self {
        let all    = ThemeConfig::all_themes();
        let idx    = all.iter().position(|t| t.name == theme.name).unwrap_or(0);
        let fields = FieldKind::ALL.iter()
            .map(|&kind| DateField { kind, value: kind.initial(today) })
            .collect();

        Self {
            config, theme, theme_idx: idx, today, fields,
            field_cursor: 0,
            picker:       None,
            active_panel: Panel::Fields,
            status:       String::new(),
            running:      true,
        }
    }

    // ── TUI loop ──────────────────────────────────────────────────────────────

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend  = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;

        let result = self.event_loop(&mut term);

        disable_raw_mode()?;
        execute!(term.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        term.show_cursor()?;
        result
    }

    fn event_loop(&mut self, term: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick = std::time::Duration::from_millis(50);
        while self.running {
            term.draw(|f| draw(f, self))?;

            if event::poll(tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key)?;
                    }
                }
            }
        }
        tracing::info!("Leaving datepick");
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        let panel = self.active_panel.clone();
        match panel {
            Panel::Fields => self.key_fields(key)?,
            Panel::Picker => self.key_picker(key),
            Panel::Help   => self.active_panel = Panel::Fields,
        }
        Ok(())
    }

    fn key_fields(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.active_panel = Panel::Help,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.field_cursor = (self.field_cursor + 1) % self.fields.len();
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.field_cursor = (self.field_cursor + self.fields.len() - 1) % self.fields.len();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.open_picker()?,
            // T (Shift+T) — cycle through themes
            KeyCode::Char('T') => {
                let themes = ThemeConfig::all_themes();
                self.theme_idx = (self.theme_idx + 1) % themes.len();
                self.theme     = themes[self.theme_idx].clone();
                if let Err(e) = self.theme.save() {
                    tracing::warn!("saving theme failed: {e}");
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn key_picker(&mut self, key: KeyEvent) {
        let Some(view) = self.picker.as_mut() else {
            self.active_panel = Panel::Fields;
            return;
        };

        if let Some(focus) = move_focus(view.focus, key.code) {
            view.focus = focus;
            return;
        }
        let Some(intent) = picker_intent(key.code, view.focus) else { return };

        match view.session.apply(intent) {
            Outcome::Redraw  => view.refocus(),
            Outcome::Ignored => {}
            Outcome::Selected(date) => {
                let field = &mut self.fields[view.field];
                field.value = Some(date);
                self.status = format!("{}: {}", field.kind.label(), long_date(date));
                self.close_picker();
            }
            Outcome::Cancelled => {
                self.status = format!("{}: unchanged", self.fields[view.field].kind.label());
                self.close_picker();
            }
        }
    }

    fn open_picker(&mut self) -> Result<()> {
        let kind = self.fields[self.field_cursor].kind;
        let mut picker = kind.picker(self.today)?;
        self.config.apply(&mut picker)?;

        let session = picker.open();
        let grid    = session.grid();
        let focus   = grid.highlighted().or_else(|| grid.first_enabled()).unwrap_or(0);
        self.picker = Some(PickerView {
            field: self.field_cursor,
            session,
            focus,
            palette: kind.palette().unwrap_or_else(|| self.theme.clone()),
        });
        self.active_panel = Panel::Picker;
        Ok(())
    }

    fn close_picker(&mut self) {
        self.picker       = None;
        self.active_panel = Panel::Fields;
    }

    pub fn field_text(&self, field: &DateField) -> (String, String) {
        match field.value {
            Some(d) => (short_date(d), long_date(d)),
            None    => (String::new(), String::new()),
        }
    }
}

// ─── Key translation ──────────────────────────────────────────────────────────

/// Arrow / hjkl movement of the grid focus; `None` if `code` isn't a move.
pub fn move_focus(focus: usize, code: KeyCode) -> Option<usize> {
    let last = GRID_CELLS - 1;
    match code {
        KeyCode::Left  | KeyCode::Char('h') => Some(focus.saturating_sub(1)),
        KeyCode::Right | KeyCode::Char('l') => Some((focus + 1).min(last)),
        KeyCode::Up    | KeyCode::Char('k') => Some(focus.checked_sub(7).unwrap_or(focus)),
        KeyCode::Down  | KeyCode::Char('j') => Some(if focus + 7 <= last { focus + 7 } else { focus }),
        _ => None,
    }
}

pub fn picker_intent(code: KeyCode, focus: usize) -> Option<Intent> {
    match code {
        KeyCode::Char('{') => Some(Intent::Navigate(Step::PrevYear)),
        KeyCode::Char('[') => Some(Intent::Navigate(Step::PrevMonth)),
        KeyCode::Char(']') => Some(Intent::Navigate(Step::NextMonth)),
        KeyCode::Char('}') => Some(Intent::Navigate(Step::NextYear)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Select(focus)),
        KeyCode::Esc | KeyCode::Char('q') => Some(Intent::Cancel),
        _ => None,
    }
}
