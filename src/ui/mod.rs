use chrono::NaiveDate;
use datepick::{GridCell, Session, Step};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Panel, PickerView};
use crate::theme::ThemeConfig;

/// Width of one day cell, in columns.
const CELL_W: usize = 5;
const PICKER_W: u16 = (CELL_W * 7) as u16 + 2;
const PICKER_H: u16 = 14;

// ─── Date formatting ──────────────────────────────────────────────────────────

/// `2/15/24`
pub fn short_date(d: NaiveDate) -> String {
    d.format("%-m/%-d/%y").to_string()
}

/// `The date selected is Thursday, February 15, 2024.`
pub fn long_date(d: NaiveDate) -> String {
    format!("The date selected is {}.", d.format("%A, %B %-d, %Y"))
}

// ─── Root draw ────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // Fill background
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg()).fg(app.theme.fg())),
        area,
    );

    // Layout: [ content | status_bar(1) ]
    let root = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)]).split(area);

    draw_fields(f, app, root[0]);
    draw_statusbar(f, app, root[1]);

    // Overlays
    match app.active_panel {
        Panel::Picker => {
            if let Some(view) = &app.picker {
                draw_picker(f, area, app, view);
            }
        }
        Panel::Help   => draw_help(f, area, app),
        Panel::Fields => {}
    }
}

// ─── Date fields form ─────────────────────────────────────────────────────────

fn draw_fields(f: &mut Frame, app: &App, area: Rect) {
    let t       = &app.theme;
    let focused = app.active_panel == Panel::Fields;
    let bs      = Style::default().fg(if focused { t.border_active() } else { t.border() });
    let title   = Line::from(Span::styled(
        " Date Fields ",
        Style::default().fg(t.accent()).add_modifier(Modifier::BOLD),
    ));

    let block = Block::default()
        .title(Title::from(title))
        .borders(Borders::ALL)
        .border_type(t.border_type())
        .border_style(bs)
        .style(Style::default().bg(t.bg()));

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, field) in app.fields.iter().enumerate() {
        let sel           = i == app.field_cursor;
        let (short, long) = app.field_text(field);
        let label_style   = if sel {
            Style::default().fg(t.accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.fg())
        };
        let value = if short.is_empty() { "        ".to_owned() } else { format!("{short:<8}") };

        lines.push(Line::from(vec![
            Span::styled(if sel { " ▶ " } else { "   " }, label_style),
            Span::styled(format!("{:<20}", format!("{}:", field.kind.label())), label_style),
            Span::styled(format!("[{value}]"), Style::default().fg(t.fg())),
            Span::styled("  ▦", Style::default().fg(t.fg_dim())),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {long}"),
            Style::default().fg(t.fg_dim()),
        )));
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_statusbar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let (mode_str, hints) = match app.active_panel {
        Panel::Picker => (" PICKER ", "  hjkl:move  [ ]:month  { }:year  Enter:pick  Esc:cancel"),
        _             => (" FIELDS ", "  j/k:field  Enter:open calendar  T:theme  ?:help  q:quit"),
    };
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(mode_str, Style::default().bg(t.accent()).fg(t.bg()).add_modifier(Modifier::BOLD)),
        Span::styled(hints, Style::default().fg(t.fg_dim())),
        Span::styled(
            format!("  {}", app.status),
            Style::default().fg(t.fg_dim()).add_modifier(Modifier::ITALIC),
        ),
    ])).style(Style::default().bg(t.bg2()));
    f.render_widget(bar, area);
}

// ─── Picker popup ─────────────────────────────────────────────────────────────

fn draw_picker(f: &mut Frame, area: Rect, app: &App, view: &PickerView) {
    let t       = &view.palette;
    let session = &view.session;
    let rect    = fixed_centered(PICKER_W, PICKER_H, area);
    f.render_widget(Clear, rect);

    let label = app.fields[view.field].kind.label();
    let block = Block::default()
        .title(Title::from(Line::from(Span::styled(
            format!(" {label} "),
            Style::default().fg(t.accent()).add_modifier(Modifier::BOLD),
        ))))
        .borders(Borders::ALL)
        .border_type(t.border_type())
        .border_style(Style::default().fg(t.border_active()))
        .style(Style::default().bg(t.popup_bg()));

    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let fg  = Style::default().fg(t.fg());
    let dim = Style::default().fg(t.fg_dim());
    let bold = fg.add_modifier(Modifier::BOLD);
    let arrow = |step: Step| {
        Span::styled(step.label(), if session.can_step(step) { bold } else { dim })
    };

    // ── << <   Month Year   > >> ───────────────────────────────────────────
    let title_w = (inner.width as usize).saturating_sub(10);
    let nav = Line::from(vec![
        arrow(Step::PrevYear), Span::raw(" "), arrow(Step::PrevMonth),
        Span::styled(format!(" {:^title_w$} ", session.title()), Style::default().fg(t.accent()).add_modifier(Modifier::BOLD)),
        arrow(Step::NextMonth), Span::raw(" "), arrow(Step::NextYear),
    ]);

    let header: Vec<Span> = session.header().iter()
        .map(|name| {
            let short: String = name.chars().take(CELL_W - 1).collect();
            Span::styled(format!("{short:^width$}", width = CELL_W), bold)
        })
        .collect();

    let mut lines = vec![nav, Line::from(""), Line::from(header)];
    lines.push(Line::from(Span::styled("─".repeat(inner.width as usize), dim)));

    for (row, cells) in session.grid().rows().enumerate() {
        let spans: Vec<Span> = cells.iter().enumerate()
            .map(|(col, cell)| cell_span(t, cell, row * 7 + col == view.focus))
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled("─".repeat(inner.width as usize), dim)));
    lines.push(Line::from(Span::styled(" Enter: pick   Esc: cancel", dim)));

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(t.popup_bg())).alignment(Alignment::Left),
        inner,
    );
}

fn cell_span(t: &ThemeConfig, cell: &GridCell, focused: bool) -> Span<'static> {
    let Some(day) = cell.day() else {
        return Span::raw(" ".repeat(CELL_W));
    };
    let label = format!(" {day:>2}  ");
    let style = if focused {
        let (bg, fg) = t.focus_highlight();
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    } else if cell.highlighted {
        let (bg, fg) = t.day_highlight();
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    } else if !cell.enabled {
        Style::default().fg(t.disabled())
    } else {
        Style::default().fg(t.fg()).add_modifier(Modifier::BOLD)
    };
    Span::styled(label, style)
}

/// Plain-text grid for `dpick grid`: title, header, then six week rows.
/// Disabled days carry a trailing `-`, the highlighted day a trailing `*`.
pub fn grid_text(session: &Session) -> Vec<String> {
    let width = CELL_W * 7;
    let mut out = vec![format!("{:^width$}", session.title())];
    out.push(session.header().iter().map(|n| format!("{n:>4} ")).collect::<String>().trim_end().to_owned());

    for row in session.grid().rows() {
        let line: String = row.iter()
            .map(|cell| match cell.day() {
                None => " ".repeat(CELL_W),
                Some(day) => {
                    let mark = if cell.highlighted { '*' } else if !cell.enabled { '-' } else { ' ' };
                    format!("{day:>4}{mark}")
                }
            })
            .collect();
        out.push(line.trim_end().to_owned());
    }
    out
}

// ─── Help overlay ────────────────────────────────────────────────────────────

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let t    = &app.theme;
    let rect = centered(60, 70, area);
    f.render_widget(Clear, rect);

    let title = Line::from(Span::styled(
        " Keyboard Shortcuts ",
        Style::default().fg(t.accent()).add_modifier(Modifier::BOLD),
    ));
    let block = Block::default()
        .title(Title::from(title))
        .borders(Borders::ALL)
        .border_type(t.border_type())
        .border_style(Style::default().fg(t.border_active()))
        .style(Style::default().bg(t.popup_bg()));

    let accent = Style::default().fg(t.accent()).add_modifier(Modifier::BOLD);
    let dim    = Style::default().fg(t.fg_dim());
    let lines  = vec![
        Line::from(""),
        Line::from(Span::styled("  Fields", accent)),
        Line::from(Span::styled("  j/k  ↓↑  Tab       Move between fields", dim)),
        Line::from(Span::styled("  Enter / Space      Open the calendar", dim)),
        Line::from(Span::styled("  T                  Cycle themes", dim)),
        Line::from(""),
        Line::from(Span::styled("  Calendar", accent)),
        Line::from(Span::styled("  h/j/k/l  ←↓↑→      Move by day / week", dim)),
        Line::from(Span::styled("  [ / ]              Prev / Next month", dim)),
        Line::from(Span::styled("  { / }              Prev / Next year", dim)),
        Line::from(Span::styled("  Enter / Space      Pick the focused day", dim)),
        Line::from(Span::styled("  Esc                Cancel, keep the old date", dim)),
        Line::from(""),
        Line::from(Span::styled("  General", accent)),
        Line::from(Span::styled("  ?                  Toggle help", dim)),
        Line::from(Span::styled("  q                  Quit", dim)),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().fg(t.fg()))
            .wrap(Wrap { trim: false }),
        rect,
    );
}

// ─── Utilities ────────────────────────────────────────────────────────────────

fn centered(pct_x: u16, pct_y: u16, r: Rect) -> Rect {
    let vert = Layout::default().direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ]).split(r);
    Layout::default().direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ]).split(vert[1])[1]
}

fn fixed_centered(w: u16, h: u16, r: Rect) -> Rect {
    let w = w.min(r.width);
    let h = h.min(r.height);
    Rect::new(r.x + (r.width - w) / 2, r.y + (r.height - h) / 2, w, h)
}
