use super::keys::{wizard_action_from_key, SCRIPT_KEYS_ENV};
use super::session::{SessionEffect, WizardSession};
use super::view::{PaneView, WizardViewModel};
use crate::persistence::KeyValueStore;
use crate::wizard::Severity;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, IsTerminal};
use std::time::Duration;

pub fn is_interactive_terminal() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Runs the wizard on the alternate screen until the user quits.
pub fn run_wizard_tui<S: KeyValueStore>(session: &mut WizardSession<S>) -> Result<(), String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter wizard screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create wizard terminal: {e}"))?;
    let result = run_wizard_tui_loop(session, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave wizard screen: {e}"))?;
    result
}

fn run_wizard_tui_loop<S: KeyValueStore>(
    session: &mut WizardSession<S>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), String> {
    loop {
        let view_model = session.view_model();
        terminal
            .draw(|frame| draw_wizard_ui(frame, &view_model))
            .map_err(|e| format!("failed to render wizard: {e}"))?;
        if !event::poll(Duration::from_millis(250))
            .map_err(|e| format!("failed to poll wizard input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read wizard input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = wizard_action_from_key(session.mode(), key) else {
            continue;
        };
        if session.apply(action) == SessionEffect::Quit {
            return Ok(());
        }
    }
}

/// Feeds `keys` through the same key mapping as the terminal loop. The script
/// must end the session with `q` or `ctrl-c`.
pub fn run_wizard_scripted<S: KeyValueStore>(
    session: &mut WizardSession<S>,
    keys: Vec<KeyEvent>,
) -> Result<(), String> {
    for key in keys {
        let Some(action) = wizard_action_from_key(session.mode(), key) else {
            continue;
        };
        if session.apply(action) == SessionEffect::Quit {
            return Ok(());
        }
    }
    Err(format!(
        "scripted wizard did not terminate; end {SCRIPT_KEYS_ENV} with q or ctrl-c"
    ))
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

pub fn draw_wizard_ui(frame: &mut Frame<'_>, view_model: &WizardViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            view_model.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(view_model.step_line.clone()),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let mut context = Vec::new();
    if !view_model.tabs.is_empty() {
        let mut spans = Vec::new();
        for (idx, tab) in view_model.tabs.iter().enumerate() {
            let style = if view_model.active_tab == Some(idx) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {tab} "), style));
            spans.push(Span::raw("|"));
        }
        context.push(Line::from(spans));
    }
    context.push(Line::from(view_model.chips.join("  ·  ")));
    if let Some(search) = &view_model.search {
        context.push(Line::from(format!("Search: {search}")));
    }
    frame.render_widget(
        Paragraph::new(context).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let pane_count = view_model.panes.len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, pane_count); pane_count as usize])
        .split(chunks[2]);
    for (pane, area) in view_model.panes.iter().zip(columns.iter()) {
        draw_pane(frame, pane, *area);
    }

    let mut footer = vec![Line::from(view_model.hint.clone())];
    match &view_model.status {
        Some(notice) => footer.push(Line::from(Span::styled(
            format!("Status: {}", notice.message),
            Style::default().fg(severity_color(notice.severity)),
        ))),
        None => footer.push(Line::from("Status: ready")),
    }
    frame.render_widget(
        Paragraph::new(footer).block(Block::default().borders(Borders::ALL)),
        chunks[3],
    );

    if let Some(input) = &view_model.dialog {
        draw_organization_dialog(frame, input);
    }
}

fn draw_pane(frame: &mut Frame<'_>, pane: &PaneView, area: Rect) {
    let border_style = if pane.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(pane.title.clone())
        .padding(Padding::new(1, 1, 0, 0));
    if pane.items.is_empty() {
        let text = pane.placeholder.clone().unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block),
            area,
        );
        return;
    }
    let mut items = Vec::with_capacity(pane.items.len());
    for (idx, row) in pane.items.iter().enumerate() {
        let mut item = ListItem::new(Line::from(Span::raw(row.render())));
        if pane.focused && idx == pane.cursor {
            item = item.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        items.push(item);
    }
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_organization_dialog(frame: &mut Frame<'_>, input: &str) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add New Organization")
        .padding(Padding::new(2, 2, 1, 1));
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new("Organization name"), rows[0]);
    frame.render_widget(Paragraph::new(Line::from(format!("> {input}"))), rows[1]);
    frame.render_widget(Paragraph::new("Enter add, Esc cancel"), rows[3]);
    frame.set_cursor_position((rows[1].x + 2 + input.chars().count() as u16, rows[1].y));
}
