//! UI module for rendering the TUI

mod field_renderer;

use crate::app::{App, BUTTONS};
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use field_renderer::{draw_field, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_form(frame, chunks[0], app);
    draw_status_bar(frame, chunks[1], app);
}

/// Form title, marked when the form differs from its baseline
fn form_title(app: &App) -> String {
    if app.store.watch().edited {
        format!(" {} (edited) ", app.config.title)
    } else {
        format!(" {} ", app.config.title)
    }
}

/// Draw the fields and the button row
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(form_title(app))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = app
        .config
        .fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let form = app.store.form();
    for (index, field_config) in app.config.fields.iter().enumerate() {
        let Some(field) = form.get(&field_config.name) else {
            continue;
        };
        draw_field(
            frame,
            rows[index],
            field_config.label(),
            field,
            app.active_field == index,
            field_config.secret,
        );
    }

    draw_button_row(frame, rows[app.config.fields.len()], app);
}

/// Button height in rows (top border + label + bottom border)
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 12;

/// Label color per button when it is not selected
const BUTTON_COLORS: [Color; BUTTONS.len()] = [Color::Green, Color::Gray];

/// Draw Submit/Reset side by side; the selected one is highlighted only
/// while the button row has focus
fn draw_button_row(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(BUTTON_WIDTH); BUTTONS.len()];
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let on_buttons = app.is_buttons_row_active();
    for (index, label) in BUTTONS.iter().enumerate() {
        let focused = on_buttons && app.selected_button == index;
        let (border, text) = if focused {
            (
                Style::default().fg(Color::Cyan),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(BUTTON_COLORS[index]),
            )
        };

        let button = Paragraph::new(format!(" {label} "))
            .style(text)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(button, slots[index]);
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = format!(" Tab:next  Enter/{SUBMIT_SHORTCUT}:submit  {RESET_SHORTCUT}:reset  Esc:quit");
    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::Gray))];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
