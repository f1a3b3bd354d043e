//! Field rendering utilities for forms

use masinton_form::Field;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one field: bordered input plus the error line
pub const FIELD_HEIGHT: u16 = 4;

/// Text shown for a field value; secret values are masked
pub fn display_value(field: &Field, secret: bool) -> String {
    let text = field.value.as_text();
    if secret {
        "•".repeat(text.chars().count())
    } else {
        text.into_owned()
    }
}

/// Draw a form field with its error message underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    field: &Field,
    is_active: bool,
    secret: bool,
) {
    let border_color = if field.error {
        Color::Red
    } else if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value = display_value(field, secret);
    let display_str = if value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };
    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(content.block(block), input_area);

    if field.error && area.height > 3 {
        let error_area = Rect {
            y: area.y + 3,
            height: 1,
            ..area
        };
        let error = Paragraph::new(Span::styled(
            format!(" {}", field.error_message),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error, error_area);
    }
}
