use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::floor::FloorDialog;
use crate::settings::{RenderMode, Settings};

pub fn render_floor_dialog(dialog: &FloorDialog, input: &str, frame: &mut Frame, area: Rect) {
    let Some(hint) = dialog.range_hint() else {
        return;
    };
    let hint_line = format!("Floor ({hint}):");
    let error = dialog.error().unwrap_or_default();

    let mut lines = vec![
        Line::raw(hint_line.clone()),
        Line::from(vec![
            Span::styled(
                format!("> {input}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]),
    ];
    if !error.is_empty() {
        lines.push(Line::styled(error.to_string(), Style::default().fg(Color::Red)));
    }
    lines.push(Line::raw(" "));
    lines.push(Line::styled(
        "Enter: jump · Esc: cancel",
        Style::default().fg(Color::Indexed(245)),
    ));

    let content_width = hint_line.width().max(error.width()).max(input.width() + 3);
    #[allow(clippy::cast_possible_truncation)]
    let popup_width = (content_width as u16).saturating_add(6).max(32);
    #[allow(clippy::cast_possible_truncation)]
    let popup_height = lines.len() as u16 + 4;
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title("Jump to Floor")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_settings_panel(settings: Settings, frame: &mut Frame, area: Rect) {
    let checkbox = |on: bool| if on { "[x]" } else { "[ ]" };
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::styled("r ", key_style),
            Span::raw(format!(
                "{} Realtime search",
                checkbox(settings.render_mode == RenderMode::Realtime)
            )),
        ]),
        Line::from(vec![
            Span::styled("h ", key_style),
            Span::raw(format!(
                "{} Highlight keyword",
                checkbox(settings.highlight_enabled)
            )),
        ]),
        Line::raw(" "),
        Line::styled(
            "Enter: save · Esc: close",
            Style::default().fg(Color::Indexed(245)),
        ),
    ];

    let popup = centered_popup_rect(40, 8, area);
    let block = Block::default()
        .title("Search Settings")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_popup_rect(40, 8, area), Rect::new(20, 8, 40, 8));
        let small = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_popup_rect(40, 8, small), Rect::new(0, 0, 20, 5));
    }
}
