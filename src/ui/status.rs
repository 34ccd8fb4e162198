use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::engine::Engine;
use crate::feedback::FeedbackLevel;
use crate::settings::RenderMode;

use super::TranscriptView;

pub fn render_search_bar<S, P>(
    engine: &Engine<S, TranscriptView, P>,
    frame: &mut Frame,
    area: Rect,
) {
    let mode = match engine.render_mode() {
        RenderMode::Realtime => "realtime",
        RenderMode::Confirm => "confirm",
    };
    let button = format!("[{}]", engine.button_label().text());
    let block = Block::bordered()
        .title_top(format!(" Search ({mode}) "))
        .title_top(
            Line::from(Span::styled(
                button,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    let input = Line::from(vec![
        Span::raw(engine.input().to_string()),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(input).block(block), area);
}

pub fn render_feedback_bar<S, P>(
    engine: &Engine<S, TranscriptView, P>,
    frame: &mut Frame,
    area: Rect,
) {
    let Some((text, level)) = engine.feedback().active() else {
        return;
    };
    let bg = match level {
        FeedbackLevel::Error => Color::Red,
        FeedbackLevel::Info => Color::Blue,
    };
    let bar = Paragraph::new(format!(" {text}")).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(view: &TranscriptView, count: usize, frame: &mut Frame, area: Rect) {
    let viewport = view.viewport();
    let position = match view.focused() {
        Some(index) => format!("floor {index}/{}", count.saturating_sub(1)),
        None => format!("{count} messages"),
    };
    let status = format!(
        " {position}  [{}%]  Home/End: first/last  ^G: floor  ^O: settings  ^L: clear/search  Esc: quit",
        viewport.scroll_percent()
    );
    let bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, area);
}
