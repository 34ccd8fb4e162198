use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::engine::Engine;
use crate::transcript::{ChatMessage, MessageSource};

use super::{TranscriptView, overlays, status};

/// Rows taken by the bordered search bar.
const SEARCH_BAR_ROWS: u16 = 3;

/// Render the complete UI.
///
/// `floor_input` is the text typed into the floor dialog, which the
/// engine leaves to the host.
pub fn render<S: MessageSource, P>(
    engine: &mut Engine<S, TranscriptView, P>,
    floor_input: &str,
    frame: &mut Frame,
) {
    let area = frame.area();
    let feedback_active = engine.error_text().is_some();
    let footer_rows = 1 + u16::from(feedback_active);

    let search_area = Rect {
        height: SEARCH_BAR_ROWS.min(area.height),
        ..area
    };
    let list_area = Rect {
        y: area.y + search_area.height,
        height: area
            .height
            .saturating_sub(search_area.height + footer_rows),
        ..area
    };
    let feedback_area = Rect {
        y: area.y + area.height.saturating_sub(footer_rows),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let messages = engine.source().messages();
    engine
        .renderer_mut()
        .sync(list_area.height, messages.len());

    status::render_search_bar(engine, frame, search_area);
    render_messages(engine.renderer(), &messages, frame, list_area);
    if feedback_active {
        status::render_feedback_bar(engine, frame, feedback_area);
    }
    status::render_status_bar(engine.renderer(), messages.len(), frame, status_area);

    if engine.floor_dialog().is_open() {
        overlays::render_floor_dialog(engine.floor_dialog(), floor_input, frame, area);
    } else if engine.settings_panel_open() {
        overlays::render_settings_panel(engine.settings(), frame, area);
    }
}

fn render_messages(view: &TranscriptView, messages: &[ChatMessage], frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = view
        .viewport()
        .visible_range()
        .filter_map(|index| messages.get(index))
        .map(|message| message_line(view, message))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn message_line<'a>(view: &TranscriptView, message: &'a ChatMessage) -> Line<'a> {
    let focused = view.focused() == Some(message.index);
    let number_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Indexed(245))
    };
    let mut spans = vec![Span::styled(format!("{:>5} ", message.index), number_style)];
    if let Some(name) = &message.name {
        spans.push(Span::styled(
            format!("{name}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    spans.extend(highlighted_spans(&message.text, view.highlights(message.index)));
    Line::from(spans)
}

/// Split `text` into plain and marked spans. Ranges that no longer fit the
/// text (the transcript changed under them) are ignored.
fn highlighted_spans(text: &str, ranges: &[Range<usize>]) -> Vec<Span<'static>> {
    let flat = flatten(text);
    let mark = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    let mut cursor = 0;
    for range in ranges {
        let fits = range.start >= cursor
            && range.end <= flat.len()
            && flat.is_char_boundary(range.start)
            && flat.is_char_boundary(range.end);
        if !fits {
            continue;
        }
        if range.start > cursor {
            spans.push(Span::raw(flat[cursor..range.start].to_string()));
        }
        spans.push(Span::styled(flat[range.clone()].to_string(), mark));
        cursor = range.end;
    }
    if cursor < flat.len() {
        spans.push(Span::raw(flat[cursor..].to_string()));
    }
    spans
}

/// One row per message: control whitespace becomes a space. Each replaced
/// char is one byte, so byte ranges into the original still line up.
fn flatten(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Event;
    use crate::settings::{MemorySettingsStore, RenderMode, Settings};
    use crate::transcript::Transcript;
    use crate::ui::MessageRenderer;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_highlighted_spans_split_around_marks() {
        let spans = highlighted_spans("say hello\nthere", &[4..9]);
        let texts: Vec<_> = spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(texts, vec!["say ", "hello", " there"]);
        assert_eq!(spans[1].style.bg, Some(Color::Yellow));
    }

    #[test]
    fn test_stale_ranges_are_skipped() {
        let spans = highlighted_spans("short", &[2..40]);
        let texts: Vec<_> = spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(texts, vec!["short"]);
    }

    #[test]
    fn test_render_shows_button_label_and_feedback() {
        let transcript = Transcript::from_texts(["hello", "world"]);
        let settings = Settings {
            render_mode: RenderMode::Confirm,
            highlight_enabled: true,
        };
        let mut engine = Engine::start(
            transcript,
            TranscriptView::new(0, 2),
            MemorySettingsStore::with(settings),
        );
        let now = Instant::now();
        engine.handle(Event::InputChanged("dragon".to_string()), now);
        engine.handle(Event::ActionClicked, now);

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| render(&mut engine, "", frame))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("[Search]"), "{text}");
        assert!(text.contains("No message contains \"dragon\""), "{text}");
        assert!(text.contains("world"), "{text}");
    }

    #[test]
    fn test_edited_message_loses_stale_marks() {
        let mut engine = Engine::start(
            vec![ChatMessage::new(0, "hello world")],
            TranscriptView::new(0, 1),
            MemorySettingsStore::default(),
        );
        let now = Instant::now();
        engine.handle(Event::InputChanged("world".to_string()), now);
        assert_eq!(engine.renderer().highlights(0), &[6..11]);

        engine.source_mut()[0].text = "goodbye friend!".to_string();
        engine.handle(Event::SourceChanged, now);
        assert!(engine.renderer().highlights(0).is_empty());

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|frame| render(&mut engine, "", frame))
            .unwrap();
        let marked = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .any(|cell| cell.bg == Color::Yellow);
        assert!(!marked);
    }

    #[test]
    fn test_render_floor_dialog_shows_range() {
        let transcript = Transcript::from_texts(["a", "b", "c"]);
        let mut engine = Engine::start(
            transcript,
            TranscriptView::new(0, 3),
            MemorySettingsStore::default(),
        );
        engine.handle(Event::OpenFloorDialog, Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal
            .draw(|frame| render(&mut engine, "7", frame))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("0–2"), "{text}");
    }

    #[test]
    fn test_render_syncs_viewport_to_list_height() {
        let transcript = Transcript::from_texts((0..50).map(|i| format!("message {i}")));
        let mut engine = Engine::start(
            transcript,
            TranscriptView::new(0, 0),
            MemorySettingsStore::default(),
        );
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| render(&mut engine, "", frame))
            .unwrap();
        assert_eq!(engine.renderer().viewport().height(), 8);
        assert_eq!(engine.renderer().viewport().total(), 50);

        engine.renderer_mut().scroll_into_view(49);
        terminal
            .draw(|frame| render(&mut engine, "", frame))
            .unwrap();
        assert!(buffer_text(&terminal).contains("message 49"));
    }
}
