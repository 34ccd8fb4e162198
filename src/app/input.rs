use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Event;

/// What a terminal event asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Command {
    Dispatch(Event),
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    /// Host-local state changed (floor dialog text); just redraw.
    Redraw,
    Quit,
}

/// Which widget receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Search,
    FloorDialog,
    SettingsPanel,
}

pub(super) fn map_event(
    event: &TermEvent,
    focus: Focus,
    input: &str,
    floor_input: &mut String,
) -> Option<Command> {
    match event {
        TermEvent::Key(key) if key.kind != KeyEventKind::Release => match focus {
            Focus::Search => map_search_key(*key, input),
            Focus::FloorDialog => map_floor_key(*key, floor_input),
            Focus::SettingsPanel => map_settings_key(*key),
        },
        TermEvent::Resize(_, _) => Some(Command::Redraw),
        _ => None,
    }
}

fn map_search_key(key: KeyEvent, input: &str) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char('l') if ctrl => Some(Command::Dispatch(Event::ActionClicked)),
        KeyCode::Char('g') if ctrl => Some(Command::Dispatch(Event::OpenFloorDialog)),
        KeyCode::Char('o') if ctrl => Some(Command::Dispatch(Event::OpenSettingsPanel)),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => {
            let mut text = input.to_string();
            text.push(c);
            Some(Command::Dispatch(Event::InputChanged(text)))
        }
        KeyCode::Backspace => {
            let mut text = input.to_string();
            text.pop()?;
            Some(Command::Dispatch(Event::InputChanged(text)))
        }
        KeyCode::Enter => Some(Command::Dispatch(Event::EnterPressed)),
        KeyCode::Tab => Some(Command::Dispatch(Event::ActionClicked)),
        KeyCode::Home => Some(Command::Dispatch(Event::ScrollFirst)),
        KeyCode::End => Some(Command::Dispatch(Event::ScrollLast)),
        KeyCode::Up => Some(Command::ScrollUp(1)),
        KeyCode::Down => Some(Command::ScrollDown(1)),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown => Some(Command::PageDown),
        _ => None,
    }
}

fn map_floor_key(key: KeyEvent, floor_input: &mut String) -> Option<Command> {
    match key.code {
        KeyCode::Esc => {
            floor_input.clear();
            Some(Command::Dispatch(Event::CancelFloorDialog))
        }
        KeyCode::Enter => Some(Command::Dispatch(Event::FloorSubmitted(floor_input.clone()))),
        KeyCode::Backspace => {
            floor_input.pop()?;
            Some(Command::Redraw)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            floor_input.push(c);
            Some(Command::Redraw)
        }
        _ => None,
    }
}

fn map_settings_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc => Some(Command::Dispatch(Event::CloseSettingsPanel)),
        KeyCode::Enter | KeyCode::Char('s') => Some(Command::Dispatch(Event::SaveSettings)),
        KeyCode::Char('r') => Some(Command::Dispatch(Event::ToggleRenderMode)),
        KeyCode::Char('h') => Some(Command::Dispatch(Event::ToggleHighlight)),
        _ => None,
    }
}
