use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::App;
use crate::app::input::{Command, Focus, map_event};
use crate::engine::{Engine, Event};
use crate::feedback::FeedbackLevel;
use crate::settings::{DebouncedStore, FileSettingsStore};
use crate::transcript::Transcript;
use crate::ui::{self, TranscriptView};
use crate::watcher::TranscriptWatcher;

/// Quiet period before a settings change is written to disk.
const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);
/// Quiet period before a transcript change triggers a reload.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
/// Poll interval while nothing is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

type ShellEngine = Engine<Transcript, TranscriptView, DebouncedStore<FileSettingsStore>>;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript cannot be loaded or the terminal
    /// fails to initialize or draw.
    pub fn run(&mut self) -> Result<()> {
        let transcript = Transcript::load(&self.transcript_path)?;
        let count = transcript.as_slice().len();
        let store = DebouncedStore::new(FileSettingsStore::new(&self.settings_path), SAVE_DEBOUNCE);
        let mut engine = Engine::start(transcript, TranscriptView::new(0, count), store);

        let now = Instant::now();
        if let Some(mode) = self.render_mode {
            engine.handle(Event::SetRenderMode(mode), now);
        }
        if let Some(enabled) = self.highlight_enabled {
            engine.handle(Event::SetHighlightEnabled(enabled), now);
        }
        if self.save_settings {
            engine.handle(Event::SaveSettings, now);
        }

        let mut watcher = if self.watch_enabled {
            match TranscriptWatcher::new(&self.transcript_path, WATCH_DEBOUNCE) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    tracing::warn!(error = %err, "transcript watch unavailable");
                    engine.notify(
                        FeedbackLevel::Error,
                        format!("Watch unavailable: {err}"),
                        now,
                    );
                    None
                }
            }
        } else {
            None
        };

        // Open at the latest message, like a chat window.
        engine.handle(Event::ScrollLast, now);

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; msgseek requires an interactive terminal")?;
        let result = Self::event_loop(&mut terminal, &mut engine, &mut watcher);
        ratatui::restore();

        engine.store_mut().flush();
        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        engine: &mut ShellEngine,
        watcher: &mut Option<TranscriptWatcher>,
    ) -> Result<()> {
        let mut floor_input = String::new();
        let mut needs_render = true;

        loop {
            let now = Instant::now();
            needs_render |= engine.handle(Event::Tick, now);
            engine.store_mut().flush_ready(now);

            if watcher
                .as_mut()
                .is_some_and(TranscriptWatcher::take_change_ready)
            {
                Self::reload(engine, now);
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| ui::render(engine, &floor_input, frame))?;
                needs_render = false;
            }

            if !event::poll(Self::poll_timeout(engine, now))? {
                continue;
            }
            let focus = Self::focus(engine);
            let command = map_event(&event::read()?, focus, engine.input(), &mut floor_input);
            let Some(command) = command else {
                continue;
            };
            needs_render = true;
            let now = Instant::now();
            match command {
                Command::Quit => return Ok(()),
                Command::Dispatch(event) => {
                    engine.handle(event, now);
                    if !engine.floor_dialog().is_open() {
                        floor_input.clear();
                    }
                }
                Command::ScrollUp(n) => engine.renderer_mut().viewport_mut().scroll_up(n),
                Command::ScrollDown(n) => engine.renderer_mut().viewport_mut().scroll_down(n),
                Command::PageUp => engine.renderer_mut().viewport_mut().page_up(),
                Command::PageDown => engine.renderer_mut().viewport_mut().page_down(),
                Command::Redraw => {}
            }
        }
    }

    fn reload(engine: &mut ShellEngine, now: Instant) {
        match engine.source_mut().reload() {
            Ok(()) => {
                let count = engine.source().as_slice().len();
                tracing::info!(messages = count, "transcript reloaded");
                engine.renderer_mut().viewport_mut().set_total(count);
                engine.handle(Event::SourceChanged, now);
            }
            Err(err) => {
                tracing::warn!(error = %err, "transcript reload failed");
                engine.notify(FeedbackLevel::Error, format!("Reload failed: {err}"), now);
            }
        }
    }

    fn focus(engine: &ShellEngine) -> Focus {
        if engine.floor_dialog().is_open() {
            Focus::FloorDialog
        } else if engine.settings_panel_open() {
            Focus::SettingsPanel
        } else {
            Focus::Search
        }
    }

    /// Wake up in time for the next feedback or settings deadline.
    fn poll_timeout(engine: &ShellEngine, now: Instant) -> Duration {
        let mut timeout = IDLE_POLL;
        if let Some(deadline) = engine.feedback().deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }
        if engine.store().is_pending() {
            timeout = timeout.min(SAVE_DEBOUNCE);
        }
        timeout
    }
}
