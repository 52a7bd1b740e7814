//! Library entry point for the Hola TUI.
//!
//! Provides [`run`], which launches the Ratatui greeting board and drives it
//! from a single event loop fed by input, tick and latency events.

mod app;
mod event;
mod ui;

use anyhow::anyhow;
use app::{App, AppSettings};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use hola_rs_config::HolaConfig;
use log::{debug, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// Resolved settings for a TUI session.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Header title.
    pub title: String,
    /// Name pre-filled in the author field.
    pub author: Option<String>,
    /// Simulated submit latency.
    pub submit_delay: Duration,
    /// Start with the seed greetings.
    pub seed: bool,
    /// chrono format for the time-of-day column.
    pub time_format: String,
    /// Redraw tick interval.
    pub tick: Duration,
}

impl From<&HolaConfig> for TuiConfig {
    fn from(config: &HolaConfig) -> Self {
        Self {
            title: config.ui.title.clone(),
            author: config.ui.author.clone(),
            submit_delay: Duration::from_millis(config.board.submit_delay_ms),
            seed: config.board.seed,
            time_format: config.board.time_format.clone(),
            tick: Duration::from_millis(config.ui.tick_ms),
        }
    }
}

impl From<TuiConfig> for AppSettings {
    fn from(config: TuiConfig) -> Self {
        Self {
            title: config.title,
            author: config.author,
            submit_delay: config.submit_delay,
            seed: config.seed,
            time_format: config.time_format,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self::from(&HolaConfig::default())
    }
}

/// Launch the greeting board in the current terminal.
///
/// The caller is responsible for initializing logging before calling `run`.
///
/// # Errors
/// Returns an error if terminal setup, drawing, or teardown fails.
pub async fn run(config: TuiConfig) -> anyhow::Result<()> {
    info!(
        "starting board (seed={}, delay_ms={})",
        config.seed,
        config.submit_delay.as_millis()
    );
    let tick = config.tick;
    let mut app = App::new(AppSettings::from(config));

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone(), tick);

    let result = event_loop(&mut terminal, &mut app, &mut rx, &tx).await;
    // Dropping the app aborts any submission still waiting on its delay.
    drop(app);
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
    tx: &mpsc::Sender<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;
        let event = rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("event channel closed unexpectedly"))?;
        if handle_app_event(event, app, tx) {
            return Ok(());
        }
    }
}

/// Dispatch a UI event and return true when the app should exit.
fn handle_app_event(event: AppEvent, app: &mut App, sender: &mpsc::Sender<AppEvent>) -> bool {
    match event {
        AppEvent::Input(key) => handle_input(key, app, sender),
        AppEvent::Tick => {
            app.tick();
            false
        }
        AppEvent::Scroll(delta) => {
            if delta < 0 {
                app.scroll_up(delta.unsigned_abs());
            } else {
                app.scroll_down(delta as u16);
            }
            false
        }
        AppEvent::SubmissionReady(submission) => {
            app.complete(submission);
            false
        }
    }
}

/// Handle keyboard input and return true when the app should exit.
fn handle_input(key: KeyEvent, app: &mut App, sender: &mpsc::Sender<AppEvent>) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Enter => {
            app.submit(sender.clone());
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::PageUp => app.scroll_up(5),
        KeyCode::PageDown => app.scroll_down(5),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::Home => app.scroll_to_top(),
        KeyCode::End => app.scroll_to_bottom(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.type_char(ch);
        }
        _ => {}
    }
    false
}

/// Spawn a blocking task that forwards terminal input to the event loop.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::task::spawn_blocking(move || {
        const MOUSE_SCROLL_LINES: i16 = 3;
        loop {
            if !matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                if sender.is_closed() {
                    return;
                }
                continue;
            }
            let app_event = match crossterm::event::read() {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    AppEvent::Input(key)
                }
                Ok(CrosstermEvent::Mouse(mouse)) => match mouse.kind {
                    MouseEventKind::ScrollUp => AppEvent::Scroll(-MOUSE_SCROLL_LINES),
                    MouseEventKind::ScrollDown => AppEvent::Scroll(MOUSE_SCROLL_LINES),
                    _ => continue,
                },
                _ => continue,
            };
            if sender.blocking_send(app_event).is_err() {
                debug!("input handler stopping: event loop closed");
                return;
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if sender.send(AppEvent::Tick).await.is_err() {
                return;
            }
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press_all(app: &mut App, sender: &mpsc::Sender<AppEvent>, text: &str) {
        for ch in text.chars() {
            assert!(!handle_input(key(KeyCode::Char(ch)), app, sender));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn keyboard_submission_scenario() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut app = App::new(AppSettings::from(TuiConfig::default()));
        assert_eq!(app.board.store().len(), 2);

        press_all(&mut app, &tx, "Ana");
        handle_input(key(KeyCode::Tab), &mut app, &tx);
        press_all(&mut app, &tx, "Holaa");
        handle_input(key(KeyCode::Backspace), &mut app, &tx);
        handle_input(key(KeyCode::Enter), &mut app, &tx);
        assert!(app.is_pending());

        // A second Enter while pending must not schedule anything.
        handle_input(key(KeyCode::Enter), &mut app, &tx);

        let event = rx.recv().await.expect("event");
        assert!(!handle_app_event(event, &mut app, &tx));
        assert!(rx.try_recv().is_err());

        assert_eq!(app.board.store().len(), 3);
        let first = app.board.store().first().expect("first");
        assert_eq!(first.author(), "Ana");
        assert_eq!(first.body(), "Hola");
        assert_eq!(app.board.body(), "");
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(AppSettings::from(TuiConfig::default()));
        assert!(handle_input(key(KeyCode::Esc), &mut app, &tx));
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert!(handle_input(ctrl_c, &mut app, &tx));
    }

    #[test]
    fn arrow_keys_scroll_without_moving_focus() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(AppSettings::from(TuiConfig::default()));
        app.update_scroll_bounds(3);
        let focus = app.focus;

        handle_input(key(KeyCode::Down), &mut app, &tx);
        handle_input(key(KeyCode::Down), &mut app, &tx);
        assert_eq!(app.scroll, 2);
        assert_eq!(app.focus, focus);

        handle_input(key(KeyCode::Up), &mut app, &tx);
        assert_eq!(app.scroll, 1);
        assert_eq!(app.focus, focus);

        handle_input(key(KeyCode::Tab), &mut app, &tx);
        assert_ne!(app.focus, focus);
        handle_input(key(KeyCode::BackTab), &mut app, &tx);
        assert_eq!(app.focus, focus);
    }

    #[test]
    fn config_maps_to_tui_settings() {
        let config = HolaConfig::load_from_str(
            "{ board: { submit_delay_ms: 50, seed: false }, ui: { author: 'Ana', tick_ms: 40 } }",
        )
        .expect("config");
        let tui = TuiConfig::from(&config);
        assert_eq!(tui.submit_delay, Duration::from_millis(50));
        assert_eq!(tui.tick, Duration::from_millis(40));
        assert!(!tui.seed);
        assert_eq!(tui.author.as_deref(), Some("Ana"));
    }
}
