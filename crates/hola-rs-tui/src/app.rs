//! Application state for the Hola TUI.

use crate::event::AppEvent;
use chrono::Utc;
use hola_rs_core::{
    Board, EMPTY_PLACEHOLDER, Field, GreetingStore, LatencyTask, Submission, project,
};
use log::{debug, info};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::cmp::min;
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Settings the app state needs from the resolved config.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub title: String,
    pub author: Option<String>,
    pub submit_delay: Duration,
    pub seed: bool,
    pub time_format: String,
}

/// Top-level application state for the TUI.
///
/// Owns the board and the in-flight latency task; dropping the app aborts
/// any pending submission.
pub struct App {
    /// Form and list view model.
    pub board: Board,
    /// Field receiving typed characters.
    pub focus: Field,
    /// Header title.
    pub title: String,
    /// Status line text.
    pub status: String,
    /// Current list scroll offset.
    pub scroll: u16,
    /// Maximum list scroll offset.
    pub list_max_scroll: u16,
    time_format: String,
    submit_delay: Duration,
    spinner_frame: usize,
    pending_task: Option<LatencyTask>,
}

impl App {
    /// Create the app state from resolved settings.
    pub fn new(settings: AppSettings) -> Self {
        let store = if settings.seed {
            GreetingStore::seeded(Utc::now())
        } else {
            GreetingStore::new()
        };
        let mut board = Board::new(store);
        let focus = match settings.author {
            Some(author) if !author.trim().is_empty() => {
                board.set_author(author);
                Field::Body
            }
            _ => Field::Author,
        };
        Self {
            board,
            focus,
            title: settings.title,
            status: "idle".to_string(),
            scroll: 0,
            list_max_scroll: 0,
            time_format: settings.time_format,
            submit_delay: settings.submit_delay,
            spinner_frame: 0,
            pending_task: None,
        }
    }

    /// Move focus to the other form field.
    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    /// Append a character to the focused field.
    pub fn type_char(&mut self, ch: char) {
        self.board.push_char(self.focus, ch);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        self.board.pop_char(self.focus);
    }

    /// Start a submission and schedule its completion on `sender`.
    ///
    /// Returns false when the form was not submittable; nothing changes in
    /// that case.
    pub fn submit(&mut self, sender: mpsc::Sender<AppEvent>) -> bool {
        match self.board.begin_submit() {
            Ok(submission) => {
                self.pending_task = Some(LatencyTask::spawn(
                    self.submit_delay,
                    AppEvent::SubmissionReady(submission),
                    sender,
                ));
                self.spinner_frame = 0;
                self.status = "processing".to_string();
                true
            }
            Err(reason) => {
                debug!("submit ignored ({reason})");
                false
            }
        }
    }

    /// Apply a submission whose latency has elapsed.
    pub fn complete(&mut self, submission: Submission) {
        let applied = self
            .board
            .complete_submit(submission, Utc::now())
            .map(|greeting| greeting.id());
        if let Some(id) = applied {
            info!("greeting published (id={id})");
            self.pending_task = None;
            self.status = "published".to_string();
            self.scroll_to_top();
        }
    }

    /// Whether a submission is in flight.
    pub fn is_pending(&self) -> bool {
        self.board.is_pending()
    }

    /// Advance the spinner while pending.
    pub fn tick(&mut self) {
        if self.is_pending() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Submit button caption for the current state.
    pub fn button_label(&self) -> String {
        if self.is_pending() {
            format!("{} Processing...", SPINNER_FRAMES[self.spinner_frame])
        } else {
            "➤ Publish".to_string()
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = min(self.scroll.saturating_add(lines), self.list_max_scroll);
    }

    /// Jump to the newest greeting.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.list_max_scroll;
    }

    /// Update scroll bounds after layout changes.
    pub fn update_scroll_bounds(&mut self, max_scroll: u16) {
        self.list_max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
    }

    /// Render the greeting list into styled lines, newest first.
    pub fn render_lines(&self) -> Vec<Line<'static>> {
        let rows = project(self.board.store(), &self.time_format);
        if rows.is_empty() {
            return vec![Line::from(Span::styled(
                format!(" {EMPTY_PLACEHOLDER}"),
                Style::default().fg(Color::Rgb(128, 128, 128)),
            ))];
        }

        let mut lines = Vec::new();
        let count = rows.len();
        for (idx, row) in rows.into_iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", row.initial),
                    Style::default()
                        .fg(Color::Rgb(10, 10, 10))
                        .bg(Color::Rgb(110, 231, 183))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    row.author,
                    Style::default()
                        .fg(Color::Rgb(238, 238, 238))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", row.time),
                    Style::default().fg(Color::Rgb(128, 128, 128)),
                ),
            ]));
            for body_line in row.body.lines() {
                lines.push(Line::from(Span::styled(
                    format!("     {body_line}"),
                    Style::default().fg(Color::Rgb(200, 200, 200)),
                )));
            }
            if idx + 1 < count {
                lines.push(Line::from(Span::raw("")));
            }
        }
        lines
    }
}
