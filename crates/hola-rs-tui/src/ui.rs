//! Rendering routines for the Hola TUI.

use crate::app::App;
use hola_rs_core::Field;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

const PRIMARY: Color = Color::Rgb(16, 185, 129); // emerald
const SECONDARY: Color = Color::Rgb(110, 231, 183);
const TEXT: Color = Color::Rgb(238, 238, 238);
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
const BORDER: Color = Color::Rgb(60, 60, 60);
const DISABLED: Color = Color::Rgb(90, 90, 90);

const HEADER_HEIGHT: u16 = 5;
const FORM_WIDTH_PERCENT: u16 = 34;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // header
            Constraint::Min(0),                // form + list
            Constraint::Length(1),             // status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(FORM_WIDTH_PERCENT),
            Constraint::Percentage(100 - FORM_WIDTH_PERCENT),
        ])
        .split(root[1]);

    draw_header(frame, app, root[0]);
    draw_form(frame, app, columns[0]);
    draw_list(frame, app, columns[1]);
    draw_status_bar(frame, app, root[2]);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" ◍ {}", app.title),
                Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  v{VERSION}"), Style::default().fg(TEXT_MUTED)),
        ]),
        Line::from(Span::styled(
            " Simulated client/server app. Ratatui + Tokio.",
            Style::default().fg(TEXT),
        )),
        Line::from(Span::styled(
            " (no data persistence)",
            Style::default().fg(TEXT_MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PRIMARY))
        .title(Span::styled(
            " ➤ New Message ",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // name
            Constraint::Min(3),    // message
            Constraint::Length(3), // button
        ])
        .split(inner);

    draw_field(frame, app, Field::Author, " Name ", "Your name", rows[0]);
    draw_field(
        frame,
        app,
        Field::Body,
        " Message ",
        "Write something interesting...",
        rows[1],
    );
    draw_button(frame, app, rows[2]);
}

/// Draw one input field; text is hard-wrapped by characters so the cursor
/// position is exact.
fn draw_field(
    frame: &mut Frame<'_>,
    app: &App,
    field: Field,
    title: &str,
    placeholder: &str,
    area: Rect,
) {
    let focused = app.focus == field;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { SECONDARY } else { BORDER }))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(if focused { SECONDARY } else { TEXT_MUTED }),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 2 || inner.height == 0 {
        return;
    }

    let text = app.board.field(field);
    let width = (inner.width - 1) as usize;
    if text.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {placeholder}"),
                Style::default().fg(TEXT_MUTED),
            ))
            .wrap(Wrap { trim: false }),
            inner,
        );
    } else {
        let chunks = chunk_chars(text, width);
        let (skip, _) = field_cursor(text.chars().count(), width, inner.height as usize);
        let lines: Vec<Line<'_>> = chunks
            .into_iter()
            .skip(skip)
            .map(|chunk| Line::from(Span::styled(format!(" {chunk}"), Style::default().fg(TEXT))))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    if focused {
        let (_, (row, col)) = field_cursor(text.chars().count(), width, inner.height as usize);
        frame.set_cursor_position((inner.x + 1 + col, inner.y + row));
    }
}

/// Rows to skip and the visible `(row, col)` of a cursor sitting after
/// `count` characters wrapped at `width`. The cursor line is always kept in
/// view, so a full last row scrolls up to make room for it.
fn field_cursor(count: usize, width: usize, height: usize) -> (usize, (u16, u16)) {
    let width = width.max(1);
    let cursor_line = count / width;
    let skip = (cursor_line + 1).saturating_sub(height.max(1));
    let row = (cursor_line - skip) as u16;
    let col = (count % width) as u16;
    (skip, (row, col))
}

fn draw_button(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let pending = app.is_pending();
    let (fg, bg) = if pending {
        (TEXT_MUTED, DISABLED)
    } else {
        (Color::Rgb(10, 10, 10), PRIMARY)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if pending { DISABLED } else { PRIMARY }));
    let label = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", app.button_label()),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    )))
    .centered()
    .block(block);
    frame.render_widget(label, area);
}

/// Draw the greeting list with count, footer and scrollbar.
fn draw_list(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let lines = app.render_lines();
    let count = app.board.store().len();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(
            " ▣ Greetings Console ",
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ))
        .title_top(
            Line::from(Span::styled(
                format!(" {count} items "),
                Style::default().fg(TEXT_MUTED),
            ))
            .right_aligned(),
        )
        .title_bottom(
            Line::from(Span::styled(
                " Data is ephemeral and is lost on exit. ",
                Style::default().fg(TEXT_MUTED),
            ))
            .centered(),
        );

    let inner = block.inner(area);
    let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
    let content_height = inner.height as usize;

    let total_lines = Paragraph::new(lines.clone())
        .wrap(Wrap { trim: false })
        .line_count(content_width)
        .max(1);
    let max_scroll = total_lines.saturating_sub(content_height) as u16;
    app.update_scroll_bounds(max_scroll);
    let scroll = app.scroll;

    let list_inner = Rect {
        width: content_width,
        ..inner
    };
    let list = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(block, area);
    frame.render_widget(list, list_inner);

    if total_lines > content_height {
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(total_lines)
            .position(scroll as usize)
            .viewport_content_length(content_height);
        let scrollbar_area = Rect {
            x: inner.x + inner.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(BORDER))
                .thumb_style(Style::default().fg(TEXT_MUTED)),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_color = match app.status.as_str() {
        "processing" => SECONDARY,
        "published" => PRIMARY,
        _ => TEXT_MUTED,
    };

    let shortcuts = vec![
        Span::styled(" Esc", Style::default().fg(TEXT_MUTED)),
        Span::styled(" quit", Style::default().fg(BORDER)),
        Span::styled("  Tab", Style::default().fg(TEXT_MUTED)),
        Span::styled(" field", Style::default().fg(BORDER)),
        Span::styled("  Enter", Style::default().fg(TEXT_MUTED)),
        Span::styled(" publish", Style::default().fg(BORDER)),
        Span::styled("  PgUp/PgDn", Style::default().fg(TEXT_MUTED)),
        Span::styled(" scroll", Style::default().fg(BORDER)),
    ];

    let right_text = format!(" {} ", app.status);
    let right_len = right_text.chars().count() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len.min(area.width),
        ..area
    };

    frame.render_widget(Paragraph::new(Line::from(shortcuts)), left_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(status_color),
        ))),
        right_area,
    );
}

/// Split text into pieces of at most `width` characters.
fn chunk_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
