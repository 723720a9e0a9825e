//! UI rendering using ratatui
//!
//! One screen: scores, the board, the rack, a feedback line and key help.

use crate::app::{display_letter, App, FeedbackKind, Focus};
use crate::game::{bonus_at, Bonus, Tile, BOARD_SIZE};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Width of one square, borders included
const SQUARE_WIDTH: u16 = 5;
/// Height of one square: borders plus letter and value lines
const SQUARE_HEIGHT: u16 = 4;

/// Render the game screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header with scores
            Constraint::Length(1),             // Spacer
            Constraint::Length(SQUARE_HEIGHT), // Board
            Constraint::Length(1),             // Spacer
            Constraint::Length(SQUARE_HEIGHT), // Rack
            Constraint::Length(1),             // Spacer
            Constraint::Length(1),             // Feedback
            Constraint::Length(1),             // Bag count
            Constraint::Min(0),                // Remaining space
            Constraint::Length(2),             // Footer
        ])
        .margin(1)
        .split(area);

    render_header(frame, layout[0], app);
    render_board(frame, layout[2], app);
    render_rack(frame, layout[4], app);

    let feedback = Paragraph::new(app.feedback.as_str())
        .style(Style::default().fg(feedback_color(app.feedback_kind)))
        .alignment(Alignment::Center);
    frame.render_widget(feedback, layout[6]);

    let bag = Paragraph::new(format!(
        "Tiles left in bag: {}",
        app.game().inventory().total_remaining()
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(bag, layout[7]);

    let footer = Paragraph::new(
        "←→ Move  Tab Rack/Board  Space Pick/Drop  Bksp To rack  Enter Submit  n New game  Esc Cancel/Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[9]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Logo
            Constraint::Min(20),    // Word score
            Constraint::Length(16), // Total score
        ])
        .split(inner);

    let logo = Paragraph::new("TILELINE")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(logo, header_layout[0]);

    let word = Paragraph::new(format!("Word: {}", app.word_score))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(word, header_layout[1]);

    let total = Paragraph::new(format!("Total: {}", app.total_score))
        .style(Style::default().fg(Color::Magenta).bold())
        .alignment(Alignment::Right);
    frame.render_widget(total, header_layout[2]);
}

fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let squares = square_row(area, BOARD_SIZE);

    for (index, cell) in squares.iter().enumerate() {
        let tile = app.game().board().get(index);
        let is_cursor = app.focus == Focus::Board && app.board_cursor == index;
        let is_held = tile.is_some_and(|t| Some(t.id) == app.held);

        let (lines, base) = match (tile, bonus_at(index)) {
            (Some(tile), _) => (tile_lines(tile), Style::default().fg(Color::White).bold()),
            (None, Some(bonus)) => (
                vec![Line::from(bonus.label()), Line::from("")],
                Style::default().fg(bonus_color(bonus)),
            ),
            (None, None) => (vec![Line::from(""), Line::from("")], Style::default()),
        };

        render_square(frame, *cell, lines, base, is_cursor, is_held);
    }
}

fn render_rack(frame: &mut Frame, area: Rect, app: &App) {
    let rack = app.game().rack();
    if rack.is_empty() {
        let empty = Paragraph::new("Rack is empty")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let squares = square_row(area, rack.len());
    for (i, (tile, cell)) in rack.iter().zip(squares.iter()).enumerate() {
        let is_cursor = app.focus == Focus::Rack && app.rack_cursor == i;
        let is_held = Some(tile.id) == app.held;
        render_square(
            frame,
            *cell,
            tile_lines(tile),
            Style::default().fg(Color::Yellow).bold(),
            is_cursor,
            is_held,
        );
    }
}

/// Split `area` into `count` centered squares
fn square_row(area: Rect, count: usize) -> Vec<Rect> {
    let constraints = std::iter::once(Constraint::Min(0))
        .chain(std::iter::repeat_n(Constraint::Length(SQUARE_WIDTH), count))
        .chain(std::iter::once(Constraint::Min(0)));

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    cells[1..=count].to_vec()
}

fn render_square(
    frame: &mut Frame,
    area: Rect,
    lines: Vec<Line<'static>>,
    style: Style,
    is_cursor: bool,
    is_held: bool,
) {
    let border_style = if is_cursor {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let style = if is_held {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };

    let square = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(square, area);
}

fn tile_lines(tile: &Tile) -> Vec<Line<'static>> {
    vec![
        Line::from(display_letter(tile.letter).to_string()),
        Line::from(tile.value.to_string()),
    ]
}

fn bonus_color(bonus: Bonus) -> Color {
    match bonus {
        Bonus::DoubleWord => Color::Red,
        Bonus::DoubleLetter => Color::Cyan,
    }
}

/// Color for a feedback message
fn feedback_color(kind: FeedbackKind) -> Color {
    match kind {
        FeedbackKind::Accepted => Color::Green,
        FeedbackKind::Rejected => Color::Red,
        FeedbackKind::Holding => Color::Yellow,
        FeedbackKind::Info => Color::White,
    }
}
