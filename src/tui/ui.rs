//! Stateless UI rendering for the game screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::App;
use crate::game::{GameStatus, Mark, Square};
use crate::session::GameSession;

/// Renders the full game screen: title, board, status, and analysis panel.
pub fn draw(frame: &mut Frame, session: &GameSession, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(13), // Board
            Constraint::Length(4),  // Status
            Constraint::Min(0),     // Analysis
        ])
        .split(area);

    // Title
    let title = Paragraph::new("Noughts - Tic-Tac-Toe vs AI")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // Board
    draw_board(frame, chunks[1], session, app.cursor());

    // Status
    draw_status(frame, chunks[2], session, app);

    // Analysis
    if app.show_analysis() {
        if let Some(commentary) = session.commentary() {
            let panel = Paragraph::new(commentary)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title("Model analysis ('a' to hide)")
                        .borders(Borders::ALL),
                );
            frame.render_widget(panel, chunks[3]);
        }
    }
}

fn draw_status(frame: &mut Frame, area: Rect, session: &GameSession, app: &App) {
    let status = if app.thinking() {
        "Model is thinking...".to_string()
    } else {
        match session.status() {
            GameStatus::InProgress => {
                "Your move (X): arrows + Enter, or 1-9. 'a' analysis, 'n' new game, 'q' quit."
                    .to_string()
            }
            GameStatus::Won(Mark::X) => "You won! Press 'n' for a new game.".to_string(),
            GameStatus::Won(Mark::O) => "The model won. Press 'n' for a new game.".to_string(),
            GameStatus::Tie => "It's a tie. Press 'n' for a new game.".to_string(),
        }
    };

    let mut lines = vec![Line::from(Span::styled(
        status,
        Style::default().fg(Color::Yellow),
    ))];
    if let Some(notice) = session.notice() {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let status_text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, area);
}

fn draw_board(frame: &mut Frame, area: Rect, session: &GameSession, cursor: usize) {
    // Center the board
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    draw_row(frame, rows[0], session, cursor, [0, 1, 2]);
    draw_separator(frame, rows[1]);
    draw_row(frame, rows[2], session, cursor, [3, 4, 5]);
    draw_separator(frame, rows[3]);
    draw_row(frame, rows[4], session, cursor, [6, 7, 8]);
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    cursor: usize,
    cells: [usize; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], session, cursor, cells[0]);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], session, cursor, cells[1]);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], session, cursor, cells[2]);
}

fn draw_cell(frame: &mut Frame, area: Rect, session: &GameSession, cursor: usize, cell: usize) {
    // Callers only pass cells 0..=8.
    let square = session.board().squares()[cell];

    let (symbol, base_style) = match square {
        // Empty cells show their key binding.
        Square::Empty => (
            format!(" {} ", cell + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Mark::X) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Mark::O) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if cell == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─────────────────────────────────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
