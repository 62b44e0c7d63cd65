//! Terminal UI rendering with ratatui

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use rust_block_game::game::{Game, GameState};
use rust_block_game::settings::Settings;
use rust_block_game::tetromino::{Rotation, TetrominoType};

const EMPTY: &str = "  ";

/// Width of the side panel holding the preview and stats
const SIDE_WIDTH: u16 = 16;

/// Get the color for a tetromino
pub fn piece_color(piece_type: TetrominoType) -> Color {
    match piece_type {
        TetrominoType::I => Color::Cyan,
        TetrominoType::O => Color::Yellow,
        TetrominoType::T => Color::Magenta,
        TetrominoType::S => Color::Green,
        TetrominoType::Z => Color::Red,
        TetrominoType::J => Color::Blue,
        TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
    }
}

/// Render the whole game screen
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let board = game.board();

    // Each cell is two characters wide, plus borders
    let board_width = board.width() as u16 * 2 + 2;
    let board_height = board.height() as u16 + 2;
    let game_area = center_rect(area, board_width + SIDE_WIDTH, board_height);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Length(SIDE_WIDTH)])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if settings.visual.show_preview { 5 } else { 0 }),
            Constraint::Min(6),
        ])
        .split(main_layout[1]);

    if settings.visual.show_preview {
        let (block_char, _) = settings.visual.block_chars();
        render_next(frame, right_layout[0], game.preview(1).first().copied(), block_char);
    }
    render_stats(frame, right_layout[1], game);

    if game.state() == GameState::GameOver {
        render_overlay(frame, area, "GAME OVER", "R to restart, Q to quit");
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();

    let block = Block::default()
        .title(" BLOCKS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Where the falling piece would come to rest
    let ghost = game
        .active_piece()
        .filter(|_| settings.visual.show_ghost)
        .map(|piece| {
            let mut landed = piece.clone();
            landed.row = piece.landing_row(game.board());
            (piece.piece_type, landed.cells())
        });

    let lines: Vec<Line> = game
        .snapshot()
        .merged()
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .into_iter()
                .enumerate()
                .map(|(col, cell)| {
                    let pos = (row as i32, col as i32);
                    match (cell, &ghost) {
                        (Some(piece_type), _) => {
                            Span::styled(block_char, Style::default().fg(piece_color(piece_type)))
                        }
                        (None, Some((piece_type, ghost_cells))) if ghost_cells.contains(&pos) => {
                            Span::styled(
                                ghost_char,
                                Style::default().fg(piece_color(*piece_type)).dim(),
                            )
                        }
                        (None, _) => Span::raw(EMPTY),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the upcoming piece
fn render_next(frame: &mut Frame, area: Rect, next: Option<TetrominoType>, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(piece_type) = next else {
        return;
    };

    let cells = piece_type.cells(Rotation::North);
    let min_row = cells.iter().map(|(r, _)| *r).min().unwrap_or(0);
    let color = piece_color(piece_type);

    // Build exactly 2 lines (every shape is 2 rows tall at spawn)
    let lines: Vec<Line> = (0..2)
        .map(|row_offset| {
            let spans: Vec<Span> = (0..4)
                .map(|col| {
                    if cells.contains(&(min_row + row_offset, col)) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.lines_cleared()),
            Style::default().fg(Color::Green).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("PIECES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.pieces_locked()),
            Style::default().fg(Color::Cyan),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render a centered message box over the board
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let width = (subtitle.len() as u16 + 4).max(20);
    let overlay_area = center_rect(area, width, 5);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Red).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Clear, overlay_area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        overlay_area,
    );
}
