//! Stateless UI rendering for the terminal game.

use super::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tactoe_core::{Player, Position, Snapshot, Square};

const CONFETTI: [char; 5] = ['*', '+', '.', 'o', '~'];
const CONFETTI_COLORS: [Color; 5] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::LightRed,
];

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Banner
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let banner = Paragraph::new(app.banner())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[1]);

    if let Some(snapshot) = app.snapshot() {
        draw_board(frame, chunks[2], snapshot, app);
    }
    if app.celebrating() {
        draw_confetti(frame, chunks[2], app.tick());
    }

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new("Arrows + Enter or 1-9: move | R: play again | Q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, app: &App) {
    let board_area = center_rect(area, 41, 11);

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

    for row in 0..3 {
        draw_row(frame, rows[row * 2], snapshot, app, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, snapshot: &Snapshot, app: &App, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_row_col(row, col) {
            draw_cell(frame, cols[col * 2], snapshot, app, pos);
        }
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, snapshot: &Snapshot, app: &App, pos: Position) {
    let (symbol, mut style) = match snapshot.board.get(pos) {
        Square::Empty => (
            format!("{}", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    if snapshot.is_winning(pos) {
        // Terminals without blink support still see the color alternate.
        let lit = (app.tick() / 300) % 2 == 0;
        style = style
            .fg(if lit { Color::Yellow } else { Color::White })
            .add_modifier(Modifier::SLOW_BLINK);
    }
    if snapshot.fading[pos.to_index()] {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }
    if pos == app.cursor() && snapshot.result().is_none() {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let text = vec![
        Line::default(),
        Line::from(Span::styled(format!("  {}  ", symbol), style)),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_confetti(frame: &mut Frame, area: Rect, tick: u128) {
    let height = area.height.max(1) as usize;
    let drift = (tick / 120) as usize % height;
    let lines: Vec<Line> = (0..area.height as usize)
        .map(|y| {
            let spans: Vec<Span> = (0..area.width as usize)
                .map(|x| {
                    // Sparse scatter that drifts down one row per frame.
                    let seed = x * 31 + (y + height - drift) * 17;
                    if seed % 11 == 0 {
                        let i = (seed / 11) % CONFETTI.len();
                        Span::styled(
                            CONFETTI[i].to_string(),
                            Style::default().fg(CONFETTI_COLORS[i]),
                        )
                    } else {
                        Span::raw(" ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    // Only the edge columns, so the board stays readable.
    let side = area.width.saturating_sub(41) / 2;
    for rect in [
        Rect { width: side, ..area },
        Rect {
            x: area.x + area.width.saturating_sub(side),
            width: side,
            ..area
        },
    ] {
        frame.render_widget(Paragraph::new(lines.clone()), rect);
    }
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); 3])
        .style(Style::default().fg(Color::DarkGray));
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
