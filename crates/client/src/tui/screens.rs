use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use pong::{ConnectionState, GameMode, TableState};

use super::Hud;

const TABLE_HALF_WIDTH: f64 = 6.5;
const TABLE_HALF_HEIGHT: f64 = 5.5;
const WALL_Y: f64 = 5.0;
const PADDLE_HALF_HEIGHT: f64 = 0.75;
const PADDLE_WIDTH: f64 = 0.2;
const BALL_RADIUS: f64 = 0.15;

#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub mode: Option<GameMode>,
    pub connection: Option<ConnectionState>,
    pub role: Option<String>,
    pub fps: f32,
    pub sample_rate: f32,
    pub snapshot_rate: f32,
}

pub struct View<'a> {
    pub hud: &'a Hud,
    pub table: Option<&'a TableState>,
    pub fading: bool,
    pub status: StatusLine,
}

pub fn render(frame: &mut Frame, view: &View<'_>) {
    let area = frame.area();

    let block = Block::default()
        .title(" Pong ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    if let Some(table) = view.table {
        if view.hud.score_visible {
            render_score(frame, chunks[0], table);
        }
        render_table(frame, chunks[1], table);
    }

    render_status(frame, chunks[2], &view.status);

    if view.hud.menu_visible {
        render_menu(frame, chunks[1], view.hud.selected, view.fading);
    }

    if let Some(message) = &view.hud.notification {
        render_notification(frame, area, message);
    }
}

fn render_score(frame: &mut Frame, area: Rect, table: &TableState) {
    let score = Line::from(vec![
        Span::styled("P1 ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}  :  {}", table.score.p1, table.score.p2),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" P2", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(score).alignment(Alignment::Center), area);
}

fn render_table(frame: &mut Frame, area: Rect, table: &TableState) {
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-TABLE_HALF_WIDTH, TABLE_HALF_WIDTH])
        .y_bounds([-TABLE_HALF_HEIGHT, TABLE_HALF_HEIGHT])
        .paint(|ctx| {
            for y in [-WALL_Y, WALL_Y] {
                ctx.draw(&CanvasLine {
                    x1: -TABLE_HALF_WIDTH,
                    y1: y,
                    x2: TABLE_HALF_WIDTH,
                    y2: y,
                    color: Color::DarkGray,
                });
            }

            for paddle in table.paddles() {
                ctx.draw(&Rectangle {
                    x: paddle.x as f64 - PADDLE_WIDTH / 2.0,
                    y: paddle.y as f64 - PADDLE_HALF_HEIGHT,
                    width: PADDLE_WIDTH,
                    height: PADDLE_HALF_HEIGHT * 2.0,
                    color: Color::Cyan,
                });
            }

            ctx.draw(&Circle {
                x: table.ball.position.x as f64,
                y: table.ball.position.y as f64,
                radius: BALL_RADIUS,
                color: Color::White,
            });
        });

    frame.render_widget(canvas, area);
}

fn render_menu(frame: &mut Frame, area: Rect, selected: usize, fading: bool) {
    let labels = GameMode::ALL
        .iter()
        .map(|mode| mode.label())
        .chain(std::iter::once("Quit"));

    let items: Vec<ListItem> = labels
        .enumerate()
        .map(|(i, label)| {
            let item = ListItem::new(format!("  {}", label));
            if fading {
                item.style(Style::default().fg(Color::DarkGray))
            } else if i == selected {
                item.style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item.style(Style::default().fg(Color::White))
            }
        })
        .collect();

    let menu_area = centered_rect(32, items.len() as u16 + 4, area);
    frame.render_widget(Clear, menu_area);

    let menu = List::new(items).block(
        Block::default()
            .title(" Select Mode ")
            .title_bottom(" ↑↓ Navigate  Enter Select ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(menu, menu_area);
}

fn render_status(frame: &mut Frame, area: Rect, status: &StatusLine) {
    let mode = status.mode.map(GameMode::label).unwrap_or("Menu");
    let mut text = format!("{}  |  {:.0} fps", mode, status.fps);

    if let Some(connection) = status.connection {
        text.push_str(&format!(
            "  |  {:?}  |  {:.0} samples/s  {:.0} snapshots/s",
            connection, status.sample_rate, status.snapshot_rate
        ));
    }
    if let Some(role) = &status.role {
        text.push_str(&format!("  |  role: {}", role));
    }

    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

fn render_notification(frame: &mut Frame, area: Rect, message: &str) {
    let dialog_area = centered_rect(40, 7, area);
    frame.render_widget(Clear, dialog_area);

    let dialog = Block::default()
        .title(" Game Over ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = dialog.inner(dialog_area);
    frame.render_widget(dialog, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let text = Paragraph::new(message)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(text, chunks[0]);

    let help = Paragraph::new("Enter OK")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use pong::Presentation;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_menu_lists_every_mode() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let hud = Hud::new();
        let view = View {
            hud: &hud,
            table: None,
            fading: false,
            status: StatusLine::default(),
        };

        terminal.draw(|frame| render(frame, &view)).unwrap();
        let text = buffer_text(&terminal);
        for mode in GameMode::ALL {
            assert!(text.contains(mode.label()), "missing {}", mode.label());
        }
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_score_and_notification() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut hud = Hud::new();
        hud.hide_menu();
        hud.show_score();
        hud.notify("P1 wins!");

        let mut table = TableState::default();
        table.score.p1 = 3;
        table.score.p2 = 1;

        let view = View {
            hud: &hud,
            table: Some(&table),
            fading: false,
            status: StatusLine::default(),
        };

        terminal.draw(|frame| render(frame, &view)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("3  :  1"));
        assert!(text.contains("P1 wins!"));
    }
}
