use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::render::LineKind;
use crate::session::Theme;
use crate::tui::state::UiState;

fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Default => Color::Green,
        Theme::Red => Color::Red,
        Theme::Blue => Color::Blue,
    }
}

fn line_style(kind: LineKind, theme: Theme) -> Style {
    match kind {
        LineKind::Output => Style::default().fg(accent(theme)),
        LineKind::CommandEcho => Style::default()
            .fg(accent(theme))
            .add_modifier(Modifier::BOLD),
        LineKind::Success => Style::default().fg(Color::LightGreen),
        LineKind::Error => Style::default().fg(Color::LightRed),
    }
}

pub fn draw(frame: &mut Frame<'_>, state: &UiState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());
    let log_area = outer[0];
    let input_area = outer[1];

    if state.matrix_on {
        draw_rain(frame, state, log_area);
    }

    let text: Vec<Line> = state
        .lines
        .iter()
        .map(|l| Line::styled(l.text.clone(), line_style(l.kind, state.theme)))
        .collect();
    let total = text.len() as u16;
    let offset = total
        .saturating_sub(log_area.height)
        .saturating_sub(state.scroll_back.min(total));
    frame.render_widget(Paragraph::new(text).scroll((offset, 0)), log_area);

    let busy_marker = if state.busy { "…" } else { "" };
    let input_line = format!("{}{}{}", state.prompt, state.input, busy_marker);
    frame.render_widget(
        Paragraph::new(Line::styled(
            input_line,
            Style::default()
                .fg(accent(state.theme))
                .add_modifier(Modifier::BOLD),
        )),
        input_area,
    );
    if !state.editor.is_open() {
        let cursor_x = input_area
            .x
            .saturating_add((state.prompt.len() + state.input.len()) as u16)
            .min(input_area.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, input_area.y));
    }

    if let Some(buf) = state.editor.buffer() {
        let overlay = centered_rect(frame.area(), 80, 80);
        frame.render_widget(Clear, overlay);
        let block = Block::default()
            .title(format!("GNU nano 5.4  {}  Modified", buf.filename))
            .title_bottom("^O Write Out   ^X Exit")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White));
        frame.render_widget(
            Paragraph::new(buf.content.clone())
                .block(block)
                .wrap(Wrap { trim: false }),
            overlay,
        );
    }
}

fn draw_rain(frame: &mut Frame<'_>, state: &UiState, area: Rect) {
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);
    for (col, row, glyph) in state.rain.glyphs() {
        let x = area.x.saturating_add(col);
        let y = area.y.saturating_add(row);
        if x < area.right() && y < area.bottom() {
            if let Some(cell) = frame.buffer_mut().cell_mut((x, y)) {
                cell.set_char(glyph).set_style(style);
            }
        }
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
