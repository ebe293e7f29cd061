use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::domain::primitive::SessionState;
use crate::infrastructure::layout::wrap_line;

/// Phosphor green.
const PHOSPHOR: Color = Color::Rgb(51, 255, 102);
const PHOSPHOR_DIM: Color = Color::Rgb(20, 110, 45);

/// Inner size of the screen block, i.e. the area text is wrapped into.
pub fn inner_area(area: Rect) -> Rect {
    screen_block().inner(area)
}

fn screen_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(PHOSPHOR_DIM))
        .title(Span::styled(
            " RETROTERM ",
            Style::default().fg(PHOSPHOR).add_modifier(Modifier::BOLD),
        ))
}

/// Wrap `text` to `cols` and keep the last `rows` rows, so the newest output
/// and the prompt stay on screen.
pub fn visible_rows(text: &str, cols: usize, rows: usize) -> Vec<String> {
    let wrapped: Vec<String> = text.lines().flat_map(|line| wrap_line(line, cols)).collect();
    let skip = wrapped.len().saturating_sub(rows);
    wrapped.into_iter().skip(skip).collect()
}

pub fn render(frame: &mut Frame, area: Rect, text: &str) {
    let block = screen_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let style = Style::default().fg(PHOSPHOR).bg(Color::Black);
    let lines: Vec<Line> = visible_rows(text, inner.width as usize, inner.height as usize)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(style), inner);
}

/// Status bar: session state on the left, key hints on the right.
pub fn render_status(frame: &mut Frame, area: Rect, state: SessionState) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let state_style = match state {
        SessionState::Revealing => Style::default()
            .fg(Color::Black)
            .bg(PHOSPHOR)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(PHOSPHOR).add_modifier(Modifier::BOLD),
    };
    let hint_style = Style::default().fg(PHOSPHOR_DIM);
    let line = Line::from(vec![
        Span::styled(format!(" {} ", state.status_text()), state_style),
        Span::styled(" Enter:submit Esc:clear Ctrl+C:quit ", hint_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
