// UI rendering logic
//
// Places the core's plain-text outputs on screen. No colours, no wrapping:
// every row the core hands over is drawn as-is and clipped at the edge.
//
//   ┌ output pane ─────────────────────────┐
//   │ transcript lines                      │
//   │                         [offset/total]│  indicator row
//   │───────────────────────────────────────│
//   │ > input█                              │  input line
//   └───────────────────────────────────────┘
//     task: none │ Idle │ F1: help          status row

use super::app::{App, STATUS_BAR_ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows below the transcript: indicator row, input border, input line
const FOOTER_ROWS: u16 = 3;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    if !app.is_ready() {
        f.render_widget(Paragraph::new("Initializing..."), f.area());
        return;
    }

    let [pane, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_ROWS)]).areas(f.area());

    // Extra reserved rows become blank space above the indicator
    let reserved = u16::try_from(app.scroll().reserved_rows())
        .unwrap_or(u16::MAX)
        .max(FOOTER_ROWS);
    let [output, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(reserved)]).areas(pane);
    let [_, indicator, input] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(footer);

    // With fewer reserved rows than the footer needs, keep the newest lines
    let visible = app.visible_lines();
    let skip = visible.len().saturating_sub(output.height as usize);
    let lines: Vec<Line> = visible.into_iter().skip(skip).map(Line::raw).collect();
    f.render_widget(Paragraph::new(Text::from(lines)), output);

    if let Some(position) = app.scroll_indicator() {
        f.render_widget(
            Paragraph::new(position).alignment(Alignment::Right),
            indicator,
        );
    }

    f.render_widget(
        Paragraph::new(app.input_line()).block(Block::default().borders(Borders::TOP)),
        input,
    );

    f.render_widget(Paragraph::new(app.status_line()), status);
}
