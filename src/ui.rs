use crate::app::App;
use crate::handlers::KEY_HINTS;
use apple_tree::widget::TreeView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::sync::Arc;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_tree(frame, app, outer[0]);
    draw_logs(frame, app, outer[1]);
    draw_status_bar(frame, app, outer[2]);
}

fn draw_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    let snapshot = Arc::clone(&app.snapshot);
    let title = format!(
        " {} ",
        snapshot.class_name.as_deref().unwrap_or("apple-tree")
    );

    let tree = TreeView::new(&snapshot)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_modifier(Modifier::REVERSED | Modifier::BOLD);

    frame.render_stateful_widget(tree, area, &mut app.view_state);
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take(usize::from(area.height.saturating_sub(2)))
        .rev()
        .map(|line| Line::from(line.as_str()))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Log ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let text = format!(
        "{}  | theme={} height={} indent={} slide={} dir={}",
        KEY_HINTS,
        app.preset.name(),
        snapshot.row_height,
        snapshot.scaffold_block_width,
        snapshot.slide_region_size,
        snapshot.row_direction.label(),
    );
    let paragraph = Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Gray));
    frame.render_widget(paragraph, area);
}
