use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .plans
        .items
        .iter()
        .map(|plan| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<5}", plan.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("exam {:<12}", plan.exam_date.to_string()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<8}", format!("{}h/day", plan.daily_hours)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    truncate(&plan.academic_level, 30),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let title = format!(" Plans ({}) ", app.plans.items.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Cyan));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.plans.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
