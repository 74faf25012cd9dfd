use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::Priority;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .topics
        .items
        .iter()
        .map(|topic| {
            let priority_color = match topic.priority {
                Priority::High => Color::Red,
                Priority::Medium => Color::Yellow,
                Priority::Low => Color::Green,
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<5}", topic.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<40}", truncate(&topic.name, 38)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<8}", topic.priority.label()),
                    Style::default().fg(priority_color),
                ),
                Span::styled(format!("{}h", topic.hours), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();

    let title = format!(" Topics ({}) ", app.topics.items.len());
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
    state.select(app.topics.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
