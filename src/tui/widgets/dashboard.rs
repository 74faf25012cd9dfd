use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::SessionKind;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Stats + today row
            Constraint::Min(0),    // Recent plans
        ])
        .split(area);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_stats(f, app, top_chunks[0]);
    draw_today(f, app, top_chunks[1]);
    draw_recent_plans(f, app, chunks[1]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;

    let text = vec![
        Line::from(vec![
            Span::styled("Topics: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", stats.total_topics),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Plans: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", stats.total_plans),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Planned hours: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}", stats.total_planned_hours),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Next exam: ", Style::default().fg(Color::Gray)),
            Span::styled(
                stats.next_exam.as_deref().unwrap_or("-").to_string(),
                Style::default().fg(if stats.next_exam.is_some() {
                    Color::Yellow
                } else {
                    Color::White
                }),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Stats ")
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}

fn draw_today(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.today_sessions.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Nothing scheduled today",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.today_sessions
            .iter()
            .flat_map(|topic| {
                topic.sessions.iter().map(|session| {
                    let kind_color = match session.kind {
                        SessionKind::New => Color::Blue,
                        SessionKind::Review => Color::Green,
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:<22}", truncate(&topic.topic_name, 20)),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(
                            format!("{}h ", session.hours),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::styled(session.kind.label(), Style::default().fg(kind_color)),
                    ]))
                })
            })
            .collect()
    };

    let title = format!(" Today ({}) ", Local::now().date_naive());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Yellow));

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

fn draw_recent_plans(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .plans
        .items
        .iter()
        .take(10)
        .map(|plan| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<4}", plan.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("exam {:<12}", plan.exam_date.to_string()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{}h/day  ", plan.daily_hours),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    truncate(&plan.academic_level, 24),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Plans ")
        .title_style(Style::default().fg(Color::Magenta));

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
