use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::{ResourceBundle, SessionKind};
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(plan) = &app.selected_plan else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Plan Detail ");
        let paragraph = Paragraph::new("No plan selected").block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let constraints = if app.resource_panel.is_some() {
        vec![Constraint::Percentage(50), Constraint::Percentage(50)]
    } else {
        vec![Constraint::Min(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let schedule_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[0]);

    draw_day_list(f, app, plan, schedule_chunks[0]);
    draw_day_detail(f, app, schedule_chunks[1]);

    if let Some((topic_name, bundle)) = &app.resource_panel {
        draw_resources(f, topic_name, &plan.academic_level, bundle, chunks[1]);
    }
}

fn draw_day_list(f: &mut Frame, app: &App, plan: &crate::models::StudyPlan, area: Rect) {
    let items: Vec<ListItem> = app
        .days
        .items
        .iter()
        .map(|day| {
            let full = day.free_hours() < 1.0;
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("Day {:<3}", day.day_number),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{} ", day.date.format("%b %d")),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{}/{}h", day.total_scheduled_hours, day.available_hours),
                    Style::default().fg(if full { Color::Yellow } else { Color::Green }),
                ),
            ]))
        })
        .collect();

    let title = format!(" Exam {} ", plan.exam_date);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.days.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_day_detail(f: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();

    if let Some(day) = app.days.selected_item() {
        if day.topics.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "No study sessions scheduled for this day",
                Style::default().fg(Color::DarkGray),
            ))));
        }

        for (i, topic) in day.topics.iter().enumerate() {
            let cursor = if i == app.topic_cursor { "> " } else { "  " };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(cursor, Style::default().fg(Color::Yellow)),
                Span::styled(
                    topic.topic_name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({}h total)", topic.total_hours),
                    Style::default().fg(Color::Gray),
                ),
            ])));

            for session in &topic.sessions {
                let (label_color, label) = match session.kind {
                    SessionKind::New => (Color::Blue, session.kind.label()),
                    SessionKind::Review => (Color::Green, session.kind.label()),
                };
                items.push(ListItem::new(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{}h ", session.hours),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(label, Style::default().fg(label_color)),
                ])));
            }

            items.push(ListItem::new(Line::from("")));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sessions ")
        .title_style(Style::default().fg(Color::Cyan));

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

fn draw_resources(
    f: &mut Frame,
    topic_name: &str,
    academic_level: &str,
    bundle: &ResourceBundle,
    area: Rect,
) {
    let mut lines = vec![Line::from(vec![
        Span::styled("Category: ", Style::default().fg(Color::Gray)),
        Span::styled(
            bundle.category.label(),
            Style::default().fg(Color::Magenta),
        ),
    ])];

    lines.push(Line::from(Span::styled(
        "How to learn:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for item in &bundle.how_to_learn {
        lines.push(Line::from(format!("  - {}", item)));
    }

    lines.push(Line::from(vec![
        Span::styled(
            "Practice: ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(bundle.practice.amount.clone()),
    ]));
    for item in &bundle.practice.sources {
        lines.push(Line::from(format!("  - {}", item)));
    }

    lines.push(Line::from(Span::styled(
        "Books:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for item in &bundle.book_suggestions {
        lines.push(Line::from(format!("  - {}", item)));
    }

    lines.push(Line::from(vec![
        Span::styled(
            "Key concepts: ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            bundle.key_concepts.join(", "),
            Style::default().fg(Color::Cyan),
        ),
    ]));

    lines.push(Line::from(vec![
        Span::styled(
            "Flashcards: ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "make {}. {}",
            bundle.flashcards.count, bundle.flashcards.tool
        )),
    ]));

    let title = format!(" Study Guide: {} ({}) ", topic_name, academic_level);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
