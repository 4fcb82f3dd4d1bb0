use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::Category;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(72),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, title, categories, rules, notice, controls, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(Category::ALL.len() as u16 + 2),
        Constraint::Length(4),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(center);

    render_title(frame, title);
    render_categories(frame, categories, app);
    render_rules(frame, rules, app);
    render_notice(frame, notice, app.notice());
    render_controls(frame, controls);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "PROGRAMMING APTITUDE TEST",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Choose a category to begin".fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_categories(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = Category::ALL
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let is_highlighted = index == app.category_cursor();
            let is_chosen = app.selected_category() == Some(*category);

            let style = match (is_chosen, is_highlighted) {
                (true, _) => Style::default().fg(Color::Green).bold(),
                (false, true) => Style::default().fg(Color::Cyan).bold(),
                (false, false) => Style::default().fg(Color::Gray),
            };
            let marker = if is_highlighted { ">" } else { " " };
            let check = if is_chosen { "[x]" } else { "[ ]" };
            let count = category.question_count(app.questions());

            Line::from(vec![
                Span::styled(format!(" {} {} ", marker, check), style),
                Span::styled(format!("{:<22}", category.name()), style),
                Span::styled(format!("{} questions", count), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Categories ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_rules(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.timer_config();
    let questions = match app.selected_category() {
        Some(category) => format!("{} Questions", category.question_count(app.questions())),
        None => "Select Category".to_string(),
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} Seconds", config.time_limit), Style::default().bold()),
            Span::styled(" per question  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Hints", Style::default().bold()),
            Span::styled(
                format!(" after {} seconds  ·  ", config.hint_delay),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(questions, Style::default().bold()),
        ]),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_notice(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let Some(notice) = notice else {
        return;
    };

    let widget = Paragraph::new(notice)
        .alignment(Alignment::Center)
        .fg(Color::Red)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k navigate  ·  space choose  ·  enter start  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
