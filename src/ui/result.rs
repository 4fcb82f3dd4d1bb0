use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::{Mistake, Summary};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = app.summary() else {
        return;
    };
    let grade_color = get_grade_color(summary.percentage);

    let [_, score, mistakes, controls] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .areas(area);

    render_score_summary(frame, score, &summary, grade_color);
    render_mistakes(frame, mistakes, &summary.mistakes, app.result_scroll());
    render_controls(frame, controls);
}

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &Summary, grade_color: Color) {
    let content = vec![
        Line::from(Span::styled(
            "Test Complete!",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            summary.category.name(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", summary.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(format!(
            "You scored {} out of {} questions correctly",
            summary.score, summary.total
        )),
        Line::from(vec![
            Span::styled("Streak at finish: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                summary.streak.to_string(),
                Style::default().fg(Color::LightRed).bold(),
            ),
            Span::styled("   Best streak: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                summary.best_streak.to_string(),
                Style::default().fg(Color::LightRed).bold(),
            ),
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_mistakes(frame: &mut Frame, area: Rect, mistakes: &[Mistake], scroll: usize) {
    if mistakes.is_empty() {
        let widget = Paragraph::new("No mistakes to review.")
            .alignment(Alignment::Center)
            .fg(Color::Green);
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = mistakes
        .iter()
        .skip(scroll)
        .flat_map(|mistake| {
            [
                Line::from(Span::styled(
                    format!("Question {}:", mistake.index + 1),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    mistake.question.as_str(),
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled(
                    format!("Correct answer: {}", mistake.correct_answer),
                    Style::default().fg(Color::Green),
                )),
                Line::from(""),
            ]
        })
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Review Mistakes ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r try again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
