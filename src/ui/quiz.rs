use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::SessionState;
use crate::models::{Category, Question};

const OPTION_LABELS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let question = session.current_question();

    let hint_height = if session.hint_revealed() { 4 } else { 0 };
    let explanation_height = if session.explanation_visible() { 5 } else { 0 };

    let [timer, header, badge, text, hint, options, explanation, controls] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Length(hint_height),
        Constraint::Fill(1),
        Constraint::Length(explanation_height),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(area);

    render_timer(frame, timer, session, app.timer_config().time_limit);
    render_header(frame, header, session);
    render_badge(frame, badge, question.category);
    render_question_text(frame, text, &question.text);
    if session.hint_revealed() {
        render_hint(frame, hint, &question.hint);
    }
    render_options(frame, options, question, session.selected_answer(), app.selected_option());
    if session.explanation_visible() {
        render_explanation(frame, explanation, &question.explanation);
    }
    render_controls(frame, controls, session);
}

fn render_timer(frame: &mut Frame, area: Rect, session: &SessionState, time_limit: u32) {
    let time_left = session.time_left();
    let ratio = f64::from(time_left) / f64::from(time_limit.max(1));

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(timer_color(time_left)).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(widget, area);
}

fn render_header(frame: &mut Frame, area: Rect, session: &SessionState) {
    let [progress, status] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let progress_text = Line::from(vec![
        Span::styled("Question ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", session.current_index() + 1, session.total_questions()),
            Style::default().fg(Color::White).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(progress_text), progress);

    let status_text = Line::from(vec![
        Span::styled("Streak ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            session.streak().to_string(),
            Style::default().fg(Color::LightRed).bold(),
        ),
        Span::styled("   Time Left ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_time(session.time_left()),
            Style::default().fg(timer_color(session.time_left())).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(status_text).alignment(Alignment::Right), status);
}

fn render_badge(frame: &mut Frame, area: Rect, category: Category) {
    let color = match category {
        Category::LogicalThinking => Color::Magenta,
        Category::Dsa => Color::Blue,
        Category::JavaScriptConcepts => Color::Green,
    };

    let badge = Span::styled(
        format!(" {} ", category.name()),
        Style::default().fg(Color::Black).bg(color),
    );
    frame.render_widget(Paragraph::new(Line::from(badge)), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_hint(frame: &mut Frame, area: Rect, hint: &str) {
    let widget = Paragraph::new(hint)
        .wrap(Wrap { trim: true })
        .fg(Color::Yellow)
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Color::Yellow)
                .title(" Hint ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    answer: Option<&str>,
    selected: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let (marker, style) = option_style(question, option, answer, index == selected);
        let label = OPTION_LABELS.get(index).copied().unwrap_or('-');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Before answering only the cursor is shown; afterwards the chosen option is
/// marked right or wrong and the correct one is highlighted.
fn option_style(
    question: &Question,
    option: &str,
    answer: Option<&str>,
    is_highlighted: bool,
) -> (&'static str, Style) {
    let Some(answer) = answer else {
        return if is_highlighted {
            (">", Style::default().fg(Color::Cyan).bold())
        } else {
            (" ", Style::default().fg(Color::Gray))
        };
    };

    let is_correct = question.is_correct(option);
    if option == answer {
        if is_correct {
            ("+", Style::default().fg(Color::Green).bold())
        } else {
            ("x", Style::default().fg(Color::Red).bold())
        }
    } else if is_correct {
        (" ", Style::default().fg(Color::Green))
    } else {
        (" ", Style::default().fg(Color::DarkGray))
    }
}

fn render_explanation(frame: &mut Frame, area: Rect, explanation: &str) {
    let widget = Paragraph::new(explanation)
        .wrap(Wrap { trim: true })
        .fg(Color::LightBlue)
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Color::Blue)
                .title(" Explanation ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, session: &SessionState) {
    let text = if session.is_answered() {
        let next = if session.is_last_question() {
            "Finish Test"
        } else {
            "Next Question"
        };
        format!("enter {}  ·  q quit", next)
    } else {
        "j/k navigate  ·  enter select  ·  q quit".to_string()
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn timer_color(time_left: u32) -> Color {
    match time_left {
        31.. => Color::Green,
        11..=30 => Color::Yellow,
        _ => Color::Red,
    }
}

fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(60), "1:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(5), "0:05");
        assert_eq!(format_time(125), "2:05");
    }

    #[test]
    fn test_timer_color_thresholds() {
        assert_eq!(timer_color(60), Color::Green);
        assert_eq!(timer_color(31), Color::Green);
        assert_eq!(timer_color(30), Color::Yellow);
        assert_eq!(timer_color(11), Color::Yellow);
        assert_eq!(timer_color(10), Color::Red);
        assert_eq!(timer_color(0), Color::Red);
    }
}
