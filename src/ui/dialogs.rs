//! Dialog overlays for choices and notices.
//!
//! Provides the modal list used for format/profile selection and the message
//! box used for notices.

use super::{centered_rect, ChoiceState};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

/// Renders the choice dialog overlay.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `state` - Items and cursor of the open choice
pub fn render_choice_dialog(frame: &mut Frame, state: &ChoiceState) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", state.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Item list
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("Available ({}):", state.items.len()),
            Style::default().fg(Color::White),
        )),
        chunks[0],
    );

    let visible_height = chunks[2].height as usize;
    let start_idx = state.scroll;
    let end_idx = (start_idx + visible_height).min(state.items.len());

    let items: Vec<ListItem> = state.items[start_idx..end_idx]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let is_selected = start_idx + i == state.selected;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if is_selected { "> " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(name.as_str(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), chunks[2]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[Up/Down]", Style::default().fg(Color::Yellow)),
            Span::styled(" Navigate  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::styled(" OK  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::styled(" Cancel", Style::default().fg(Color::DarkGray)),
        ])),
        chunks[3],
    );
}

/// Renders a notice overlay.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `title` - Dialog title
/// * `message` - Message text; embedded newlines start new lines
pub fn render_notice_dialog(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Min(2),    // Message
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    let lines: Vec<Line> = message
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::White))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[1]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::styled(" OK", Style::default().fg(Color::DarkGray)),
        ])),
        chunks[2],
    );
}
