// Modal UI components.
// Repository filter dialog and help overlay drawn over the current view.

use ratatui::{prelude::*, widgets::*};

use crate::state::VisibilityState;

/// Centered rectangle of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the repository filter modal on top of the current view.
pub fn draw_repo_filter_modal(frame: &mut Frame, visibility: &mut VisibilityState) {
    let modal_height = (visibility.all_repos().len() as u16).saturating_add(5).min(20);
    let modal_area = centered(frame.area(), 60, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Repository list
            Constraint::Length(2), // Instructions
        ])
        .split(modal_area);

    let visible_count = visibility.visible_repos().len();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " Repositories ({}/{} shown) ",
            visible_count,
            visibility.all_repos().len()
        ));

    let items: Vec<ListItem> = visibility
        .all_repos()
        .iter()
        .map(|address| {
            let (checkbox, style) = if visibility.is_visible(address) {
                ("[x] ", Style::default().fg(Color::White))
            } else {
                ("[ ] ", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(checkbox, Style::default().fg(Color::Yellow)),
                Span::styled(address.as_key(), style),
            ]))
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, chunks[0], &mut visibility.list_state);

    let instructions = Line::from(vec![
        Span::styled(" Space", Style::default().fg(Color::Yellow)),
        Span::styled(" = Toggle  ", Style::default().fg(Color::DarkGray)),
        Span::styled("a", Style::default().fg(Color::Yellow)),
        Span::styled(" = Show all  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Close ", Style::default().fg(Color::DarkGray)),
    ]);

    let instructions_widget = Paragraph::new(instructions)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(instructions_widget, chunks[1]);
}

/// Draw the key binding help overlay.
pub fn draw_help_overlay(frame: &mut Frame) {
    let bindings = [
        ("/", "Filter by job name"),
        ("Esc", "Clear the filter"),
        ("f", "Choose repositories"),
        ("j/k ↑/↓", "Move selection"),
        ("Enter", "Collapse or expand repository"),
        ("r", "Refresh now"),
        ("Tab", "Switch tab"),
        ("q", "Quit"),
    ];

    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let area = centered(frame.area(), 48, bindings.len() as u16 + 2);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help "),
        ),
        area,
    );
}
