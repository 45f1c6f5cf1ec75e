// UI module for rendering the TUI.
// Contains widgets for tabs, the search bar, the jobs table, and overlays.

mod modal;
mod table;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Length(3), // Search and repository filter
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Jobs => {
            draw_search_bar(frame, app, chunks[1]);
            table::render_jobs(frame, &mut app.jobs, chunks[2]);
        }
        Tab::Console => {
            let content = chunks[1].union(chunks[2]);
            table::render_console(frame, app.console.messages(), content);
        }
    }

    draw_status_bar(frame, app, chunks[3]);

    if app.visibility.filter_open {
        modal::draw_repo_filter_modal(frame, &mut app.visibility);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        modal::draw_help_overlay(frame);
    }
}

/// Draw the repository filter button and the job name search box.
fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (filter_area, search_area) = if app.visibility.show_filter_control() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(10)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    if let Some(filter_area) = filter_area {
        let shown = app.visibility.visible_repos().len();
        let total = app.visibility.all_repos().len();
        let label = Paragraph::new(format!("{} of {} repos", shown, total))
            .alignment(Alignment::Center)
            .style(Style::default().fg(if shown < total {
                Color::Yellow
            } else {
                Color::White
            }))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" f "),
            );
        frame.render_widget(label, filter_area);
    }

    let border_color = if app.jobs.search_active {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let line = if app.jobs.search.is_empty() && !app.jobs.search_active {
        Line::from(Span::styled(
            "Filter by job name…",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(app.jobs.search.as_str())];
        if app.jobs.search_active {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" / "),
    );
    frame.render_widget(search, search_area);
}

/// Draw the status bar with endpoint, last update, and key hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.endpoint()),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(updated) = app.jobs.query.last_updated() {
        spans.push(Span::styled(
            format!("│ updated {} ", table::format_relative_time(&updated)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(error) = app.jobs.query.last_error() {
        spans.push(Span::styled(
            format!("│ ❌ {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    spans.push(Span::styled(
        "│ ? help  q quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
