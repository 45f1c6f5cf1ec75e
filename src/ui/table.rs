// Jobs table rendering.
// Draws repository sections with their jobs, plus the loading and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::overview::OverviewContent;
use crate::state::{ConsoleLevel, ConsoleMessage, JobsTabState, TableRow};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("\n⏳ {}", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Render an empty state with a title and description.
pub fn render_empty(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("🔍 {}", title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

/// Render the jobs overview body for whatever state the pipeline selected.
pub fn render_jobs(frame: &mut Frame, jobs: &mut JobsTabState, area: Rect) {
    if matches!(jobs.content(), OverviewContent::Populated(_)) {
        render_jobs_table(frame, jobs, area);
        return;
    }

    match jobs.content() {
        OverviewContent::Loading => {
            render_loading(frame, area, crate::overview::presentation::LOADING_MESSAGE)
        }
        content => render_empty(
            frame,
            area,
            content.title().unwrap_or_default(),
            &content.message().unwrap_or_default(),
        ),
    }
}

fn render_jobs_table(frame: &mut Frame, jobs: &mut JobsTabState, area: Rect) {
    let rows: Vec<Row> = jobs.rows().iter().map(table_row).collect();
    let repo_count = jobs.content().buckets().len();
    let job_count: usize = jobs.content().buckets().iter().map(|b| b.jobs.len()).sum();

    let header = Row::new(vec!["Name", "Type"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(10)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {} jobs in {} repositories ",
            job_count, repo_count
        )))
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut jobs.table_state);
}

fn table_row(row: &TableRow) -> Row<'static> {
    match row {
        TableRow::Repo {
            address,
            job_count,
            collapsed,
        } => {
            let marker = if *collapsed { "▸" } else { "▾" };
            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::raw(format!("{} ", marker)),
                    Span::styled(
                        address.as_key(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])),
                Cell::from(Span::styled(
                    format!("{} jobs", job_count),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        }
        TableRow::Job { job, .. } => {
            let (kind, color) = if job.is_job {
                ("Job", Color::Green)
            } else {
                ("Pipeline", Color::Magenta)
            };
            Row::new(vec![
                Cell::from(format!("    {}", job.name)),
                Cell::from(Span::styled(kind, Style::default().fg(color))),
            ])
        }
    }
}

/// Render the console activity log, newest last.
pub fn render_console(frame: &mut Frame, messages: &[ConsoleMessage], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Console ");
    if messages.is_empty() {
        let text = Paragraph::new("No activity yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let skip = messages.len().saturating_sub(visible);
    let items: Vec<ListItem> = messages
        .iter()
        .skip(skip)
        .map(|msg| {
            let (label, color) = match msg.level {
                ConsoleLevel::Info => ("INFO ", Color::Blue),
                ConsoleLevel::Warn => ("WARN ", Color::Yellow),
                ConsoleLevel::Error => ("ERROR", Color::Red),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    msg.timestamp
                        .with_timezone(&chrono::Local)
                        .format("%H:%M:%S ")
                        .to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(label, Style::default().fg(color)),
                Span::raw(" "),
                Span::raw(msg.message.clone()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        assert_eq!(format_relative_time(&Utc::now()), "just now");
        assert_eq!(
            format_relative_time(&(Utc::now() - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(Utc::now() - chrono::Duration::hours(3))),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(&(Utc::now() - chrono::Duration::days(2))),
            "2d ago"
        );
    }
}
