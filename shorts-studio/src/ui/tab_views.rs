//! Tab bar and generation monitor rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use shorts_client::{stage_view, ProjectStatus};

use crate::models::{App, GenerationTab, TabState};

pub fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::new();

    if app.open_tabs.is_empty() {
        spans.push(Span::styled(
            "no running generations",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for (idx, tab) in app.open_tabs.iter().enumerate() {
        let (icon, color) = match tab.state {
            TabState::Running => ("▶", Color::Yellow),
            TabState::Done => ("✓", Color::Green),
            TabState::TimedOut => ("⏱", Color::Yellow),
            TabState::Failed => ("✗", Color::Red),
        };
        let label = format!(" {icon} #{} {} ", tab.instance_number, tab.title);
        let style = if idx == app.active_tab_idx {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(color)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

pub fn render_empty_tabs(f: &mut Frame, area: Rect) {
    let empty = Paragraph::new(vec![
        Line::from(""),
        Line::from("No generation is being watched."),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Esc] for the project list, [N] there to start one",
            Style::default().fg(Color::Cyan),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(empty, area);
}

pub fn render_tab_content(f: &mut Frame, area: Rect, app: &App, tab: &GenerationTab) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let status_raw = tab
        .project
        .as_ref()
        .map(|p| p.status.clone())
        .unwrap_or_default();
    let view = stage_view(tab.variant, &status_raw);

    // Progress strip
    let (gauge_color, gauge_label) = match tab.state {
        TabState::Running => (Color::Yellow, format!("{} · checking every few seconds", view.label)),
        TabState::Done => (Color::Green, "done".to_string()),
        TabState::TimedOut => (
            Color::Yellow,
            "timed out waiting; [W] to keep watching".to_string(),
        ),
        TabState::Failed => (Color::Red, "failed".to_string()),
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} #{}", tab.variant.title(), tab.instance_number)),
        )
        .gauge_style(Style::default().fg(gauge_color))
        .percent(view.progress as u16)
        .label(gauge_label);
    f.render_widget(gauge, chunks[0]);

    // Stage checklist
    let mut lines: Vec<Line> = Vec::new();
    let status_rank = ProjectStatus::parse(&status_raw).stage_rank();

    for (idx, stage) in tab.variant.stages().iter().enumerate() {
        let stage_rank = stage
            .completes_with
            .iter()
            .filter_map(|s| s.stage_rank())
            .max()
            .unwrap_or(0);
        let (icon, color) = match status_rank {
            Some(rank) if rank >= stage_rank => ("✓", Color::Green),
            Some(rank) if idx == 0 || rank >= stage_rank.saturating_sub(1) => {
                if tab.is_running() {
                    ("▶", Color::Yellow)
                } else {
                    ("○", Color::Gray)
                }
            }
            _ => ("○", Color::Gray),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(color)),
            Span::styled(
                format!("Stage {}: {}", idx + 1, stage.name),
                Style::default().fg(Color::White),
            ),
        ]));
    }
    lines.push(Line::from(""));

    if let Some(start) = tab.start_time {
        lines.push(Line::from(Span::styled(
            format!("Started {}", start.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    match &tab.project {
        Some(project) => {
            lines.push(Line::from(Span::styled(
                format!(
                    "Status: {}",
                    if project.status.is_empty() {
                        "created"
                    } else {
                        project.status.as_str()
                    }
                ),
                Style::default().fg(Color::DarkGray),
            )));
            if view.terminal {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} videos generated. Press [Enter] to open the project.",
                        project.video_count()
                    ),
                    Style::default().fg(Color::Green),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Waiting for the first status check...",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if tab.state == TabState::TimedOut {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No terminal status was observed within the polling budget.",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            "The backend may still be working; press [W] to watch again.",
            Style::default().fg(Color::Yellow),
        )));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(tab.title.clone()))
        .wrap(Wrap { trim: false })
        .scroll((tab.scroll_offset as u16, 0));
    f.render_widget(content, chunks[1]);
}
