//! Project list, variant picker, creation form and detail rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};
use shorts_client::{stage_view, StageView, WorkflowVariant};

use crate::models::{fields_for, App, FieldKind};

fn status_icon(view: &StageView) -> (&'static str, Color) {
    if view.terminal {
        ("✓", Color::Green)
    } else if view.label == "processing" {
        ("○", Color::Gray)
    } else {
        ("▶", Color::Yellow)
    }
}

pub fn render_project_list(f: &mut Frame, area: Rect, app: &App) {
    if app.projects_loading && app.projects.is_empty() {
        let loading = Paragraph::new("Loading projects...")
            .block(Block::default().borders(Borders::ALL).title("Projects"));
        f.render_widget(loading, area);
        return;
    }

    if app.projects.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No projects yet."),
            Line::from(""),
            Line::from(Span::styled(
                "Press [N] to start your first generation",
                Style::default().fg(Color::Cyan),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("Projects"));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .projects
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            let variant = WorkflowVariant::infer(project);
            let view = stage_view(variant, &project.status);
            let (icon, color) = status_icon(&view);

            let mut spans = vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(
                    project.description.clone(),
                    if idx == app.selected {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
                Span::styled(
                    format!("  [{}]", view.label),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if let Some(created) = project.created_at {
                spans.push(Span::styled(
                    format!("  {}", created.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if project.dog_analysis.is_some() {
                spans.push(Span::styled(
                    "  ♥ tailored",
                    Style::default().fg(Color::Magenta),
                ));
            }
            if view.terminal && project.video_count() > 0 {
                spans.push(Span::styled(
                    format!("  {} videos", project.video_count()),
                    Style::default().fg(Color::Green),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Projects ({})", app.projects.len())),
    );
    f.render_widget(list, area);
}

pub fn render_variant_picker(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = WorkflowVariant::all()
        .iter()
        .enumerate()
        .map(|(idx, variant)| {
            let style = if idx == app.selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(vec![
                Line::from(Span::styled(variant.title(), style)),
                Line::from(Span::styled(
                    format!("  {}", variant.description()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Choose a workflow"),
    );
    f.render_widget(list, area);
}

pub fn render_create_form(f: &mut Frame, area: Rect, app: &App, variant: WorkflowVariant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, field) in fields_for(variant).iter().enumerate() {
        let is_selected = idx == app.edit_field_index;
        let value = if is_selected && app.is_editing {
            format!("{}█", app.edit_buffer)
        } else {
            app.field_values
                .get(field.name)
                .cloned()
                .unwrap_or_default()
        };

        let marker = if field.required { "*" } else { " " };
        let label_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let shown = match field.kind {
            FieldKind::Flag => {
                if value == "true" {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            _ if value.is_empty() && !(is_selected && app.is_editing) => "—".to_string(),
            _ => value,
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}: ", field.label), label_style),
            Span::styled(shown, Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", field.description),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(variant.title()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(form, chunks[0]);

    // Progress strip while a launch request is in flight
    if app.form_loading {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(app.form_step.clone()),
            )
            .gauge_style(Style::default().fg(Color::Yellow))
            .percent(app.form_progress as u16);
        f.render_widget(gauge, chunks[1]);
    } else {
        let hint = Paragraph::new("Press [L] to launch the generation")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, chunks[1]);
    }
}

pub fn render_project_detail(f: &mut Frame, area: Rect, app: &App) {
    let Some(project) = &app.detail_project else {
        let missing = Paragraph::new("Project not found.")
            .block(Block::default().borders(Borders::ALL).title("Detail"));
        f.render_widget(missing, area);
        return;
    };

    let variant = WorkflowVariant::infer(project);
    let view = stage_view(variant, &project.status);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // Status strip
    let gauge_label = if app.detail_loading {
        format!("{} (working...)", view.label)
    } else {
        view.label.clone()
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(project.description.clone()),
        )
        .gauge_style(if view.terminal {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        })
        .percent(view.progress as u16)
        .label(gauge_label);
    f.render_widget(gauge, chunks[0]);

    // Body
    let mut lines: Vec<Line> = Vec::new();

    if let Some(created) = project.created_at {
        lines.push(Line::from(Span::styled(
            format!("Created {}", created.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(analysis) = &project.dog_analysis {
        lines.push(Line::from(vec![
            Span::styled("Breed: ", Style::default().fg(Color::Magenta)),
            Span::raw(format!(
                "{} ({:.0}% confidence) - {}",
                analysis.breed,
                analysis.confidence * 100.0,
                analysis.characteristics.join(", ")
            )),
        ]));
    }
    if let Some(action) = view.action {
        lines.push(Line::from(Span::styled(
            format!("Next stage available: {action:?}  [G] to run"),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(""));

    render_string_section(&mut lines, "Prompts", project.prompts.as_deref());
    render_string_section(&mut lines, "Scene prompts", project.scene_prompts.as_deref());
    render_string_section(&mut lines, "Video prompts", project.video_prompts.as_deref());

    if let Some(scene_images) = &project.scene_images {
        lines.push(Line::from(Span::styled(
            "Scene images:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for image in scene_images {
            let (icon, color) = if image.is_success() {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {icon} "), Style::default().fg(color)),
                Span::raw(format!("Scene {}: ", image.scene_number)),
                Span::styled(
                    image
                        .filepath
                        .clone()
                        .unwrap_or_else(|| "generation failed".to_string()),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    if let Some(images) = project.images.as_deref() {
        render_media_section(&mut lines, "Images", images, app);
    }
    if let Some(videos) = project.videos.as_deref() {
        render_media_section(&mut lines, "Videos", videos, app);
    }
    if let Some(final_video) = &project.final_video_path {
        lines.push(Line::from(vec![
            Span::styled("Final video: ", Style::default().fg(Color::Cyan)),
            Span::styled(app.api.media_url(final_video), Style::default().fg(Color::Green)),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from("Generating content, nothing to show yet..."));
    }

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[1]);
}

fn render_string_section(lines: &mut Vec<Line<'_>>, title: &'static str, items: Option<&[String]>) {
    let Some(items) = items else { return };
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(Span::styled(
        format!("{title}:"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    for (idx, item) in items.iter().enumerate() {
        if item.is_empty() {
            continue;
        }
        lines.push(Line::from(format!("  {}. {}", idx + 1, item)));
    }
    lines.push(Line::from(""));
}

fn render_media_section(lines: &mut Vec<Line<'_>>, title: &'static str, paths: &[String], app: &App) {
    if paths.iter().all(|p| p.is_empty()) {
        return;
    }
    lines.push(Line::from(Span::styled(
        format!("{title}:"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    for (idx, path) in paths.iter().enumerate() {
        if path.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  Scene {}: not generated", idx + 1),
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::raw(format!("  Scene {}: ", idx + 1)),
                Span::styled(app.api.media_url(path), Style::default().fg(Color::Yellow)),
            ]));
        }
    }
    lines.push(Line::from(""));
}
