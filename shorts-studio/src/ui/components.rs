//! Shared UI components: overlays and layout helpers

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::App;

/// Helper to create a centered rect using a percentage of the available area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Yes/no confirmation dialog overlay
pub fn render_confirmation(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Confirm   "),
            Span::styled("[N/Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(dialog, popup);
}

/// File browser overlay for picking upload images
pub fn render_file_browser(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let items = app.visible_file_browser_items();
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "..".to_string());
            let display = if path.is_dir() {
                format!("▸ {name}/")
            } else {
                format!("  {name}")
            };
            let style = if idx == app.file_browser_selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if path.is_dir() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(display, style))
        })
        .collect();

    let title = if app.file_browser_search.is_empty() {
        format!("{}", app.current_dir.display())
    } else {
        format!(
            "{} (filter: {})",
            app.current_dir.display(),
            app.file_browser_search
        )
    };

    let list = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, popup);
}
