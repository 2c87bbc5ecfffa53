//! Header and footer rendering functions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{App, View};

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.current_view {
        View::ProjectList => "Shorts Studio - Projects",
        View::ProjectDetail(_) => "Shorts Studio - Project Detail",
        View::VariantPicker => "Shorts Studio - New Generation",
        View::CreateForm(_) => "Shorts Studio - Configure Generation",
        View::Tabs => "Shorts Studio - Running Generations",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("      "),
        Span::styled("[Q]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("uit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = match app.current_view {
        View::ProjectList => Line::from(vec![
            Span::styled("[↑↓]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" View  "),
            Span::styled("[N]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" New  "),
            Span::styled("[D]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Delete  "),
            Span::styled("[R]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Reload  "),
            Span::styled("[T]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Tabs  "),
            Span::styled("[Q]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Quit"),
        ]),
        View::ProjectDetail(_) => Line::from(vec![
            Span::styled("[G]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Run next stage  "),
            Span::styled("[R]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Refresh  "),
            Span::styled("[D]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Delete  "),
            Span::styled("[Esc/B]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Back"),
        ]),
        View::VariantPicker => Line::from(vec![
            Span::styled("[↑↓]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Select  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Back"),
        ]),
        View::CreateForm(_) => {
            if app.is_editing {
                Line::from(vec![
                    Span::styled(
                        "TYPE",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" to edit  "),
                    Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" Save  "),
                    Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" Cancel  "),
                    Span::styled("[/]", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" Browse files"),
                ])
            } else {
                Line::from(vec![
                    Span::styled("[↑↓]", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" Navigate  "),
                    Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" Edit/Toggle  "),
                    Span::styled("[L]", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" Launch  "),
                    Span::styled("[Esc/B]", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" Back"),
                ])
            }
        }
        View::Tabs => Line::from(vec![
            Span::styled("[Tab]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Next tab  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Open project  "),
            Span::styled("[W]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Re-watch  "),
            Span::styled("[X]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Close tab  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Projects"),
        ]),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
