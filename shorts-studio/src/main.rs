use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use shorts_client::ApiConfig;
use shorts_studio::models::{App, FieldKind, View};
use shorts_studio::ui::ui;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal studio for an AI short-form video backend", long_about = None)]
struct Args {
    /// Backend origin, overriding SHORTS_API_URL
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let config = match args.api_url {
        Some(url) => ApiConfig::with_base_url(url),
        None => ApiConfig::from_env(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(config);

    // Run main loop
    let res = run_app(&mut terminal, &mut app);

    // Persist open tabs for the next session
    app.save_session();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply finished network work and poll updates before drawing
        app.drain_op_results();
        app.poll_all_tabs();
        app.poll_detail();
        app.notifications.cleanup_expired();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Delete confirmation dialog
                    if app.show_delete_confirmation {
                        match key.code {
                            KeyCode::Char('y') | KeyCode::Char('Y') => {
                                app.confirm_delete();
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                                app.cancel_delete();
                            }
                            _ => {}
                        }
                    }
                    // Close-tab confirmation dialog
                    else if app.show_close_confirmation {
                        match key.code {
                            KeyCode::Char('y') | KeyCode::Char('Y') => {
                                app.close_tab_confirmed();
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                                app.show_close_confirmation = false;
                            }
                            _ => {}
                        }
                    }
                    // File browser mode
                    else if app.show_file_browser {
                        match key.code {
                            KeyCode::Down => app.file_browser_next(),
                            KeyCode::Up => app.file_browser_previous(),
                            KeyCode::Enter => app.file_browser_select(),
                            KeyCode::Esc => app.close_file_browser(),
                            KeyCode::Backspace => app.file_browser_pop_search(),
                            KeyCode::Char(c) => app.file_browser_push_search(c),
                            _ => {}
                        }
                    }
                    // Text input mode
                    else if app.is_editing {
                        match key.code {
                            KeyCode::Char('/') => {
                                // Path fields get the browser; everything
                                // else takes the character literally
                                let path_field = app
                                    .current_field()
                                    .map(|f| {
                                        matches!(
                                            f.kind,
                                            FieldKind::FilePath | FieldKind::FileList
                                        )
                                    })
                                    .unwrap_or(false);
                                if path_field {
                                    app.open_file_browser();
                                } else {
                                    app.edit_buffer.push('/');
                                }
                            }
                            KeyCode::Char(c) => {
                                app.edit_buffer.push(c);
                            }
                            KeyCode::Backspace => {
                                app.edit_buffer.pop();
                            }
                            KeyCode::Enter => app.save_edited_field(),
                            KeyCode::Esc => app.cancel_editing(),
                            _ => {}
                        }
                    }
                    // Normal navigation mode
                    else {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => {
                                app.should_quit = true;
                            }
                            KeyCode::Down | KeyCode::Char('j') => {
                                if matches!(app.current_view, View::Tabs) {
                                    app.scroll_tab_down();
                                } else {
                                    app.next();
                                }
                            }
                            KeyCode::Up | KeyCode::Char('k') => {
                                if matches!(app.current_view, View::Tabs) {
                                    app.scroll_tab_up();
                                } else {
                                    app.previous();
                                }
                            }
                            KeyCode::Enter => match app.current_view {
                                View::ProjectList => app.view_selected_project(),
                                View::VariantPicker => app.open_create_form(),
                                View::CreateForm(_) => app.start_editing_field(),
                                View::Tabs => app.view_current_tab_project(),
                                View::ProjectDetail(_) => {}
                            },
                            KeyCode::Char('n') | KeyCode::Char('N') => {
                                if matches!(app.current_view, View::ProjectList) {
                                    app.start_new_project();
                                }
                            }
                            KeyCode::Char('d') | KeyCode::Char('D') => {
                                match app.current_view {
                                    View::ProjectList => app.request_delete_selected(),
                                    View::ProjectDetail(_) => app.request_delete_detail(),
                                    _ => {}
                                }
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                match app.current_view {
                                    View::ProjectList => app.load_projects(),
                                    View::ProjectDetail(_) => app.refresh_detail(),
                                    _ => {}
                                }
                            }
                            KeyCode::Char('g') | KeyCode::Char('G') => {
                                if matches!(app.current_view, View::ProjectDetail(_)) {
                                    app.run_enabled_stage();
                                }
                            }
                            KeyCode::Char('l') | KeyCode::Char('L') => {
                                if matches!(app.current_view, View::CreateForm(_)) {
                                    app.launch_generation();
                                }
                            }
                            KeyCode::Char('t') | KeyCode::Char('T') => {
                                if matches!(app.current_view, View::ProjectList) {
                                    app.current_view = View::Tabs;
                                }
                            }
                            KeyCode::Tab => {
                                if matches!(app.current_view, View::Tabs) {
                                    app.next_tab();
                                }
                            }
                            KeyCode::BackTab => {
                                if matches!(app.current_view, View::Tabs) {
                                    app.previous_tab();
                                }
                            }
                            KeyCode::Char('x') | KeyCode::Char('X') => {
                                if matches!(app.current_view, View::Tabs) {
                                    app.close_current_tab();
                                }
                            }
                            KeyCode::Char('w') | KeyCode::Char('W') => {
                                if matches!(app.current_view, View::Tabs) {
                                    app.rewatch_current_tab();
                                }
                            }
                            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                                match app.current_view {
                                    View::ProjectDetail(_) => app.close_detail(),
                                    View::CreateForm(_) => {
                                        app.current_view = View::VariantPicker;
                                    }
                                    View::VariantPicker | View::Tabs => app.back_to_list(),
                                    View::ProjectList => {}
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
