//! Countries Explorer - Actor-based terminal country directory
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async country fetch

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use countries_explorer::app::login::LoginField;
use countries_explorer::config::Config;
use countries_explorer::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use countries_explorer::messages::ui_events::{key_to_ui_event, Screen};
use countries_explorer::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use countries_explorer::ui::{
    empty_list_message, filter_summary, pager_summary, region_color, region_label,
    render_region_tabs,
};
use countries_explorer::{AppActor, AppState, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file; the terminal is in raw mode
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();
    tracing::info!(api_url = %config.api_url, items_per_page = config.items_per_page, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx, config.request_timeout());
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(&config), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.screen,
                    current_state.show_help,
                    current_state.login_focus == LoginField::KeepSignedIn,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    match state.screen {
        Screen::Login => draw_login(f, state, main_chunks[1]),
        Screen::Home => draw_home(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} v{} ", APP_NAME, APP_VERSION),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )];
    if let Some(email) = &state.user_email {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(email.clone(), Style::default().fg(Color::Gray)));
        if let Some(since) = &state.signed_in_since {
            spans.push(Span::styled(
                format!(" since {}", since),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_login(f: &mut Frame, state: &RenderState, area: Rect) {
    let form_area = centered_rect(50, 16, area);
    f.render_widget(Clear, form_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Sign In ");
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Email
            Constraint::Length(1),  // Email error
            Constraint::Length(3),  // Password
            Constraint::Length(1),  // Password error
            Constraint::Length(1),  // Keep signed in
            Constraint::Min(0),     // Hint
        ])
        .split(inner);

    let field_style = |field: LoginField| {
        if state.login_focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let email = Paragraph::new(state.login_email.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(LoginField::Email))
            .title(" Username or email "),
    );
    f.render_widget(email, rows[0]);
    draw_field_error(f, state.login_errors.email.as_deref(), rows[1]);

    let password = Paragraph::new(state.login_password_masked.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(LoginField::Password))
            .title(" Password "),
    );
    f.render_widget(password, rows[2]);
    draw_field_error(f, state.login_errors.password.as_deref(), rows[3]);

    let checkbox = format!(
        "{} Keep me signed in",
        if state.login_keep_signed_in { "[x]" } else { "[ ]" }
    );
    f.render_widget(
        Paragraph::new(checkbox).style(field_style(LoginField::KeepSignedIn)),
        rows[4],
    );

    let hint = Paragraph::new("Tab: next field  Space: toggle  Enter: sign in  Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(hint, rows[5]);

    match state.login_focus {
        LoginField::Email => {
            let x = (rows[0].x + state.login_email.chars().count() as u16 + 1)
                .min(rows[0].x + rows[0].width.saturating_sub(2));
            f.set_cursor_position(Position::new(x, rows[0].y + 1));
        }
        LoginField::Password => {
            let x = (rows[2].x + state.login_password_masked.chars().count() as u16 + 1)
                .min(rows[2].x + rows[2].width.saturating_sub(2));
            f.set_cursor_position(Position::new(x, rows[2].y + 1));
        }
        LoginField::KeepSignedIn => {}
    }
}

fn draw_field_error(f: &mut Frame, error: Option<&str>, area: Rect) {
    if let Some(error) = error {
        f.render_widget(
            Paragraph::new(format!(" {}", error)).style(Style::default().fg(Color::Red)),
            area,
        );
    }
}

fn draw_home(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),  // Slider
            Constraint::Length(2),  // Region filter
            Constraint::Length(3),  // Stats
            Constraint::Min(4),     // Country list
            Constraint::Length(3),  // Pager
        ])
        .split(area);

    draw_slider(f, state, chunks[0]);
    draw_region_filter(f, state, chunks[1]);
    draw_stats(f, state, chunks[2]);
    draw_country_list(f, state, chunks[3]);
    draw_pager(f, state, chunks[4]);
}

fn draw_slider(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = format!(
        " Featured{} (←/→) ",
        if state.auto_play { " [auto]" } else { "" }
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(title);

    let mut lines = Vec::new();
    match &state.current_slide {
        Some(slide) => {
            lines.push(Line::from(Span::styled(
                slide.title.clone(),
                Style::default().fg(Color::White).bold(),
            )));
            lines.push(Line::from(slide.description.clone()));
            lines.push(Line::from(Span::styled(
                slide.image.clone().unwrap_or_else(|| String::from("(no flag)")),
                Style::default().fg(Color::DarkGray),
            )));
            if state.slide_count > 1 {
                let dots: Vec<Span> = (0..state.slide_count)
                    .map(|i| {
                        if i == state.slide_index {
                            Span::styled("● ", Style::default().fg(Color::Magenta))
                        } else {
                            Span::styled("○ ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                lines.push(Line::from(dots));
            }
        }
        None => {
            let text = if state.loading {
                "Loading featured countries..."
            } else {
                "No slides available"
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(Color::DarkGray))));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_region_filter(f: &mut Frame, state: &RenderState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    f.render_widget(render_region_tabs(state), rows[0]);

    let mut spans = vec![Span::styled(
        filter_summary(state),
        Style::default().fg(Color::Gray),
    )];
    if state.is_filtered() {
        spans.push(Span::styled(
            format!("  [{} ✕ x]", region_label(&state.selected_region)),
            Style::default().fg(region_color(&state.selected_region)),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

fn draw_stats(f: &mut Frame, state: &RenderState, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let stat = |title: &str, value: String, caption: String| {
        Paragraph::new(Line::from(vec![
            Span::styled(value, Style::default().bold()),
            Span::styled(format!("  {}", caption), Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
    };

    f.render_widget(
        stat("Total Countries", state.total_countries.to_string(), "worldwide".into()),
        cols[0],
    );
    f.render_widget(
        stat(
            "Current Filter",
            state.filtered_count.to_string(),
            if state.is_filtered() {
                format!("in {}", state.selected_region)
            } else {
                "all regions".into()
            },
        ),
        cols[1],
    );
    let (largest_name, largest_count) = state
        .largest_region
        .clone()
        .unwrap_or_else(|| (String::from("Loading..."), 0));
    f.render_widget(
        stat("Largest Region", largest_count.to_string(), largest_name),
        cols[2],
    );
}

fn draw_country_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.is_filtered() {
        format!(" Countries in {} ", state.selected_region)
    } else {
        String::from(" All Countries ")
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.loading && state.visible_countries.is_empty() {
        let loading = Paragraph::new("Loading countries...")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    if let Some(error) = &state.error {
        let lines = vec![
            Line::from(Span::styled("Error loading countries", Style::default().fg(Color::Red).bold())),
            Line::from(error.clone()),
            Line::from(Span::styled("Press 'r' to try again", Style::default().fg(Color::DarkGray))),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    if state.visible_countries.is_empty() {
        let empty = Paragraph::new(empty_list_message(state))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Two countries per row
    let cell = |index: usize| -> Cell<'static> {
        match state.visible_countries.get(index) {
            Some(country) => {
                let marker = if country.flag.is_some() { "⚑" } else { "·" };
                let line = Line::from(vec![
                    Span::raw(format!("{} {} ", marker, country.name)),
                    Span::styled(
                        country.region.clone(),
                        Style::default().fg(region_color(&country.region)),
                    ),
                ]);
                let style = if index == state.list_selected {
                    Style::default().bg(Color::DarkGray).bold()
                } else {
                    Style::default()
                };
                Cell::from(line).style(style)
            }
            None => Cell::from(""),
        }
    };

    let rows: Vec<Row> = (0..state.visible_countries.len())
        .step_by(2)
        .map(|i| Row::new(vec![cell(i), cell(i + 1)]))
        .collect();

    // Keep the selected row in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let selected_row = state.list_selected / 2;
    let offset = selected_row.saturating_sub(inner_height.saturating_sub(1));

    let table = Table::new(
        rows.into_iter().skip(offset),
        [Constraint::Percentage(50), Constraint::Percentage(50)],
    )
    .block(block);
    f.render_widget(table, area);
}

fn draw_pager(f: &mut Frame, state: &RenderState, area: Rect) {
    if state.filtered_count == 0 {
        return;
    }

    let more = if state.has_more { "  m: load more" } else { "" };
    let title = format!(" {}{}  p: {} per page ", pager_summary(state), more, state.items_per_page);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(state.progress.clamp(0.0, 1.0));
    f.render_widget(gauge, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let text = if let Some(msg) = &state.status_message {
        msg.clone()
    } else if state.loading {
        String::from("Fetching countries...")
    } else {
        match state.screen {
            Screen::Login => String::from("Sign in to browse countries"),
            Screen::Home => String::from("f/F region  0-6 pick  x clear  m more  p page size  o logout  ? help  q quit"),
        }
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 20, area);
    f.render_widget(Clear, popup);

    let help = vec![
        "f / F       Next / previous region",
        "0-6         Select region directly",
        "x           Clear filters",
        "m / Space   Load more countries",
        "p           Cycle page size (12/24/36/48)",
        "c           Collapse to one page",
        "↑/↓ j/k     Move in list",
        "t / Home    Back to top",
        "Enter       Show country in slider",
        "←/→ h/l     Previous / next slide",
        "a           Toggle slider auto-play",
        "r           Retry fetch",
        "o           Sign out",
        "q / Esc     Quit",
        "",
        "Press any key to close",
    ];
    let lines: Vec<Line> = help.into_iter().map(Line::from).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Help ");
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Fixed-size rect centered in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
