use ratatui::{prelude::*, widgets::*};

use crate::timer::{RunState, SessionKind, Snapshot};
use crate::App;

// ============================================================================
// Views & Themes
// ============================================================================

#[derive(PartialEq, Clone, Copy)]
pub enum View {
    Timer,
    Badge,
    Settings,
    Help,
}

#[derive(PartialEq, Clone, Copy)]
pub enum SettingsField {
    WorkDuration,
    BreakDuration,
    SyncMinute,
    SyncEnabled,
    Theme,
}

impl SettingsField {
    pub fn next(self) -> Self {
        match self {
            Self::WorkDuration => Self::BreakDuration,
            Self::BreakDuration => Self::SyncMinute,
            Self::SyncMinute => Self::SyncEnabled,
            Self::SyncEnabled => Self::Theme,
            Self::Theme => Self::WorkDuration,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::WorkDuration => Self::Theme,
            Self::BreakDuration => Self::WorkDuration,
            Self::SyncMinute => Self::BreakDuration,
            Self::SyncEnabled => Self::SyncMinute,
            Self::Theme => Self::SyncEnabled,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Theme {
    pub work_color: Color,
    pub break_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
}

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox"];

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            work_color: Color::Rgb(136, 192, 255),
            break_color: Color::Rgb(163, 190, 140),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(180, 142, 255),
        },
        "dracula" => Theme {
            work_color: Color::Rgb(189, 147, 249),
            break_color: Color::Rgb(80, 250, 123),
            border_color: Color::Rgb(200, 100, 255),
            accent_color: Color::Rgb(255, 121, 198),
        },
        "gruvbox" => Theme {
            work_color: Color::Rgb(254, 128, 25),
            break_color: Color::Rgb(184, 187, 38),
            border_color: Color::Rgb(255, 200, 100),
            accent_color: Color::Rgb(250, 189, 47),
        },
        _ => Theme {
            work_color: Color::Rgb(255, 99, 71),
            break_color: Color::Rgb(0, 255, 150),
            border_color: Color::Rgb(0, 200, 255),
            accent_color: Color::Rgb(255, 160, 0),
        },
    }
}

fn kind_color(app: &App, kind: SessionKind) -> Color {
    match kind {
        SessionKind::Work => app.theme.work_color,
        SessionKind::Break => app.theme.break_color,
    }
}

fn status_line(snap: &Snapshot, app: &App) -> (String, Color) {
    match snap.state {
        RunState::Idle => ("■ READY".into(), Color::Gray),
        RunState::WaitingForSync => (
            format!(
                "⏳ WAITING FOR :{:02}{}",
                app.timer.config().sync_minute,
                ".".repeat((app.animation_frame / 5) as usize % 4)
            ),
            Color::Cyan,
        ),
        RunState::Running => (
            format!("{} RUNNING", if app.animation_frame < 10 { "●" } else { "○" }),
            Color::Green,
        ),
        RunState::Paused => ("⏸ PAUSED".into(), Color::Yellow),
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render(f: &mut Frame, app: &App) {
    match app.view {
        View::Badge => render_badge(f, app),
        View::Timer => render_timer(f, app),
        View::Settings => render_settings(f, app),
        View::Help => render_help(f, app),
    }
}

/// The minimal overlay: a small centered card with just the session, the
/// time, and the run state.
fn render_badge(f: &mut Frame, app: &App) {
    let snap = app.timer.snapshot();
    let area = centered_rect(40, 30, f.size());
    let (status, status_color) = status_line(&snap, app);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            snap.kind.name(),
            Style::default().fg(kind_color(app, snap.kind)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            snap.time_text(),
            Style::default().fg(kind_color(app, snap.kind)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(status_color))),
        Line::from(""),
        Line::from(Span::styled(
            format!("🍅 × {}", snap.completed),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press M to expand",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color)),
        );

    f.render_widget(widget, area);
}

fn render_timer(f: &mut Frame, app: &App) {
    let snap = app.timer.snapshot();
    let config = app.timer.config();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    // Header
    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border_color))
        .title(Span::styled(
            " 🍅 POMOSYNC ",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(header, chunks[0]);

    // Main content
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Length(2), Constraint::Length(1),
            Constraint::Length(5), Constraint::Length(1),
            Constraint::Length(2), Constraint::Length(1),
            Constraint::Length(2), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(2), Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Percentage(10),
        ])
        .split(chunks[1]);

    // Session label, with the start minute while a synchronized start is armed
    let label = if config.sync_enabled && matches!(snap.state, RunState::Idle | RunState::WaitingForSync) {
        format!("{}  (starts at :{:02})", snap.kind.name(), config.sync_minute)
    } else {
        snap.kind.name().to_string()
    };
    f.render_widget(
        Paragraph::new(label)
            .style(Style::default().fg(kind_color(app, snap.kind)).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[1],
    );

    // Timer
    f.render_widget(
        Paragraph::new(snap.time_text())
            .style(Style::default().fg(kind_color(app, snap.kind)).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[3],
    );

    // Wall clock
    let now = chrono::Local::now();
    let clock_lines = vec![
        Line::from(Span::styled(now.format("%A, %B %d, %Y").to_string(), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(now.format("%H:%M:%S").to_string(), Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(clock_lines).alignment(Alignment::Center), sections[5]);

    // Status
    let (status, status_color) = status_line(&snap, app);
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(status_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[7],
    );

    // Progress
    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(kind_color(app, snap.kind)).bg(Color::Black))
            .percent((snap.progress * 100.0) as u16),
        sections[9],
    );

    // Stats + settings summary
    let sync_text = if config.sync_enabled {
        format!("sync :{:02}", config.sync_minute)
    } else {
        "sync off".into()
    };
    let summary = format!(
        "{} completed today  •  work {}m / break {}m  •  {}",
        snap.completed, config.work_minutes, config.break_minutes, sync_text
    );
    f.render_widget(
        Paragraph::new(summary).style(Style::default().fg(Color::Gray)).alignment(Alignment::Center),
        sections[11],
    );

    if snap.settings_locked {
        f.render_widget(
            Paragraph::new("🔒 settings locked until reset")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center),
            sections[13],
        );
    }

    // Controls
    let pause_hint = if snap.pause_enabled { "Pause" } else { "Start" };
    let controls = vec![
        Line::from(vec![
            span_key("Space", app), Span::raw(format!(" {}  •  ", pause_hint)),
            span_key("R", app), Span::raw(" Reset  •  "),
            span_key("M", app), Span::raw(" Badge"),
        ]),
        Line::from(vec![
            span_key("D", app), Span::raw(" Settings  •  "),
            span_key("H", app), Span::raw(" Help  •  "),
            span_key("Q", app), Span::raw(" Quit"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn render_settings(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 85, f.size());
    let config = app.timer.config();
    let locked = app.timer.settings_locked();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚙️  SETTINGS",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  ↑↓/jk: Navigate  •  Enter: Edit  •  Space: Toggle  •  ←→/hl: Themes",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    if locked {
        lines.push(Line::from(Span::styled(
            "  🔒 Locked while the timer runs — press R on the timer view to reset",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    let settings = [
        (SettingsField::WorkDuration, "🍅 Work Duration", format!("{} min", config.work_minutes)),
        (SettingsField::BreakDuration, "☕ Break Duration", format!("{} min", config.break_minutes)),
        (SettingsField::SyncMinute, "🕐 Sync Start Minute", format!(":{:02}", config.sync_minute)),
        (SettingsField::SyncEnabled, "⏱  Real-Time Sync", if config.sync_enabled { "ON" } else { "OFF" }.into()),
        (SettingsField::Theme, "🎨 Theme", format!("< {} >", app.theme_name)),
    ];

    for (field, label, value) in settings {
        let selected = app.settings_field == field;
        let editing = selected && app.settings_editing;

        lines.push(Line::from(""));

        if editing {
            lines.push(Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(&app.settings_input, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled("█", Style::default().fg(Color::Green)),
            ]));
        } else {
            let (prefix, label_style, value_style) = if selected {
                ("  > ", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
                 Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            } else {
                ("    ", Style::default().fg(Color::Gray), Style::default().fg(Color::DarkGray))
            };

            lines.push(Line::from(vec![Span::styled(prefix, label_style), Span::styled(label, label_style)]));
            lines.push(Line::from(vec![Span::raw("    "), Span::styled(value, value_style)]));
        }
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Settings ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(app.theme.border_color)),
            ),
        area,
    );
}

fn render_help(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 85, f.size());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⌨️  KEYBOARD SHORTCUTS",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Timer Controls:"),
        help_line("Space", "Start / pause / resume"),
        help_line("R", "Reset to an idle work session"),
        help_line("M", "Toggle the compact badge view"),
        Line::from(""),
        Line::from("  Navigation:"),
        help_line("D", "Open settings"),
        help_line("H / ?", "Toggle help"),
        help_line("Q / Esc", "Exit / Go back"),
        help_line("Ctrl+C", "Force quit"),
        Line::from(""),
        Line::from("  Real-time sync:"),
        Line::from("    When enabled, sessions wait for the chosen minute of the"),
        Line::from("    hour and end exactly on a minute boundary. Pausing drops"),
        Line::from("    the alignment until the next fresh start."),
        Line::from(""),
        Line::from(Span::styled(
            "💡 Settings and daily stats are saved automatically",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(
        Paragraph::new(help_text)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(app.theme.border_color)),
            ),
        area,
    );
}

// ============================================================================
// Helpers
// ============================================================================

fn span_key<'a>(text: &'a str, app: &App) -> Span<'a> {
    Span::styled(text, Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}
