use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notify_rust::{Notification, Urgency};
use ratatui::prelude::*;
use std::{io, time::{Duration, Instant}};

mod store;
mod timer;
mod ui;

use store::JsonStore;
use timer::{
    NotificationSink, SessionTimer, SystemClock, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES,
};
use ui::{get_theme, SettingsField, Theme, View, THEMES};

// ============================================================================
// Type Aliases & Constants
// ============================================================================

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
const TICK_RATE: Duration = Duration::from_millis(50);

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone)]
#[command(author, version, about = "🍅 pomosync - A Pomodoro timer that syncs to the wall clock")]
struct Args {
    /// Work session length in minutes
    #[arg(short, long, value_parser = parse_minutes)]
    work: Option<u32>,
    /// Break session length in minutes
    #[arg(short, long, value_parser = parse_minutes)]
    rest: Option<u32>,
    /// Minute of the hour synchronized sessions start on (0-59)
    #[arg(short = 'm', long, value_parser = parse_sync_minute)]
    sync_minute: Option<u32>,
    /// Align session starts to the wall clock
    #[arg(long)]
    sync: bool,
    /// Disable wall-clock alignment
    #[arg(long, conflicts_with = "sync")]
    no_sync: bool,
    #[arg(short = 't', long)]
    theme: Option<String>,
    /// Start in the compact badge view
    #[arg(long)]
    badge: bool,
}

fn parse_minutes(s: &str) -> std::result::Result<u32, String> {
    let m: u32 = s.trim().parse().map_err(|_| "expected a number of minutes")?;
    if m <= 240 { Ok(m) } else { Err("duration must be at most 240 minutes".into()) }
}

fn parse_sync_minute(s: &str) -> std::result::Result<u32, String> {
    let m: u32 = s.trim().parse().map_err(|_| "expected a minute of the hour")?;
    if m <= 59 { Ok(m) } else { Err("sync minute must be in 0-59".into()) }
}

// ============================================================================
// Notification Sink
// ============================================================================

struct DesktopNotifier;

impl NotificationSink for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        let _ = Notification::new()
            .summary(title)
            .body(body)
            .appname("pomosync")
            .icon("alarm-clock")
            .urgency(Urgency::Critical)
            .show();
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub timer: SessionTimer,
    pub view: View,
    pub theme: Theme,
    pub theme_name: String,
    pub settings_field: SettingsField,
    pub settings_editing: bool,
    pub settings_input: String,
    pub animation_frame: u8,
}

impl App {
    fn new(timer: SessionTimer, theme_name: String, badge: bool) -> Self {
        Self {
            timer,
            view: if badge { View::Badge } else { View::Timer },
            theme: get_theme(&theme_name),
            theme_name,
            settings_field: SettingsField::WorkDuration,
            settings_editing: false,
            settings_input: String::new(),
            animation_frame: 0,
        }
    }

    fn update(&mut self) {
        self.timer.poll();
        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;
    }

    fn toggle_run(&mut self) {
        if self.timer.snapshot().pause_enabled {
            self.timer.pause();
        } else {
            self.timer.start();
        }
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

fn handle_input(key: event::KeyEvent, app: &mut App) -> bool {
    if app.settings_editing {
        match key.code {
            KeyCode::Char(c) => app.settings_input.push(c),
            KeyCode::Backspace => { app.settings_input.pop(); }
            KeyCode::Enter => apply_setting(app),
            KeyCode::Esc => {
                app.settings_editing = false;
                app.settings_input.clear();
            }
            _ => {}
        }
        return false;
    }

    match app.view {
        View::Settings => handle_settings_view(key, app),
        _ => handle_main_view(key, app),
    }
}

fn handle_main_view(key: event::KeyEvent, app: &mut App) -> bool {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        if app.view == View::Help && key.code != KeyCode::Char('c') {
            app.view = View::Timer;
            return false;
        }
        return true;
    }

    if matches!(key.code, KeyCode::Char('m') | KeyCode::Char('M')) {
        app.view = if app.view == View::Badge { View::Timer } else { View::Badge };
        return false;
    }

    match key.code {
        KeyCode::Char(' ') => app.toggle_run(),
        KeyCode::Char('r') => app.timer.reset(),
        KeyCode::Char('d') => {
            if app.view != View::Badge {
                app.view = View::Settings;
            }
        }
        KeyCode::Char('h') | KeyCode::Char('?') => {
            if app.view != View::Badge {
                app.view = if app.view == View::Help { View::Timer } else { View::Help };
            }
        }
        _ => {}
    }

    false
}

fn handle_settings_view(key: event::KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('d') => {
            app.view = View::Timer;
        }
        KeyCode::Char('r') => app.timer.reset(),
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_field = app.settings_field.next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_field = app.settings_field.prev();
        }
        KeyCode::Enter | KeyCode::Char('e') => start_editing(app),
        KeyCode::Char(' ') => {
            if app.settings_field == SettingsField::SyncEnabled {
                let mut config = app.timer.config();
                config.sync_enabled = !config.sync_enabled;
                app.timer.update_settings(config);
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            if app.settings_field == SettingsField::Theme {
                cycle_theme(app, false);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.settings_field == SettingsField::Theme {
                cycle_theme(app, true);
            }
        }
        _ => {}
    }
    false
}

fn start_editing(app: &mut App) {
    // The timer refuses updates mid-session; don't open the editor either.
    if app.timer.settings_locked() {
        return;
    }
    let config = app.timer.config();
    let input = match app.settings_field {
        SettingsField::WorkDuration => config.work_minutes.to_string(),
        SettingsField::BreakDuration => config.break_minutes.to_string(),
        SettingsField::SyncMinute => config.sync_minute.to_string(),
        _ => return,
    };

    app.settings_input = input;
    app.settings_editing = true;
}

fn apply_setting(app: &mut App) {
    let mut config = app.timer.config();

    match app.settings_field {
        SettingsField::WorkDuration => {
            config.work_minutes = match app.settings_input.trim().parse() {
                Ok(m) if m <= 240 => m,
                _ => DEFAULT_WORK_MINUTES,
            };
        }
        SettingsField::BreakDuration => {
            config.break_minutes = match app.settings_input.trim().parse() {
                Ok(m) if m <= 240 => m,
                _ => DEFAULT_BREAK_MINUTES,
            };
        }
        SettingsField::SyncMinute => {
            config.sync_minute = app.settings_input.trim().parse().unwrap_or(0).min(59);
        }
        _ => {}
    }

    app.timer.update_settings(config);
    app.settings_editing = false;
    app.settings_input.clear();
}

fn cycle_theme(app: &mut App, forward: bool) {
    let idx = THEMES.iter().position(|&t| t == app.theme_name).unwrap_or(0);
    let new_idx = if forward {
        (idx + 1) % THEMES.len()
    } else if idx == 0 {
        THEMES.len() - 1
    } else {
        idx - 1
    };

    app.theme_name = THEMES[new_idx].into();
    app.theme = get_theme(&app.theme_name);
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let store = JsonStore::new(JsonStore::default_dir());
    let mut timer = SessionTimer::new(
        Box::new(SystemClock),
        Box::new(store),
        Box::new(DesktopNotifier),
    );

    // CLI overrides
    let mut config = timer.config();
    if let Some(w) = args.work { config.work_minutes = w; }
    if let Some(r) = args.rest { config.break_minutes = r; }
    if let Some(m) = args.sync_minute { config.sync_minute = m; }
    if args.sync { config.sync_enabled = true; }
    if args.no_sync { config.sync_enabled = false; }
    timer.update_settings(config);

    let theme_name = args.theme.unwrap_or_else(|| "default".into());
    let mut app = App::new(timer, theme_name, args.badge);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_input(key, app) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.update();
            last_tick = Instant::now();
        }
    }
}
