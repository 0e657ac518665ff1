use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants & Collaborator Traits
// ============================================================================

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DAILY_FMT: &str = "%Y-%m-%d";

type Millis = i64;

/// Sole time source for the timer. Must be real wall-clock time, since
/// synchronized mode is defined in terms of minute-of-hour.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settings and per-day stats storage. All failures degrade to "no saved
/// data"; the timer never observes a persistence error.
pub trait PersistenceStore {
    fn save_settings(&self, config: &TimerConfig);
    fn load_settings(&self) -> Option<TimerConfig>;
    fn save_daily_stats(&self, date_key: &str, completed: u32);
    fn load_daily_stats(&self, date_key: &str) -> Option<u32>;
}

/// Fire-and-forget desktop notification.
pub trait NotificationSink {
    fn notify(&self, title: &str, body: &str);
}

// ============================================================================
// Data Model
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct TimerConfig {
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub sync_minute: u32,
    pub sync_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            sync_minute: 0,
            sync_enabled: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Work => "🍅 FOCUS",
            Self::Break => "☕ BREAK",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Idle,
    WaitingForSync,
    Running,
    Paused,
}

/// Pure display snapshot; the shell renders this, the timer never touches UI.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot {
    pub kind: SessionKind,
    pub state: RunState,
    pub remaining_secs: u64,
    pub wait_secs: u64,
    pub completed: u32,
    pub progress: f64,
    pub settings_locked: bool,
    pub pause_enabled: bool,
}

impl Snapshot {
    /// MM:SS of what the display should show: the sync-wait countdown while
    /// waiting, the session remaining otherwise.
    pub fn time_text(&self) -> String {
        let secs = if self.state == RunState::WaitingForSync {
            self.wait_secs
        } else {
            self.remaining_secs
        };
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

// ============================================================================
// Wall-Clock Arithmetic
// ============================================================================

/// Next wall-clock instant whose minute-of-hour equals `minute` with second
/// and millisecond exactly zero, strictly in the future. If the target minute
/// is the current one (or already past), roll to the next hour.
pub fn next_sync_instant(now: DateTime<Local>, minute: u32) -> Millis {
    let in_minute = now.second() as i64 * 1000 + now.timestamp_subsec_millis() as i64;
    let minute_start = now.timestamp_millis() - in_minute;
    let cur = now.minute();
    let ahead = if cur < minute { minute - cur } else { 60 - cur + minute };
    minute_start + ahead as i64 * 60_000
}

/// Delay to the next wall-clock second boundary, never zero. Rescheduling
/// with this instead of a fixed interval keeps ticks from drifting off the
/// second across a 25-minute session.
fn next_second(now_ms: Millis) -> Millis {
    now_ms + (1000 - now_ms.rem_euclid(1000))
}

fn remaining_floor(target: Millis, now_ms: Millis) -> u64 {
    ((target - now_ms).max(0) / 1000) as u64
}

fn remaining_ceil(target: Millis, now_ms: Millis) -> u64 {
    (((target - now_ms).max(0) + 999) / 1000) as u64
}

// ============================================================================
// SessionTimer State Machine
// ============================================================================

pub struct SessionTimer {
    clock: Box<dyn Clock>,
    store: Box<dyn PersistenceStore>,
    notifier: Box<dyn NotificationSink>,
    config: TimerConfig,
    kind: SessionKind,
    state: RunState,
    // Derived from target_end on every tick, never decremented in place.
    remaining_secs: u64,
    wait_secs: u64,
    target_end: Millis,
    sync_start: Millis,
    // At most one armed wake at a time; every transition out of
    // Running/WaitingForSync clears it before arming a new one.
    wake: Option<Millis>,
    // Whether the current run uses second-aligned synchronized cadence.
    // Cleared on pause: resuming re-derives a free-running target instead of
    // trying to preserve minute alignment across the gap.
    sync_run: bool,
    completed: u32,
}

impl SessionTimer {
    pub fn new(
        clock: Box<dyn Clock>,
        store: Box<dyn PersistenceStore>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        let config = store.load_settings().unwrap_or_default();
        let date_key = clock.now().format(DAILY_FMT).to_string();
        let completed = store.load_daily_stats(&date_key).unwrap_or(0);

        let mut timer = Self {
            clock,
            store,
            notifier,
            config,
            kind: SessionKind::Work,
            state: RunState::Idle,
            remaining_secs: 0,
            wait_secs: 0,
            target_end: 0,
            sync_start: 0,
            wake: None,
            sync_run: false,
            completed,
        };
        timer.remaining_secs = timer.session_secs(timer.kind);
        timer
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn settings_locked(&self) -> bool {
        self.state != RunState::Idle
    }

    pub fn snapshot(&self) -> Snapshot {
        let total = self.session_secs(self.kind);
        let progress = if total == 0 {
            0.0
        } else {
            ((total - self.remaining_secs.min(total)) as f64 / total as f64).clamp(0.0, 1.0)
        };
        Snapshot {
            kind: self.kind,
            state: self.state,
            remaining_secs: self.remaining_secs,
            wait_secs: self.wait_secs,
            completed: self.completed,
            progress,
            settings_locked: self.settings_locked(),
            pause_enabled: self.state == RunState::Running,
        }
    }

    /// Valid from Idle or Paused; anything else is a no-op. A fresh start in
    /// synchronized mode waits for the target minute; resuming from pause
    /// always free-runs from the frozen remaining time.
    pub fn start(&mut self) {
        let resuming = match self.state {
            RunState::Idle => false,
            RunState::Paused => true,
            _ => return,
        };

        if self.config.sync_enabled && !resuming {
            self.wait_for_sync();
            return;
        }

        let now_ms = self.clock.now().timestamp_millis();
        self.sync_run = false;
        self.target_end = now_ms + self.remaining_secs as i64 * 1000;
        self.state = RunState::Running;
        self.wake = Some(now_ms + 1000);
    }

    /// Valid from Running only. Freezes the last derived remaining time.
    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.wake = None;
        self.sync_run = false;
        self.state = RunState::Paused;
    }

    /// Valid from any state: back to an idle Work session at full duration,
    /// with the completed count zeroed and persisted, and settings unlocked.
    pub fn reset(&mut self) {
        self.wake = None;
        self.sync_run = false;
        self.state = RunState::Idle;
        self.kind = SessionKind::Work;
        self.remaining_secs = self.session_secs(SessionKind::Work);
        self.wait_secs = 0;
        self.completed = 0;
        self.persist_stats();
    }

    /// Ignored while a session is in progress (start through reset); the
    /// in-progress session keeps its durations.
    pub fn update_settings(&mut self, config: TimerConfig) -> bool {
        if self.settings_locked() {
            return false;
        }
        self.config = config;
        self.remaining_secs = self.session_secs(self.kind);
        self.store.save_settings(&self.config);
        true
    }

    /// Drives the timer; the shell calls this every event-loop pass. Acts
    /// only once the single armed wake deadline has passed, then re-arms.
    pub fn poll(&mut self) {
        let Some(deadline) = self.wake else { return };
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();
        if now_ms < deadline {
            return;
        }
        self.wake = None;

        match self.state {
            RunState::WaitingForSync => {
                if now_ms >= self.sync_start {
                    // Run against the pre-computed minute-aligned target, not
                    // a freshly derived one.
                    self.wait_secs = 0;
                    self.remaining_secs = remaining_ceil(self.target_end, now_ms);
                    self.state = RunState::Running;
                } else {
                    self.wait_secs = remaining_ceil(self.sync_start, now_ms);
                }
                self.wake = Some(next_second(now_ms));
            }
            RunState::Running => {
                self.remaining_secs = if self.sync_run {
                    remaining_ceil(self.target_end, now_ms)
                } else {
                    remaining_floor(self.target_end, now_ms)
                };
                if self.remaining_secs == 0 {
                    self.complete_session();
                } else if self.sync_run {
                    self.wake = Some(next_second(now_ms));
                } else {
                    self.wake = Some(now_ms + 1000);
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn session_secs(&self, kind: SessionKind) -> u64 {
        let minutes = match kind {
            SessionKind::Work => self.config.work_minutes,
            SessionKind::Break => self.config.break_minutes,
        };
        minutes as u64 * 60
    }

    fn persist_stats(&self) {
        let date_key = self.clock.now().format(DAILY_FMT).to_string();
        self.store.save_daily_stats(&date_key, self.completed);
    }

    fn wait_for_sync(&mut self) {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();
        self.sync_run = true;
        self.sync_start = next_sync_instant(now, self.config.sync_minute);
        // Duration of the session kind that will be active once the wait
        // ends, so the session finishes exactly on boundary + duration.
        self.target_end = self.sync_start + self.session_secs(self.kind) as i64 * 1000;
        self.wait_secs = remaining_ceil(self.sync_start, now_ms);
        self.state = RunState::WaitingForSync;
        self.wake = Some(next_second(now_ms));
    }

    fn complete_session(&mut self) {
        self.wake = None;
        match self.kind {
            SessionKind::Work => {
                self.completed += 1;
                self.persist_stats();
                self.notifier
                    .notify("Pomodoro complete!", "Work session finished. Take a break.");
                self.kind = SessionKind::Break;
            }
            SessionKind::Break => {
                self.notifier
                    .notify("Break over!", "Break finished. Back to work.");
                self.kind = SessionKind::Work;
            }
        }
        self.remaining_secs = self.session_secs(self.kind);

        if self.sync_run {
            self.wait_for_session_transition();
        } else {
            let now_ms = self.clock.now().timestamp_millis();
            self.target_end = now_ms + self.remaining_secs as i64 * 1000;
            self.state = RunState::Running;
            self.wake = Some(now_ms + 1000);
        }
    }

    /// Chain the next synchronized session onto a minute boundary: start
    /// right away if the clock already reads second zero, otherwise wait out
    /// the rest of the current minute.
    fn wait_for_session_transition(&mut self) {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();
        let in_minute = now.second() as i64 * 1000 + now.timestamp_subsec_millis() as i64;
        let boundary = if now.second() == 0 {
            now_ms - in_minute
        } else {
            now_ms - in_minute + 60_000
        };
        self.target_end = boundary + self.remaining_secs as i64 * 1000;

        if boundary <= now_ms {
            self.state = RunState::Running;
        } else {
            self.sync_start = boundary;
            self.wait_secs = remaining_ceil(boundary, now_ms);
            self.state = RunState::WaitingForSync;
        }
        self.wake = Some(next_second(now_ms));
    }

    #[cfg(test)]
    fn target_end_millis(&self) -> Millis {
        self.target_end
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone)]
    struct MockClock(Rc<Cell<i64>>);

    impl MockClock {
        fn at(t: DateTime<Local>) -> Self {
            Self(Rc::new(Cell::new(t.timestamp_millis())))
        }

        fn advance_ms(&self, ms: i64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> DateTime<Local> {
            Local.timestamp_millis_opt(self.0.get()).unwrap()
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        settings: Rc<RefCell<Option<TimerConfig>>>,
        stats: Rc<RefCell<HashMap<String, u32>>>,
    }

    impl PersistenceStore for MemoryStore {
        fn save_settings(&self, config: &TimerConfig) {
            *self.settings.borrow_mut() = Some(*config);
        }

        fn load_settings(&self) -> Option<TimerConfig> {
            *self.settings.borrow()
        }

        fn save_daily_stats(&self, date_key: &str, completed: u32) {
            self.stats.borrow_mut().insert(date_key.to_string(), completed);
        }

        fn load_daily_stats(&self, date_key: &str) -> Option<u32> {
            self.stats.borrow().get(date_key).copied()
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier(Rc<RefCell<Vec<(String, String)>>>);

    impl NotificationSink for RecordingNotifier {
        fn notify(&self, title: &str, body: &str) {
            self.0.borrow_mut().push((title.to_string(), body.to_string()));
        }
    }

    fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 4, h, m, s).unwrap()
    }

    fn fixture(
        start: DateTime<Local>,
        config: TimerConfig,
    ) -> (SessionTimer, MockClock, MemoryStore, RecordingNotifier) {
        let clock = MockClock::at(start);
        let store = MemoryStore::default();
        store.save_settings(&config);
        let notifier = RecordingNotifier::default();
        let timer = SessionTimer::new(
            Box::new(clock.clone()),
            Box::new(store.clone()),
            Box::new(notifier.clone()),
        );
        (timer, clock, store, notifier)
    }

    /// Step the clock in whole seconds, polling after each step.
    fn run_secs(timer: &mut SessionTimer, clock: &MockClock, secs: u64) {
        for _ in 0..secs {
            clock.advance_ms(1000);
            timer.poll();
        }
    }

    fn free_config(work: u32, rest: u32) -> TimerConfig {
        TimerConfig {
            work_minutes: work,
            break_minutes: rest,
            sync_minute: 0,
            sync_enabled: false,
        }
    }

    #[test]
    fn session_kinds_alternate_strictly() {
        let (mut timer, clock, _, _) = fixture(local(9, 0, 0), free_config(1, 1));
        timer.start();

        let mut kinds = vec![timer.snapshot().kind];
        for _ in 0..4 {
            run_secs(&mut timer, &clock, 60);
            kinds.push(timer.snapshot().kind);
        }

        assert_eq!(
            kinds,
            vec![
                SessionKind::Work,
                SessionKind::Break,
                SessionKind::Work,
                SessionKind::Break,
                SessionKind::Work,
            ]
        );
    }

    #[test]
    fn remaining_is_derived_not_decremented() {
        let (mut timer, clock, _, _) = fixture(local(9, 0, 0), free_config(25, 5));
        timer.start();

        // Jittered poll cadence: remaining must track the absolute target.
        clock.advance_ms(3700);
        timer.poll();
        assert_eq!(timer.snapshot().remaining_secs, 1496);

        clock.advance_ms(12_345);
        timer.poll();
        assert_eq!(timer.snapshot().remaining_secs, 1483);
    }

    #[test]
    fn remaining_counts_down_without_going_negative() {
        let (mut timer, clock, _, notifier) = fixture(local(9, 0, 0), free_config(1, 1));
        timer.start();

        let mut last = timer.snapshot().remaining_secs;
        for _ in 0..59 {
            clock.advance_ms(1000);
            timer.poll();
            let snap = timer.snapshot();
            assert!(snap.remaining_secs <= last);
            last = snap.remaining_secs;
        }
        assert_eq!(last, 1);
        assert!(notifier.0.borrow().is_empty());

        // The tick that derives zero completes the session immediately.
        clock.advance_ms(1000);
        timer.poll();
        assert_eq!(notifier.0.borrow().len(), 1);
        assert_eq!(timer.snapshot().kind, SessionKind::Break);
    }

    #[test]
    fn sync_wait_targets_exact_minute_boundary() {
        let config = TimerConfig {
            work_minutes: 25,
            break_minutes: 5,
            sync_minute: 10,
            sync_enabled: true,
        };
        let (mut timer, clock, _, _) = fixture(local(10, 9, 58), config);
        timer.start();

        let snap = timer.snapshot();
        assert_eq!(snap.state, RunState::WaitingForSync);
        assert_eq!(snap.wait_secs, 2);
        // Session must end at 10:35:00.000 exactly, not 10:35:02.
        assert_eq!(timer.target_end_millis(), local(10, 35, 0).timestamp_millis());

        run_secs(&mut timer, &clock, 2);
        let snap = timer.snapshot();
        assert_eq!(snap.state, RunState::Running);
        assert_eq!(snap.remaining_secs, 1500);
    }

    #[test]
    fn sync_rollover_past_minute_goes_to_next_hour() {
        assert_eq!(
            next_sync_instant(local(10, 50, 0), 5),
            local(11, 5, 0).timestamp_millis()
        );
        // The current minute is never chosen, even at exactly :00.
        assert_eq!(
            next_sync_instant(local(10, 5, 0), 5),
            local(11, 5, 0).timestamp_millis()
        );
        assert_eq!(
            next_sync_instant(local(10, 9, 58), 10),
            local(10, 10, 0).timestamp_millis()
        );
    }

    #[test]
    fn sync_tick_stays_on_second_boundary_under_jitter() {
        let config = TimerConfig {
            work_minutes: 1,
            break_minutes: 1,
            sync_minute: 10,
            sync_enabled: true,
        };
        let (mut timer, clock, _, notifier) = fixture(local(10, 9, 58), config);
        timer.start();

        // Poll off-boundary: each tick re-aligns itself to the next second,
        // so completion still lands exactly when the boundary tick runs.
        for _ in 0..((2 + 60) * 4) {
            clock.advance_ms(250);
            timer.poll();
        }
        assert_eq!(notifier.0.borrow().len(), 1);
        assert_eq!(timer.snapshot().kind, SessionKind::Break);
    }

    #[test]
    fn sync_sessions_chain_on_minute_boundaries() {
        let config = TimerConfig {
            work_minutes: 1,
            break_minutes: 2,
            sync_minute: 10,
            sync_enabled: true,
        };
        let (mut timer, clock, _, _) = fixture(local(10, 9, 58), config);
        timer.start();

        // 2s wait, then the 1-minute work session ends at 10:11:00 with the
        // clock on second zero, so the break starts immediately.
        run_secs(&mut timer, &clock, 2 + 60);
        let snap = timer.snapshot();
        assert_eq!(snap.kind, SessionKind::Break);
        assert_eq!(snap.state, RunState::Running);
        assert_eq!(snap.remaining_secs, 120);
        assert_eq!(timer.target_end_millis(), local(10, 13, 0).timestamp_millis());
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut timer, clock, _, _) = fixture(local(9, 0, 0), free_config(25, 5));
        timer.start();
        run_secs(&mut timer, &clock, 90);

        timer.reset();
        let first = timer.snapshot();
        timer.reset();
        let second = timer.snapshot();

        assert_eq!(first.state, RunState::Idle);
        assert_eq!(first.kind, SessionKind::Work);
        assert_eq!(first.remaining_secs, 1500);
        assert_eq!(first.completed, 0);
        assert_eq!(second.state, first.state);
        assert_eq!(second.kind, first.kind);
        assert_eq!(second.remaining_secs, first.remaining_secs);
        assert_eq!(second.completed, first.completed);
    }

    #[test]
    fn pause_resume_preserves_remaining() {
        let (mut timer, clock, _, _) = fixture(local(9, 0, 0), free_config(25, 5));
        timer.start();
        run_secs(&mut timer, &clock, 10);
        timer.pause();

        assert_eq!(timer.snapshot().state, RunState::Paused);
        assert_eq!(timer.snapshot().remaining_secs, 1490);

        // Time passing while paused changes nothing.
        clock.advance_ms(100_000);
        timer.poll();
        assert_eq!(timer.snapshot().remaining_secs, 1490);

        timer.start();
        assert_eq!(timer.snapshot().remaining_secs, 1490);
        run_secs(&mut timer, &clock, 1);
        assert_eq!(timer.snapshot().remaining_secs, 1489);
    }

    #[test]
    fn resume_from_pause_skips_sync_wait() {
        let config = TimerConfig {
            work_minutes: 25,
            break_minutes: 5,
            sync_minute: 30,
            sync_enabled: true,
        };
        let (mut timer, clock, _, _) = fixture(local(10, 0, 0), config);
        timer.start();
        run_secs(&mut timer, &clock, 30 * 60 + 10);
        assert_eq!(timer.snapshot().state, RunState::Running);

        timer.pause();
        let frozen = timer.snapshot().remaining_secs;
        timer.start();

        // Free-running semantics after a pause: no new minute wait.
        let snap = timer.snapshot();
        assert_eq!(snap.state, RunState::Running);
        assert_eq!(snap.remaining_secs, frozen);
    }

    #[test]
    fn work_completion_side_effects() {
        let (mut timer, clock, store, notifier) = fixture(local(9, 0, 0), free_config(1, 1));
        let date_key = clock.now().format(DAILY_FMT).to_string();
        timer.start();

        run_secs(&mut timer, &clock, 60);
        let snap = timer.snapshot();
        assert_eq!(snap.completed, 1);
        assert_eq!(snap.kind, SessionKind::Break);
        assert_eq!(store.load_daily_stats(&date_key), Some(1));
        {
            let sent = notifier.0.borrow();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].0, "Pomodoro complete!");
        }

        // Completing the break notifies but does not count.
        run_secs(&mut timer, &clock, 60);
        let snap = timer.snapshot();
        assert_eq!(snap.completed, 1);
        assert_eq!(snap.kind, SessionKind::Work);
        let sent = notifier.0.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].0, "Break over!");
    }

    #[test]
    fn settings_locked_from_start_until_reset() {
        let (mut timer, clock, store, _) = fixture(local(9, 0, 0), free_config(25, 5));
        timer.start();
        run_secs(&mut timer, &clock, 5);

        let rejected = free_config(50, 10);
        assert!(!timer.update_settings(rejected));
        assert_eq!(timer.config().work_minutes, 25);

        timer.pause();
        assert!(!timer.update_settings(rejected));
        assert_eq!(timer.snapshot().remaining_secs, 1495);

        timer.reset();
        assert!(timer.update_settings(rejected));
        assert_eq!(timer.config().work_minutes, 50);
        assert_eq!(timer.snapshot().remaining_secs, 3000);
        assert_eq!(store.load_settings().map(|c| c.work_minutes), Some(50));
    }

    #[test]
    fn wrong_state_operations_are_noops() {
        let (mut timer, clock, _, _) = fixture(local(9, 0, 0), free_config(25, 5));

        timer.pause();
        assert_eq!(timer.snapshot().state, RunState::Idle);

        timer.start();
        let target = timer.target_end_millis();
        timer.start();
        assert_eq!(timer.target_end_millis(), target);

        run_secs(&mut timer, &clock, 3);
        timer.pause();
        timer.pause();
        assert_eq!(timer.snapshot().state, RunState::Paused);
        assert_eq!(timer.snapshot().remaining_secs, 1497);
    }

    #[test]
    fn zero_duration_session_completes_on_next_tick() {
        let (mut timer, clock, _, notifier) = fixture(local(9, 0, 0), free_config(0, 1));
        timer.start();
        assert_eq!(timer.snapshot().remaining_secs, 0);

        run_secs(&mut timer, &clock, 1);
        assert_eq!(notifier.0.borrow().len(), 1);
        assert_eq!(timer.snapshot().kind, SessionKind::Break);
        assert_eq!(timer.snapshot().remaining_secs, 60);
    }

    #[test]
    fn completed_count_survives_restart_within_day() {
        let (mut timer, clock, store, notifier) = fixture(local(9, 0, 0), free_config(1, 1));
        timer.start();
        run_secs(&mut timer, &clock, 60);
        assert_eq!(timer.snapshot().completed, 1);

        // A fresh timer over the same store picks up today's count.
        let reopened = SessionTimer::new(
            Box::new(clock.clone()),
            Box::new(store.clone()),
            Box::new(notifier.clone()),
        );
        assert_eq!(reopened.snapshot().completed, 1);
    }

    #[test]
    fn snapshot_reports_progress_and_control_states() {
        let (mut timer, clock, _, _) = fixture(local(9, 0, 0), free_config(25, 5));
        let snap = timer.snapshot();
        assert_eq!(snap.progress, 0.0);
        assert!(!snap.settings_locked);
        assert!(!snap.pause_enabled);
        assert_eq!(snap.time_text(), "25:00");

        timer.start();
        run_secs(&mut timer, &clock, 750);
        let snap = timer.snapshot();
        assert!((snap.progress - 0.5).abs() < 1e-9);
        assert!(snap.settings_locked);
        assert!(snap.pause_enabled);
        assert_eq!(snap.time_text(), "12:30");
    }
}
