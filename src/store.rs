use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::PathBuf};

use crate::timer::{PersistenceStore, TimerConfig};

const SETTINGS_FILE: &str = "settings.json";
const STATS_FILE: &str = "stats.json";
// Day entries kept in the stats file before the oldest are dropped.
const MAX_STAT_DAYS: usize = 60;

#[derive(Serialize, Deserialize, Clone, Copy, Default)]
struct DayStats {
    completed: u32,
}

type StatsFile = BTreeMap<String, DayStats>;

/// JSON-file persistence: one file for settings, one mapping `%Y-%m-%d` day
/// keys to that day's completed count. Unreadable or corrupt files are
/// treated as absent.
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: PathBuf) -> Self {
        let _ = fs::create_dir_all(&dir);
        Self { dir }
    }

    pub fn default_dir() -> PathBuf {
        let mut path = PathBuf::from(".");
        path.push("pomosync");
        path
    }

    fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    fn load<T: DeserializeOwned>(&self, filename: &str) -> Option<T> {
        fs::read_to_string(self.path(filename))
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    fn save<T: Serialize>(&self, filename: &str, data: &T) -> io::Result<()> {
        fs::write(self.path(filename), serde_json::to_string_pretty(data)?)
    }
}

impl PersistenceStore for JsonStore {
    fn save_settings(&self, config: &TimerConfig) {
        let _ = self.save(SETTINGS_FILE, config);
    }

    fn load_settings(&self) -> Option<TimerConfig> {
        self.load(SETTINGS_FILE)
    }

    fn save_daily_stats(&self, date_key: &str, completed: u32) {
        let mut stats: StatsFile = self.load(STATS_FILE).unwrap_or_default();
        stats.insert(date_key.to_string(), DayStats { completed });
        while stats.len() > MAX_STAT_DAYS {
            stats.pop_first();
        }
        let _ = self.save(STATS_FILE, &stats);
    }

    fn load_daily_stats(&self, date_key: &str) -> Option<u32> {
        let stats: StatsFile = self.load(STATS_FILE)?;
        stats.get(date_key).map(|day| day.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn settings_round_trip() {
        let (_dir, store) = temp_store();
        assert!(store.load_settings().is_none());

        let config = TimerConfig {
            work_minutes: 50,
            break_minutes: 10,
            sync_minute: 30,
            sync_enabled: true,
        };
        store.save_settings(&config);
        assert_eq!(store.load_settings(), Some(config));
    }

    #[test]
    fn corrupt_files_read_as_absent() {
        let (_dir, store) = temp_store();
        fs::write(store.path(SETTINGS_FILE), "not json {{").unwrap();
        fs::write(store.path(STATS_FILE), "[1, 2").unwrap();

        assert!(store.load_settings().is_none());
        assert!(store.load_daily_stats("2025-03-04").is_none());

        // And writes recover the file.
        store.save_daily_stats("2025-03-04", 3);
        assert_eq!(store.load_daily_stats("2025-03-04"), Some(3));
    }

    #[test]
    fn daily_stats_are_keyed_per_day() {
        let (_dir, store) = temp_store();
        store.save_daily_stats("2025-03-03", 7);
        store.save_daily_stats("2025-03-04", 2);

        assert_eq!(store.load_daily_stats("2025-03-03"), Some(7));
        assert_eq!(store.load_daily_stats("2025-03-04"), Some(2));
        assert_eq!(store.load_daily_stats("2025-03-05"), None);

        store.save_daily_stats("2025-03-04", 0);
        assert_eq!(store.load_daily_stats("2025-03-04"), Some(0));
    }

    #[test]
    fn oldest_days_are_pruned() {
        let (_dir, store) = temp_store();
        for day in 1..=MAX_STAT_DAYS + 5 {
            store.save_daily_stats(&format!("2025-01-{:03}", day), 1);
        }

        assert!(store.load_daily_stats("2025-01-001").is_none());
        assert!(store.load_daily_stats("2025-01-005").is_none());
        assert_eq!(store.load_daily_stats("2025-01-006"), Some(1));
        assert_eq!(
            store.load_daily_stats(&format!("2025-01-{:03}", MAX_STAT_DAYS + 5)),
            Some(1)
        );
    }
}
