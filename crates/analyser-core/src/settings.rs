use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};

use crate::error::Loaded;

/// Default stopword list looked up next to the working directory.
pub const DEFAULT_STOPWORDS: &str = "stop_hinglish.txt";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Statistics for an exported chat transcript
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chat-analyser",
    about = "Statistics for an exported chat transcript",
    version
)]
pub struct Settings {
    /// Exported transcript (.txt)
    pub transcript: PathBuf,

    /// Participant to analyse, or "Overall" for the whole chat
    #[arg(long, default_value = "Overall")]
    pub user: String,

    /// Whitespace-separated stopword list used for the word ranking
    #[arg(long, default_value = DEFAULT_STOPWORDS)]
    pub stopwords: PathBuf,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Number of ranked words and emojis shown in the text report (1-100)
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top: u32,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.chat-analyser/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl LastUsedParams {
    /// `~/.chat-analyser/last_used.json`, or relative to the working
    /// directory when no home directory is known.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".chat-analyser").join("last_used.json")
    }

    /// Read persisted params.  A missing or unreadable file yields the
    /// empty set of params.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Write params via a sibling temp file and a rename, so a crash never
    /// leaves a half-written file behind.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&tmp, path)
    }

    pub fn clear_at(path: &Path) -> std::io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Fill every setting the user did not pass on the command line from the
    /// persisted params.  The transcript and user are per-run and never
    /// restored.
    fn apply_to(self, settings: &mut Settings, matches: &ArgMatches) {
        let from_cli = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);

        if let Some(v) = self.stopwords.filter(|_| !from_cli("stopwords")) {
            settings.stopwords = v;
        }
        if let Some(v) = self.format.filter(|_| !from_cli("format")) {
            settings.format = v;
        }
        if let Some(v) = self.top.filter(|_| !from_cli("top")) {
            settings.top = v;
        }
        if let Some(v) = self.log_level.filter(|_| !from_cli("log_level")) {
            settings.log_level = v;
        }
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            stopwords: Some(s.stopwords.clone()),
            format: Some(s.format.clone()),
            top: Some(s.top),
            log_level: Some(s.log_level.clone()),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, restore last-used values and persist the
    /// merged result.  Exits with clap's usage message on invalid arguments.
    ///
    /// Failing to save or clear the last-used file is not fatal: the settings
    /// come back [`Loaded::Degraded`] with a warning for the caller to log
    /// once logging is up.
    pub fn load_with_last_used() -> Loaded<Self> {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// As [`Settings::load_with_last_used`], with explicit args and config
    /// path.
    pub fn load_with_last_used_impl(args: Vec<OsString>, config_path: &Path) -> Loaded<Self> {
        let matches = Settings::command().get_matches_from(args);
        let mut settings = Settings::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

        let persisted = if settings.clear {
            LastUsedParams::clear_at(config_path)
                .map_err(|e| format!("Could not clear {}: {}", config_path.display(), e))
        } else {
            LastUsedParams::load_from(config_path).apply_to(&mut settings, &matches);
            LastUsedParams::from(&settings)
                .save_to(config_path)
                .map_err(|e| format!("Could not save {}: {}", config_path.display(), e))
        };

        // Applied after persisting so the override never sticks.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        match persisted {
            Ok(()) => Loaded::Complete(settings),
            Err(warning) => Loaded::Degraded {
                value: settings,
                warning,
            },
        }
    }

    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(|s| OsString::from(*s)).collect()
    }

    // ── LastUsedParams ────────────────────────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            stopwords: Some(PathBuf::from("/lists/stop.txt")),
            format: Some("json".to_string()),
            top: Some(10),
            log_level: Some("INFO".to_string()),
        };
        params.save_to(&path).expect("save");

        let loaded = LastUsedParams::load_from(&path);
        assert_eq!(loaded.stopwords, Some(PathBuf::from("/lists/stop.txt")));
        assert_eq!(loaded.format, Some("json".to_string()));
        assert_eq!(loaded.top, Some(10));
        assert_eq!(loaded.log_level, Some("INFO".to_string()));
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert!(loaded.stopwords.is_none());
        assert!(loaded.format.is_none());
        assert!(loaded.top.is_none());
        assert!(loaded.log_level.is_none());
    }

    #[test]
    fn test_last_used_params_default_when_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(LastUsedParams::load_from(&path).format.is_none());
    }

    #[test]
    fn test_last_used_params_clear_missing_is_ok() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(LastUsedParams::clear_at(&tmp_config_path(&tmp)).is_ok());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&path).expect("save");
        assert!(path.exists());

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    // ── Settings defaults / parsing ───────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["chat-analyser", "chat.txt"]);
        assert_eq!(settings.transcript, PathBuf::from("chat.txt"));
        assert_eq!(settings.user, "Overall");
        assert_eq!(settings.stopwords, PathBuf::from(DEFAULT_STOPWORDS));
        assert_eq!(settings.format, "text");
        assert_eq!(settings.top, 20);
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
        assert!(!settings.wants_json());
    }

    #[test]
    fn test_settings_cli_user_and_format() {
        let settings = Settings::parse_from([
            "chat-analyser",
            "chat.txt",
            "--user",
            "Alice",
            "--format",
            "json",
        ]);
        assert_eq!(settings.user, "Alice");
        assert!(settings.wants_json());
    }

    #[test]
    fn test_settings_rejects_top_out_of_range() {
        let result = Settings::try_parse_from(["chat-analyser", "chat.txt", "--top", "0"]);
        assert!(result.is_err());
    }

    // ── load_with_last_used_impl ──────────────────────────────────────────────

    #[test]
    fn test_load_with_last_used_merges_persisted_format() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            format: Some("json".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(args(&["chat-analyser", "chat.txt"]), &config_path)
                .into_value();
        assert_eq!(settings.format, "json");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            format: Some("json".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            args(&["chat-analyser", "chat.txt", "--format", "text"]),
            &config_path,
        )
        .into_value();
        assert_eq!(settings.format, "text");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            args(&["chat-analyser", "chat.txt", "--stopwords", "/lists/en.txt"]),
            &config_path,
        );

        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.stopwords, Some(PathBuf::from("/lists/en.txt")));
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams::default()
            .save_to(&config_path)
            .expect("save");

        Settings::load_with_last_used_impl(
            args(&["chat-analyser", "chat.txt", "--clear"]),
            &config_path,
        );
        assert!(!config_path.exists());
    }

    #[test]
    fn test_load_with_last_used_debug_not_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings = Settings::load_with_last_used_impl(
            args(&["chat-analyser", "chat.txt", "--debug"]),
            &config_path,
        )
        .into_value();
        assert_eq!(settings.log_level, "DEBUG");

        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.log_level, Some("WARNING".to_string()));
    }

    #[test]
    fn test_load_with_last_used_reports_save_failure() {
        let tmp = TempDir::new().expect("tempdir");
        // A plain file where the config directory should be.
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let config_path = blocker.join("last_used.json");

        let loaded = Settings::load_with_last_used_impl(
            args(&["chat-analyser", "chat.txt", "--format", "json"]),
            &config_path,
        );

        assert!(loaded.warning().unwrap().starts_with("Could not save"));
        assert!(loaded.value().wants_json());
    }

    #[test]
    fn test_load_with_last_used_complete_on_success() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = Settings::load_with_last_used_impl(
            args(&["chat-analyser", "chat.txt"]),
            &tmp_config_path(&tmp),
        );
        assert!(loaded.warning().is_none());
    }
}
