use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_reprise_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", "/tmp/reprise-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/reprise-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("reprise")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("reprise")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_reference_cadence_and_mode() {
    let s = Settings::default();
    assert!(matches!(s.playback.play_mode, PlayModeSetting::RepeatAll));
    assert_eq!(s.playback.sample_interval_ms, 100);
    assert!(!s.playback.autoplay);
    assert_eq!(s.playlist.path, std::path::PathBuf::from("songs.json"));
    assert!(s.logging.file.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_play_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
play_mode = "repeat_one"
sample_interval_ms = 250
autoplay = true

[playlist]
path = "/srv/music/songs.json"

[controls]
scrub_percent = 10.0

[ui]
header_text = "hello"
now_playing_fields = ["title", "duration"]
now_playing_separator = " • "

[logging]
file = "/tmp/reprise.log"
filter = "reprise=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("REPRISE__PLAYBACK__SAMPLE_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert!(matches!(s.playback.play_mode, PlayModeSetting::RepeatOne));
    assert_eq!(s.playback.sample_interval_ms, 250);
    assert!(s.playback.autoplay);
    assert_eq!(
        s.playlist.path,
        std::path::PathBuf::from("/srv/music/songs.json")
    );
    assert_eq!(s.controls.scrub_percent, 10.0);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.now_playing_fields.len(), 2);
    assert!(matches!(s.ui.now_playing_fields[0], TrackDisplayField::Title));
    assert!(matches!(s.ui.now_playing_fields[1], TrackDisplayField::Duration));
    assert_eq!(s.ui.now_playing_separator, " • ");
    assert_eq!(
        s.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/reprise.log"))
    );
    assert_eq!(s.logging.filter, "reprise=debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
sample_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REPRISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("REPRISE__PLAYBACK__SAMPLE_INTERVAL_MS", "40");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.sample_interval_ms, 40);
}

#[test]
fn validate_rejects_zero_interval_and_out_of_range_scrub() {
    let mut s = Settings::default();
    s.playback.sample_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.scrub_percent = 0.0;
    assert!(s.validate().is_err());
    s.controls.scrub_percent = 150.0;
    assert!(s.validate().is_err());
    s.controls.scrub_percent = 100.0;
    assert!(s.validate().is_ok());
}
