/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Problems are collected as warnings rather than printed, because the
/// logger is configured from this very file; the caller logs them once
/// tracing is up.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::player::SlideTiming;
use crate::domain::sprite::Character;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub game: GameSettings,
    pub timing: TimingConfig,
    pub general: GeneralConfig,
}

#[derive(Clone, Debug)]
pub struct GameSettings {
    /// Enemies at level 1; resets truncate back to this.
    pub enemies: usize,
    /// Preselected character index on the select screen.
    pub character: usize,
}

#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Target tick cadence of the driver.
    pub frame_ms: u64,
    pub slide: SlideTiming,
}

#[derive(Clone, Debug)]
pub struct GeneralConfig {
    pub log_file: PathBuf,
    /// Default filter directive; `RUST_LOG` wins when set.
    pub log_level: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_enemies")]
    enemies: usize,
    #[serde(default = "default_character")]
    character: usize,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    #[serde(default = "default_slide_steps")]
    slide_steps: u32,
    #[serde(default = "default_slide_step_ms")]
    slide_step_ms: u64,
    #[serde(default = "default_slide_release_ms")]
    slide_release_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default = "default_log_level")]
    log_level: String,
}

// ── Defaults ──

fn default_enemies() -> usize { 5 }
fn default_character() -> usize { 2 }
fn default_frame_ms() -> u64 { 16 }     // ~60 Hz display refresh
fn default_slide_steps() -> u32 { 5 }
fn default_slide_step_ms() -> u64 { 15 }
fn default_slide_release_ms() -> u64 { 70 }
fn default_log_level() -> String { "info".into() }
fn default_log_file() -> PathBuf { std::env::temp_dir().join("frogger.log") }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            enemies: default_enemies(),
            character: default_character(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            frame_ms: default_frame_ms(),
            slide_steps: default_slide_steps(),
            slide_step_ms: default_slide_step_ms(),
            slide_release_ms: default_slide_release_ms(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), &mut Vec::new())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Returns the config plus any warnings met on the way.
    pub fn load() -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => match GameConfig::parse(&text) {
                    Ok((config, mut more)) => {
                        warnings.append(&mut more);
                        return (config, warnings);
                    }
                    Err(e) => {
                        warnings.push(format!("{}: parse error, using defaults: {e}", path.display()));
                        return (GameConfig::default(), warnings);
                    }
                },
                Err(e) => {
                    warnings.push(format!("could not read {}: {e}", path.display()));
                }
            }
        }
        (GameConfig::default(), warnings)
    }

    /// Parse config text directly. Unknown keys are ignored.
    pub fn parse(text: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut warnings = Vec::new();
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        let config = GameConfig::from_toml(toml_cfg, &mut warnings);
        Ok((config, warnings))
    }

    /// Clamp out-of-range values, noting each adjustment.
    fn from_toml(cfg: TomlConfig, warnings: &mut Vec<String>) -> Self {
        let mut enemies = cfg.game.enemies;
        if enemies == 0 {
            warnings.push("game.enemies must be at least 1; using 1".into());
            enemies = 1;
        }

        let last = Character::ALL.len() - 1;
        let mut character = cfg.game.character;
        if character > last {
            warnings.push(format!("game.character {character} out of range 0..={last}; using {last}"));
            character = last;
        }

        let mut frame_ms = cfg.timing.frame_ms;
        if frame_ms == 0 {
            warnings.push("timing.frame_ms must be positive; using 1".into());
            frame_ms = 1;
        }

        let mut steps = cfg.timing.slide_steps;
        if steps == 0 {
            warnings.push("timing.slide_steps must be at least 1; using 1".into());
            steps = 1;
        }

        // The lock must outlive the last scheduled step.
        let last_step_ms = u64::from(steps - 1).saturating_mul(cfg.timing.slide_step_ms);
        let mut release_ms = cfg.timing.slide_release_ms;
        if release_ms < last_step_ms {
            warnings.push(format!(
                "timing.slide_release_ms {release_ms} ends before the last slide step; using {last_step_ms}"
            ));
            release_ms = last_step_ms;
        }

        let log_file = cfg.general.log_file
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_file);

        GameConfig {
            game: GameSettings { enemies, character },
            timing: TimingConfig {
                frame_ms,
                slide: SlideTiming {
                    steps,
                    step_ms: cfg.timing.slide_step_ms as f64,
                    release_ms: release_ms as f64,
                },
            },
            general: GeneralConfig {
                log_file,
                log_level: cfg.general.log_level,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_rules() {
        let c = GameConfig::default();
        assert_eq!(c.game.enemies, 5);
        assert_eq!(c.game.character, 2);
        assert_eq!(c.timing.frame_ms, 16);
        assert_eq!(c.timing.slide.steps, 5);
        assert_eq!(c.timing.slide.step_ms, 15.0);
        assert_eq!(c.timing.slide.release_ms, 70.0);
        assert_eq!(c.general.log_level, "info");
        assert!(c.general.log_file.ends_with("frogger.log"));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let (c, warnings) = GameConfig::parse("").unwrap();
        assert!(warnings.is_empty());
        assert_eq!(c.game.enemies, 5);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let (c, warnings) = GameConfig::parse(
            "[game]\nenemies = 3\n\n[general]\nlog_file = \"/tmp/x.log\"\nlog_level = \"debug\"\n",
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(c.game.enemies, 3);
        assert_eq!(c.game.character, 2);
        assert_eq!(c.timing.slide.steps, 5);
        assert_eq!(c.general.log_file, PathBuf::from("/tmp/x.log"));
        assert_eq!(c.general.log_level, "debug");
    }

    #[test]
    fn out_of_range_values_are_clamped_with_warnings() {
        let (c, warnings) = GameConfig::parse(
            "[game]\nenemies = 0\ncharacter = 9\n\n[timing]\nframe_ms = 0\nslide_steps = 4\nslide_step_ms = 20\nslide_release_ms = 10\n",
        )
        .unwrap();
        assert_eq!(warnings.len(), 4, "{warnings:?}");
        assert_eq!(c.game.enemies, 1);
        assert_eq!(c.game.character, 4);
        assert_eq!(c.timing.frame_ms, 1);
        assert_eq!(c.timing.slide.release_ms, 60.0);
    }

    #[test]
    fn huge_slide_timing_saturates() {
        let (c, warnings) = GameConfig::parse(
            "[timing]\nslide_steps = 4\nslide_step_ms = 9223372036854775807\nslide_release_ms = 70\n",
        )
        .unwrap();
        assert_eq!(warnings.len(), 1, "{warnings:?}");
        assert_eq!(c.timing.slide.release_ms, u64::MAX as f64);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(GameConfig::parse("[game\nenemies = 3").is_err());
    }
}
