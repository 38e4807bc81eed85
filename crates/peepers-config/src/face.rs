use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Inclusive millisecond range `[min, max]` a random duration is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MsRange {
    pub min: u32,
    pub max: u32,
}

impl MsRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Half-open bounds `[min, max + 1)` for an exclusive-upper generator.
    pub fn half_open(&self) -> (u32, u32) {
        (self.min, self.max.saturating_add(1))
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.min > self.max {
            bail!("{field}: min ({}) must not exceed max ({})", self.min, self.max);
        }
        Ok(())
    }
}

/// Root configuration loaded from `peepers.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FaceConfig {
    /// Seed for the director RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub blink: BlinkConfig,
    pub emotion: EmotionConfig,
    pub gaze: GazeConfig,
    pub render: RenderConfig,
}

/// When and how fast the eyes blink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BlinkConfig {
    /// Gap between two blinks.
    pub interval_ms: MsRange,
    /// Full close-and-open time of one blink.
    pub duration_sec: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            interval_ms: MsRange::new(2_000, 8_000),
            duration_sec: 0.25,
        }
    }
}

/// Emotion director dwell times and decision odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EmotionConfig {
    /// How long "neutral" is held once reached.
    pub neutral_dwell_ms: MsRange,
    /// How long any other expression is held once reached.
    pub emotion_dwell_ms: MsRange,
    /// Length of the morph between two expressions.
    pub transition_ms: MsRange,
    /// Chance (0–100) of returning to neutral from an expression.
    pub return_to_neutral_percent: u32,
    /// Chance (0–100) of leaving neutral for a random expression.
    pub leave_neutral_percent: u32,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            neutral_dwell_ms: MsRange::new(3_000, 8_000),
            emotion_dwell_ms: MsRange::new(2_000, 5_000),
            transition_ms: MsRange::new(300, 700),
            return_to_neutral_percent: 80,
            leave_neutral_percent: 60,
        }
    }
}

/// Sideways glance timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GazeConfig {
    /// Wait in the centre before considering a glance.
    pub idle_ms: MsRange,
    /// Chance (0–100) that an expired idle wait turns into a glance.
    pub glance_percent: u32,
    /// Time to slide out to the side.
    pub to_side_sec: f32,
    /// Pause at the side before returning.
    pub dwell_at_side_ms: MsRange,
    /// Time to slide back to the centre.
    pub to_center_sec: f32,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            idle_ms: MsRange::new(4_000, 8_000),
            glance_percent: 70,
            to_side_sec: 0.25,
            dwell_at_side_ms: MsRange::new(100, 400),
            to_center_sec: 0.3,
        }
    }
}

/// Geometry applied when drawing the eyes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RenderConfig {
    /// Largest horizontal gaze displacement in pixels.
    pub max_gaze_offset: f32,
    /// Fraction the far eye shrinks (and the near eye grows) at full gaze.
    pub perspective_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_gaze_offset: 10.0,
            perspective_scale: 0.15,
        }
    }
}

impl FaceConfig {
    /// Parse and validate configuration TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse face config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read face config at {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid face config at {}", path.display()))
    }

    /// Check ranges, percentages, and durations.
    pub fn validate(&self) -> Result<()> {
        self.blink.interval_ms.validate("blink.interval_ms")?;
        validate_seconds("blink.duration_sec", self.blink.duration_sec)?;

        self.emotion.neutral_dwell_ms.validate("emotion.neutral_dwell_ms")?;
        self.emotion.emotion_dwell_ms.validate("emotion.emotion_dwell_ms")?;
        self.emotion.transition_ms.validate("emotion.transition_ms")?;
        if self.emotion.transition_ms.min == 0 {
            bail!("emotion.transition_ms: min must be positive");
        }
        validate_percent(
            "emotion.return_to_neutral_percent",
            self.emotion.return_to_neutral_percent,
        )?;
        validate_percent(
            "emotion.leave_neutral_percent",
            self.emotion.leave_neutral_percent,
        )?;

        self.gaze.idle_ms.validate("gaze.idle_ms")?;
        self.gaze.dwell_at_side_ms.validate("gaze.dwell_at_side_ms")?;
        validate_percent("gaze.glance_percent", self.gaze.glance_percent)?;
        validate_seconds("gaze.to_side_sec", self.gaze.to_side_sec)?;
        validate_seconds("gaze.to_center_sec", self.gaze.to_center_sec)?;

        let offset = self.render.max_gaze_offset;
        if !offset.is_finite() || offset <= 0.0 {
            bail!("render.max_gaze_offset must be a positive number, got {offset}");
        }
        let scale = self.render.perspective_scale;
        if !(0.0..1.0).contains(&scale) {
            bail!("render.perspective_scale must be in [0, 1), got {scale}");
        }

        Ok(())
    }
}

fn validate_percent(field: &str, value: u32) -> Result<()> {
    if value > 100 {
        bail!("{field} must be between 0 and 100, got {value}");
    }
    Ok(())
}

fn validate_seconds(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{field} must be a positive number of seconds, got {value}");
    }
    Ok(())
}
