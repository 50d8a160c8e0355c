//! Optional per-container overrides, read from `data-*` attributes.

use crate::error::{MotionError, Result};
use crate::quality::QualityTier;
use crate::scene::ParticleSceneConfig;
use std::str::FromStr;

pub const ATTR_STAR_COUNT: &str = "data-star-count";
pub const ATTR_BURST_COUNT: &str = "data-burst-count";
pub const ATTR_SEED: &str = "data-seed";
pub const ATTR_MAX_FPS: &str = "data-max-fps";

const MAX_STARS: usize = 5_000;
const MAX_BURST: usize = 1_000;
const MAX_FPS_CAP: u32 = 240;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionConfig {
    pub star_count: Option<usize>,
    pub burst_count: Option<usize>,
    pub seed: Option<u64>,
    pub max_fps: Option<u32>,
}

fn parse<T: FromStr>(key: &'static str, raw: Option<String>) -> Result<Option<T>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| MotionError::InvalidConfig { key, value: raw })
}

fn bounded<T: PartialOrd + ToString>(
    key: &'static str,
    value: Option<T>,
    min: T,
    max: T,
) -> Result<Option<T>> {
    match value {
        Some(v) if v < min || v > max => Err(MotionError::InvalidConfig {
            key,
            value: v.to_string(),
        }),
        other => Ok(other),
    }
}

impl MotionConfig {
    /// Parse from an attribute lookup. Missing or blank attributes keep
    /// the default; malformed or out-of-range ones are an error.
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let star_count = parse::<usize>(ATTR_STAR_COUNT, get(ATTR_STAR_COUNT))?;
        let burst_count = parse::<usize>(ATTR_BURST_COUNT, get(ATTR_BURST_COUNT))?;
        let seed = parse::<u64>(ATTR_SEED, get(ATTR_SEED))?;
        let max_fps = parse::<u32>(ATTR_MAX_FPS, get(ATTR_MAX_FPS))?;
        Ok(Self {
            star_count: bounded(ATTR_STAR_COUNT, star_count, 0, MAX_STARS)?,
            burst_count: bounded(ATTR_BURST_COUNT, burst_count, 0, MAX_BURST)?,
            seed,
            // A zero cap would keep the loop running without ever drawing.
            max_fps: bounded(ATTR_MAX_FPS, max_fps, 1, MAX_FPS_CAP)?,
        })
    }

    /// Scene settings for the particle variant; `fallback_seed` is used
    /// when no seed is configured.
    pub fn particle_scene(&self, tier: QualityTier, fallback_seed: u64) -> ParticleSceneConfig {
        let mut config = ParticleSceneConfig::new(tier, self.seed.unwrap_or(fallback_seed));
        if let Some(stars) = self.star_count {
            config.star_count = stars;
        }
        if let Some(burst) = self.burst_count {
            config.burst_count = burst;
        }
        config
    }
}
