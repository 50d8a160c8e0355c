//! Device capability tiers, resolved once at mount and threaded into the
//! generators instead of being re-queried per frame.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityTier {
    High,
    Low,
}

/// Which decorative background is being driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Full-screen growing branch field.
    Branches,
    /// Starfield with orbiting matter/antimatter pairs.
    Particles,
}

/// Raw signals read from the host environment.
#[derive(Clone, Copy, Debug)]
pub struct DeviceCapabilities {
    pub reduced_motion: bool,
    pub save_data: bool,
    /// Logical core count; `None` when the host does not report it.
    pub hardware_concurrency: Option<u32>,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            save_data: false,
            hardware_concurrency: None,
        }
    }
}

impl QualityTier {
    pub fn detect(caps: &DeviceCapabilities) -> Self {
        // Unknown core counts are treated as capable hardware.
        let cores = caps.hardware_concurrency.unwrap_or(8);
        if caps.save_data || cores <= LOW_POWER_MAX_CORES {
            QualityTier::Low
        } else {
            QualityTier::High
        }
    }

    pub fn tree_count(self) -> usize {
        match self {
            QualityTier::High => TREES_HIGH,
            QualityTier::Low => TREES_LOW,
        }
    }

    pub fn branch_count(self) -> usize {
        match self {
            QualityTier::High => BRANCHES_HIGH,
            QualityTier::Low => BRANCHES_LOW,
        }
    }

    pub fn burst_count(self) -> usize {
        match self {
            QualityTier::High => BURST_COUNT_HIGH,
            QualityTier::Low => BURST_COUNT_LOW,
        }
    }
}

impl Variant {
    pub fn max_fps(self, tier: QualityTier) -> u32 {
        match (self, tier) {
            (Variant::Branches, QualityTier::High) => BRANCH_FPS_HIGH,
            (Variant::Branches, QualityTier::Low) => BRANCH_FPS_LOW,
            (Variant::Particles, QualityTier::High) => PARTICLE_FPS_HIGH,
            (Variant::Particles, QualityTier::Low) => PARTICLE_FPS_LOW,
        }
    }

    pub fn dpr_max(self) -> f32 {
        match self {
            Variant::Branches => BRANCH_DPR_MAX,
            Variant::Particles => PARTICLE_DPR_MAX,
        }
    }
}

/// Everything about pacing that is decided once per mounted instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionPolicy {
    pub variant: Variant,
    pub tier: QualityTier,
    pub reduced_motion: bool,
    pub max_fps: u32,
}

impl MotionPolicy {
    pub fn resolve(variant: Variant, caps: &DeviceCapabilities) -> Self {
        let tier = QualityTier::detect(caps);
        let max_fps = if caps.reduced_motion {
            0
        } else {
            variant.max_fps(tier)
        };
        Self {
            variant,
            tier,
            reduced_motion: caps.reduced_motion,
            max_fps,
        }
    }

    /// Apply a configured frame-rate cap. Reduced motion always wins, and
    /// an animated policy keeps at least one frame a second.
    pub fn with_max_fps(mut self, cap: Option<u32>) -> Self {
        if let Some(cap) = cap {
            if !self.reduced_motion {
                self.max_fps = self.max_fps.min(cap.max(1));
            }
        }
        self
    }
}
