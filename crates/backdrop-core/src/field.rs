//! Branch-variant field: a handful of trees growing from the bottom edge,
//! each a tapering trunk with two levels of branches.
//!
//! The skeleton (segment start, direction, length, thickness) only depends on
//! time and the smoothed parameters, so it is built once per frame here and
//! shared by the WGSL shader and the CPU raster fallback. Per-pixel work is
//! limited to segment coverage plus fbm jitter.

use crate::constants::*;
use crate::error::{MotionError, Result};
use crate::noise::{fbm, hash, mix3, normalize_or, smoothstep};
use crate::quality::QualityTier;
use crate::smoother::ParamSnapshot;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchSegment {
    pub start: Vec2,
    /// Unit growth direction.
    pub dir: Vec2,
    pub length: f32,
    pub thickness: f32,
}

pub type Segments = SmallVec<[BranchSegment; MAX_SEGMENTS]>;

/// Everything needed to shade one frame of the branch field.
#[derive(Clone, Debug)]
pub struct BranchFrame {
    pub time: f32,
    pub params: ParamSnapshot,
    pub segments: Segments,
}

#[derive(Clone, Copy, Debug)]
pub struct BranchField {
    trees: usize,
    branches: usize,
}

impl BranchField {
    pub fn new(tier: QualityTier) -> Self {
        Self {
            trees: tier.tree_count(),
            branches: tier.branch_count(),
        }
    }

    pub fn tree_count(&self) -> usize {
        self.trees
    }

    pub fn segments_per_frame(&self) -> usize {
        self.trees * (1 + self.branches * (1 + SUB_BRANCHES))
    }

    pub fn frame(&self, time: f32, params: ParamSnapshot) -> BranchFrame {
        BranchFrame {
            time,
            params,
            segments: self.skeleton(time, params.scroll, params.pointer),
        }
    }

    /// Build all segments for the given time, scroll progress and pointer.
    pub fn skeleton(&self, t: f32, scroll: f32, pointer: Vec2) -> Segments {
        let mut out = Segments::new();
        let up = Vec2::Y;
        for tree in 0..self.trees {
            let tf = tree as f32;
            let root = Vec2::new(0.1 + tf * 0.2 + hash(Vec2::new(tf, 0.0)) * 0.1, 0.05);

            // Wind-like pull toward the pointer.
            let toward_pointer = normalize_or(pointer - root, up);
            let growth = normalize_or(up.lerp(toward_pointer, 0.18), up);

            let stretch = proximity_stretch(root, pointer, 0.5, 0.22);
            let trunk_len = (0.3 + scroll * 0.4 + (t * 0.45 + tf).sin() * 0.1) * stretch;
            out.push(BranchSegment {
                start: root,
                dir: growth,
                length: trunk_len,
                thickness: TRUNK_THICKNESS,
            });

            let fork = root + growth * trunk_len * 0.6;
            for branch in 0..self.branches {
                let bf = branch as f32;
                let angle = (bf - 1.0) * 0.8 + (t * 0.28 + tf + bf).sin() * 0.3;
                let dir = normalize_or(
                    Vec2::new(angle.sin(), angle.cos()).lerp(toward_pointer, 0.12),
                    up,
                );
                let stretch = proximity_stretch(fork, pointer, 0.4, 0.18);
                let len = (0.15 + scroll * 0.2 + hash(Vec2::new(tf, bf)) * 0.1) * stretch;
                out.push(BranchSegment {
                    start: fork,
                    dir,
                    length: len,
                    thickness: BRANCH_THICKNESS,
                });

                let sub_start = fork + dir * len * 0.7;
                for sub in 0..SUB_BRANCHES {
                    let sf = sub as f32;
                    let sub_angle =
                        angle + (sf - 0.5) * 1.2 + (t * 0.35 + tf + bf + sf).sin() * 0.2;
                    let sub_dir = normalize_or(
                        Vec2::new(sub_angle.sin(), sub_angle.cos()).lerp(toward_pointer, 0.08),
                        up,
                    );
                    let stretch = proximity_stretch(sub_start, pointer, 0.3, 0.15);
                    out.push(BranchSegment {
                        start: sub_start,
                        dir: sub_dir,
                        length: (0.08 + scroll * 0.1) * stretch,
                        thickness: SUB_THICKNESS,
                    });
                }
            }
        }
        out
    }
}

/// Segments stretch up to `1 + gain` as the pointer approaches within `reach`.
#[inline]
fn proximity_stretch(at: Vec2, pointer: Vec2, reach: f32, gain: f32) -> f32 {
    1.0 + (1.0 - smoothstep(0.0, reach, at.distance(pointer))) * gain
}

/// Coverage of one tapered segment at `uv`, in [0, 1].
pub fn segment_coverage(seg: &BranchSegment, uv: Vec2, t: f32) -> f32 {
    let pos = uv - seg.start;
    let (c, s) = (seg.dir.x, seg.dir.y);
    let along = pos.x * c + pos.y * s;
    if along < -0.1 || along > seg.length + 0.1 {
        return 0.0;
    }
    let across = -pos.x * s + pos.y * c;
    let dist = across.abs();
    // Maximum taper is 1 + 0.3 * max(fbm); anything further out is empty.
    if dist > (seg.thickness + 0.01) * 1.27 {
        return 0.0;
    }
    let rotated = Vec2::new(along, across);
    let organic = fbm(rotated * 8.0 + Vec2::splat(t * 0.12)) * 0.3;
    let taper = ((1.0 - smoothstep(0.0, seg.length, along)) * (1.0 + organic)).max(1e-4);
    let body = smoothstep(seg.thickness + 0.01, seg.thickness - 0.01, dist / taper);
    body * smoothstep(-0.1, 0.0, along) * smoothstep(seg.length + 0.1, seg.length, along)
}

/// Shade a single normalized coordinate (origin bottom-left). Returns
/// straight (non-premultiplied) RGBA.
pub fn sample(frame: &BranchFrame, uv: Vec2) -> [f32; 4] {
    let p = &frame.params;
    let branch_color = mix3(BRANCH_COLOR_LIGHT, BRANCH_COLOR_DARK, p.theme);
    let glow_color = mix3(GLOW_COLOR_LIGHT, GLOW_COLOR_DARK, p.theme);

    let branches: f32 = frame
        .segments
        .iter()
        .map(|seg| segment_coverage(seg, uv, frame.time))
        .sum();
    let glow = branches * 0.3;
    let pulse = 0.8 + (frame.time * 0.2).sin() * 0.1;
    let pointer_glow = 1.0 - smoothstep(0.0, 0.3, uv.distance(p.pointer));

    let mut rgba = [0.0; 4];
    for i in 0..3 {
        rgba[i] = ((branch_color[i] * branches + glow_color[i] * glow) * pulse
            + glow_color[i] * pointer_glow * 0.1)
            .clamp(0.0, 1.0);
    }
    let center = uv - Vec2::splat(0.5);
    let edge_fade = 1.0 - center.dot(center) * 0.3;
    rgba[3] = ((branches + glow * 0.5) * FIELD_ALPHA * p.opacity * edge_fade).clamp(0.0, 1.0);
    rgba
}

/// CPU raster of a frame into a row-major RGBA8 buffer (top row first),
/// the layout `ImageData` expects.
pub fn rasterize(frame: &BranchFrame, width: u32, height: u32, out: &mut [u8]) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if out.len() != expected {
        return Err(MotionError::BufferSize {
            expected,
            actual: out.len(),
        });
    }
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    for (row, line) in out.chunks_exact_mut(width as usize * 4).enumerate() {
        let v = 1.0 - (row as f32 + 0.5) / h;
        for (col, px) in line.chunks_exact_mut(4).enumerate() {
            let uv = Vec2::new((col as f32 + 0.5) / w, v);
            let rgba = sample(frame, uv);
            for (dst, src) in px.iter_mut().zip(rgba) {
                *dst = (src * 255.0).round() as u8;
            }
        }
    }
    Ok(())
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SegmentPacked {
    /// start.xy, dir.xy
    pub start_dir: [f32; 4],
    /// length, thickness, unused, unused
    pub shape: [f32; 4],
}

/// Uniform block consumed by `branches.wgsl`. Layout matches the WGSL
/// struct field for field.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BranchUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub theme: f32,
    pub pointer: [f32; 2],
    pub scroll: f32,
    pub opacity: f32,
    pub segment_count: u32,
    pub _pad: [u32; 3],
    pub segments: [SegmentPacked; MAX_SEGMENTS],
}

impl BranchFrame {
    pub fn to_uniforms(&self, width: u32, height: u32) -> BranchUniforms {
        let mut u: BranchUniforms = bytemuck::Zeroable::zeroed();
        u.resolution = [width as f32, height as f32];
        u.time = self.time;
        u.theme = self.params.theme;
        u.pointer = self.params.pointer.to_array();
        u.scroll = self.params.scroll;
        u.opacity = self.params.opacity;
        let n = self.segments.len().min(MAX_SEGMENTS);
        u.segment_count = n as u32;
        for (dst, seg) in u.segments.iter_mut().zip(self.segments.iter()) {
            dst.start_dir = [seg.start.x, seg.start.y, seg.dir.x, seg.dir.y];
            dst.shape = [seg.length, seg.thickness, 0.0, 0.0];
        }
        u
    }
}
