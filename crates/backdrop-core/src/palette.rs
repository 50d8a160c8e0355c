/// sRGB colour with channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a `0xRRGGBB` literal.
    pub fn hex(rgb: u32) -> Self {
        let byte = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Self::new(byte(16), byte(8), byte(0))
    }

    pub fn scale(self, k: f32) -> Self {
        Self::new(
            (self.r * k).clamp(0.0, 1.0),
            (self.g * k).clamp(0.0, 1.0),
            (self.b * k).clamp(0.0, 1.0),
        )
    }

    pub fn to_bytes(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Packed `0xRRGGBB`, stable across frames; used as a cache key.
    pub fn key(self) -> u32 {
        let [r, g, b] = self.to_bytes();
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    pub fn css(self, alpha: f32) -> String {
        let [r, g, b] = self.to_bytes();
        format!("rgba({},{},{},{:.3})", r, g, b, alpha.clamp(0.0, 1.0))
    }
}

/// Theme-dependent colours and opacities of the particle variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePalette {
    pub stars: [Rgb; 4],
    pub matter: Rgb,
    pub antimatter: Rgb,
    pub white: Rgb,
    pub flash: Rgb,
    pub star_base_opacity: f32,
    pub star_size_min: f32,
    pub star_size_span: f32,
    pub dot_radius: f32,
    pub glow_scale: f32,
    pub glow_opacity: f32,
    pub flash_opacity: f32,
    pub burst_opacity: f32,
    pub burst_size: f32,
}

impl ParticlePalette {
    pub fn for_theme(is_dark_mode: bool) -> Self {
        if is_dark_mode {
            Self {
                stars: [
                    Rgb::hex(0xf8fafc),
                    Rgb::hex(0xe0f2fe),
                    Rgb::hex(0xfef3c7),
                    Rgb::hex(0xddd6fe),
                ],
                matter: Rgb::hex(0xffcc66),
                antimatter: Rgb::hex(0x38e8d1),
                white: Rgb::hex(0xffffff),
                flash: Rgb::hex(0xffffff),
                star_base_opacity: 0.6,
                star_size_min: 2.0,
                star_size_span: 2.0,
                dot_radius: 0.055,
                glow_scale: 0.34,
                glow_opacity: 0.38,
                flash_opacity: 0.9,
                burst_opacity: 0.75,
                burst_size: 0.065,
            }
        } else {
            Self {
                stars: [
                    Rgb::hex(0x000000),
                    Rgb::hex(0x1a1a1a),
                    Rgb::hex(0x87ceeb),
                    Rgb::hex(0xb0e0e6),
                ],
                matter: Rgb::hex(0xb45309),
                antimatter: Rgb::hex(0x0369a1),
                white: Rgb::hex(0x0f172a),
                flash: Rgb::hex(0x0f172a),
                star_base_opacity: 1.2,
                star_size_min: 3.2,
                star_size_span: 2.8,
                dot_radius: 0.06,
                glow_scale: 0.31,
                glow_opacity: 0.2,
                flash_opacity: 0.55,
                burst_opacity: 0.4,
                burst_size: 0.055,
            }
        }
    }

    /// Every colour that is drawn as an additive glow sprite.
    pub fn glow_colors(&self) -> [Rgb; 4] {
        [self.matter, self.antimatter, self.white, self.flash]
    }
}
