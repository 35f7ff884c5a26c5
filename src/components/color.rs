#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// hue wraps around [0, 1), saturation and lightness are clamped
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(1.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self { r: l, g: l, b: l };
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
        }
    }

    pub fn to_hex(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, alpha]
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5).to_hex(), "#ff0000");
        assert_eq!(Color::from_hsl(1.0 / 3.0, 1.0, 0.5).to_hex(), "#00ff00");
        assert_eq!(Color::from_hsl(2.0 / 3.0, 1.0, 0.5).to_hex(), "#0000ff");
    }

    #[test]
    fn teal_band() {
        // 0.5 is cyan, the top of the line hue band
        assert_eq!(Color::from_hsl(0.5, 1.0, 0.5).to_hex(), "#00ffff");
    }

    #[test]
    fn grey_without_saturation() {
        let c = Color::from_hsl(0.42, 0.0, 0.5);
        assert_eq!(c, Color { r: 0.5, g: 0.5, b: 0.5 });
    }
}
