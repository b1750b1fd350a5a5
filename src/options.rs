use crate::constants::*;

/// Mount options for one sprite cloud, resolved from the host page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudOptions {
    pub width_css: f64,
    pub height_css: f64,
    pub density: usize,
    pub base_scale: f32,
    pub speed: f32,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width_css: CLOUD_DEFAULT_WIDTH,
            height_css: CLOUD_DEFAULT_HEIGHT,
            density: decor_core::CLOUD_DEFAULT_DENSITY,
            base_scale: decor_core::CLOUD_DEFAULT_BASE_SCALE,
            speed: decor_core::CLOUD_DEFAULT_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientOptions {
    pub low_power: bool,
    pub breakpoint_px: f32,
}

impl Default for AmbientOptions {
    fn default() -> Self {
        Self {
            low_power: false,
            breakpoint_px: decor_core::MOBILE_BREAKPOINT_PX,
        }
    }
}

/// Looks up one option by its attribute name (e.g. `data-density`).
///
/// Implemented over DOM attributes and over plain JS option objects.
pub trait OptionSource {
    fn raw(&self, attr: &str) -> Option<String>;
}

impl<F> OptionSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, attr: &str) -> Option<String> {
        self(attr)
    }
}

/// Attribute name to camelCase JS option key: `data-base-scale` -> `baseScale`.
pub fn option_key(attr: &str) -> String {
    let name = attr.strip_prefix("data-").unwrap_or(attr);
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Positive finite number, or `None` for anything unusable.
pub fn parse_positive(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Presence flag: a bare attribute or any value other than false/0 counts.
pub fn parse_flag(raw: Option<&str>) -> bool {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        None => false,
        Some(s) => !matches!(s.as_str(), "false" | "0" | "no" | "off"),
    }
}

pub fn cloud_options(src: &impl OptionSource) -> CloudOptions {
    let d = CloudOptions::default();
    let num = |attr: &str| parse_positive(src.raw(attr).as_deref());
    CloudOptions {
        width_css: num(ATTR_WIDTH).unwrap_or(d.width_css),
        height_css: num(ATTR_HEIGHT).unwrap_or(d.height_css),
        // density 0 is a valid "render nothing" request
        density: src
            .raw(ATTR_DENSITY)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .map(|n| n.min(CLOUD_MAX_DENSITY))
            .unwrap_or(d.density),
        base_scale: num(ATTR_BASE_SCALE).map(|v| v as f32).unwrap_or(d.base_scale),
        speed: src
            .raw(ATTR_SPEED)
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(d.speed),
    }
}

pub fn ambient_options(src: &impl OptionSource) -> AmbientOptions {
    let d = AmbientOptions::default();
    AmbientOptions {
        low_power: parse_flag(src.raw(ATTR_LOW_POWER).as_deref()),
        breakpoint_px: parse_positive(src.raw(ATTR_BREAKPOINT).as_deref())
            .map(|v| v as f32)
            .unwrap_or(d.breakpoint_px),
    }
}
