use serde::{Deserialize, Serialize};

/// Animation block of a light emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightAnimation {
    /// Host animation identifier ("none", "torch", "pulse", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// 1..=10
    pub speed: u8,
    /// 1..=10
    pub intensity: u8,
    pub reverse: bool,
}

impl Default for LightAnimation {
    fn default() -> Self {
        Self {
            kind: "none".to_string(),
            speed: 5,
            intensity: 5,
            reverse: false,
        }
    }
}

/// Advanced illumination shader parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedLighting {
    /// Coloration technique id.
    pub coloration: i32,
    /// [-1, 1]
    pub luminosity: f64,
    /// [-1, 1]
    pub saturation: f64,
    /// [-1, 1]
    pub contrast: f64,
    /// [0, 1]
    pub shadows: f64,
    pub gradual: bool,
}

impl Default for AdvancedLighting {
    fn default() -> Self {
        Self {
            coloration: 1,
            luminosity: 0.5,
            saturation: 0.0,
            contrast: 0.0,
            shadows: 0.0,
            gradual: false,
        }
    }
}

/// Token size override carried alongside a lighting change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGeometry {
    pub height: f64,
    pub width: f64,
    pub scale: f64,
}

impl Default for TokenGeometry {
    fn default() -> Self {
        Self {
            height: 1.0,
            width: 1.0,
            scale: 1.0,
        }
    }
}

/// The fully resolved lighting/vision configuration applied to a token.
///
/// Invariant: no field is an "unset" sentinel. The type has no `Option`
/// holes apart from the genuinely optional `advanced` and `geometry`
/// blocks, so a value of this type is always safe to hand to the apply
/// engine. `vision` is derived, never supplied by input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingProfile {
    /// Vision radii in grid units; angles in degrees 0-360.
    pub dim_sight: f64,
    pub bright_sight: f64,
    pub sight_angle: f64,
    /// Emission radii in grid units.
    pub dim_light: f64,
    pub bright_light: f64,
    pub light_angle: f64,
    /// `#rrggbb`
    pub light_color: String,
    /// [0, 1]
    pub light_alpha: f64,
    pub animation: LightAnimation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedLighting>,
    /// Always `dim_sight > 0 || bright_sight > 0`.
    pub vision: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<TokenGeometry>,
}

impl LightingProfile {
    /// A token that neither sees nor emits: the usual baseline before any
    /// light source is toggled on.
    pub fn dark() -> Self {
        Self {
            dim_sight: 0.0,
            bright_sight: 0.0,
            sight_angle: 360.0,
            dim_light: 0.0,
            bright_light: 0.0,
            light_angle: 360.0,
            light_color: "#000000".to_string(),
            light_alpha: 1.0,
            animation: LightAnimation::default(),
            advanced: None,
            vision: false,
            geometry: None,
        }
    }

    /// Re-derive the `vision` field from the sight radii.
    pub fn derive_vision(&mut self) {
        self.vision = self.dim_sight > 0.0 || self.bright_sight > 0.0;
    }
}

impl Default for LightingProfile {
    fn default() -> Self {
        Self::dark()
    }
}

/// The partial input to resolution: only what the user explicitly typed or
/// a preset explicitly specifies. Every field optional; `None` means "fall
/// through to the next tier".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestedProfile {
    pub dim_sight: Option<f64>,
    pub bright_sight: Option<f64>,
    pub sight_angle: Option<f64>,
    pub dim_light: Option<f64>,
    pub bright_light: Option<f64>,
    pub light_angle: Option<f64>,
    pub light_color: Option<String>,
    pub light_alpha: Option<f64>,
    pub animation_type: Option<String>,
    pub animation_speed: Option<u8>,
    pub animation_intensity: Option<u8>,
    pub animation_reverse: Option<bool>,
    pub coloration: Option<i32>,
    pub luminosity: Option<f64>,
    pub saturation: Option<f64>,
    pub contrast: Option<f64>,
    pub shadows: Option<f64>,
    pub gradual: Option<bool>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub scale: Option<f64>,
}

impl RequestedProfile {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Any advanced-illumination subfield present?
    pub fn has_advanced(&self) -> bool {
        self.coloration.is_some()
            || self.luminosity.is_some()
            || self.saturation.is_some()
            || self.contrast.is_some()
            || self.shadows.is_some()
            || self.gradual.is_some()
    }

    /// Any geometry subfield present?
    pub fn has_geometry(&self) -> bool {
        self.height.is_some() || self.width.is_some() || self.scale.is_some()
    }
}

/// Permissive numeric form-field conversion: anything that does not parse
/// to a finite number is "unset", never an error. Form quirk preserved from
/// the host dialogs.
pub fn parse_form_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}
