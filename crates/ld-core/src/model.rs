//! Core layer data model for layerdeck documents.
//!
//! A document is an ordered list of layers. Array position is z-order:
//! index 0 paints first (back), the last layer paints on top. Group layers
//! own their children directly, so the nesting is a strict tree.
//! Geometry is stored in canvas units; `x, y` is the top-left corner of the
//! unrotated, unflipped box and doubles as the rotation pivot.

use crate::id::LayerId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// Smallest width/height a layer can be resized to, in canvas units.
pub const MIN_LAYER_SIZE: f32 = 5.0;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0], serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let channel = |hi: u8, lo: u8| -> Option<f32> {
            Some((hex_val(hi)? << 4 | hex_val(lo)?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 => Some(Self::rgba(
                channel(bytes[0], bytes[1])?,
                channel(bytes[2], bytes[3])?,
                channel(bytes[4], bytes[5])?,
                1.0,
            )),
            8 => Some(Self::rgba(
                channel(bytes[0], bytes[1])?,
                channel(bytes[2], bytes[3])?,
                channel(bytes[4], bytes[5])?,
                channel(bytes[6], bytes[7])?,
            )),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{s}`")))
    }
}

// ─── Compositing ─────────────────────────────────────────────────────────

/// Compositing mode used when painting a layer over the ones below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

impl BlendMode {
    pub const ALL: [BlendMode; 12] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
    ];

    /// CSS-style name (`"color-dodge"`).
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Filters ─────────────────────────────────────────────────────────────

/// A named numeric adjustment. Metadata only: nothing in the core applies
/// it to pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub value: f32,
}

/// Range and neutral value of a well-known filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPreset {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

pub const FILTER_PRESETS: [FilterPreset; 4] = [
    FilterPreset::new("brightness", -100.0, 100.0, 0.0),
    FilterPreset::new("contrast", -100.0, 100.0, 0.0),
    FilterPreset::new("saturation", -100.0, 100.0, 0.0),
    FilterPreset::new("blur", 0.0, 20.0, 0.0),
];

impl FilterPreset {
    const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    pub fn find(name: &str) -> Option<&'static FilterPreset> {
        FILTER_PRESETS.iter().find(|p| p.name == name)
    }
}

// ─── Content ─────────────────────────────────────────────────────────────

/// Opaque reference to image content: an http(s) URL or a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Data URIs can be megabytes long; keep logs readable.
        if self.is_data_uri() {
            let head = self.0.split(',').next().unwrap_or("data:");
            write!(f, "{head},…")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Discriminant of [`LayerContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Image,
    Text,
    Shape,
    Group,
}

/// What a layer displays. Only `Image` carries behavior today; the other
/// kinds are placeholders that round-trip through the store and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerContent {
    Image { src: ImageRef },
    Text,
    Shape,
    Group { children: Vec<Layer> },
}

impl LayerContent {
    pub fn kind(&self) -> LayerKind {
        match self {
            LayerContent::Image { .. } => LayerKind::Image,
            LayerContent::Text => LayerKind::Text,
            LayerContent::Shape => LayerKind::Shape,
            LayerContent::Group { .. } => LayerKind::Group,
        }
    }
}

// ─── Layer ───────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

/// A single independently positioned, stylable unit of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    #[serde(default = "LayerId::generate")]
    pub id: LayerId,
    pub name: String,

    #[serde(flatten)]
    pub content: LayerContent,

    #[serde(default = "default_true")]
    pub visible: bool,
    /// Locked layers still render but ignore pointer interaction.
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub blend_mode: BlendMode,

    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Degrees, clockwise, around `(x, y)`. Never normalized in storage.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,

    #[serde(default)]
    pub filters: SmallVec<[Filter; 4]>,
}

impl Layer {
    /// New layer with a fresh ID and default appearance.
    pub fn new(name: impl Into<String>, content: LayerContent, width: f32, height: f32) -> Self {
        Self {
            id: LayerId::generate(),
            name: name.into(),
            content,
            visible: true,
            locked: false,
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
            x: 0.0,
            y: 0.0,
            width: width.max(MIN_LAYER_SIZE),
            height: height.max(MIN_LAYER_SIZE),
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            filters: SmallVec::new(),
        }
    }

    /// New image layer sized to the image's natural dimensions.
    pub fn image(name: impl Into<String>, src: ImageRef, width: f32, height: f32) -> Self {
        Self::new(name, LayerContent::Image { src }, width, height)
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn kind(&self) -> LayerKind {
        self.content.kind()
    }

    pub fn src(&self) -> Option<&ImageRef> {
        match &self.content {
            LayerContent::Image { src } => Some(src),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Layer] {
        match &self.content {
            LayerContent::Group { children } => children,
            _ => &[],
        }
    }

    /// Resize, flooring both dimensions at [`MIN_LAYER_SIZE`].
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.abs().max(MIN_LAYER_SIZE);
        self.height = height.abs().max(MIN_LAYER_SIZE);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Rotation folded into `[0, 360)` for display.
    pub fn display_rotation(&self) -> f32 {
        self.rotation.rem_euclid(360.0)
    }

    pub fn filter(&self, name: &str) -> Option<f32> {
        self.filters.iter().find(|f| f.name == name).map(|f| f.value)
    }

    /// Set a filter value, replacing any existing filter with the same name.
    /// Values of well-known filters are clamped to their preset range.
    pub fn set_filter(&mut self, name: &str, value: f32) {
        let value = match FilterPreset::find(name) {
            Some(p) => value.clamp(p.min, p.max),
            None => value,
        };
        match self.filters.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.value = value,
            None => self.filters.push(Filter {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn remove_filter(&mut self, name: &str) {
        self.filters.retain(|f| f.name != name);
    }

    /// IDs of this layer and every descendant, depth-first.
    pub fn ids(&self) -> Vec<LayerId> {
        let mut out = vec![self.id];
        for child in self.children() {
            out.extend(child.ids());
        }
        out
    }

    /// Give this layer and all descendants fresh IDs.
    pub fn rekey(&mut self) {
        self.id = LayerId::generate();
        if let LayerContent::Group { children } = &mut self.content {
            for child in children {
                child.rekey();
            }
        }
    }

    /// Copy with fresh IDs, a `" Copy"` name suffix and an offset position.
    pub fn duplicated(&self, offset: f32) -> Layer {
        let mut copy = self.clone();
        copy.rekey();
        copy.name = format!("{} Copy", self.name);
        copy.x += offset;
        copy.y += offset;
        copy
    }
}

// ─── Partial updates ─────────────────────────────────────────────────────

/// Partial layer update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPatch {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub opacity: Option<f32>,
    pub blend_mode: Option<BlendMode>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation: Option<f32>,
    pub flip_x: Option<bool>,
    pub flip_y: Option<bool>,
    /// Ignored for non-image layers.
    pub src: Option<ImageRef>,
    pub filters: Option<SmallVec<[Filter; 4]>>,
}

impl LayerPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `layer`, keeping the size floor and opacity range.
    pub fn apply(self, layer: &mut Layer) {
        if let Some(name) = self.name {
            layer.name = name;
        }
        if let Some(v) = self.visible {
            layer.visible = v;
        }
        if let Some(v) = self.locked {
            layer.locked = v;
        }
        if let Some(v) = self.opacity {
            layer.set_opacity(v);
        }
        if let Some(v) = self.blend_mode {
            layer.blend_mode = v;
        }
        if let Some(v) = self.x {
            layer.x = v;
        }
        if let Some(v) = self.y {
            layer.y = v;
        }
        if self.width.is_some() || self.height.is_some() {
            let w = self.width.unwrap_or(layer.width);
            let h = self.height.unwrap_or(layer.height);
            layer.set_size(w, h);
        }
        if let Some(v) = self.rotation {
            layer.rotation = v;
        }
        if let Some(v) = self.flip_x {
            layer.flip_x = v;
        }
        if let Some(v) = self.flip_y {
            layer.flip_y = v;
        }
        if let Some(new_src) = self.src
            && let LayerContent::Image { src } = &mut layer.content
        {
            *src = new_src;
        }
        if let Some(filters) = self.filters {
            layer.filters = SmallVec::new();
            for f in filters {
                layer.set_filter(&f.name, f.value);
            }
        }
    }
}
