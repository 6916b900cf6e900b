use serde_json::{Map, Value};

use crate::buffer::PixelBuffer;
use crate::color;
use crate::draw::{ColorMode, DrawCommand};
use crate::error::{PixelblitError, PixelblitResult};

/// Draw parameters parsed from a configuration mapping. Every field is
/// optional; [`DrawParams::command`] fills in the documented default for any
/// field left unset:
///
/// | key          | default          |
/// |--------------|------------------|
/// | `angle`      | 0                |
/// | `scaleX`     | 1                |
/// | `scaleY`     | 1                |
/// | `srcX`       | 0                |
/// | `srcY`       | 0                |
/// | `srcW`       | image width      |
/// | `srcH`       | image height     |
/// | `mode`       | `"RGBA"` (`"MONO"` selects duotone) |
/// | `foreground` | opaque white     |
/// | `background` | opaque black     |
/// | `opacity`    | 1                |
/// | `tint`       | 0 (disabled)     |
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawParams {
    pub angle: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub src_x: Option<i32>,
    pub src_y: Option<i32>,
    pub src_w: Option<i32>,
    pub src_h: Option<i32>,
    pub mode: Option<ColorMode>,
    pub foreground: Option<u32>,
    pub background: Option<u32>,
    pub opacity: Option<f64>,
    pub tint: Option<u32>,
}

impl DrawParams {
    /// Parse a JSON object map. A present key of the wrong type is a
    /// [`PixelblitError::ParameterType`] error; absent keys stay unset and
    /// unknown keys are ignored.
    pub fn from_value(value: &Value) -> PixelblitResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            PixelblitError::invalid_parameter("draw parameters must be an object map")
        })?;

        Ok(Self {
            angle: number(map, "angle")?,
            scale_x: number(map, "scaleX")?,
            scale_y: number(map, "scaleY")?,
            src_x: integer(map, "srcX")?,
            src_y: integer(map, "srcY")?,
            src_w: integer(map, "srcW")?,
            src_h: integer(map, "srcH")?,
            mode: mode(map)?,
            foreground: packed_color(map, "foreground")?,
            background: packed_color(map, "background")?,
            opacity: number(map, "opacity")?,
            tint: packed_color(map, "tint")?,
        })
    }

    /// Build a validated [`DrawCommand`] over `image`, applying the
    /// image-dependent defaults for the source extent.
    pub fn command<'a>(&self, image: &'a PixelBuffer) -> PixelblitResult<DrawCommand<'a>> {
        DrawCommand::new(image)
            .angle(self.angle.unwrap_or(0.0))
            .opacity(self.opacity.unwrap_or(1.0))
            .mode(self.mode.unwrap_or(ColorMode::TrueColor))
            .colors(
                self.background.unwrap_or(color::OPAQUE_BLACK),
                self.foreground.unwrap_or(color::OPAQUE_WHITE),
            )
            .tint(self.tint.unwrap_or(color::TRANSPARENT))
            .scale(self.scale_x.unwrap_or(1.0), self.scale_y.unwrap_or(1.0))?
            .src_rect(
                self.src_x.unwrap_or(0),
                self.src_y.unwrap_or(0),
                self.src_w.unwrap_or_else(|| image.width()),
                self.src_h.unwrap_or_else(|| image.height()),
            )
    }
}

fn number(map: &Map<String, Value>, key: &str) -> PixelblitResult<Option<f64>> {
    match map.get(key) {
        None => Ok(None),
        Some(v) => {
            let n = v
                .as_f64()
                .ok_or_else(|| PixelblitError::parameter_type(key, "a number"))?;
            Ok(Some(n))
        }
    }
}

// Numeric co-ordinates truncate to integers, as the scripting boundary did.
fn integer(map: &Map<String, Value>, key: &str) -> PixelblitResult<Option<i32>> {
    Ok(number(map, key)?.map(|n| n as i32))
}

fn packed_color(map: &Map<String, Value>, key: &str) -> PixelblitResult<Option<u32>> {
    Ok(number(map, key)?.map(|n| n as u32))
}

fn mode(map: &Map<String, Value>) -> PixelblitResult<Option<ColorMode>> {
    match map.get("mode") {
        None => Ok(None),
        Some(v) => {
            let s = v
                .as_str()
                .ok_or_else(|| PixelblitError::parameter_type("mode", "a string"))?;
            // Any string other than MONO selects true-color.
            Ok(Some(if s == "MONO" {
                ColorMode::Duotone
            } else {
                ColorMode::TrueColor
            }))
        }
    }
}
