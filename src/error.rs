pub type PixelblitResult<T> = Result<T, PixelblitError>;

#[derive(thiserror::Error, Debug)]
pub enum PixelblitError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("pixel co-ordinates out of bounds: ({x}, {y}) not within {width}x{height}")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("parameter '{key}' must be {expected}")]
    ParameterType { key: String, expected: &'static str },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixelblitError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn parameter_type(key: impl Into<String>, expected: &'static str) -> Self {
        Self::ParameterType {
            key: key.into(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PixelblitError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            PixelblitError::invalid_parameter("x")
                .to_string()
                .contains("invalid parameter:")
        );
        assert!(
            PixelblitError::parameter_type("opacity", "a number")
                .to_string()
                .contains("'opacity' must be a number")
        );
    }

    #[test]
    fn out_of_bounds_names_the_coordinates() {
        let err = PixelblitError::OutOfBounds {
            x: 9,
            y: -1,
            width: 4,
            height: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("(9, -1)"));
        assert!(msg.contains("4x4"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PixelblitError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
