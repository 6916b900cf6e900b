#![forbid(unsafe_code)]

pub mod buffer;
pub mod codec;
pub mod color;
pub mod draw;
pub mod error;
pub mod params;
pub mod sink;

pub use buffer::PixelBuffer;
pub use codec::DecodedImage;
pub use draw::{ColorMode, DrawCommand};
pub use error::{PixelblitError, PixelblitResult};
pub use params::DrawParams;
pub use sink::CanvasSink;
