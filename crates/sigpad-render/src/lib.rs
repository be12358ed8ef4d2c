//! SigPad Render Library
//!
//! Software rasterization for signature documents. [`PixmapSurface`] is a
//! tiny-skia backed [`Surface`](sigpad_core::Surface) that the engine can draw
//! into directly; [`raster`] replays documents offscreen and encodes them as
//! PNG or JPEG.

mod error;
mod pixmap;
pub mod raster;

pub use error::{RenderError, RenderResult};
pub use pixmap::{MAX_DIMENSION, PixmapSurface};
pub use raster::{CanvasRasterExt, RasterFormat, encode_jpeg, encode_png, export, rasterize, to_raster};
