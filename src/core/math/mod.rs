//! Math primitives: 2D vector type, angle/bulge utilities, and the line/circle
//! intersection routines underpinning segment intersection and offset joining.
mod base;
mod circle_circle;
mod line_circle;
mod line_line;
mod vec2;

pub use base::*;
pub use circle_circle::*;
pub use line_circle::*;
pub use line_line::*;
pub use vec2::*;
