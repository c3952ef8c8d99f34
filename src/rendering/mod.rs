pub mod decode;
pub mod encode;
pub mod resample;

pub use decode::{decode_raster, open_raster};
pub use encode::encode_png;
pub use resample::resize_nearest;
