pub mod byte_order;
pub mod image;
pub mod math;
pub mod scan;
pub mod utils;

pub mod prelude {
    pub use crate::byte_order::ByteOrder;
    pub use crate::image::{Dimensions, Format, ImageFormat, Info};
}
