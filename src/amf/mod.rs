mod amf0;
mod encoder;

pub use amf0::*;
pub use encoder::*;
