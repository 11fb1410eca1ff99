mod clock;
mod governor;
mod result;
mod sender;

pub use clock::*;
pub use governor::*;
pub use result::*;
pub use sender::*;
