pub mod decode;
pub mod intent;
pub mod quick_fix;
pub mod reply;
pub mod ticket;

pub use decode::*;
pub use intent::*;
pub use quick_fix::*;
pub use reply::*;
pub use ticket::*;
