pub mod gesture;
pub mod session;

pub use gesture::{HostSink, SwipeDelta, SwipeFilter, WheelEvent};
pub use session::{MemorySession, SessionProvider};
