pub mod headless;
pub mod watch;

pub use headless::{HeadlessMode, TickLimit};
pub use watch::WatchMode;
