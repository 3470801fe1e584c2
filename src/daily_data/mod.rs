pub mod daily_frame;
pub mod loader;
