mod app;
mod global_key_hook;

pub use app::*;
pub use global_key_hook::*;
