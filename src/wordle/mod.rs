mod prelude;
mod status;
mod filter;
mod tally;
mod data;
mod session;

pub use prelude::*;
pub use status::*;
pub use filter::*;
pub use tally::*;
pub use data::*;
pub use session::*;
