mod cake;
mod gift;
mod progress;
mod registry;

pub use cake::*;
pub use gift::*;
pub use progress::*;
