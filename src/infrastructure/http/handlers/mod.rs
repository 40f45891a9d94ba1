//! HTTP Handlers

mod ping;
mod posts;
mod preview;

pub use ping::*;
pub use posts::*;
pub use preview::*;
