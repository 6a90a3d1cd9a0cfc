mod client;
mod env;
mod error;
mod gate;
mod types;

pub use client::*;
pub use env::*;
pub use error::*;
pub use gate::*;
pub use types::*;
