pub mod config;
pub mod logging;
pub mod error;
pub mod bom;

pub use self::config::*;
pub use logging::*;
pub use error::*;
pub use bom::*;
