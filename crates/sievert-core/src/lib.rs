pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{Result, SvError};
pub use tolerance::Tolerance;
