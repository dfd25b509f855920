use crate::error::Result;

/// Check that a value is usable before any work is done with it.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
