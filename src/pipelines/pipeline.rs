//! Pipeline trait.
use crate::error::Error;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// each stage can report its own run summary.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
