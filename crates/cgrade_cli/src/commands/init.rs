//! Init command implementation.

use crate::error::CliError;
use cgrade_store::{GradeStore, StoreError};

/// Runs the init command.
///
/// An existing store is reported but not treated as a failure.
pub fn run(store: &GradeStore) -> Result<(), CliError> {
    match store.initialize() {
        Ok(()) => {
            println!("Initialized grade file at {}", store.path().display());
            Ok(())
        }
        Err(err @ StoreError::AlreadyInitialized { .. }) => {
            println!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
