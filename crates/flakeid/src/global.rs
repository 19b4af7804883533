//! An opt-in, process-wide generator.
//!
//! Prefer constructing an [`IdGenerator`] and passing it to whoever needs it.
//! When a process really wants one shared instance, install it once at
//! startup with [`init`]; it lives until the process exits.

use std::sync::OnceLock;

use crate::{Error, IdGenerator, Result};

static GLOBAL: OnceLock<IdGenerator> = OnceLock::new();

/// Installs the process-wide generator.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if a generator is already installed.
/// The rejected `generator` is dropped.
pub fn init(generator: IdGenerator) -> Result<&'static IdGenerator> {
    GLOBAL
        .set(generator)
        .map_err(|_| Error::AlreadyInitialized)?;
    get().ok_or(Error::NotInitialized)
}

/// Returns the process-wide generator, if installed.
pub fn get() -> Option<&'static IdGenerator> {
    GLOBAL.get()
}

/// Generates an ID from the process-wide generator.
///
/// # Errors
///
/// [`Error::NotInitialized`] before [`init`], otherwise whatever
/// [`IdGenerator::generate`] returns.
pub fn generate() -> Result<u64> {
    get().ok_or(Error::NotInitialized)?.generate()
}
