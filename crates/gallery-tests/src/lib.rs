//! Integration tests for the gallery crates.
//!
//! Besides the tests, this crate carries the YAML filter presets under
//! `presets/` and the [`preset::Preset`] loader that runs them, plus the
//! synthetic images in [`fixtures`].
//!
//! Run with:
//! ```bash
//! cargo test --package gallery-tests
//! ```

pub mod fixtures;
pub mod preset;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
