//! Potluck Localization
//!
//! - catalog: dot-path translation lookup with language fallback
//! - fix: structural repairs on translation resources
//! - files: the same repairs applied to locale files on disk

mod catalog;
mod error;
pub mod files;
pub mod fix;

pub use catalog::{interpolate, resolve, Catalog};
pub use error::{LocaleError, LocaleResult};
