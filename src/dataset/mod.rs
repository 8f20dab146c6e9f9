//! Parameterized dataset definitions and the slices derived from them.
//!
//! A [`DatasetDefinition`] declares a family of schemas that differ only by
//! a fixed, ordered set of axis labels. [`DatasetDefinition::slice`] binds a
//! label to every axis and returns the memoized [`Slice`] for that
//! combination, with the definition's columns (inherited ones included)
//! copied onto it.

pub use self::cache::SliceCache;
pub use self::capability::DatasetLike;
pub use self::definition::{DatasetDefinition, DefinitionBuilder, DefinitionSchema, DerivedBuilder, LabelCombinations};
pub use self::error::{DefinitionError, ErrorKind, SliceError};
pub use self::factory::{resolve, SliceArgs, SliceKey};
pub use self::slice::{Slice, SliceSchema};

mod cache;
mod capability;
mod definition;
mod error;
mod factory;
mod slice;
