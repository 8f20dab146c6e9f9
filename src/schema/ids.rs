use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DEFINITION: AtomicU32 = AtomicU32::new(0);
static NEXT_SLICE: AtomicU32 = AtomicU32::new(0);

/// Process-unique identity of a `DatasetDefinition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefinitionId(pub u32);

impl DefinitionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DEFINITION.fetch_add(1, Ordering::Relaxed))
    }
}

/// Process-unique identity of a `Slice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SliceId(pub u32);

impl SliceId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SLICE.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a bound column belongs to.
///
/// A non-owning back-reference: it names the owner, it does not keep it alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id")]
pub enum Owner {
    Definition(DefinitionId),
    Slice(SliceId),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Definition(id) => write!(f, "definition#{}", id.0),
            Owner::Slice(id) => write!(f, "slice#{}", id.0),
        }
    }
}
