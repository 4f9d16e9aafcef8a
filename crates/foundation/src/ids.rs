use std::fmt;

const SEQUENTIAL_PREFIX: &str = "obj_";

/// Opaque identifier of a placed object.
///
/// Freshly created objects get `obj_<n>` from a monotonic counter; ids read
/// back from a document are kept verbatim, whatever their shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn sequential(n: u64) -> Self {
        Self(format!("{SEQUENTIAL_PREFIX}{n}"))
    }

    /// Counter value for ids of the `obj_<n>` form.
    pub fn sequence_number(&self) -> Option<u64> {
        self.0.strip_prefix(SEQUENTIAL_PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ObjectId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
