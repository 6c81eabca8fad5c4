use serde::{Deserialize, Serialize};

/// Kind of external resource fetched before the scene is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Texture,
    MeshBundle,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::MeshBundle => "mesh bundle",
        }
    }
}

/// Named asset declared by the scene manifest. Each one contributes a single
/// item to the load total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub identifier: String,
    pub kind: AssetKind,
    pub url: String,
}

#[cfg(test)]
impl AssetDescriptor {
    pub fn new(identifier: impl Into<String>, kind: AssetKind, url: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            url: url.into(),
        }
    }
}
