//! Component-layer error types.

/// Errors raised while building or decoding components.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// No kind with this name was registered in [`ComponentTypes`](crate::ComponentTypes).
    #[error("unknown component kind `{0}`")]
    UnknownKind(String),

    /// The kind's transform rejected its init input.
    #[error("component `{kind}` transform failed: {source}")]
    Transform {
        kind: String,
        #[source]
        source: anyhow::Error,
    },

    /// JSON could not be decoded into the expected Rust type (init input or
    /// a typed payload read back from an entity).
    #[error("component `{kind}` could not be decoded: {source}")]
    Decode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    /// A payload could not be converted to its JSON form.
    #[error("component `{kind}` payload could not be encoded: {source}")]
    Encode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
