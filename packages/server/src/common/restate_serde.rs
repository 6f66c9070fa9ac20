//! Bridge between serde and Restate's own serialization traits.
//!
//! Restate handlers and `ctx.run` journal entries need
//! `restate_sdk::serde::{Serialize, Deserialize}`. Catalog types already derive
//! serde, so the macro encodes them as JSON instead of wrapping every value in
//! `Json<_>`.

/// Implement Restate SDK serialization traits for a serde type (JSON encoded).
///
/// ```ignore
/// #[derive(serde::Serialize, serde::Deserialize)]
/// pub struct PublishToolsRequest { /* ... */ }
///
/// impl_restate_serde!(PublishToolsRequest);
/// ```
#[macro_export]
macro_rules! impl_restate_serde {
    ($type:ty) => {
        impl restate_sdk::serde::Serialize for $type {
            type Error = serde_json::Error;

            fn serialize(&self) -> Result<bytes::Bytes, Self::Error> {
                serde_json::to_vec(self).map(bytes::Bytes::from)
            }
        }

        impl restate_sdk::serde::Deserialize for $type {
            type Error = serde_json::Error;

            fn deserialize(bytes: &mut bytes::Bytes) -> Result<Self, Self::Error> {
                serde_json::from_slice(bytes)
            }
        }

        impl restate_sdk::serde::WithContentType for $type {
            fn content_type() -> &'static str {
                "application/json"
            }
        }
    };
}
