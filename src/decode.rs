//! Decoding of raw response bodies into typed or loosely-typed shapes

use crate::error::{SdkError, SdkResult};
use crate::logging::log_debug;
use serde::de::DeserializeOwned;

const PREVIEW_CHARS: usize = 200;

/// Decode a response body into `T`
///
/// An empty body decodes to `T::default()` without error. Anything else must
/// be JSON that fits `T`.
///
/// # Errors
///
/// Returns [`SdkError::Decode`] if the bytes are not valid JSON or do not
/// match the shape of `T`.
pub fn decode<T>(bytes: &[u8]) -> SdkResult<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.is_empty() {
        log_debug!(
            target_type = std::any::type_name::<T>(),
            "Empty response body, using default value"
        );
        return Ok(T::default());
    }

    serde_json::from_slice(bytes).map_err(|e| {
        let text = String::from_utf8_lossy(bytes);
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        SdkError::decode(
            format!(
                "Could not decode {} from: {}{}",
                std::any::type_name::<T>(),
                preview,
                if text.chars().count() > PREVIEW_CHARS { "..." } else { "" }
            ),
            e,
        )
    })
}
