use common::api::v1::API_VERSION;

use crate::errors::MemoError;

/// Accept an empty version (caller does not pin one) or exactly [`API_VERSION`].
pub fn check_api_version(requested: &str) -> Result<(), MemoError> {
    if !requested.is_empty() && requested != API_VERSION {
        return Err(MemoError::VersionMismatch {
            requested: requested.to_string(),
            supported: API_VERSION,
        });
    }
    Ok(())
}
