use super::ApiError;

const MAX_ITEM_ID_LEN: usize = 64;

/// Item ids are UUID strings, but unknown ids must still reach the
/// lookup so they come back as 404. Only reject what cannot be an id.
pub fn validate_item_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Item ID cannot be empty"));
    }

    if trimmed.len() > MAX_ITEM_ID_LEN {
        return Err(ApiError::validation(format!(
            "Item ID must be {} characters or less",
            MAX_ITEM_ID_LEN
        )));
    }

    Ok(trimmed)
}
