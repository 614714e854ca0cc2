use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResumePayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub file_url: Option<String>,
    /// Requesting default routes through the same batched flag swap as
    /// `set_default`; the first resume in the collection becomes default
    /// regardless.
    pub is_default: Option<bool>,
}

/// Renames only. The default flag is deliberately not updatable here — it can
/// only move through `set_default`, which keeps the at-most-one-default
/// invariant intact.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateResumePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub file_url: Option<String>,
}
