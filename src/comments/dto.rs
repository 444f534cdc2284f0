use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubmitCommentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub content: Option<String>,
}

/// Any non-blank status is accepted; the vocabulary is up to the moderators.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}
