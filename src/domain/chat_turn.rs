use super::TurnRole;

/// One entry in the conversation the client submits. Only the final turn's
/// content is used as the generation prompt; earlier turns give the client a
/// place to replay its local history.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: TurnRole, content: String) -> Self {
        Self { role, content }
    }
}
