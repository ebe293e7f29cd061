#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Typing,
    Revealing,
}

impl SessionState {
    /// Whether the input line may be edited or submitted.
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::Revealing)
    }

    pub fn status_text(&self) -> &str {
        match self {
            Self::Idle => "READY",
            Self::Typing => "TYPING",
            Self::Revealing => "RECEIVING",
        }
    }
}
