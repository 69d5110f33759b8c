#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroqModel {
    #[default]
    Llama8bInstant, // "llama-3.1-8b-instant"
    Llama70bVersatile, // "llama-3.3-70b-versatile"
    Override(String),
}

impl GroqModel {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Llama8bInstant => "llama-3.1-8b-instant",
            Self::Llama70bVersatile => "llama-3.3-70b-versatile",
            Self::Override(s) => s.as_str(),
        }
    }
}
