/// Pluggable command logic.
///
/// The session hands over an uppercased, trimmed, non-empty command line.
/// `None` or an empty string means "no special response"; the session then
/// reveals its fallback text instead.
pub trait CommandPort: Send {
    fn process(&mut self, command: &str) -> Option<String>;
}
