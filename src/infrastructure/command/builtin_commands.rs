use std::time::Instant;

use crate::interface_adapter::port::CommandPort;

const HELP_TEXT: &str = "COMMANDS: HELP HELLO VER DIR ECHO <TEXT> TIME";

const DIR_LISTING: &str = "\
 VOLUME IN DRIVE A IS RETRO
 README   TXT     1024
 GAMES    DIR    <DIR>
 SYSTEM   DIR    <DIR>
        3 FILE(S)";

/// Small command set shipped with the binary.
///
/// Commands arrive trimmed and uppercased. Unknown commands get no response,
/// so the session shows its fallback text.
pub struct BuiltinCommands {
    started: Instant,
}

impl BuiltinCommands {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn uptime(&self) -> String {
        let secs = self.started.elapsed().as_secs();
        format!(
            "UPTIME {:02}:{:02}:{:02}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        )
    }
}

impl Default for BuiltinCommands {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPort for BuiltinCommands {
    fn process(&mut self, command: &str) -> Option<String> {
        let (verb, rest) = match command.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (command, ""),
        };

        match verb {
            "HELP" | "?" => Some(HELP_TEXT.to_string()),
            "HELLO" | "HI" => Some("HELLO, OPERATOR.".to_string()),
            "VER" | "VERSION" => Some(format!("RETROTERM V{}", env!("CARGO_PKG_VERSION"))),
            "DIR" | "LS" => Some(DIR_LISTING.to_string()),
            "ECHO" if !rest.is_empty() => Some(rest.to_string()),
            "TIME" => Some(self.uptime()),
            _ => None,
        }
    }
}
