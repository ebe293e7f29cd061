pub mod builtin_commands;

pub use builtin_commands::BuiltinCommands;
