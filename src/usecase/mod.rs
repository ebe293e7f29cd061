pub mod cue_player;
pub mod terminal_session;

#[cfg(test)]
pub(crate) mod test_support;
