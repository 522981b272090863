// Slash commands
pub mod roster;
pub mod roster_helpers;
