// Background behaviours driven by commands
pub mod roster_display;
