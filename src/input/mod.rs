mod command;
mod keymap;

pub use command::{Command, parse_goto};
pub use keymap::{KeymapPreset, map_normal_key};
