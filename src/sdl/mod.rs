pub mod audio;
pub mod keymap;
pub mod runner;
pub mod surface;
