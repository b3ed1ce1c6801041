//! Host driver for a CHIP-8 style virtual machine: a fixed 60 Hz frame
//! cadence, keypad translation, framebuffer materialization, and
//! gesture-gated audio. The interpreter itself is an external collaborator
//! consumed through [`core::machine::Machine`]; this crate only drives it.

pub mod core;
pub mod sdl;
