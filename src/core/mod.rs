pub mod audio;
pub mod clock;
pub mod driver;
pub mod error;
pub mod framebuffer;
pub mod machine;
pub mod session;
