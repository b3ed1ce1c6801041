use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;

use crate::core::driver::Surface;
use crate::core::error::{Error, Result};
use crate::core::framebuffer::BYTES_PER_PIXEL;

/// Window pixels per machine pixel.
pub const WINDOW_SCALE: u32 = 10;

/// Presents RGBA frames on an SDL window through a streaming texture.
///
/// Pacing belongs to the frame clock, so the canvas is built without vsync;
/// presenting must never block a tick.
pub struct SdlSurface {
    canvas: WindowCanvas,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
}

impl SdlSurface {
    pub fn new(sdl: &sdl2::Sdl, title: &str) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(Error::Surface)?;

        let window = video_subsystem
            .window(title, WINDOW_SCALE, WINDOW_SCALE)
            .position_centered()
            .build()
            .map_err(|err| Error::Surface(err.to_string()))?;

        let canvas = window
            .into_canvas()
            .target_texture()
            .build()
            .map_err(|err| Error::Surface(err.to_string()))?;

        let texture_creator = canvas.texture_creator();

        Ok(SdlSurface {
            canvas,
            texture_creator,
            width: 0,
            height: 0,
        })
    }
}

impl Surface for SdlSurface {
    fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.width = width as u32;
        self.height = height as u32;

        self.canvas
            .window_mut()
            .set_size(self.width * WINDOW_SCALE, self.height * WINDOW_SCALE)
            .map_err(|err| Error::Surface(err.to_string()))?;
        self.canvas
            .set_logical_size(self.width, self.height)
            .map_err(|err| Error::Surface(err.to_string()))?;

        self.canvas.clear();
        self.canvas.present();
        Ok(())
    }

    fn present(&mut self, frame: &[u8]) -> Result<()> {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, self.width, self.height)
            .map_err(|err| Error::Surface(err.to_string()))?;

        texture
            .update(None, frame, self.width as usize * BYTES_PER_PIXEL)
            .map_err(|err| Error::Surface(err.to_string()))?;

        self.canvas.copy(&texture, None, None).map_err(Error::Surface)?;
        self.canvas.present();
        Ok(())
    }
}
