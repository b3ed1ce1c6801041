pub const BYTES_PER_PIXEL: usize = 4;

/* The palette is part of the emulator's look; programs written against it
   expect exactly these bytes. */
pub const PIXEL_ON: [u8; BYTES_PER_PIXEL] = [0x33, 0xff, 0x66, 0xff];
pub const PIXEL_OFF: [u8; BYTES_PER_PIXEL] = [0x00, 0x00, 0x00, 0xff];

/// Convert the machine's monochrome plane into a fresh RGBA buffer of
/// `width * height * 4` bytes, lit pixels green-teal and the rest black,
/// alpha always opaque. A plane shorter than `width * height` reads as
/// clear past its end, so a torn snapshot still yields a full frame.
pub fn materialize(plane: &[bool], width: usize, height: usize) -> Vec<u8> {
    let pixels = width * height;
    let mut frame = Vec::with_capacity(pixels * BYTES_PER_PIXEL);

    for i in 0..pixels {
        let lit = plane.get(i).copied().unwrap_or(false);
        frame.extend_from_slice(if lit { &PIXEL_ON } else { &PIXEL_OFF });
    }

    frame
}
