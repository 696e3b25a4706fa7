use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};

use crate::core::color::Color;

/// Final pixel radiance, row-major with row 0 at the top.
pub struct Film {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![Color::BLACK; width as usize * height as usize];
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.data[self.index_of(x, y)]
    }

    pub fn set_row(&mut self, y: u32, row: &[Color]) {
        let from = self.index_of(0, y);
        self.data[from..from + self.width as usize].copy_from_slice(row);
    }

    /// `.exr` keeps linear radiance, any other extension goes through `image` clamped to 8 bits.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let is_exr = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("exr"));
        if is_exr {
            exr::prelude::write_rgb_file(
                path,
                self.width as usize,
                self.height as usize,
                |x, y| {
                    let color = self.pixel(x as u32, y as u32);
                    (color.r, color.g, color.b)
                },
            )
            .context(format!("Failed to write '{}'", path.display()))?;
        } else {
            self.to_image()
                .save(path)
                .context(format!("Failed to write '{}'", path.display()))?;
        }
        Ok(())
    }

    pub fn to_image(&self) -> RgbImage {
        let mut image = RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                image.put_pixel(x, y, color_to_rgb(self.pixel(x, y)));
            }
        }
        image
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        pixel_index(self.width, x, y)
    }
}

fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

fn color_to_rgb(color: Color) -> Rgb<u8> {
    let r = (color.r * 255.0).clamp(0.0, 255.0) as u8;
    let g = (color.g * 255.0).clamp(0.0, 255.0) as u8;
    let b = (color.b * 255.0).clamp(0.0, 255.0) as u8;
    Rgb([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_land_in_place_and_clamp() {
        let mut film = Film::new(2, 2);
        film.set_row(1, &[Color::new(0.5, 2.0, -1.0), Color::WHITE]);
        assert_eq!(film.pixel(0, 1), Color::new(0.5, 2.0, -1.0));
        assert_eq!(film.pixel(0, 0), Color::BLACK);

        let image = film.to_image();
        assert_eq!(image.get_pixel(0, 1), &Rgb([127, 255, 0]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([255, 255, 255]));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn pixel_index_does_not_wrap_past_u32() {
        // 70000 * 70000 exceeds u32::MAX
        assert_eq!(pixel_index(70_000, 5, 70_000), 4_900_000_005);
    }
}
