/// Position mapping extraction from a reference image
use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::constants::TRANSPARENT_ALPHA;
use crate::schematic::Position;

/// Load the ordered (pixel-index, coordinate) list from a mapping image.
///
/// Each opaque mapping pixel assigns the skin pixel at the same row-major
/// index to the coordinate encoded in its colour channels (r, g, b) =
/// (x, y, z). Pixels with alpha 0 leave their skin pixel unmapped.
pub fn load_mapping(path: &Path) -> Result<Vec<(usize, Position)>, Box<dyn std::error::Error>> {
    let img = image::open(path)
        .map_err(|e| format!("failed to open mapping {}: {e}", path.display()))?
        .to_rgba8();

    let positions = positions_from_image(&img);
    info!(
        "loaded mapping {}: {} of {} pixels mapped",
        path.display(),
        positions.len(),
        img.width() as usize * img.height() as usize
    );

    Ok(positions)
}

fn positions_from_image(img: &RgbaImage) -> Vec<(usize, Position)> {
    img.pixels()
        .enumerate()
        .filter(|(_, pixel)| pixel[3] != TRANSPARENT_ALPHA)
        .map(|(idx, pixel)| {
            (
                idx,
                (pixel[0] as i32, pixel[1] as i32, pixel[2] as i32),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_mapping_pixels_are_unmapped() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([1, 2, 3, 255]));
        img.put_pixel(1, 0, image::Rgba([9, 9, 9, 0]));
        img.put_pixel(0, 1, image::Rgba([4, 5, 6, 128]));
        img.put_pixel(1, 1, image::Rgba([7, 8, 9, 0]));

        let positions = positions_from_image(&img);
        assert_eq!(positions, vec![(0, (1, 2, 3)), (2, (4, 5, 6))]);
    }

    #[test]
    fn mapping_preserves_row_major_order() {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, image::Rgba([0, 2, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 1, 0, 255]));
        img.put_pixel(2, 0, image::Rgba([0, 0, 0, 255]));

        let indices: Vec<usize> = positions_from_image(&img).iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
