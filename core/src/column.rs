use image::DynamicImage;
use log::debug;

use crate::error::{ProfilerError, Result};
use crate::models::Rgb;

/// Standard bredde på snittvinduet (piksler).
pub const DEFAULT_COLUMN_WIDTH: u32 = 5;
/// x-posisjonen til siste måling i ord_mix-layouten.
pub const DEFAULT_DATA_START_X: u32 = 135;

/// Henter siste datakolonne: én RGB per bilderad, snittet over `column_width`
/// piksler fra `data_start_x`. Snittet avkortes til heltall.
pub fn extract_latest_column(
    image: &DynamicImage,
    column_width: u32,
    data_start_x: u32,
) -> Result<Vec<Rgb>> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    if column_width == 0 {
        return Err(ProfilerError::Extraction("column width must be > 0".into()));
    }
    if height == 0 {
        return Err(ProfilerError::Extraction("image has no rows".into()));
    }
    let right = data_start_x
        .checked_add(column_width)
        .ok_or_else(|| ProfilerError::Extraction("crop window overflows".into()))?;
    if right > width {
        return Err(ProfilerError::Extraction(format!(
            "crop window x={data_start_x}..{right} outside image width {width}"
        )));
    }

    debug!(
        "extracting column x={}..{} from {}x{} image",
        data_start_x, right, width, height
    );

    let n = column_width;
    let column = (0..height)
        .map(|y| {
            let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
            for x in data_start_x..right {
                let p = rgb.get_pixel(x, y);
                r += p[0] as u32;
                g += p[1] as u32;
                b += p[2] as u32;
            }
            Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
        })
        .collect();

    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb as Px, RgbImage};

    #[test]
    fn averages_and_truncates() {
        let mut img = RgbImage::new(4, 2);
        img.put_pixel(1, 0, Px([10, 0, 255]));
        img.put_pixel(2, 0, Px([11, 0, 254]));
        img.put_pixel(1, 1, Px([100, 100, 100]));
        img.put_pixel(2, 1, Px([100, 100, 100]));

        let col = extract_latest_column(&DynamicImage::ImageRgb8(img), 2, 1).unwrap();
        assert_eq!(col, vec![Rgb::new(10, 0, 254), Rgb::new(100, 100, 100)]);
    }

    #[test]
    fn window_outside_image_fails() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(10, 3));
        let err = extract_latest_column(&img, 5, 6).unwrap_err();
        assert!(matches!(err, ProfilerError::Extraction(_)));
        // akkurat innenfor er ok
        assert_eq!(extract_latest_column(&img, 5, 5).unwrap().len(), 3);
    }

    #[test]
    fn zero_width_fails() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(10, 3));
        assert!(matches!(
            extract_latest_column(&img, 0, 0),
            Err(ProfilerError::Extraction(_))
        ));
    }
}
