//! Non-rectangular hit testing against image transparency.
//!
//! A point hits if its pixel is painted. A transparent pixel still hits when
//! its row holds painted content both strictly left and strictly right of it,
//! which keeps anti-aliased holes inside an icon clickable. Only the row is
//! scanned; this is not a flood fill.

use bootpick_core::Image;

/// Returns true if `(x, y)` lands on visible content of `image`.
///
/// Out-of-bounds points never hit.
#[must_use]
pub fn is_hit(image: &Image, x: i64, y: i64) -> bool {
    let (Ok(column), Ok(line)) = (usize::try_from(x), u32::try_from(y)) else {
        return false;
    };
    let Some(row) = image.row(line) else {
        return false;
    };
    let Some(pixel) = row.get(column) else {
        return false;
    };

    if pixel.is_opaque() {
        return true;
    }

    // The column itself is transparent, so scanning up to it from either
    // edge never finds the column as its own witness.
    let painted_left = row[..column].iter().any(|p| p.is_opaque());
    if !painted_left {
        return false;
    }
    row[column + 1..].iter().any(|p| p.is_opaque())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootpick_core::Pixel;

    const O: Pixel = Pixel::WHITE;
    const T: Pixel = Pixel::TRANSPARENT;

    fn strip(pixels: &[Pixel]) -> Image {
        Image::new(u32::try_from(pixels.len()).unwrap(), 1, pixels.to_vec()).unwrap()
    }

    #[test]
    fn test_fully_opaque_always_hits() {
        let image = Image::filled(6, 4, Pixel::BLACK).unwrap();
        for y in 0..4 {
            for x in 0..6 {
                assert!(is_hit(&image, x, y), "({x}, {y}) should hit");
            }
        }
    }

    #[test]
    fn test_fully_transparent_never_hits() {
        let image = Image::filled(6, 4, Pixel::TRANSPARENT).unwrap();
        for y in 0..4 {
            for x in 0..6 {
                assert!(!is_hit(&image, x, y));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_never_hits() {
        let image = Image::filled(3, 3, Pixel::BLACK).unwrap();
        assert!(!is_hit(&image, -1, 0));
        assert!(!is_hit(&image, 0, -1));
        assert!(!is_hit(&image, 3, 0));
        assert!(!is_hit(&image, 0, 3));
    }

    #[test]
    fn test_gap_between_painted_pixels_hits() {
        let image = strip(&[O, T, O]);
        assert!(is_hit(&image, 1, 0));
    }

    #[test]
    fn test_one_sided_gap_does_not_hit() {
        let image = strip(&[O, T, T]);
        assert!(is_hit(&image, 0, 0));
        assert!(!is_hit(&image, 1, 0));
        assert!(!is_hit(&image, 2, 0));

        let image = strip(&[T, T, O]);
        assert!(!is_hit(&image, 0, 0));
        assert!(!is_hit(&image, 1, 0));
    }

    #[test]
    fn test_single_column() {
        let image = Image::new(5, 2, vec![T, T, O, T, T, T, T, O, T, T]).unwrap();
        for y in 0..2 {
            assert!(is_hit(&image, 2, y));
            assert!(!is_hit(&image, 1, y));
            assert!(!is_hit(&image, 3, y));
        }
    }

    #[test]
    fn test_vertical_axis_is_ignored() {
        // Painted above and below, but nothing on the row itself.
        let image = Image::new(1, 3, vec![O, T, O]).unwrap();
        assert!(!is_hit(&image, 0, 1));
    }
}
