use num_traits::Zero;
use rayon::prelude::*;

use regkit_image::{Image, ImageError};

use crate::histogram::compute_histogram;

/// Apply a binary threshold to an image.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, same size as `src`.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value written where the input is greater than the threshold.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the images differ in size.
///
/// # Examples
///
/// ```
/// use regkit_image::{Image, ImageSize};
/// use regkit_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T>(
    src: &Image<T>,
    dst: &mut Image<T>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    dst.as_slice_mut()
        .par_iter_mut()
        .zip(src.as_slice().par_iter())
        .for_each(|(dst_pixel, src_pixel)| {
            *dst_pixel = if *src_pixel > threshold {
                max_value
            } else {
                T::zero()
            };
        });

    Ok(())
}

/// Compute the global threshold of an 8-bit image with Otsu's method.
///
/// Scans the 256-bin intensity histogram and picks the level `t` that
/// maximizes the between-class variance `w_b * w_f * (mu_b - mu_f)^2`, where
/// the background holds the pixels `<= t`. Levels that leave a class empty are
/// skipped and the first maximum wins. Returns 0 when no level splits the
/// image, e.g. for constant or empty images.
///
/// # Errors
///
/// Propagates histogram errors.
///
/// # Examples
///
/// ```
/// use regkit_image::{Image, ImageSize};
/// use regkit_imgproc::threshold::otsu_threshold;
///
/// let data = vec![10u8, 10, 10, 200, 200, 200];
/// let image = Image::new(ImageSize { width: 3, height: 2 }, data).unwrap();
///
/// assert_eq!(otsu_threshold(&image).unwrap(), 10);
/// ```
pub fn otsu_threshold(src: &Image<u8>) -> Result<u8, ImageError> {
    let mut hist = [0usize; 256];
    compute_histogram(src, &mut hist, 256)?;

    let total_pixels = src.num_pixels() as f64;
    let sum_total = hist
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum::<f64>();

    let mut weight_background = 0.0;
    let mut sum_background = 0.0;
    let mut current_max = 0.0;
    let mut threshold = 0u8;

    for (level, &count) in (0u8..=255).zip(hist.iter()) {
        weight_background += count as f64;
        sum_background += level as f64 * count as f64;

        let weight_foreground = total_pixels - weight_background;
        if weight_background == 0.0 || weight_foreground == 0.0 {
            continue;
        }

        let mean_background = sum_background / weight_background;
        let mean_foreground = (sum_total - sum_background) / weight_foreground;
        let between_class_variance =
            weight_background * weight_foreground * (mean_background - mean_foreground).powi(2);

        if between_class_variance > current_max {
            current_max = between_class_variance;
            threshold = level;
        }
    }

    Ok(threshold)
}

/// Binarize an 8-bit image with its Otsu threshold.
///
/// Pixels above the threshold become 255 and the rest 0.
///
/// # Returns
///
/// The threshold that was applied.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the images differ in size.
pub fn segment_otsu(src: &Image<u8>, dst: &mut Image<u8>) -> Result<u8, ImageError> {
    let threshold = otsu_threshold(src)?;
    log::debug!("Otsu threshold for {}: {}", src.size(), threshold);

    threshold_binary(src, dst, threshold, 255)?;

    Ok(threshold)
}
