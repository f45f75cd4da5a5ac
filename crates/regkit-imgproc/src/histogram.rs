use rayon::prelude::*;
use regkit_image::{Image, ImageError};

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid or does not match `hist`.
///
/// # Example
///
/// ```
/// use regkit_image::{Image, ImageSize};
/// use regkit_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 || hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let mut bin_lut = [0usize; 256];
    for (i, bin) in bin_lut.iter_mut().enumerate() {
        *bin = (i * num_bins) >> 8;
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[bin_lut[px as usize]] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (acc, val) in a.iter_mut().zip(b.iter()) {
                    *acc += val;
                }
                a
            },
        );

    hist.copy_from_slice(&counts);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regkit_image::ImageSize;

    #[test]
    fn test_compute_histogram() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0u8, 2, 4, 128, 130, 132, 254, 255, 255],
        )?;

        let mut histogram = vec![0; 3];
        compute_histogram(&image, &mut histogram, 3)?;
        assert_eq!(histogram, vec![3, 3, 3]);

        let mut histogram = vec![0; 256];
        compute_histogram(&image, &mut histogram, 256)?;
        assert_eq!(histogram[255], 2);
        assert_eq!(histogram[1], 0);
        assert_eq!(histogram.iter().sum::<usize>(), 9);
        Ok(())
    }

    #[test]
    fn test_compute_histogram_large() -> Result<(), ImageError> {
        // spans several parallel chunks
        let data = (0..10_000).map(|i| (i % 256) as u8).collect::<Vec<_>>();
        let image = Image::new(
            ImageSize {
                width: 100,
                height: 100,
            },
            data,
        )?;

        let mut histogram = vec![0; 256];
        compute_histogram(&image, &mut histogram, 256)?;
        assert_eq!(histogram[0], 40);
        assert_eq!(histogram[255], 39);
        assert_eq!(histogram.iter().sum::<usize>(), 10_000);
        Ok(())
    }

    #[test]
    fn test_compute_histogram_invalid_bins() -> Result<(), ImageError> {
        let image = Image::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0u8,
        )?;

        let mut histogram = vec![0; 4];
        assert_eq!(
            compute_histogram(&image, &mut histogram, 0),
            Err(ImageError::InvalidHistogramBins(0))
        );
        assert_eq!(
            compute_histogram(&image, &mut histogram, 3),
            Err(ImageError::InvalidHistogramBins(3))
        );
        let mut histogram = vec![0; 257];
        assert_eq!(
            compute_histogram(&image, &mut histogram, 257),
            Err(ImageError::InvalidHistogramBins(257))
        );
        Ok(())
    }
}
