pub mod contours;
pub mod mask;
pub mod preprocessing;
pub mod threshold;

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{DynamicImage, GrayImage};

use crate::models::Contour;
use contours::{ContourScorer, LargestAreaScorer};

/// Tuning parameters for the fill estimation pipeline.
///
/// Defaults match the values the pipeline was tuned with; all of them assume
/// the fixed square working resolution.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorParams {
    /// Side of the square working image everything is resized to.
    pub working_size: u32,
    /// Gaussian blur sigma (the 7x7-kernel default).
    pub blur_sigma: f32,
    /// Canny lower sensitivity threshold.
    pub canny_low: f32,
    /// Canny upper sensitivity threshold.
    pub canny_high: f32,
    /// Radius of the adaptive-threshold neighbourhood (side 2r + 1).
    pub block_radius: u32,
    /// Constant subtracted from the local mean before comparison.
    pub threshold_offset: i32,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            working_size: 500,
            blur_sigma: 1.4,
            canny_low: 50.0,
            canny_high: 150.0,
            block_radius: 5,
            threshold_offset: 2,
        }
    }
}

/// Estimates how full a waste bin is from a photo of its opening.
///
/// A pure single-pass pipeline: resize, grayscale + blur, Canny edges,
/// external contours, dominant-contour mask, adaptive threshold, ratio.
/// Each call works on its own buffers, so concurrent callers need no locking.
pub struct FillEstimator {
    pub params: EstimatorParams,
    scorer: Box<dyn ContourScorer + Send + Sync>,
    verbose: bool,
    debug_dir: Option<PathBuf>,
}

impl FillEstimator {
    pub fn new() -> Self {
        Self::with_params(EstimatorParams::default())
    }

    pub fn with_params(params: EstimatorParams) -> Self {
        Self {
            params,
            scorer: Box::new(LargestAreaScorer),
            verbose: false,
            debug_dir: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Save each stage's intermediate image into `dir` as PNG. Saving is best
    /// effort; failures are reported but never abort an estimate.
    pub fn with_debug_dir(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    /// Replace the dominant-contour selection strategy.
    pub fn with_scorer(mut self, scorer: Box<dyn ContourScorer + Send + Sync>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Estimate the fill percentage of the bin in `img`.
    ///
    /// Always returns a value in [0, 100]. A frame with no detectable edges
    /// is treated as "no bin opening found, assume empty" and yields 0.
    pub fn estimate(&self, img: &DynamicImage) -> u8 {
        if self.verbose {
            println!(
                "Resizing {}x{} to working size {}...",
                img.width(),
                img.height(),
                self.params.working_size
            );
        }
        let working = preprocessing::resize_to_working(img, self.params.working_size);
        self.save_debug("01_resized", &working);

        if self.verbose {
            println!("Converting to grayscale and blurring...");
        }
        let gray = preprocessing::to_grayscale(&working);
        let blurred = preprocessing::apply_blur(&gray, self.params.blur_sigma);
        self.save_debug_gray("02_blurred", &blurred);

        if self.verbose {
            println!("Detecting edges...");
        }
        let edges =
            preprocessing::detect_edges(&blurred, self.params.canny_low, self.params.canny_high);
        self.save_debug_gray("03_edges", &edges);

        let all_contours = contours::find_external_contours(&edges);
        if self.verbose {
            println!("Found {} external contours", all_contours.len());
        }
        let Some(dominant) = contours::select_dominant(&all_contours, self.scorer.as_ref()) else {
            // No detectable opening, assume empty.
            return 0;
        };
        if self.verbose {
            println!(
                "Dominant contour: {} points, enclosed area {:.0}",
                dominant.len(),
                dominant.area()
            );
        }

        let Some(mask) = mask::rasterize_interior(
            dominant,
            self.params.working_size,
            self.params.working_size,
        ) else {
            return 0;
        };
        self.save_debug_gray("04_mask", &mask);

        let masked = mask::apply_mask(&gray, &mask);
        self.save_debug_gray("05_masked", &masked);

        let (filled, total) = threshold::count_filled(
            &masked,
            &mask,
            self.params.block_radius,
            self.params.threshold_offset,
        );
        if total == 0 {
            return 0;
        }

        let percent = (filled as f64 / total as f64 * 100.0).round();
        if self.verbose {
            println!("{} of {} masked pixels classified filled", filled, total);
        }
        percent.clamp(0.0, 100.0) as u8
    }

    /// Decode an image file and estimate its fill percentage.
    ///
    /// Decode failures propagate; they are categorically different from a
    /// frame with no detectable edges.
    pub fn estimate_from_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<u8> {
        let img = image::open(path.as_ref())
            .with_context(|| format!("Failed to decode image {:?}", path.as_ref()))?;
        Ok(self.estimate(&img))
    }

    /// Run the pipeline up to contour extraction (for inspection).
    pub fn get_contours(&self, img: &DynamicImage) -> Vec<Contour> {
        let working = preprocessing::resize_to_working(img, self.params.working_size);
        let gray = preprocessing::to_grayscale(&working);
        let blurred = preprocessing::apply_blur(&gray, self.params.blur_sigma);
        let edges =
            preprocessing::detect_edges(&blurred, self.params.canny_low, self.params.canny_high);
        contours::find_external_contours(&edges)
    }

    /// Dominant contour under the configured scorer (for inspection).
    pub fn get_dominant_contour(&self, img: &DynamicImage) -> Option<Contour> {
        let all = self.get_contours(img);
        contours::select_dominant(&all, self.scorer.as_ref()).cloned()
    }

    /// Region mask for the dominant contour (for inspection).
    pub fn get_region_mask(&self, img: &DynamicImage) -> Option<GrayImage> {
        let dominant = self.get_dominant_contour(img)?;
        mask::rasterize_interior(
            &dominant,
            self.params.working_size,
            self.params.working_size,
        )
    }

    fn save_debug(&self, stage: &str, img: &DynamicImage) {
        if let Some(dir) = &self.debug_dir {
            if let Err(e) = std::fs::create_dir_all(dir)
                .map_err(anyhow::Error::from)
                .and_then(|_| {
                    img.save(dir.join(format!("{}.png", stage)))
                        .map_err(anyhow::Error::from)
                })
            {
                eprintln!("Warning: failed to save debug image {}: {}", stage, e);
            }
        }
    }

    fn save_debug_gray(&self, stage: &str, img: &GrayImage) {
        if self.debug_dir.is_some() {
            self.save_debug(stage, &DynamicImage::ImageLuma8(img.clone()));
        }
    }
}

impl Default for FillEstimator {
    fn default() -> Self {
        Self::new()
    }
}
