use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

use crate::models::Contour;

/// Extract external contours from a binary edge map.
///
/// Border following via `imageproc::contours::find_contours`; hole borders
/// and contours too short to enclose any area are dropped.
pub fn find_external_contours(edges: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .filter(|c| c.points.len() >= 3)
        .map(|c| Contour::new(c.points))
        .collect()
}

/// Scoring strategy for picking the contour that stands in for the bin
/// opening. The pipeline picks the highest-scoring contour.
pub trait ContourScorer {
    fn score(&self, contour: &Contour) -> f64;
}

/// Default strategy: largest enclosed area wins.
///
/// Assumes the largest high-contrast closed region in a close-up bin photo is
/// the bin's rim. No shape or position validation; a large background object
/// can hijack the pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestAreaScorer;

impl ContourScorer for LargestAreaScorer {
    fn score(&self, contour: &Contour) -> f64 {
        contour.area()
    }
}

/// Pick the dominant contour under the given scorer.
pub fn select_dominant<'a, S: ContourScorer + ?Sized>(
    contours: &'a [Contour],
    scorer: &S,
) -> Option<&'a Contour> {
    contours
        .iter()
        .max_by(|a, b| scorer.score(a).total_cmp(&scorer.score(b)))
}
