pub mod core;
pub mod detection;
pub mod models;
pub mod notify;
pub mod service;

pub use crate::core::db::{
    Bin, BinDb, BinRepository, BinStats, BinUpdate, NewBin, NotifyTokenRepository,
};
pub use detection::contours::{ContourScorer, LargestAreaScorer};
pub use detection::{EstimatorParams, FillEstimator};
pub use models::Contour;
pub use notify::{ConsoleNotifier, Notifier};
pub use service::{CaptureService, FULL_THRESHOLD};
