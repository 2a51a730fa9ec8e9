use std::path::Path;

use anyhow::Context;
use image::DynamicImage;

use crate::core::db::{BinDb, BinRepository, NotifyTokenRepository};
use crate::detection::FillEstimator;
use crate::notify::Notifier;

/// Fill percentage at or above which a fullness notification is dispatched.
pub const FULL_THRESHOLD: u8 = 80;

/// Role under which the alert recipient's token is registered.
pub const ADMIN_ROLE: &str = "admin";

/// Ties the estimator to its collaborators: persist each estimate against a
/// bin record and raise an alert when the bin is nearly full.
///
/// Store and notification failures are logged and non-fatal by policy; the
/// estimate itself still counts as successfully produced.
pub struct CaptureService<N: Notifier> {
    estimator: FillEstimator,
    db: BinDb,
    notifier: N,
    full_threshold: u8,
}

impl<N: Notifier> CaptureService<N> {
    pub fn new(estimator: FillEstimator, db: BinDb, notifier: N) -> Self {
        Self {
            estimator,
            db,
            notifier,
            full_threshold: FULL_THRESHOLD,
        }
    }

    pub fn with_full_threshold(mut self, threshold: u8) -> Self {
        self.full_threshold = threshold;
        self
    }

    /// Estimate the fill level of `bin_id` from a decoded capture frame,
    /// persist it, and notify the registered recipient if it meets the
    /// fullness threshold.
    pub async fn process_capture(&self, image: &DynamicImage, bin_id: &str) -> u8 {
        let percent = self.estimator.estimate(image);

        if let Err(e) = self.db.update_fill_level(bin_id, percent).await {
            eprintln!(
                "Warning: failed to persist fill level for bin {}: {}",
                bin_id, e
            );
        }

        if percent >= self.full_threshold {
            self.dispatch_alert(bin_id, percent).await;
        }

        percent
    }

    /// Like [`process_capture`](Self::process_capture), but decodes the frame
    /// from a file first. Decode failures propagate.
    pub async fn process_capture_file<P: AsRef<Path>>(
        &self,
        path: P,
        bin_id: &str,
    ) -> anyhow::Result<u8> {
        let img = image::open(path.as_ref())
            .with_context(|| format!("Failed to decode image {:?}", path.as_ref()))?;
        Ok(self.process_capture(&img, bin_id).await)
    }

    async fn dispatch_alert(&self, bin_id: &str, percent: u8) {
        let token = match self.db.get_token(ADMIN_ROLE).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                eprintln!("No recipient token registered, skipping fullness alert.");
                return;
            }
            Err(e) => {
                eprintln!("Warning: failed to look up recipient token: {}", e);
                return;
            }
        };

        if let Err(e) = self.notifier.send_bin_full(&token, bin_id, percent).await {
            eprintln!(
                "Warning: failed to send fullness notification for bin {}: {}",
                bin_id, e
            );
        }
    }
}
