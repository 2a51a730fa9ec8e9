use std::future::Future;

/// Push-notification dispatch boundary.
///
/// The monitoring service only needs "tell this recipient that this bin is
/// this full"; the transport behind it is interchangeable.
pub trait Notifier {
    fn send_bin_full(
        &self,
        token: &str,
        bin_id: &str,
        fill_level: u8,
    ) -> impl Future<Output = anyhow::Result<()>>;
}

/// Prints the alert instead of dispatching it. Stands in where no push
/// transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    async fn send_bin_full(&self, token: &str, bin_id: &str, fill_level: u8) -> anyhow::Result<()> {
        println!(
            "[notify -> {}] Smart Waste Bin Alert: Bin {} is {}% full.",
            token, bin_id, fill_level
        );
        Ok(())
    }
}
