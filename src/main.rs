use clap::{Parser, Subcommand};
use std::path::PathBuf;

use binwatch::core::db::{BinDb, BinRepository, BinUpdate, NewBin, NotifyTokenRepository};
use binwatch::notify::ConsoleNotifier;
use binwatch::service::{CaptureService, FULL_THRESHOLD};
use binwatch::{EstimatorParams, FillEstimator};

#[derive(Parser)]
#[command(name = "binwatch")]
#[command(about = "Estimate waste bin fill levels from photos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate the fill level of a bin from an image
    Estimate {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Bin record to update with the estimate
        #[arg(long, value_name = "ID")]
        bin: Option<String>,

        /// Path to the bin database (used with --bin)
        #[arg(long, value_name = "FILE", default_value = "binwatch.db")]
        db: PathBuf,

        /// Fill percentage that triggers a fullness alert
        #[arg(long, default_value_t = FULL_THRESHOLD)]
        threshold: u8,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Save intermediate stage images to directory
        #[arg(long, value_name = "DIR")]
        debug_out: Option<PathBuf>,
    },

    /// Register a new bin
    Add {
        #[arg(long)]
        location: String,

        #[arg(long, value_name = "TYPE", default_value = "General")]
        bin_type: String,

        #[arg(long, default_value_t = 100)]
        capacity: i64,

        #[arg(long, value_name = "FILE", default_value = "binwatch.db")]
        db: PathBuf,
    },

    /// List all bins with fleet statistics
    List {
        #[arg(long, value_name = "FILE", default_value = "binwatch.db")]
        db: PathBuf,
    },

    /// Overwrite a bin's recorded fill level
    SetLevel {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(value_name = "PERCENT")]
        fill_level: u8,

        #[arg(long, value_name = "FILE", default_value = "binwatch.db")]
        db: PathBuf,
    },

    /// Delete a bin record
    Remove {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(long, value_name = "FILE", default_value = "binwatch.db")]
        db: PathBuf,
    },

    /// Register the notification recipient token
    SetToken {
        #[arg(value_name = "TOKEN")]
        token: String,

        #[arg(long, value_name = "FILE", default_value = "binwatch.db")]
        db: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        Command::Estimate {
            image_path,
            bin,
            db,
            threshold,
            verbose,
            debug_out,
        } => {
            let mut estimator =
                FillEstimator::with_params(EstimatorParams::default()).with_verbose(verbose);
            if let Some(dir) = debug_out {
                estimator = estimator.with_debug_dir(dir);
            }

            match bin {
                Some(bin_id) => {
                    let db = BinDb::new(&db).await?;
                    let service = CaptureService::new(estimator, db, ConsoleNotifier)
                        .with_full_threshold(threshold);
                    let percent = service.process_capture_file(&image_path, &bin_id).await?;
                    println!("Bin {} is {}% full", bin_id, percent);
                }
                None => {
                    let percent = estimator.estimate_from_path(&image_path)?;
                    println!("Estimated fill level: {}%", percent);
                }
            }
        }

        Command::Add {
            location,
            bin_type,
            capacity,
            db,
        } => {
            let db = BinDb::new(&db).await?;
            let bin = db
                .add_bin(NewBin {
                    location,
                    bin_type,
                    capacity,
                    fill_level: 0,
                })
                .await?;
            println!("Added bin {} at {}", bin.id, bin.location);
        }

        Command::List { db } => {
            let db = BinDb::new(&db).await?;
            let bins = db.get_bins().await?;
            if bins.is_empty() {
                println!("No bins registered.");
            } else {
                for bin in &bins {
                    println!(
                        "{}  {:<24} {:<10} {:>3}%  (capacity {}, updated {})",
                        bin.id, bin.location, bin.bin_type, bin.fill_level, bin.capacity,
                        bin.last_updated
                    );
                }
                let stats = db.bin_statistics().await?;
                println!(
                    "\n{} bins: {} full, {} half, {} empty",
                    stats.total, stats.full, stats.half, stats.empty
                );
            }
        }

        Command::SetLevel { id, fill_level, db } => {
            let db = BinDb::new(&db).await?;
            db.update_bin(
                &id,
                &BinUpdate {
                    fill_level: Some(fill_level.min(100) as i64),
                    ..Default::default()
                },
            )
            .await?;
            println!("Bin {} set to {}%", id, fill_level.min(100));
        }

        Command::Remove { id, db } => {
            let db = BinDb::new(&db).await?;
            db.delete_bin(&id).await?;
            println!("Removed bin {}", id);
        }

        Command::SetToken { token, db } => {
            let db = BinDb::new(&db).await?;
            db.save_token(binwatch::service::ADMIN_ROLE, &token).await?;
            println!("Recipient token saved");
        }
    }

    Ok(())
}
