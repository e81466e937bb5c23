//! # Tillroll CLI
//!
//! Command-line interface for point-of-sale printing.
//!
//! ## Usage
//!
//! ```bash
//! # Show the column layout for a paper width
//! tillroll layout --width 80
//!
//! # Complete an EAN with its check digit
//! tillroll check-digit 400638133393
//!
//! # Print a shelf label, or preview it as PNG
//! tillroll --config station.json label --price 1.99 --name "Cola 330ml" --barcode 5449000000996
//! tillroll label --price 1.99 --name "Cola 330ml" --barcode 5449000000996 --png label.png
//!
//! # Print end-of-day report from a JSON snapshot, dumping bytes to a file
//! tillroll --config station.json --out report.bin report day.json
//!
//! # Open the cash drawer
//! tillroll --config station.json drawer
//! ```
//!
//! Set `RUST_LOG=tillroll=debug` for detailed logs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::info;

use tillroll::{
    BatchReport, LayoutSpec, PrintError, PrintResult, PrintSession, PrinterProfile, Site,
    StationConfig,
    barcode::{Symbology, checksum},
    driver::EscPosDriver,
    label::{self, LabelRequest},
    lists::{ExpiringItem, StockLevel},
    raster::RasterImage,
    receipt::Receipt,
    report::ReportData,
    transport::{DeviceTransport, MemoryTransport, Transport},
};

/// Tillroll - Receipt, report and label printing
#[derive(Parser, Debug)]
#[command(name = "tillroll")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Station configuration (site and printers) as JSON
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Printer id from the station configuration (defaults to the primary)
    #[arg(long, global = true)]
    printer: Option<String>,

    /// Printer device path when no configuration is given
    #[arg(long, global = true, default_value = "/dev/usb/lp0")]
    device: String,

    /// Paper width in mm when no configuration is given
    #[arg(long, global = true, default_value = "80")]
    paper_width: i32,

    /// Write the printer bytes to a file instead of the device
    #[arg(long, global = true, value_name = "FILE")]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the column layout for a paper width
    Layout {
        /// Paper width in mm
        #[arg(long)]
        width: i32,

        /// Character budget for widths between 58 and 80mm
        #[arg(long)]
        max_chars: Option<usize>,
    },

    /// Complete a 7 or 12 digit code with its EAN check digit
    CheckDigit { digits: String },

    /// Print a shelf-edge label
    Label {
        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        name: String,

        #[arg(long)]
        barcode: String,

        /// Label date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Save the label as PNG instead of printing
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Print a sales report from a JSON report snapshot
    Report { file: PathBuf },

    /// Print a customer receipt from JSON
    Receipt { file: PathBuf },

    /// Print the refill list from a JSON report snapshot
    Refill { file: PathBuf },

    /// Print the shortage list from a JSON array of stock levels
    Shortage { file: PathBuf },

    /// Print the expiry list from a JSON array of expiring items
    Expiry {
        file: PathBuf,

        /// Last expiry date to include (YYYY-MM-DD)
        #[arg(long)]
        cutoff: NaiveDate,
    },

    /// Open the cash drawer
    Drawer,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tillroll=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> PrintResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Layout { width, max_chars } => {
            let spec = LayoutSpec::for_paper_width_with_max(*width, *max_chars)?;
            println!(
                "max_chars={} qty_width={} name_width={} price_width={}",
                spec.max_chars, spec.qty_width, spec.name_width, spec.price_width
            );
            println!("{}", spec.format_row(Decimal::from(2), "Example item", Decimal::new(399, 2)));
        }

        Commands::CheckDigit { digits } => {
            let check = match digits.len() {
                12 => checksum::ean13_check_digit(digits),
                7 => checksum::ean8_check_digit(digits),
                _ => None,
            }
            .ok_or_else(|| {
                PrintError::Configuration(format!(
                    "expected 7 or 12 digits, got '{}'",
                    digits
                ))
            })?;
            println!("{}{}", digits, check);
        }

        Commands::Label {
            price,
            name,
            barcode,
            date,
            png,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let request = LabelRequest::new(*price, name.clone(), barcode.clone(), date);

            if let Some(png_path) = png {
                let class = resolve_printer(&cli)?.0.label_class();
                let composed = label::compose(&request, class)?;
                let raster = RasterImage::from_rgb(&composed.canvas);
                save_png(png_path, &raster)?;
                println!(
                    "Saved {} label ({}) to {}",
                    Symbology::select(barcode).name(),
                    if composed.barcode_rendered { "with bars" } else { "text only" },
                    png_path.display()
                );
            } else {
                let report = with_session(&cli, |s| s.print_labels(&[request]))?;
                print_batch(&report);
            }
        }

        Commands::Report { file } => {
            let data: ReportData = read_json(file)?;
            let report = with_session(&cli, |s| s.print_sales_report(&data))?;
            println!(
                "Printed report: {} sections, {} customers, drawer cash {}",
                report.sections.len(),
                report.summary.customer_count,
                tillroll::layout::format_amount(report.drawer.drawer_cash)
            );
        }

        Commands::Receipt { file } => {
            let receipt: Receipt = read_json(file)?;
            with_session(&cli, |s| s.print_receipt(&receipt))?;
            println!("Printed receipt #{}", receipt.transaction_id);
        }

        Commands::Refill { file } => {
            let data: ReportData = read_json(file)?;
            let report = with_session(&cli, |s| s.print_refill_list(&data.sale_items))?;
            print_batch(&report);
        }

        Commands::Shortage { file } => {
            let levels: Vec<StockLevel> = read_json(file)?;
            let report = with_session(&cli, |s| s.print_shortage_list(&levels))?;
            print_batch(&report);
        }

        Commands::Expiry { file, cutoff } => {
            let items: Vec<ExpiringItem> = read_json(file)?;
            let report = with_session(&cli, |s| s.print_expiry_list(&items, *cutoff))?;
            print_batch(&report);
        }

        Commands::Drawer => {
            with_session(&cli, |s| s.open_drawer())?;
            println!("Drawer opened");
        }
    }

    Ok(())
}

type CliSession<'a> = PrintSession<EscPosDriver, &'a mut dyn Transport>;

/// Printer profile and site from `--config`, or from the device flags.
fn resolve_printer(cli: &Cli) -> PrintResult<(PrinterProfile, Site)> {
    let Some(path) = &cli.config else {
        let profile = PrinterProfile::new("default", "Default", &cli.device, cli.paper_width);
        return Ok((profile, Site::new("tillroll")));
    };

    let config = StationConfig::load(path)?;
    let profile = match &cli.printer {
        Some(id) => config.printer(id).ok_or_else(|| {
            PrintError::Configuration(format!("no active printer '{}' in {}", id, path.display()))
        })?,
        None => config.primary_printer().ok_or_else(|| {
            PrintError::Configuration(format!("no active printer in {}", path.display()))
        })?,
    };
    Ok((profile.clone(), config.site.clone()))
}

/// Run one job on a freshly initialized session.
fn with_session<R>(
    cli: &Cli,
    job: impl FnOnce(&mut CliSession<'_>) -> PrintResult<R>,
) -> PrintResult<R> {
    let (profile, site) = resolve_printer(cli)?;

    let mut memory = MemoryTransport::new();
    let mut device = DeviceTransport::new();
    let transport: &mut dyn Transport = if cli.out.is_some() {
        &mut memory
    } else {
        &mut device
    };

    let mut session = PrintSession::new(EscPosDriver::new(), transport);
    session.initialize(Some(profile), Some(site))?;
    let result = job(&mut session)?;
    drop(session);

    if let Some(path) = &cli.out {
        let bytes = memory.bytes();
        fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "print data written");
    }

    Ok(result)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PrintResult<T> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| PrintError::Configuration(format!("Invalid {}: {}", path.display(), e)))
}

fn print_batch(report: &BatchReport) {
    let summary = report.summary();
    println!("Printed {} item(s), {} failed", summary.printed, summary.failed);
    for (key, error) in report.failures() {
        println!("  {}: {}", key, error);
    }
}

/// Save a packed raster as a PNG image
fn save_png(path: &Path, raster: &RasterImage) -> PrintResult<()> {
    use image::{GrayImage, Luma};

    let mut img = GrayImage::new(raster.width(), raster.height());
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let color = if raster.is_set(x, y) { 0u8 } else { 255u8 };
        *pixel = Luma([color]);
    }

    img.save(path)
        .map_err(|e| PrintError::Image(format!("Failed to save PNG: {}", e)))?;

    Ok(())
}
