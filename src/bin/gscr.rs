use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gsc_report::render::{JsonRenderer, ReportRenderer, TextRenderer};
use gsc_report::viz::{self, ChartOptions, ImageFormat};
use gsc_report::{CtrScale, LoadOptions, RawTable, ReportConfig, build_report, load_with, storage};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Shape of the export `gscr report` expects; printed by `gscr sample`.
const SAMPLE_CSV: &str = "\
query,page,clicks,impressions,ctr,position
rust tutorial,https://example.com/learn,120,2400,5.00%,3.2
rust tutorial,https://example.com/book,80,1600,5.00%,4.1
cargo workspaces,https://example.com/cargo,45,900,5.00%,2.7
borrow checker,https://example.com/book,30,1500,2.00%,6.4
async rust,https://example.com/async,25,2500,1.00%,8.9
";

#[derive(Parser, Debug)]
#[command(
    name = "gscr",
    version,
    about = "Summarize Google Search Console performance exports into tables and bar charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load an export and print (and optionally export and plot) the report.
    Report(ReportArgs),
    /// Print a sample CSV in the expected format.
    Sample,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartFormat {
    Svg,
    Png,
}

impl From<ChartFormat> for ImageFormat {
    fn from(f: ChartFormat) -> Self {
        match f {
            ChartFormat::Svg => ImageFormat::Svg,
            ChartFormat::Png => ImageFormat::Png,
        }
    }
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// CSV export with a header row (query/page, clicks, impressions, ctr, position).
    input: PathBuf,
    /// Entries per ranked list.
    #[arg(long, default_value_t = gsc_report::DEFAULT_TOP_N)]
    top: usize,
    /// Report format written to stdout (or --out).
    #[arg(long, value_enum, default_value = "text")]
    format: OutFormat,
    /// Write the report to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also save all ranked lists as long-format CSV.
    #[arg(long)]
    export_csv: Option<PathBuf>,
    /// Write one bar chart per ranked list into this directory.
    #[arg(long)]
    charts: Option<PathBuf>,
    /// Chart image format.
    #[arg(long, value_enum, default_value = "svg")]
    chart_format: ChartFormat,
    /// Width of each chart (default 1000).
    #[arg(long, default_value_t = viz::DEFAULT_WIDTH)]
    width: u32,
    /// Height of each chart (default 600).
    #[arg(long, default_value_t = viz::DEFAULT_HEIGHT)]
    height: u32,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
    /// TTF font used for chart text; common system fonts are tried if omitted.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Treat plain CTR numbers as fractions (0.045 = 4.5%).
    #[arg(long, default_value_t = false)]
    ctr_fraction: bool,
    /// Echo the uploaded table to stderr before processing.
    #[arg(long, default_value_t = false)]
    show_input: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
        Command::Sample => {
            print!("{SAMPLE_CSV}");
            Ok(())
        }
    }
}

fn echo_raw(raw: &RawTable) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(io::stderr());
    wtr.write_record(&raw.headers)?;
    for rec in &raw.records {
        wtr.write_record(rec)?;
    }
    wtr.flush()?;
    Ok(())
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let config = ReportConfig {
        top_n: args.top,
        load: LoadOptions {
            ctr_scale: if args.ctr_fraction {
                CtrScale::Fraction
            } else {
                CtrScale::Percent
            },
        },
    };

    let raw = RawTable::from_path(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if args.show_input {
        echo_raw(&raw)?;
    }
    let table = load_with(raw, &config.load)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let report = build_report(&table, config.top_n)?;

    let renderer: Box<dyn ReportRenderer> = match args.format {
        OutFormat::Text => Box::new(TextRenderer::with_locale(args.locale.as_str())),
        OutFormat::Json => Box::new(JsonRenderer::default()),
    };
    match args.out.as_ref() {
        Some(path) => {
            let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut w = BufWriter::new(f);
            renderer.render(&report, &mut w)?;
            w.flush()?;
            eprintln!("Wrote report to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            renderer.render(&report, &mut lock)?;
        }
    }

    if let Some(path) = args.export_csv.as_ref() {
        storage::save_csv(&report, path)?;
        eprintln!("Saved ranked lists to {}", path.display());
    }

    if let Some(dir) = args.charts.as_ref() {
        let opts = ChartOptions {
            width: args.width,
            height: args.height,
            locale: args.locale.clone(),
            font: args.font.clone(),
            format: args.chart_format.into(),
        };
        let written = viz::plot_report(&report, dir, &opts)?;
        eprintln!("Wrote {} charts to {}", written.len(), dir.display());
    }

    Ok(())
}
