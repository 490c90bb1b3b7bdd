//! Daylight CLI - view and normalize CSV files
//!
//! ```bash
//! daylight serve                       # Start HTTP server (port 3000)
//! daylight normalize visits.csv        # Normalized table as JSON
//! daylight normalize visits.csv -f csv # ... or as CSV
//! daylight render visits.csv -o out.html
//! daylight parse visits.csv            # Raw rows, before normalization
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use daylight::{
    intake_file, parser::format_delimiter, render_page, tokenize_file, Config, IntakeOptions,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "daylight")]
#[command(about = "Upload CSV files and view them as normalized tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a CSV file and output the raw rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize a CSV file: find headers, drop empty rows and columns
    Normalize {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Render a CSV file as a standalone HTML page
    Render {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page title
        #[arg(long, default_value = "Daylight Healthcare")]
        title: String,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: DAYLIGHT_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with the built frontend to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Normalize {
            input,
            delimiter,
            output,
            format,
        } => cmd_normalize(&input, delimiter, output.as_deref(), format),

        Commands::Render {
            input,
            delimiter,
            output,
            title,
        } => cmd_render(&input, delimiter, output.as_deref(), &title),

        Commands::Serve { port, static_dir } => cmd_serve(port, static_dir).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Tokenizing CSV: {}", input.display());

    let result = tokenize_file(input, delimiter)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(result.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("✅ Read {} rows", result.rows.len());

    let json = serde_json::to_string_pretty(&result.rows)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_normalize(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = intake_file(input, &IntakeOptions { delimiter })?;
    let table = &result.table;

    eprintln!("✅ {} records", table.len());
    eprintln!("   Columns: {}", table.headers().join(", "));

    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(table)?,
        OutputFormat::Csv => table.to_csv()?,
    };
    write_output(&content, output)?;

    Ok(())
}

fn cmd_render(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = intake_file(input, &IntakeOptions { delimiter })?;

    if result.table.is_empty() {
        eprintln!("⚠️  No records to display");
    }

    write_output(&render_page(&result.table, title), output)?;
    Ok(())
}

async fn cmd_serve(
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?.with_overrides(port, static_dir);
    daylight::server::start_server(config).await
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
