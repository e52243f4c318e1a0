// ABOUTME: CLI binary for the single-page scraper.
// ABOUTME: Scrapes URLs or a local HTML file and prints the extracted content as JSON or text.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use digests_scrape::{Client, ExtractionConfig, ScrapeOutput};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "scrape")]
#[command(about = "Fetch a web page and extract its title, text, metadata and images")]
struct Args {
    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print JSON on a single line
    #[arg(long = "compact")]
    compact: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Extraction config as a JSON object
    #[arg(long = "config", conflicts_with = "config_file")]
    config: Option<String>,

    /// Read the extraction config from a JSON file
    #[arg(long = "config-file")]
    config_file: Option<PathBuf>,

    /// HTML file to scrape (requires --url)
    #[arg(long = "html", requires = "url")]
    html: Option<PathBuf>,

    /// URL context for HTML file scraping (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// URLs to scrape (fetch mode)
    #[arg()]
    urls: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> anyhow::Result<ExtractionConfig> {
    let raw = match (&args.config, &args.config_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?,
        (None, None) => return Ok(ExtractionConfig::default()),
    };
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("config is not valid JSON")?;
    ExtractionConfig::from_json(&value).map_err(anyhow::Error::msg)
}

fn format_output(
    results: &[ScrapeOutput],
    format: OutputFormat,
    compact: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let rendered = match (results, compact) {
                ([single], true) => serde_json::to_string(single)?,
                ([single], false) => serde_json::to_string_pretty(single)?,
                (many, true) => serde_json::to_string(many)?,
                (many, false) => serde_json::to_string_pretty(many)?,
            };
            Ok(rendered)
        }
        OutputFormat::Text => Ok(results
            .iter()
            .map(|r| r.content.format_text())
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    if args.html.is_none() && args.urls.is_empty() {
        eprintln!("error: at least one URL is required, or use --html with --url");
        return ExitCode::from(1);
    }

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let client = match Client::builder()
        .allow_private_networks(args.allow_private_networks)
        .timeout(Duration::from_secs(args.timeout))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let start = Instant::now();
    let mut results: Vec<ScrapeOutput> = Vec::new();
    let mut had_error = false;

    if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
        match fs::read_to_string(html_path) {
            Ok(html) => match client.scrape_html(&html, url, &config) {
                Ok(output) => results.push(output),
                Err(e) => {
                    eprintln!("error scraping HTML: {}", e);
                    had_error = true;
                }
            },
            Err(e) => {
                eprintln!("error reading file {:?}: {}", html_path, e);
                had_error = true;
            }
        }
    } else {
        for url in &args.urls {
            match client.scrape(url, &config).await {
                Ok(output) => results.push(output),
                Err(e) => {
                    eprintln!("error scraping {}: {}", url, e);
                    had_error = true;
                }
            }
        }
    }

    let elapsed = start.elapsed();

    if !results.is_empty() {
        match format_output(&results, args.format, args.compact) {
            Ok(rendered) => {
                if let Some(output_path) = &args.output {
                    if let Err(e) = fs::write(output_path, &rendered) {
                        eprintln!("error writing to {:?}: {}", output_path, e);
                        had_error = true;
                    }
                } else {
                    println!("{}", rendered);
                }
            }
            Err(e) => {
                eprintln!("error rendering output: {}", e);
                had_error = true;
            }
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
