//! `geolex` - geo-compliance analysis for feature descriptions.
//!
//! `analyze` sends a feature description to an inference endpoint and
//! resolves the response into a compliance record; `--offline` skips the
//! endpoint and uses the heuristic rule tables directly. `label` batch
//! labels descriptions offline, one JSON record per line, using the same
//! rule tables as the serving path.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use geolex_core::heuristics::classify;
use geolex_runtime::{AnalyzerConfig, ComplianceAnalyzer, EndpointGenerator, GenerationConfig};

/// Environment variable for the default inference endpoint URL.
const ENDPOINT_URL_ENV: &str = "GEOLEX_ENDPOINT_URL";

#[derive(Parser)]
#[command(name = "geolex", version, about = "Geo-compliance analysis for feature descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single feature description
    Analyze {
        /// Feature description text; omit to read from --file or stdin
        feature: Option<String>,

        /// Read the feature description from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Inference endpoint URL; falls back to GEOLEX_ENDPOINT_URL
        #[arg(long)]
        url: Option<String>,

        /// Skip the model entirely and use heuristic rules
        #[arg(long)]
        offline: bool,

        /// Include raw generated text and the extracted candidate
        #[arg(long)]
        debug: bool,
    },

    /// Label feature descriptions offline, one JSON record per line
    Label {
        /// Input file with one feature description per line; "-" for stdin
        input: PathBuf,

        /// Output file; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze {
            feature,
            file,
            url,
            offline,
            debug,
        } => analyze(feature, file, url, offline, debug).await,
        Command::Label { input, output } => label(&input, output.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

async fn analyze(
    feature: Option<String>,
    file: Option<PathBuf>,
    url: Option<String>,
    offline: bool,
    debug: bool,
) -> Result<()> {
    let feature_text = read_feature(feature, file)?;

    if offline {
        let record = classify("", &feature_text);
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let url = match url.or_else(|| std::env::var(ENDPOINT_URL_ENV).ok()) {
        Some(url) => url,
        None => bail!(
            "no endpoint configured: pass --url, set {}, or use --offline",
            ENDPOINT_URL_ENV
        ),
    };

    let config = AnalyzerConfig {
        capture_debug: debug,
        ..Default::default()
    };
    let generator = EndpointGenerator::new(&url, &GenerationConfig::default())
        .with_context(|| format!("failed to build client for {}", url))?;
    let analyzer = ComplianceAnalyzer::with_config(Arc::new(generator), config);

    let analysis = analyzer.analyze(&feature_text).await;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn read_feature(feature: Option<String>, file: Option<PathBuf>) -> Result<String> {
    let text = match (feature, file) {
        (Some(text), None) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            io::Read::read_to_string(&mut io::stdin(), &mut buffer)
                .context("failed to read feature description from stdin")?;
            buffer
        }
        (Some(_), Some(_)) => bail!("pass the feature description either inline or via --file"),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        bail!("feature description is empty");
    }
    Ok(text)
}

fn label(input: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let reader: Box<dyn BufRead> = if input.as_os_str() == "-" {
        Box::new(io::BufReader::new(io::stdin()))
    } else {
        let file = fs::File::open(input)
            .with_context(|| format!("failed to open {}", input.display()))?;
        Box::new(io::BufReader::new(file))
    };

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(io::BufWriter::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::BufWriter::new(io::stdout())),
    };

    let mut labeled = 0usize;
    for line in reader.lines() {
        let line = line.context("failed to read input line")?;
        let feature_text = line.trim();
        if feature_text.is_empty() {
            continue;
        }

        let record = classify("", feature_text);
        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;
        labeled += 1;
    }

    writer.flush()?;
    tracing::info!(labeled, "labeling complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_feature_inline() {
        let text = read_feature(Some("  Cookie banner  ".to_string()), None).unwrap();
        assert_eq!(text, "Cookie banner");
    }

    #[test]
    fn test_read_feature_rejects_empty() {
        assert!(read_feature(Some("   ".to_string()), None).is_err());
    }

    #[test]
    fn test_read_feature_rejects_both_sources() {
        assert!(read_feature(Some("text".to_string()), Some(PathBuf::from("f.txt"))).is_err());
    }
}
