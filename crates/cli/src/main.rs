mod echo;

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use seo_auditor_core::summarize::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use seo_auditor_core::{
    AuditConfig, AuditMode, AuditOutcome, Auditor, BatchEvent, DEFAULT_WRAP_WIDTH, Summarizer, SummarizerConfig,
    fetch_file, fetch_stdin, parse_url_list,
};
use tracing_subscriber::EnvFilter;

use crate::echo::{print_banner, print_error, print_info, print_step, print_success, print_summary, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for audit results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Audit a list of web pages for on-page SEO signals and ask an LLM for fixes
#[derive(Parser, Debug)]
#[command(name = "seo-auditor")]
#[command(author = "SEO Auditor Contributors")]
#[command(version)]
#[command(about = "Bulk SEO audits with AI commentary", long_about = None)]
struct Args {
    /// File with one URL per line, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Audit mode (basic, full)
    #[arg(short, long, default_value = "basic", value_name = "MODE")]
    mode: AuditMode,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Skip AI analysis (no API key needed)
    #[arg(long)]
    no_ai: bool,

    /// Chat-completion model used for analysis
    #[arg(long, default_value = DEFAULT_MODEL, value_name = "MODEL")]
    model: String,

    /// Output token budget for analysis
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS, value_name = "NUM")]
    max_tokens: u32,

    /// OpenAI-compatible API root
    #[arg(long, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    api_base: String,

    /// HTTP timeout in seconds for page fetches (default: none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom User-Agent for page fetches
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Line width for wrapped report strings (0 disables wrapping)
    #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH, value_name = "COLS")]
    width: usize,

    /// Index of the first URL to audit, for resuming an interrupted run
    #[arg(long, default_value = "0", value_name = "INDEX")]
    start_at: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("seo_auditor_core=debug,seo_auditor=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &Args) -> anyhow::Result<AuditConfig> {
    let mut builder = AuditConfig::builder()
        .mode(args.mode)
        .timeout(args.timeout.filter(|&secs| secs > 0))
        .wrap_width(args.width);

    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent);
    }

    if !args.no_ai {
        let summarizer = SummarizerConfig::from_env()
            .with_context(|| format!("{API_KEY_ENV} is required for AI analysis (or pass --no-ai)"))?;
        builder = builder.summarizer(SummarizerConfig {
            base_url: args.api_base.clone(),
            model: args.model.clone(),
            max_tokens: args.max_tokens,
            ..summarizer
        });
    }

    Ok(builder.build())
}

fn read_urls(input: &str) -> anyhow::Result<Vec<String>> {
    let text = if input == "-" {
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        fetch_file(input).with_context(|| format!("Failed to read URL list: {}", input))?
    };

    Ok(parse_url_list(&text))
}

fn write_outcome(outcome: &AuditOutcome, format: OutputFormat, width: usize) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();

    match format {
        OutputFormat::Json => {
            let line = serde_json::to_string(outcome).context("Failed to serialize outcome")?;
            writeln!(out, "{}", line)?;
        }
        OutputFormat::Text => {
            writeln!(out, "=== SEO Audit for {} ===", outcome.url)?;
            if let Some(analysis) = &outcome.analysis {
                writeln!(out, "\n--- AI Analysis ---\n{}", analysis)?;
            }
            let rendered = outcome.render(width).context("Failed to render report")?;
            writeln!(out, "\n--- SEO Report ---\n{}\n", rendered)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "seo-auditor", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let Some(input) = args.input.as_deref() else {
        bail!("INPUT is required");
    };

    let config = build_config(&args)?;
    let urls = read_urls(input)?;

    if urls.is_empty() {
        print_warning("No URLs found in input");
        return Ok(());
    }
    print_success(&format!("Found {} URLs", urls.len()));

    if args.start_at >= urls.len() {
        print_warning(&format!("--start-at {} is past the last URL; nothing to do", args.start_at));
        return Ok(());
    }

    let auditor = Auditor::new(config).context("Failed to build HTTP clients")?;
    if args.verbose {
        eprintln!(
            "  {} {}   {} {}",
            "Mode:".dimmed(),
            auditor.mode().to_string().bright_white(),
            "AI:".dimmed(),
            auditor.summarizer().map_or("off", Summarizer::model).bright_white()
        );
        eprintln!();
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::SeqCst);
        }
    });

    let started = Instant::now();
    let mut failed = 0;
    let summary = auditor
        .run(&urls, args.start_at, |event| {
            match event {
                BatchEvent::Started { index, total, url } => {
                    print_step(index + 1, total, &format!("Analyzing {}", url.bright_white().underline()));
                }
                BatchEvent::Finished { outcome, .. } => {
                    if let Some(message) = outcome.report.error_message() {
                        failed += 1;
                        print_error(message);
                    }
                    if let Err(err) = write_outcome(outcome, args.format, auditor.wrap_width()) {
                        print_error(&format!("{:#}", err));
                    }
                }
            }

            if interrupted.load(Ordering::SeqCst) { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        })
        .await;

    print_summary(summary.processed, failed, started.elapsed());

    if let Some(index) = summary.resume_index() {
        print_warning(&format!("Interrupted; resume with --start-at {index}"));
    } else {
        print_success("Analysis complete!");
    }

    Ok(())
}
