use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("seo-auditor")
        .version(env!("CARGO_PKG_VERSION"))
        .author("SEO Auditor Contributors")
        .about("Bulk SEO audits with AI commentary")
        .arg(clap::arg!([INPUT] "File with one URL per line, or '-' for stdin"))
        .arg(
            clap::arg!(-m --mode <MODE> "Audit mode (basic, full)")
                .default_value("basic")
                .value_parser(["basic", "simple", "full"]),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--no_ai "Skip AI analysis (no API key needed)"))
        .arg(clap::arg!(--model <MODEL> "Chat-completion model used for analysis"))
        .arg(clap::arg!(--max_tokens <NUM> "Output token budget for analysis").default_value("4096"))
        .arg(clap::arg!(--api_base <URL> "OpenAI-compatible API root"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds for page fetches (default: none)"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for page fetches").value_name("UA"))
        .arg(clap::arg!(--width <COLS> "Line width for wrapped report strings").default_value("80"))
        .arg(clap::arg!(--start_at <INDEX> "Index of the first URL to audit").default_value("0"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "seo-auditor", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "seo-auditor", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "seo-auditor", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "seo-auditor", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
