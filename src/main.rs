use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use clash_links::generator::{subscription_body, LogSink};
use clash_links::parser::clash::links_from_clash;

/// Convert a Clash proxy list into share links
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Clash configuration file (YAML or JSON); reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Base64-encode the whole output, as a subscription body
    #[arg(short, long)]
    base64: bool,

    /// Write the links to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let content = read_input(args.input.as_ref())?;
    let links = links_from_clash(&content, LogSink)?;
    info!("Generated {} links", links.len());

    let body = subscription_body(&links, args.base64);
    match args.output {
        Some(path) => std::fs::write(&path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", body),
    }

    Ok(())
}
