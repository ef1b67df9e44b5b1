//! # smspack CLI
//!
//! Command-line interface for the smspack library.

use std::fs;
use std::io;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::info;

use smspack::cli::{Args, OutputFormat};
use smspack::output::{write_json, write_jsonl};
use smspack::{SmsBackupParser, SmspackError};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), SmspackError> {
    let total_start = Instant::now();
    let output_path = args.output_path();

    println!("📦 smspack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("🖼️  Media:   {}", args.data_dir.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", args.format);
    println!();

    fs::create_dir_all(&args.data_dir)?;
    info!(data_dir = %args.data_dir.display(), "media directory ready");

    println!("⏳ Parsing archive...");
    let parse_start = Instant::now();
    let parser = SmsBackupParser::with_config(args.parser_config());
    let messages = parser.parse(&args.input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing {}...", args.format);
    match args.format {
        OutputFormat::Json => write_json(&messages, &output_path)?,
        OutputFormat::Jsonl => write_jsonl(&messages, &output_path)?,
    }

    let outgoing = messages.iter().filter(|m| m.outgoing).count();
    let media = messages
        .iter()
        .flat_map(|m| &m.parts)
        .filter(|p| p.is_media())
        .count();

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());
    println!();
    println!("📊 Summary:");
    println!("   Messages:  {}", messages.len());
    println!("   Sent:      {}", outgoing);
    println!("   Received:  {}", messages.len() - outgoing);
    println!("   Media:     {} parts", media);
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
