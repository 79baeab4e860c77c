//! CLI tool that prints the literate transcript of a JavaScript file.

use std::fs;
use std::process::ExitCode;

use literate_rs::TranscriptOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn usage() {
    eprintln!("Usage: literate [--lang <tag>] <file>");
    eprintln!();
    eprintln!("Block comments are printed as prose, all other code is");
    eprintln!("wrapped in fenced code blocks. Output goes to stdout.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --lang <tag>  Fence language tag (default: from extension, or js)");
    eprintln!("  -h, --help    Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  literate app.js > app.md");
    eprintln!("  literate --lang javascript lib/index.mjs");
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the transcript.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut language = None;
    let mut path = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                usage();
                return ExitCode::from(2);
            }
            "--lang" => {
                let Some(tag) = iter.next() else {
                    eprintln!("Error: --lang requires a value");
                    return ExitCode::from(2);
                };
                language = Some(tag.clone());
            }
            _ if path.is_none() => path = Some(arg.clone()),
            _ => {
                eprintln!("Error: unexpected argument: {arg}");
                return ExitCode::from(2);
            }
        }
    }

    let Some(path) = path else {
        usage();
        return ExitCode::from(2);
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut options = TranscriptOptions::for_path(&path);
    if let Some(language) = language {
        options = options.language(language);
    }
    tracing::debug!(%path, language = %options.language, "transcribing");

    match literate_rs::transcribe(&content, &options) {
        Ok(transcript) => {
            println!("{transcript}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            ExitCode::FAILURE
        }
    }
}
