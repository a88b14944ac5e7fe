//! LEXIS - command-line front-end for the dictionary translation client

use lexis::logic::{build_summary, format_outcome, translate_all, TranslationQuery};
use lexis::{Config, HttpTransport, RequestDispatcher};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "usage: lexis <source_lang> <target_lang> <word> [word...]";

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((source_lang, target_lang, words)) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let transport = match HttpTransport::new() {
        Ok(t) => t,
        Err(e) => {
            log::error!("HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Looking up {} word(s) at {}", words.len(), config.base_url);
    let dispatcher = RequestDispatcher::new(config, Arc::new(transport));

    let queries = words
        .iter()
        .map(|w| TranslationQuery::new(w.as_str(), source_lang, target_lang))
        .collect();
    let results = translate_all(&dispatcher, queries).await;

    for (query, outcome) in &results {
        println!("{}", format_outcome(query, outcome));
    }
    println!("{}", build_summary(&results));

    ExitCode::SUCCESS
}

/// `<source_lang> <target_lang> <word> [word...]`
fn parse_args(args: &[String]) -> Option<(&str, &str, &[String])> {
    match args {
        [source, target, words @ ..] if !words.is_empty() => Some((source.as_str(), target.as_str(), words)),
        _ => None,
    }
}
