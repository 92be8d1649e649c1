use anyhow::Context;
use echomark::api::load_config;
use echomark::models::{FileCandidate, Mode};
use echomark::services::validation::media_type_for_extension;
use echomark::services::UploadController;
use std::path::Path;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    echomark::init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin detect_file -- <path> [--mode image|text|audio] [--base-url <url>] [--timeout-ms <n>]\n\nNotes:\n  - Mode defaults to image; the file's media type is taken from its extension.\n  - ECHOMARK_API_URL overrides the configured service origin."
        );
        return Ok(());
    }

    let path = args[1].clone();
    let mode = match parse_arg_value(&args, "--mode") {
        Some(name) => Mode::parse(&name).with_context(|| format!("unknown mode: {}", name))?,
        None => Mode::Image,
    };

    let mut config = load_config().map_err(anyhow::Error::msg)?;
    if let Some(base_url) = parse_arg_value(&args, "--base-url") {
        config.base_url = base_url;
    }
    if let Some(timeout) = parse_arg_value(&args, "--timeout-ms") {
        config.request_timeout_ms = timeout.parse().context("invalid --timeout-ms")?;
    }

    let bytes = std::fs::read(&path).with_context(|| format!("read file failed: {}", path))?;
    let file_name = Path::new(&path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.clone());
    let extension = Path::new(&path)
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let media_type = media_type_for_extension(&extension)
        .with_context(|| format!("unsupported file extension: {:?}", extension))?;

    let mut controller = UploadController::new(&config)?;
    controller.on_mode_selected(mode);
    controller.on_file_chosen(FileCandidate {
        file_name: file_name.clone(),
        media_type: media_type.to_string(),
        bytes,
    })?;

    println!("File: {}", file_name);
    println!("Mode: {}", mode);
    println!("Service: {}", controller.client().base_url());

    let report = controller.on_detect_requested().await?;
    println!("Latency: {} ms", report.latency_ms);
    println!("{}", serde_json::to_string_pretty(&report.payload)?);

    Ok(())
}
