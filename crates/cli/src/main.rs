use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use astrasafe_core::capture::infrastructure::nokhwa_frame_source::NokhwaFrameSource;
use astrasafe_core::client::domain::inference_client::InferenceClient;
use astrasafe_core::client::infrastructure::http_inference_client::HttpInferenceClient;
use astrasafe_core::live::frame_poller::LiveEvent;
use astrasafe_core::live::live_session::LiveSession;
use astrasafe_core::overlay::format_confidence;
use astrasafe_core::shared::constants::{
    is_image_path, DEFAULT_BACKEND_URL, DEFAULT_POLL_INTERVAL_MS, IMAGE_EXTENSIONS,
};
use astrasafe_core::shared::detection::Detection;

/// Safety-object detection for still images and live camera feeds.
#[derive(Parser)]
#[command(name = "astrasafe")]
struct Cli {
    /// Image file to scan (omit when using --camera).
    input: Option<PathBuf>,

    /// Watch a live camera feed instead of scanning a file.
    #[arg(long)]
    camera: Option<u32>,

    /// Inference backend base URL.
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    backend: String,

    /// Milliseconds between live frames.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    interval: u64,

    /// Stop the live feed after this many detection responses (0 = run forever).
    #[arg(long, default_value = "0")]
    cycles: usize,

    /// Print raw JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let client = HttpInferenceClient::new(cli.backend.clone())?;

    match (cli.camera, &cli.input) {
        (Some(index), _) => run_watch(index, client, cli.interval, cli.cycles, cli.json),
        (None, Some(input)) => run_scan(input, client, cli.json),
        (None, None) => Err("An input image is required unless --camera is used".into()),
    }
}

fn run_scan(
    input: &Path,
    client: HttpInferenceClient,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let filename = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.jpg");

    let detections = client.predict_image(bytes, filename)?;
    print_detections(&detections, json);
    Ok(())
}

fn run_watch(
    index: u32,
    client: HttpInferenceClient,
    interval: u64,
    cycles: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = NokhwaFrameSource::open(index)?;
    let (tx, rx) = crossbeam_channel::unbounded();

    let mut session = LiveSession::new();
    session.start(
        Box::new(source),
        Box::new(client),
        Duration::from_millis(interval),
        tx,
    );

    let mut seen = 0;
    for event in rx.iter() {
        match event {
            LiveEvent::Frame(_) => {}
            LiveEvent::Detections(detections) => {
                print_detections(&detections, json);
                seen += 1;
                if cycles > 0 && seen >= cycles {
                    break;
                }
            }
            LiveEvent::CycleError(e) => eprintln!("Warning: {e}"),
        }
    }

    session.stop();
    Ok(())
}

fn print_detections(detections: &[Detection], json: bool) {
    if json {
        match serde_json::to_string(detections) {
            Ok(out) => println!("{out}"),
            Err(e) => log::error!("failed to serialize detections: {e}"),
        }
        return;
    }

    if detections.is_empty() {
        println!("No objects detected.");
        return;
    }

    println!("{:<24} {:>10}  {}", "Class", "Confidence", "Box [x y w h]");
    for d in detections {
        println!(
            "{:<24} {:>9}%  [{:.3} {:.3} {:.3} {:.3}]",
            d.class,
            format_confidence(d.confidence),
            d.bbox[0],
            d.bbox[1],
            d.bbox[2],
            d.bbox[3],
        );
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.camera.is_some() && cli.input.is_some() {
        return Err("--camera and an input file are mutually exclusive".into());
    }
    if cli.camera.is_none() {
        let Some(input) = &cli.input else {
            return Err("An input image is required unless --camera is used".into());
        };
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !is_image_path(input) {
            return Err(format!(
                "Unsupported file type (expected one of: {})",
                IMAGE_EXTENSIONS.join(", ")
            )
            .into());
        }
    }
    if cli.interval == 0 {
        return Err("--interval must be at least 1 millisecond".into());
    }
    Ok(())
}
