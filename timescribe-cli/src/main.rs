//! timescribe-cli: command-line front end for timescribe
//!
//! Transcribe audio files with per-segment timestamps, manage model
//! weights, and fetch the bundled example clip.

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use timescribe_audio::AudioSource;
use timescribe_core::{
    assets, find_model, format_bytes, get_model_registry, Config, DownloadManager, ModelInfo,
    ModelStatus, ProgressCallback, ProgressStage,
};
use timescribe_pipeline::TranscriptionPipeline;
use timescribe_report::render_table;
use timescribe_stt::ModelSession;

#[derive(Parser)]
#[command(name = "timescribe")]
#[command(about = "Audio transcription with per-segment timestamps")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio file and write the transcript CSV
    Transcribe {
        /// Path to the audio file (WAV)
        audio: PathBuf,

        /// Model id to transcribe with (overrides config)
        #[arg(long)]
        model: Option<String>,

        /// Where to write the transcript CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also write the clickable HTML table to this path
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Download required model weights
    DownloadModels {
        /// Only show what would be downloaded, don't actually download
        #[arg(long)]
        dry_run: bool,

        /// Download all available models (not just the configured one)
        #[arg(long)]
        all: bool,

        /// Specific model id to download
        #[arg(long)]
        model: Option<String>,
    },

    /// List available and downloaded models
    ListModels,

    /// Fetch the example audio clip into the local assets cache
    FetchExample,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Transcribe {
            audio,
            model,
            csv,
            html,
        }) => {
            transcribe(audio, model, csv, html).await?;
        }
        Some(Commands::DownloadModels {
            dry_run,
            all,
            model,
        }) => {
            download_models(dry_run, all, model).await?;
        }
        Some(Commands::ListModels) => {
            list_models().await?;
        }
        Some(Commands::FetchExample) => {
            fetch_example().await?;
        }
        None => {
            println!("timescribe - audio transcription with timestamps");
            println!("Run with --help for usage");
        }
    }

    Ok(())
}

async fn transcribe(
    audio: PathBuf,
    model_override: Option<String>,
    csv_override: Option<PathBuf>,
    html_path: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load();

    let model_id = model_override.unwrap_or_else(|| config.models.model.clone());
    let registry = get_model_registry();
    let model = find_model(&registry, &model_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown model: {}", model_id))?;

    // Make sure the weights are present before the session touches them
    let manager = DownloadManager::new(config.models.model_dir.clone());
    let model_path = match manager.check_status(&model).await {
        ModelStatus::Ready { path } => path,
        _ => {
            println!(
                "Model {} not downloaded yet ({})",
                model.id,
                format_bytes(model.size_bytes)
            );
            download_with_bar(&manager, &model).await?
        }
    };

    let csv_path = csv_override.unwrap_or_else(|| config.output.csv_path.clone());

    let (tx, mut rx) = mpsc::channel(8);
    let session = Arc::new(ModelSession::new(model_path));
    let pipeline = TranscriptionPipeline::new(session)
        .with_csv_path(csv_path)
        .with_progress(tx);

    // Pipeline checkpoints drive a coarse percentage bar
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n[{bar:40.cyan/blue}] {pos}%")?
            .progress_chars("#>-"),
    );
    let bar_updates = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while let Some(stage) = rx.recv().await {
                bar.set_message(stage.label());
                bar.set_position((stage.fraction() * 100.0) as u64);
            }
        })
    };

    let result =
        tokio::task::spawn_blocking(move || pipeline.run_blocking(AudioSource::File(audio)))
            .await??;

    // Pipeline (and its sender) are gone, so the update task drains and ends
    bar_updates.await?;
    bar.finish_with_message(ProgressStage::Done.label());

    println!("\n{}\n", result.full_text);
    for segment in &result.segments {
        println!("{}", segment);
    }
    println!("\nTranscript CSV written to {:?}", result.csv_path);

    if let Some(html_path) = html_path {
        std::fs::write(&html_path, render_table(&result.segments))?;
        println!("Transcript table written to {:?}", html_path);
    }

    Ok(())
}

async fn download_with_bar(manager: &DownloadManager, model: &ModelInfo) -> Result<PathBuf> {
    let pb = ProgressBar::new(model.size_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Downloading {}", model.name));

    let pb_clone = Arc::new(pb);
    let pb_callback = pb_clone.clone();

    let progress_callback: ProgressCallback = Box::new(move |downloaded, _total| {
        pb_callback.set_position(downloaded);
    });

    match manager.ensure_model(model, Some(progress_callback)).await {
        Ok(path) => {
            pb_clone.finish_with_message(format!("{} downloaded to {:?}", model.name, path));
            Ok(path)
        }
        Err(e) => {
            pb_clone.abandon_with_message(format!("Failed to download {}: {}", model.name, e));
            Err(e.into())
        }
    }
}

async fn download_models(dry_run: bool, all: bool, specific_model: Option<String>) -> Result<()> {
    let config = Config::load();
    let registry = get_model_registry();
    let manager = DownloadManager::new(config.models.model_dir.clone());

    // Determine which models to download
    let models_to_check: Vec<_> = if let Some(ref model_id) = specific_model {
        registry.iter().filter(|m| m.id == *model_id).collect()
    } else if all {
        registry.iter().collect()
    } else {
        registry
            .iter()
            .filter(|m| m.id == config.models.model)
            .collect()
    };

    if models_to_check.is_empty() {
        if let Some(ref model_id) = specific_model {
            println!("Unknown model: {}", model_id);
            println!("Available models:");
            for m in &registry {
                println!("  - {} ({})", m.id, m.name);
            }
        }
        return Ok(());
    }

    // Check status and collect models that need downloading
    let mut to_download = Vec::new();
    let mut already_downloaded = Vec::new();

    for model in models_to_check {
        match manager.check_status(model).await {
            ModelStatus::Ready { path } => {
                already_downloaded.push((model, path));
            }
            _ => {
                to_download.push(model);
            }
        }
    }

    // Report already downloaded
    if !already_downloaded.is_empty() {
        println!("Already downloaded:");
        for (model, path) in &already_downloaded {
            println!("  {} - {:?}", model.name, path);
        }
    }

    // Report what needs downloading
    if to_download.is_empty() {
        println!("\nAll requested models are already downloaded.");
        return Ok(());
    }

    let total_size: u64 = to_download.iter().map(|m| m.size_bytes).sum();
    println!("\nModels to download ({}):", format_bytes(total_size));
    for model in &to_download {
        println!(
            "  {} ({}) - {}",
            model.id,
            model.name,
            format_bytes(model.size_bytes)
        );
    }

    if dry_run {
        println!("\n[Dry run - no downloads performed]");
        return Ok(());
    }

    println!("\nDownloading to {:?}...\n", config.models.model_dir);

    for model in to_download {
        download_with_bar(&manager, model).await?;
    }

    println!("\nAll models downloaded successfully!");
    Ok(())
}

async fn list_models() -> Result<()> {
    let config = Config::load();
    let registry = get_model_registry();
    let manager = DownloadManager::new(config.models.model_dir.clone());

    println!("Available models:\n");

    for model in &registry {
        let status = manager.check_status(model).await;
        let is_configured = model.id == config.models.model;

        let status_str = match status {
            ModelStatus::Ready { .. } => "[downloaded]".to_string(),
            ModelStatus::NotDownloaded => "[not downloaded]".to_string(),
            ModelStatus::Failed { error } => format!("[failed: {}]", error),
            ModelStatus::Downloading { progress } => {
                format!("[downloading: {:.0}%]", progress * 100.0)
            }
        };

        let configured_marker = if is_configured { " (configured)" } else { "" };

        println!(
            "  {} - {}{}\n    Size: {}\n    Status: {}\n",
            model.id,
            model.name,
            configured_marker,
            format_bytes(model.size_bytes),
            status_str
        );
    }

    // Show downloaded model files
    let downloaded = manager.list_downloaded().await?;
    if !downloaded.is_empty() {
        println!("Downloaded model files:");
        for path in downloaded {
            println!("  {:?}", path);
        }
    }

    Ok(())
}

async fn fetch_example() -> Result<()> {
    let config = Config::load();
    match assets::ensure_example_audio(&config.output.assets_dir).await {
        Ok(path) => {
            println!("Example audio available at {:?}", path);
        }
        Err(e) => {
            // Best effort: losing the example clip never blocks transcription
            eprintln!("Could not fetch example audio: {}", e);
        }
    }
    Ok(())
}
