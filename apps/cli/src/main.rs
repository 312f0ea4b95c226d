use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use docreel_core::{
    ApiClient, Backend, Config, ContentType, Controller, Session, UploadForm, file_info_from_path,
    format_script_readable, format_step_indicator, format_video_readable, load_script,
    save_script,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "docreel")]
#[command(about = "Turn source documents into an AI-written script and a generated video")]
struct Cli {
    /// Backend base URL. Overrides DOCREEL_API_URL and the config file.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process documents, generate a script and then a video
    Produce {
        /// Project name
        #[arg(short, long)]
        name: String,

        /// Source documents
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Ask for a fresh script once before continuing
        #[arg(long)]
        regenerate: bool,

        /// Write the script as JSON (edit it and feed it to `docreel video`)
        #[arg(long)]
        script_out: Option<PathBuf>,

        /// Stop once the script is ready
        #[arg(long)]
        no_video: bool,
    },
    /// Generate a video from a script JSON file
    Video {
        /// Script file written by `produce --script-out`
        #[arg(long)]
        script: PathBuf,

        /// Content type label, e.g. "Tutorial"
        #[arg(long)]
        content_type: String,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn finish_step(spinner: &ProgressBar, session: &Session, done: &str, started: Instant) -> Result<()> {
    if let Some(error) = session.error() {
        spinner.finish_with_message(format!("{} {}", style("✗").red().bold(), done));
        bail!("{}", error);
    }
    spinner.finish_with_message(format!(
        "{} {} {}",
        style("✓").green().bold(),
        done,
        style(format!("[{}]", format_duration(started.elapsed()))).dim()
    ));
    Ok(())
}

async fn produce(
    backend: Arc<dyn Backend>,
    name: &str,
    files: &[PathBuf],
    regenerate: bool,
    script_out: Option<PathBuf>,
    no_video: bool,
) -> Result<()> {
    let mut form = UploadForm::new();
    form.set_project_name(name);
    for path in files {
        form.add_files([file_info_from_path(path)?]);
    }

    let mut controller = Controller::new(backend);
    let total_start = Instant::now();

    // Step 1: process documents and draft the script
    let step_start = Instant::now();
    let spinner = create_spinner(&format!(
        "Processing {} file(s) and generating script...",
        form.files().len()
    ));
    controller
        .process(&form.project_name, form.files().to_vec())
        .await?;
    finish_step(&spinner, controller.session(), "Script generated", step_start)?;

    if regenerate {
        let step_start = Instant::now();
        let spinner = create_spinner("Regenerating script...");
        controller.regenerate().await?;
        finish_step(&spinner, controller.session(), "Script regenerated", step_start)?;
    }

    let session = controller.session();
    let (Some(project), Some(script)) = (session.project(), session.script()) else {
        bail!("Backend returned no script");
    };

    println!("{}", style(format_step_indicator(session.stage())).dim());
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_script_readable(project, script));

    if let Some(path) = &script_out {
        save_script(script, path).await?;
        println!("{} {}\n", style("Saved:").dim(), style(path.display()).cyan());
    }

    if no_video {
        return Ok(());
    }

    // Step 2: render the video from the script as it stands
    let script = script.clone();
    let step_start = Instant::now();
    let spinner = create_spinner("Generating video...");
    controller.generate_video(script).await?;
    finish_step(&spinner, controller.session(), "Video generated", step_start)?;

    if let Some(video) = controller.session().video() {
        println!("{}", style(format_step_indicator(controller.session().stage())).dim());
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", format_video_readable(video));
    }

    println!(
        "{} {}\n",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );

    Ok(())
}

async fn video_from_file(
    backend: Arc<dyn Backend>,
    path: &Path,
    content_type: &str,
) -> Result<()> {
    let script = load_script(path).await?;
    let content_type = ContentType::from(content_type);

    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Generating {} video...", content_type));
    let video = match backend.generate_video(&script, &content_type).await {
        Ok(video) => video,
        Err(e) => {
            spinner.finish_with_message(format!("{} Video generation failed", style("✗").red().bold()));
            bail!("Failed to generate video. Please try again. ({e})");
        }
    };
    spinner.finish_with_message(format!(
        "{} Video generated {}",
        style("✓").green().bold(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_video_readable(&video));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.api_url.as_deref())?;
    let backend: Arc<dyn Backend> = Arc::new(ApiClient::from_config(&config));

    println!(
        "\n{}  {}\n",
        style("docreel").cyan().bold(),
        style(format!("AI Video Producer · {}", config.api_base_url)).dim()
    );

    let result = match cli.command {
        Command::Produce {
            name,
            files,
            regenerate,
            script_out,
            no_video,
        } => produce(backend, &name, &files, regenerate, script_out, no_video).await,
        Command::Video {
            script,
            content_type,
        } => video_from_file(backend, &script, &content_type).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
