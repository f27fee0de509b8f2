use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use reelsmith::{
    CancelToken, FfmpegEncoder, JobRequest, OptionFields, RenderJob, RenderJobController,
    RenderResult, StudioConfig, SvgRasterizer, TemplateKind,
};

#[derive(Parser, Debug)]
#[command(name = "reelsmith", version)]
struct Cli {
    /// JSON studio config; built-in defaults are used for missing keys.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the output directory.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Frame worker threads (defaults to all cores).
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an MP4 clip (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single preview frame as a PNG.
    Frame(FrameArgs),
    /// List the available templates.
    Templates,
}

#[derive(Args, Debug)]
struct TemplateArgs {
    /// Template name: intro, kinetic or testimonial.
    #[arg(long)]
    template: String,

    #[arg(long)]
    headline: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    /// Kinetic phrases, in order. The last one is emphasized.
    #[arg(long, num_args = 1..)]
    texts: Vec<String>,

    #[arg(long)]
    body: Option<String>,

    /// Call-to-action label.
    #[arg(long)]
    cta: Option<String>,

    /// Clip length in seconds (defaults per template).
    #[arg(long)]
    duration: Option<f64>,
}

impl TemplateArgs {
    fn into_request(self, output_path: Option<PathBuf>) -> JobRequest {
        JobRequest {
            template: self.template,
            fields: OptionFields {
                headline: self.headline,
                subtitle: self.subtitle,
                texts: self.texts,
                body: self.body,
                cta: self.cta,
            },
            duration_secs: self.duration,
            output_path,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    template: TemplateArgs,

    /// Output MP4 path (defaults to `<output_dir>/<template>-<timestamp>.mp4`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    template: TemplateArgs,

    /// Time of the frame, in seconds from the start of the clip.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelsmith=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    match cli.cmd {
        Command::Render(args) => cmd_render(config, args).await,
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Templates => {
            cmd_templates();
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<StudioConfig> {
    let mut config = match &cli.config {
        Some(path) => StudioConfig::load(path)?,
        None => StudioConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn cmd_render(config: StudioConfig, args: RenderArgs) -> anyhow::Result<()> {
    let req = args.template.into_request(args.out);
    let job = RenderJob::from_request(req, &config, chrono::Local::now())?;
    tracing::info!(
        template = %job.kind(),
        duration = job.duration_secs(),
        out = %job.output_path().display(),
        "starting render"
    );

    let cancel = CancelToken::new();
    let job_cancel = cancel.clone();
    let task = tokio::task::spawn_blocking(move || -> anyhow::Result<RenderResult> {
        let rasterizer = SvgRasterizer::new(&config.font_dirs);
        let encoder = FfmpegEncoder::new(config.encoder.clone());
        let controller =
            RenderJobController::new(&config, &rasterizer, &encoder).with_cancel(job_cancel);
        controller
            .run(&job)
            .with_context(|| format!("render '{}' job", job.kind()))
    });

    let result = match supervise(task, &cancel, tokio::signal::ctrl_c).await? {
        Supervised::Done(res) => res?,
        Supervised::Abandoned => std::process::exit(130),
    };

    println!(
        "Video saved: {} ({:.2} MB, {} frames)",
        result.output_path.display(),
        result.size_mb(),
        result.frames
    );
    Ok(())
}

/// How a supervised render task ended.
enum Supervised<T> {
    Done(T),
    /// A second interrupt arrived while the task was still winding down.
    Abandoned,
}

/// Await `task`. The first interrupt cancels it cooperatively, the second gives up on it.
async fn supervise<T, F, Fut>(
    mut task: tokio::task::JoinHandle<T>,
    cancel: &CancelToken,
    mut interrupt: F,
) -> anyhow::Result<Supervised<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        res = &mut task => return Ok(Supervised::Done(res.context("render task panicked")?)),
        Ok(()) = interrupt() => {
            tracing::warn!("interrupt received, stopping after in-flight frames (Ctrl-C again to abort)");
            cancel.cancel();
        }
    }

    tokio::select! {
        res = &mut task => Ok(Supervised::Done(res.context("render task panicked")?)),
        Ok(()) = interrupt() => {
            tracing::error!("second interrupt, aborting; scratch frames may be left behind");
            Ok(Supervised::Abandoned)
        }
    }
}

fn cmd_frame(config: &StudioConfig, args: FrameArgs) -> anyhow::Result<()> {
    let req = args.template.into_request(None);
    let job = RenderJob::from_request(req, config, chrono::Local::now())?;

    let rasterizer = SvgRasterizer::new(&config.font_dirs);
    let encoder = FfmpegEncoder::new(config.encoder.clone());
    let controller = RenderJobController::new(config, &rasterizer, &encoder);
    let frame = controller
        .render_preview_frame(&job, args.at, &args.out)
        .with_context(|| format!("render preview frame to '{}'", args.out.display()))?;

    eprintln!("wrote {} (frame {})", args.out.display(), frame.0);
    Ok(())
}

fn cmd_templates() {
    for kind in TemplateKind::ALL {
        let required = match kind.required_options() {
            [] => "none".to_owned(),
            names => names.join(", "),
        };
        println!(
            "{:<12} {:>4.1}s  required: {:<10} {}",
            kind.as_str(),
            kind.default_duration_secs(),
            required,
            kind.summary()
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bin/reelsmith.rs"]
mod tests;
