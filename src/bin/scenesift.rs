use std::{io, path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use scenesift::{
    DetectionOptions, FrameSource, MeanHasher, ProgressCallback, ProgressInfo, SceneSet,
    SceneSiftError, VideoLibrary, VideoSource, contact_sheet, detect_scenes,
};

const CLI_AFTER_HELP: &str = "Examples:\n  scenesift detect input.mp4 --top-n 20\n  scenesift detect input.mp4 --grid scenes.png --progress\n  scenesift batch videos/ --library library.json\n  scenesift show --library library.json\n  scenesift completions zsh > _scenesift";

#[derive(Debug, Parser)]
#[command(
    name = "scenesift",
    version,
    about = "Detect scene changes in video files",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar while scanning.
    #[arg(long)]
    progress: bool,

    /// Maximum number of scenes retained per video.
    #[arg(long, default_value_t = 40)]
    top_n: u32,

    /// Sampling density as a fraction of the total frame count.
    #[arg(long, default_value_t = scenesift::DEFAULT_STEP_RATIO)]
    step_ratio: f64,

    /// Fingerprint grid resolution (bits per side).
    #[arg(long, default_value_t = scenesift::DEFAULT_RESOLUTION)]
    resolution: u32,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Detect scene changes in a single video.
    #[command(
        about = "Detect scene changes in one video",
        after_help = "Examples:\n  scenesift detect input.mp4\n  scenesift detect input.mp4 --json\n  scenesift detect input.mp4 --grid scenes.png --grid-width 240"
    )]
    Detect {
        /// Input video path.
        input: PathBuf,

        /// Output the scene list as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Write a contact-sheet image of the detected scenes.
        #[arg(long)]
        grid: Option<PathBuf>,

        /// Thumbnail width for the contact sheet, in pixels.
        #[arg(long, default_value_t = scenesift::DEFAULT_THUMBNAIL_WIDTH)]
        grid_width: u32,
    },

    /// Process a file or directory of videos into a saved library.
    #[command(
        about = "Batch-process videos into a library file",
        after_help = "Examples:\n  scenesift batch videos/ --library library.json\n  scenesift batch clip.mkv --library library.json --top-n 10"
    )]
    Batch {
        /// A video file or a directory containing videos.
        source: PathBuf,

        /// Output path for the JSON library.
        #[arg(long)]
        library: PathBuf,
    },

    /// Print a previously saved library.
    #[command(
        about = "Print the scenes of a saved library",
        after_help = "Examples:\n  scenesift show --library library.json\n  scenesift show --library library.json --json"
    )]
    Show {
        /// Path to a JSON library written by `batch`.
        #[arg(long)]
        library: PathBuf,

        /// Output the library as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// The shell to generate completions for.
        shell: Shell,
    },
}

/// Bridges library progress callbacks onto an indicatif bar.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::no_length();
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} samples",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.samples_expected {
            self.bar.set_length(total);
        }
        self.bar.set_position(info.samples_processed);
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SceneSiftError> {
    let options = build_options(&cli.global);

    match cli.command {
        Commands::Detect {
            input,
            json,
            grid,
            grid_width,
        } => detect_command(&cli.global, options, input, json, grid, grid_width),
        Commands::Batch { source, library } => {
            let result = VideoLibrary::process_source(&source, &options)?;
            result.save(&library)?;
            println!(
                "{} {} videos -> {}",
                "saved".green().bold(),
                result.len(),
                library.display(),
            );
            Ok(())
        }
        Commands::Show { library, json } => {
            let result = VideoLibrary::load(&library)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for video in result.videos() {
                    println!("{}", video.source_path.display().to_string().bold());
                    print_scene_table(&video.scenes);
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn build_options(global: &GlobalOptions) -> DetectionOptions {
    let mut options = DetectionOptions::new()
        .with_top_n(global.top_n)
        .with_step_ratio(global.step_ratio)
        .with_fingerprint_resolution(global.resolution);

    if global.progress {
        options = options.with_progress(Arc::new(BarProgress::new()));
    }

    options
}

fn detect_command(
    global: &GlobalOptions,
    mut options: DetectionOptions,
    input: PathBuf,
    json: bool,
    grid: Option<PathBuf>,
    grid_width: u32,
) -> Result<(), SceneSiftError> {
    // The contact sheet needs the selected frames' pixels.
    if grid.is_some() {
        options = options.with_keep_frames(true);
    }

    let mut source = VideoSource::open(&input)?;

    if global.verbose {
        let metadata = source.metadata();
        println!(
            "{} {}x{} @ {:.2} fps, codec={}, ~{} frames",
            "source:".cyan().bold(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
            metadata.total_frames,
        );
    }

    let hasher = MeanHasher::new(options.fingerprint_resolution);
    let scenes = detect_scenes(&mut source, &hasher, &options)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "source_path": input,
                "scenes": scenes,
            }))?
        );
    } else {
        println!(
            "{} {} scene changes in {}",
            "found".green().bold(),
            scenes.len(),
            input.display(),
        );
        print_scene_table(&scenes);
    }

    if let Some(grid_path) = grid {
        let sheet = contact_sheet(&scenes, grid_width)?;
        sheet.save(&grid_path)?;
        println!("{} {}", "grid:".cyan().bold(), grid_path.display());
    }

    Ok(())
}

fn print_scene_table(scenes: &SceneSet) {
    for scene in scenes {
        println!(
            "  {:>8}  {}  delta {:>5}",
            scene.frame_index,
            scene.timestamp_display().yellow(),
            scene.hash_delta,
        );
    }
}
