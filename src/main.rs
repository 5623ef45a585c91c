use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};
use cuesplit::config::AppConfig;
use cuesplit::export::{CoverFit, ExportPlan};
use cuesplit::resolve::{self, SearchDirs};
use cuesplit::sheet::{self, DiscMetadata, SheetParser};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cuesplit", version, about = "Split a CUE + single-file disc image into tagged tracks")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Folder containing the cue, audio and cover
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cue sheet; relative to --input if given, else to the working directory
    #[arg(long)]
    cue: Option<PathBuf>,

    /// Audio file; tried against --input, the working directory, then the cue's folder
    #[arg(long)]
    wav: Option<PathBuf>,

    /// Cover image, searched like --wav. Pass --cover= to disable the cover
    #[arg(long, value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from))]
    cover: Option<PathBuf>,

    #[command(flatten)]
    sheet: SheetArgs,
}

#[derive(Args)]
struct SheetArgs {
    /// Replace the disc-level performer
    #[arg(long)]
    disc_performer_override: Option<String>,

    /// Encodings to try in order, e.g. utf8,gbk,shift-jis (defaults to config)
    #[arg(long = "cue-encoding", value_delimiter = ',')]
    cue_encodings: Vec<String>,
}

impl SheetArgs {
    fn performer(&self, config: &AppConfig) -> Option<String> {
        self.disc_performer_override
            .clone()
            .or(config.disc_performer_override.clone())
    }

    fn encodings<'a>(&'a self, config: &'a AppConfig) -> &'a [String] {
        if self.cue_encodings.is_empty() {
            &config.cue_encodings
        } else {
            &self.cue_encodings
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a cue sheet and print it as JSON
    Parse {
        /// Path to the cue sheet
        path: PathBuf,

        #[command(flatten)]
        sheet: SheetArgs,
    },

    /// Locate the cue, audio and cover files
    Resolve {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the per-track export plan
    Plan {
        #[command(flatten)]
        input: InputArgs,

        /// Tracks go to <output>/<performer>/<album>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// AAC bitrate (defaults to config, then 192k)
        #[arg(long)]
        bitrate: Option<String>,
    },
}

/// Files and metadata for one disc.
struct Bundle {
    sheet: PathBuf,
    audio: PathBuf,
    cover: Option<PathBuf>,
    disc: DiscMetadata,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = AppConfig::load();

    match cli.command {
        Commands::Parse { path, sheet } => {
            let disc = parse_sheet(&path, &sheet, &config)?;
            println!("{}", serde_json::to_string_pretty(&disc)?);
        }

        Commands::Resolve { input } => {
            let bundle = resolve_bundle(&input, &config)?;
            println!("CUE   file: {}", bundle.sheet.display());
            println!("AUDIO file: {}", bundle.audio.display());
            match &bundle.cover {
                Some(cover) => println!("COVER file: {}", cover.display()),
                None => println!("COVER file: none"),
            }
            println!(
                "Disc: {} - {} ({} tracks)",
                bundle.disc.performer().unwrap_or("?"),
                bundle.disc.title().unwrap_or("?"),
                bundle.disc.tracks.len()
            );
        }

        Commands::Plan { input, output, bitrate } => {
            let Some(output) = output.or(config.output_dir.clone()) else {
                anyhow::bail!("No output directory. Pass --output or set output_dir in config.");
            };
            let bitrate = bitrate.unwrap_or_else(|| config.bitrate.clone());

            let bundle = resolve_bundle(&input, &config)?;
            let plan = ExportPlan::build(&bundle.disc, &output)
                .context("Cannot build export plan")?;

            println!("Destination: {}", plan.dest_dir.display());
            println!("Split:       {} -> {}", bundle.audio.display(), plan.split_dir().display());
            for track in &plan.tracks {
                println!("  fdkaac {}", shell_join(&track.encoder_args(&bitrate)));
            }
            if let Some(cover) = &bundle.cover {
                println!("Cover:       {} -> {}", cover.display(), plan.cover_file().display());
                let (width, height) = image::image_dimensions(cover)
                    .with_context(|| format!("Cannot read cover {}", cover.display()))?;
                match CoverFit::from_dimensions(width, height) {
                    Some(fit) => {
                        if !fit.in_range {
                            log::warn!("Cover aspect ratio {}x{} is unusual", width, height);
                        }
                        let action = if fit.crop_right_half { "crop right half" } else { "keep whole" };
                        println!("             {}x{}, {}", width, height, action);
                    }
                    None => anyhow::bail!("Cover {} has zero height", cover.display()),
                }
                if config.embed_cover_art {
                    println!("Embed:       cover.jpg into {} files", plan.tracks.len());
                }
            }
        }
    }

    Ok(())
}

fn parse_sheet(path: &Path, args: &SheetArgs, config: &AppConfig) -> Result<DiscMetadata> {
    let text = sheet::read_sheet(path, args.encodings(config))
        .with_context(|| format!("Failed to read {}", path.display()))?;
    SheetParser::with_performer_override(args.performer(config))
        .parse(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn resolve_bundle(input: &InputArgs, config: &AppConfig) -> Result<Bundle> {
    let root = match &input.input {
        Some(p) if p.is_file() => {
            anyhow::bail!("{} is a file; extract the archive first", p.display())
        }
        Some(p) if p.is_dir() => Some(
            std::fs::canonicalize(p).with_context(|| format!("Invalid --input {}", p.display()))?,
        ),
        Some(p) => anyhow::bail!("Invalid --input option: {} does not exist", p.display()),
        None => None,
    };
    let dirs = SearchDirs::from_env(root).context("Cannot read working directory")?;

    let sheet_path = resolve::resolve_sheet(&dirs, input.cue.as_deref())?;
    let disc = parse_sheet(&sheet_path, &input.sheet, config)?;

    let audio = resolve::resolve_audio(&dirs, &sheet_path, &disc, input.wav.as_deref())?;
    let cover = resolve::resolve_cover(&dirs, &sheet_path, input.cover.as_deref())?;

    Ok(Bundle {
        sheet: sheet_path,
        audio,
        cover,
        disc,
    })
}

/// Quote arguments containing spaces for display.
fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| {
            if a.is_empty() || a.contains(char::is_whitespace) || a.contains('\'') {
                format!("'{}'", a.replace('\'', r"'\''"))
            } else {
                a.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_args(args: &[&str]) -> InputArgs {
        let argv = ["cuesplit", "resolve"].iter().chain(args.iter());
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Resolve { input } => input,
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_cover_flag_parses_to_empty_path() {
        let input = input_args(&["--cover="]);
        assert_eq!(input.cover.as_deref(), Some(Path::new("")));
    }

    #[test]
    fn path_flags_are_paths() {
        let input = input_args(&["--cue", "cd1/disc.cue", "--wav", "disc.flac", "--cover", "front.jpg"]);
        assert_eq!(input.cue, Some(PathBuf::from("cd1/disc.cue")));
        assert_eq!(input.wav, Some(PathBuf::from("disc.flac")));
        assert_eq!(input.cover, Some(PathBuf::from("front.jpg")));
    }

    #[test]
    fn cue_encodings_split_on_commas() {
        let input = input_args(&["--cue-encoding", "shift-jis,utf8"]);
        let config = AppConfig::default();
        assert_eq!(input.sheet.encodings(&config), ["shift-jis", "utf8"]);

        let input = input_args(&[]);
        assert_eq!(input.sheet.encodings(&config), ["utf8", "gbk", "shift-jis"]);
    }
}
