use anyhow::Context;
use clap::{Parser, Subcommand};
use openshade::common::log::{has_errors, Log, LogEvent};
use openshade::engine;
use openshade::presets::{
    load_comment, load_custom_tweaks, load_post_processes, load_tweaks, post_process_catalog,
    state_hash, tweak_catalog, CustomTweak, HexCodec, PostProcess, PresetFile, Tweak,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a preset: rebuild the live shader files from the backups
    /// and clear the shader cache.
    Apply {
        /// The path to the preset file to apply.
        #[arg(short, long)]
        preset: PathBuf,
        /// The simulator's ShadersHLSL directory.
        #[arg(short, long)]
        shaders: PathBuf,
        /// Directory holding (or to receive) the unmodified backups.
        #[arg(short, long)]
        backup: PathBuf,
        /// The compiled shader cache directory to invalidate.
        #[arg(short, long)]
        cache: PathBuf,
    },
    /// Put the backed up, unmodified shader files back in place.
    Restore {
        /// The simulator's ShadersHLSL directory.
        #[arg(short, long)]
        shaders: PathBuf,
        /// Directory holding the unmodified backups.
        #[arg(short, long)]
        backup: PathBuf,
    },
    /// Delete the compiled shader cache.
    ClearCache {
        /// The compiled shader cache directory.
        #[arg(short, long)]
        cache: PathBuf,
    },
    /// Print the structural hash of a preset loaded over the stock
    /// catalog.
    Hash {
        /// The path to the preset file.
        #[arg(short, long)]
        preset: PathBuf,
    },
}

struct PresetState {
    tweaks: Vec<Tweak>,
    customs: Vec<CustomTweak>,
    posts: Vec<PostProcess>,
    comment: String,
}

/// Loads a preset file over the stock catalog, surfacing the loader's
/// warnings in the shared log.
fn load_preset(path: &Path, log: &mut Log) -> anyhow::Result<PresetState> {
    let store = PresetFile::open(path)
        .with_context(|| format!("could not open preset {}", path.display()))?;
    let codec = HexCodec;

    let mut tweaks = tweak_catalog();
    log.extend(load_tweaks(&mut tweaks, &store, false));
    let mut posts = post_process_catalog();
    log.extend(load_post_processes(&mut posts, &store, &codec, false));
    let mut customs = Vec::new();
    log.extend(load_custom_tweaks(&mut customs, &store, &codec));
    let comment = load_comment(&store);

    Ok(PresetState {
        tweaks,
        customs,
        posts,
        comment,
    })
}

fn print_log(log: &[LogEvent]) {
    for event in log {
        println!("[{}] {}", event.severity, event.message);
    }
}

fn run(args: Args, log: &mut Log) -> anyhow::Result<()> {
    match args.command {
        Commands::Apply {
            preset,
            shaders,
            backup,
            cache,
        } => {
            if !engine::backup_exists(&backup) {
                engine::backup_shaders(&shaders, &backup)?;
                log.push(LogEvent::info(format!(
                    "Shader files backed up to {}",
                    backup.display()
                )));
            }
            let state = load_preset(&preset, log)?;
            engine::apply_to_directory(
                &state.tweaks,
                &state.customs,
                &state.posts,
                &backup,
                &shaders,
                &cache,
                log,
            )?;
            log.push(LogEvent::info(format!(
                "Preset [{}] applied",
                preset.display()
            )));
        }
        Commands::Restore { shaders, backup } => {
            engine::restore_shaders(&backup, &shaders)?;
            log.push(LogEvent::info("Shader files restored"));
        }
        Commands::ClearCache { cache } => {
            engine::clear_directory(&cache)?;
            log.push(LogEvent::info("Shader cache cleared"));
        }
        Commands::Hash { preset } => {
            let state = load_preset(&preset, log)?;
            println!(
                "{}",
                state_hash(&state.tweaks, &state.customs, &state.posts, &state.comment)
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut log = Log::new();
    let result = run(args, &mut log);
    print_log(&log);

    match result {
        Ok(()) if !has_errors(&log) => ExitCode::SUCCESS,
        Ok(()) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
