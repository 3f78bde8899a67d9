//! Prepare a host to run the VibeVoice UI.
//!
//! Verifies `git`, clones the VibeVoice repository into the local package
//! directory, and writes the JSON settings file. Any failed step is fatal.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info, warn};

use vibevoice_ui::backend::MANIFEST_FILE;
use vibevoice_ui::config::{DEFAULT_INFERENCE_STEPS, DEFAULT_MODEL_PATH, STEP_RANGE, Settings};

#[derive(Parser, Debug)]
#[command(name = "vibevoice-setup", version, about = "Set up VibeVoice for the speech generation UI")]
struct Args {
    /// Hugging Face model path
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model_path: String,

    /// Number of inference steps
    #[arg(long, default_value_t = DEFAULT_INFERENCE_STEPS, value_parser = clap::value_parser!(u32).range(1..))]
    inference_steps: u32,

    /// Where to write the settings file
    #[arg(long, default_value = "app/config.json")]
    config_out: PathBuf,

    /// Repository to clone
    #[arg(long, default_value = "https://github.com/microsoft/VibeVoice.git")]
    repo_url: String,

    /// Clone destination; also the UI's local package directory
    #[arg(long, env = "VIBEVOICE_LOCAL_REPO", default_value = "VibeVoice")]
    repo_dir: PathBuf,

    /// Skip cloning the repository
    #[arg(long)]
    skip_clone: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn check_git() -> Result<()> {
    let status = Command::new("git").arg("--version").stdout(Stdio::null()).stderr(Stdio::null()).status().context("git not found. Install git and retry")?;
    if !status.success() {
        bail!("git --version exited with {}", status);
    }
    Ok(())
}

fn clone_repo(url: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        info!("VibeVoice repository already exists at {}, skipping clone", dest.display());
        return Ok(());
    }

    info!("📥 Cloning {} into {}...", url, dest.display());
    let status = Command::new("git").arg("clone").arg(url).arg(dest).status().context("Failed to run git clone")?;
    if !status.success() {
        bail!("git clone exited with {}", status);
    }
    info!("✅ VibeVoice repository cloned successfully");
    Ok(())
}

fn write_settings(args: &Args) -> Result<Settings> {
    let settings = Settings { model_path: args.model_path.clone(), inference_steps: args.inference_steps, ..Settings::default() };
    settings.save(&args.config_out).with_context(|| format!("Failed to write {}", args.config_out.display()))?;
    info!("Configuration file created at {}", args.config_out.display());
    Ok(settings)
}

/// Re-read what was written and report what the UI will find.
fn validate(args: &Args, written: &Settings) -> Result<()> {
    let reloaded = Settings::try_load(&args.config_out)?;
    if &reloaded != written {
        bail!("{} does not read back as written", args.config_out.display());
    }
    info!("✅ Configuration validated");

    if !STEP_RANGE.contains(&written.inference_steps) {
        warn!("⚠️ Inference steps {} is outside the UI slider range {}-{}", written.inference_steps, STEP_RANGE.start(), STEP_RANGE.end());
    }

    let local_model = args.repo_dir.join(&written.model_path).join(MANIFEST_FILE);
    if args.repo_dir.is_dir() && !local_model.is_file() {
        info!("No local weights at {}; the UI will fetch {} from the Hugging Face Hub", local_model.display(), written.model_path);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    if args.skip_clone {
        info!("Skipping repository clone");
    } else {
        check_git()?;
        clone_repo(&args.repo_url, &args.repo_dir)?;
    }

    let settings = write_settings(args)?;
    validate(args, &settings)
}

fn main() {
    let args = Args::parse();
    vibevoice_ui::init_logging(args.verbose);

    info!("🚀 Starting VibeVoice setup...");

    if let Err(e) = run(&args) {
        error!("❌ Setup failed: {:#}", e);
        std::process::exit(1);
    }

    info!("🎉 VibeVoice setup completed successfully!");
    info!("📋 Next steps:");
    info!("   1. Start the UI with 'vibevoice-ui --config {}'", args.config_out.display());
    info!("   2. Open http://localhost:7860 in a browser");
    info!("   3. Follow the usage guidelines and legal requirements");
}
