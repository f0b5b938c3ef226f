use clap::{Parser, Subcommand};
use picpress::{config, imaging, naming, output, process, upload};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "picpress")]
#[command(about = "Prepare images for GitHub-hosted delivery")]
#[command(long_about = "\
Prepare images for GitHub-hosted delivery

Each input is EXIF-uprighted, capped to a maximum width, optionally
watermarked, recompressed, renamed to an SEO-safe slug, and staged into a
git-ready folder. Every staged file gets its raw.githubusercontent.com and
jsDelivr CDN URLs derived up front:

  photos/Ảnh Bán Hàng.JPG
    └─> staging/images/anh-ban-hang.jpg
        https://raw.githubusercontent.com/user/repo/main/images/anh-ban-hang.jpg
        https://cdn.jsdelivr.net/gh/user/repo/images/anh-ban-hang.jpg

Destination folders can rotate by date ({year}/{month}) or by a custom
segment ({custom}); see the [destination] section of the config.

Run 'picpress gen-config' to generate a documented picpress.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: picpress.toml in the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Staging directory for prepared files
    #[arg(long, default_value = "staging", global = true)]
    dest: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prepare images and stage them under the destination folder
    Process {
        /// Image files or directories to prepare
        #[arg(required = true, value_name = "PATH")]
        inputs: Vec<PathBuf>,

        /// Write a JSON report of staged files and their URLs
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Verify that inputs decode as images, without staging anything
    Check {
        /// Image files or directories to verify
        #[arg(required = true, value_name = "PATH")]
        inputs: Vec<PathBuf>,
    },
    /// Print the SEO slug for each given name
    Slug {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
    /// Print a stock picpress.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Process { inputs, report } => {
            let config = config::load_config(cli.config.as_deref())?;
            let repo = config.destination.require_repo()?.to_string();
            let uploader = upload::DirUploader::new(&cli.dest, &repo, &config.destination.branch);

            let result = process::run(&config, &inputs, &uploader, |event| {
                output::print_process_event(&event);
            })?;
            output::print_run_summary(&result);

            if let Some(path) = report {
                std::fs::write(&path, result.to_json()?)?;
                println!("Report: {}", path.display());
            }
        }
        Command::Check { inputs } => {
            let files = process::collect_inputs(&inputs)?;
            let mut results = Vec::new();
            for path in files {
                let ok = std::fs::read(&path)
                    .map(|bytes| imaging::is_valid_image(&bytes))
                    .unwrap_or(false);
                results.push((path, ok));
            }
            output::print_check_output(&results);

            let rejected = results.iter().filter(|(_, ok)| !ok).count();
            if rejected > 0 {
                return Err(format!("{rejected} input(s) are not valid images").into());
            }
        }
        Command::Slug { names } => {
            for name in &names {
                println!("{}", naming::slug_or_fallback(name));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
