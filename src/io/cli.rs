use std::path::{Path, PathBuf};
use clap::{Parser};

use crate::{Result, Settings, DETAIL_THRESHOLD};
use super::{AnimationOptions, Failure};

/// Returns `dir` if it names an existing directory.
pub fn output_dir(dir: &str) -> Result<&Path> {
    let path = Path::new(dir);
    if !path.is_dir() {
        Err(Failure("Output path should be an existing directory"))?
    }
    Ok(path)
}

/// Constructs the path of `file_name` inside `dir`.
pub fn out_path(dir: &Path, file_name: &str) -> Result<String> {
    let path: PathBuf = dir.join(file_name);
    Ok(path.to_str().ok_or(Failure("Invalid unicode"))?.to_owned())
}

// ----------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(about = "Compress an image by splitting it into flat-coloured quadtree cells.")]
#[command(author, version, long_about = None)]
pub struct Args {
    /// Input path.
    pub source_file: String,

    /// Output directory.
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// The maximum depth of the quadtree. Lower is coarser and faster.
    #[arg(short, long, default_value_t = 10)]
    pub rate: usize,

    /// Regions with at most this much colour detail are not split.
    #[arg(short, long, default_value_t = DETAIL_THRESHOLD)]
    pub threshold: f64,

    /// Outline every cell in the output.
    #[arg(short, long)]
    pub cells: bool,

    /// Also write an animation refining the image one level at a time.
    #[arg(short, long)]
    pub gif: bool,

    /// Run the animation from the finest level to the coarsest.
    #[arg(long)]
    pub gif_reverse: bool,

    /// How long each animation frame is shown, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub delay: u32,

    /// How many times the animation plays. `0` means forever.
    #[arg(long, default_value_t = 0)]
    pub loops: u16,

    /// Build independent subtrees in parallel.
    #[arg(short = 'j', long)]
    pub parallel: bool,
}

impl Args {
    /// The quadtree `Settings` selected by `self`.
    pub fn settings(&self) -> Settings {
        Settings {rate: self.rate, detail_threshold: self.threshold, parallel: self.parallel}
    }

    /// The `AnimationOptions` selected by `self`.
    pub fn animation(&self) -> AnimationOptions {
        AnimationOptions {delay_ms: self.delay, loops: self.loops}
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["quadpress", "in.png"]).unwrap();
        assert_eq!(args.source_file, "in.png");
        assert_eq!(args.output, ".");
        assert_eq!(args.settings(), Settings::default());
        assert_eq!(args.animation(), AnimationOptions::default());
        assert!(!args.cells && !args.gif && !args.gif_reverse);
    }

    #[test]
    fn flags() {
        let args = Args::try_parse_from([
            "quadpress", "-r", "4", "-t", "1.5", "-c", "-g", "--gif-reverse",
            "--delay", "250", "--loops", "3", "-j", "-o", "/tmp", "in.png",
        ]).unwrap();
        assert_eq!(args.settings(), Settings {rate: 4, detail_threshold: 1.5, parallel: true});
        assert_eq!(args.animation(), AnimationOptions {delay_ms: 250, loops: 3});
        assert!(args.cells && args.gif && args.gif_reverse);
        assert_eq!(args.output, "/tmp");
    }

    #[test]
    fn negative_rate_rejected() {
        assert!(Args::try_parse_from(["quadpress", "-r", "-1", "in.png"]).is_err());
    }

    #[test]
    fn output_must_be_directory() {
        let dir = std::env::temp_dir();
        let dir = dir.to_str().unwrap();
        assert!(output_dir(dir).is_ok());
        assert!(output_dir("/definitely/not/a/directory").is_err());
        let path = out_path(Path::new(dir), "output.jpg").unwrap();
        assert!(path.ends_with("output.jpg"));
    }
}
