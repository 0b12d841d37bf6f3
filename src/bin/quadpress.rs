use clap::{Parser};
use tracing::{info};
use quadpress::{Quadtree};
use quadpress::io::{cli, load_image, save_image, save_animation};

fn main() -> quadpress::Result {
    let args = cli::Args::parse();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let out_dir = cli::output_dir(&args.output)?;
    let in_pixels = load_image(&args.source_file)?;
    info!(path = %args.source_file, width = in_pixels.width(), height = in_pixels.height(), "decoded");
    let tree = Quadtree::with_settings(&in_pixels, &args.settings())?;
    info!(
        nodes = tree.node_count(), leaves = tree.leaves().len(),
        depth = tree.observed_max_depth(), "built quadtree"
    );

    let out_path = cli::out_path(out_dir, "output.jpg")?;
    save_image(&tree.render_leaves(args.cells), &out_path)?;
    info!(path = %out_path, "saved image");

    if args.gif {
        let frames = tree.render_sequence(args.cells, args.gif_reverse);
        let gif_path = cli::out_path(out_dir, "output.gif")?;
        save_animation(&frames, &gif_path, &args.animation())?;
        info!(path = %gif_path, frames = frames.len(), "saved animation");
    }
    Ok(())
}
