use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardscene", version)]
struct Cli {
    /// Log placement decisions (rejected attempts, dropped cards).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a full dataset into `output_dir`.
    Generate(GenerateArgs),
    /// Render a single scene as a PNG plus its label file.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Dataset config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Override the worker thread count from the config.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Dataset config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output PNG path; labels go next to it with a `.txt` extension.
    #[arg(long)]
    out: PathBuf,

    /// Scene index to render (same scene `generate` would write at this index).
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Outline every emitted box on the image.
    #[arg(long)]
    draw_boxes: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = cardscene::DatasetConfig::from_path(&args.config)?;
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    let stats = cardscene::render_dataset(&config)?;

    eprintln!(
        "wrote {} scenes ({} train / {} val / {} test), {} labels, {} cards dropped",
        stats.scenes,
        stats.train,
        stats.val,
        stats.test,
        stats.labels,
        stats.placement.cards_dropped
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let config = cardscene::DatasetConfig::from_path(&args.config)?;
    let sources = cardscene::DatasetSources::load(&config)?;
    let index = usize::try_from(args.seed).context("scene index does not fit in usize")?;
    let (split, mut out) = sources.render_index(&config, index)?;

    if args.draw_boxes {
        let side = f64::from(out.image.width());
        for line in &out.labels {
            let b = line.normalized().denormalized(side, "");
            draw_outline(&mut out.image, &b, [255, 0, 0, 255]);
        }
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    cardscene::write_png(&args.out, &out.image)?;
    let labels_path = args.out.with_extension("txt");
    cardscene::write_labels(&labels_path, &out.labels)?;

    eprintln!(
        "wrote {} ({} split, {} labels, {} of {} cards placed)",
        args.out.display(),
        split,
        out.labels.len(),
        out.stats.cards_placed,
        out.stats.cards_requested
    );
    Ok(())
}

fn draw_outline(img: &mut image::RgbaImage, b: &cardscene::BoundingBox, rgba: [u8; 4]) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let clamp_x = |v: f64| (v.floor().max(0.0) as u32).min(w - 1);
    let clamp_y = |v: f64| (v.floor().max(0.0) as u32).min(h - 1);
    let (x1, x2) = (clamp_x(b.x1), clamp_x(b.x2));
    let (y1, y2) = (clamp_y(b.y1), clamp_y(b.y2));
    for x in x1..=x2 {
        img.put_pixel(x, y1, image::Rgba(rgba));
        img.put_pixel(x, y2, image::Rgba(rgba));
    }
    for y in y1..=y2 {
        img.put_pixel(x1, y, image::Rgba(rgba));
        img.put_pixel(x2, y, image::Rgba(rgba));
    }
}
