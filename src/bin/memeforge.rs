use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "memeforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate an image and write the result as a PNG.
    Render(RenderArgs),
    /// Write the default scene as JSON (a starting point for `render --scene`).
    Scene(SceneArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Base image (PNG, JPEG, GIF, WebP or BMP).
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path. A directory receives `meme.png`.
    #[arg(long)]
    out: PathBuf,

    /// Scene JSON applied before the individual flags below.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Editor options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Top caption.
    #[arg(long)]
    top: Option<String>,

    /// Bottom caption.
    #[arg(long)]
    bottom: Option<String>,

    /// Font size in logical units (10-100).
    #[arg(long, allow_negative_numbers = true)]
    font_size: Option<i64>,

    /// Caption color as `#rrggbb`.
    #[arg(long)]
    color: Option<memeforge::Rgb8>,

    /// Font family (Arial, Impact, "Comic Sans MS", "Courier New").
    #[arg(long)]
    font: Option<memeforge::FontFamily>,

    /// Top caption baseline in logical units (0-400).
    #[arg(long, allow_negative_numbers = true)]
    top_y: Option<i64>,

    /// Bottom caption baseline in logical units (0-400).
    #[arg(long, allow_negative_numbers = true)]
    bottom_y: Option<i64>,

    /// Filter: none, grayscale, sepia, invert, blur, brightness, contrast.
    #[arg(long)]
    filter: Option<memeforge::FilterKind>,

    /// Filter intensity in percent (0-200).
    #[arg(long, allow_negative_numbers = true)]
    intensity: Option<i64>,

    /// Emoji marker as `GLYPH@X,Y` in logical units, or just `GLYPH` for a random spot.
    #[arg(long = "emoji")]
    emoji: Vec<String>,

    /// Skip loading system fonts.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Extra font directory (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Scene(args) => cmd_scene(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => memeforge::EditorOpts::from_path(path)?,
        None => memeforge::EditorOpts::default(),
    };
    if args.no_system_fonts {
        opts.compositor.load_system_fonts = false;
    }
    opts.compositor.font_dirs.extend(args.font_dirs.iter().cloned());

    let mut editor = memeforge::Editor::new(opts)?;

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    editor
        .load_image_blocking(bytes)
        .with_context(|| format!("load image '{}'", args.image.display()))?;

    if let Some(path) = &args.scene {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        editor.apply_scene(memeforge::SceneState::from_json(&json)?);
    }

    if let Some(text) = args.top {
        editor.set_top_text(text);
    }
    if let Some(text) = args.bottom {
        editor.set_bottom_text(text);
    }
    if let Some(size) = args.font_size {
        editor.set_font_size(size);
    }
    if let Some(color) = args.color {
        editor.set_text_color(color);
    }
    if let Some(font) = args.font {
        editor.set_font_family(font);
    }
    if let Some(y) = args.top_y {
        editor.set_top_text_y(y);
    }
    if let Some(y) = args.bottom_y {
        editor.set_bottom_text_y(y);
    }
    if let Some(filter) = args.filter {
        editor.set_filter_kind(filter);
    }
    if let Some(pct) = args.intensity {
        editor.set_filter_intensity(pct);
    }
    for raw in &args.emoji {
        match parse_emoji(raw)? {
            (glyph, Some(p)) => editor.add_emoji_at(glyph, p),
            (glyph, None) => editor.add_emoji(glyph),
        };
    }

    let exported = editor.export_png()?;
    let out = output_path(&args.out, &exported.file_name);
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &exported.bytes)
        .with_context(|| format!("write png '{}'", out.display()))?;

    let size = editor.surface_size();
    eprintln!("wrote {} ({}x{})", out.display(), size.width, size.height);
    Ok(())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&memeforge::SceneState::default())
        .context("serialize default scene")?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, json)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn output_path(out: &Path, file_name: &str) -> PathBuf {
    if out.is_dir() {
        out.join(file_name)
    } else {
        out.to_path_buf()
    }
}

fn parse_emoji(raw: &str) -> anyhow::Result<(String, Option<memeforge::LogicalPoint>)> {
    let Some((glyph, pos)) = raw.rsplit_once('@') else {
        return Ok((raw.to_string(), None));
    };
    let (x, y) = pos
        .split_once(',')
        .with_context(|| format!("emoji position '{pos}' must be X,Y"))?;
    let x: f64 = x
        .trim()
        .parse()
        .with_context(|| format!("invalid emoji x '{x}'"))?;
    let y: f64 = y
        .trim()
        .parse()
        .with_context(|| format!("invalid emoji y '{y}'"))?;
    Ok((glyph.to_string(), Some(memeforge::LogicalPoint::new(x, y))))
}
