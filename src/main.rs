use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signgen_renderer::{
    Color, Configurable, Editor, FrameVariant, ProfileField, SessionSnapshot, TemplateVariant,
};

#[derive(Parser, Debug)]
#[command(name = "signgen", version, about = "Render an email signature to PNG")]
struct Cli {
    /// Session JSON to start from instead of the defaults
    #[arg(long)]
    session: Option<PathBuf>,

    /// Set a profile field, e.g. `--set name="Jane Doe"` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    sets: Vec<(ProfileField, String)>,

    #[arg(long, value_enum)]
    template: Option<TemplateVariant>,

    #[arg(long, value_enum)]
    frame: Option<FrameVariant>,

    /// Accent palette entry (0-7), applied to accent and frame color
    #[arg(long, value_name = "INDEX")]
    palette: Option<usize>,

    /// Custom accent color, applied to accent and frame color
    #[arg(long, value_name = "HEX")]
    accent: Option<Color>,

    #[arg(long, value_name = "HEX")]
    text_color: Option<Color>,

    /// Image file to use as the avatar
    #[arg(long, conflicts_with = "no_avatar")]
    avatar: Option<PathBuf>,

    /// Drop the avatar loaded from the session
    #[arg(long)]
    no_avatar: bool,

    /// Directory the PNG is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Also write the preview SVG next to the PNG
    #[arg(long)]
    svg: bool,

    /// Print the effective session JSON and exit
    #[arg(long)]
    dump_session: bool,
}

fn parse_assignment(raw: &str) -> Result<(ProfileField, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{}`", raw))?;
    let field = key.parse::<ProfileField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signgen_renderer=info,signgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "signgen failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut editor = Editor::new();

    if let Some(path) = &cli.session {
        let snapshot = SessionSnapshot::load(path)?;
        editor.apply_snapshot(&snapshot);
        tracing::debug!(path = %path.display(), "Loaded session");
    }
    apply_overrides(&mut editor, &cli)?;

    if cli.dump_session {
        println!("{}", editor.export_snapshot().to_json_pretty()?);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.svg {
        let preview = editor.preview();
        let path = svg_path(&cli.out, preview.file_name());
        std::fs::create_dir_all(&cli.out)?;
        std::fs::write(&path, preview.to_svg())?;
        tracing::info!(path = %path.display(), "Wrote preview SVG");
    }

    match editor.export(&cli.out) {
        Some(path) => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}

fn apply_overrides(editor: &mut Editor, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for (field, value) in &cli.sets {
        editor.set_field(*field, value.clone());
    }
    if let Some(template) = cli.template {
        editor.set_template(template);
    }
    if let Some(frame) = cli.frame {
        editor.set_frame(frame);
    }
    if let Some(index) = cli.palette {
        editor.pick_palette_color(index)?;
    }
    if let Some(color) = cli.accent {
        editor.pick_custom_color(color);
    }
    if let Some(color) = cli.text_color {
        editor.set_text_color(color);
    }
    if let Some(path) = &cli.avatar {
        let bytes = std::fs::read(path)?;
        editor.upload_avatar(&bytes)?;
    }
    if cli.no_avatar {
        editor.remove_avatar();
    }
    Ok(())
}

/// `<dir>/<stem>.svg` for a `<stem>.png` export name.
fn svg_path(dir: &Path, png_name: &str) -> PathBuf {
    dir.join(Path::new(png_name).with_extension("svg"))
}
