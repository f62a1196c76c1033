use std::{
    fs::File,
    io::{BufReader, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "umbra", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the CSS box-shadow value for a parameter set.
    Stack(StackArgs),
    /// Print the structured layer list or DTCG shadow token value as JSON.
    Layers(LayersArgs),
    /// Read a design-token document and emit a :root block of shadow
    /// custom properties.
    Vars(VarsArgs),
}

#[derive(Parser, Debug)]
struct StackArgs {
    /// Input ShadowParams JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct LayersArgs {
    /// Input ShadowParams JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Emit DTCG shadow token entries instead of raw layers.
    #[arg(long)]
    dtcg: bool,

    /// Base shadow color (hex) for --dtcg output.
    #[arg(long, default_value = "#000000")]
    color: String,

    /// Accent shadow color (hex) for --dtcg output.
    #[arg(long)]
    accent: Option<String>,

    /// Color space for --dtcg output.
    #[arg(long, value_enum, default_value_t = FormatChoice::Hex)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct VarsArgs {
    /// Input design-token document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output CSS path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Hex,
    Rgb,
    Lch,
    Oklch,
}

impl From<FormatChoice> for umbra::ColorFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Hex => Self::Hex,
            FormatChoice::Rgb => Self::Rgb,
            FormatChoice::Lch => Self::Lch,
            FormatChoice::Oklch => Self::Oklch,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Stack(args) => cmd_stack(args),
        Command::Layers(args) => cmd_layers(args),
        Command::Vars(args) => cmd_vars(args),
    }
}

fn read_params_json(path: &Path) -> anyhow::Result<umbra::ShadowParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: umbra::ShadowParams =
        serde_json::from_reader(r).with_context(|| "parse params JSON")?;
    Ok(params)
}

fn cmd_stack(args: StackArgs) -> anyhow::Result<()> {
    let params = read_params_json(&args.in_path)?;
    println!("{}", umbra::build_shadow_stack(&params));
    Ok(())
}

fn cmd_layers(args: LayersArgs) -> anyhow::Result<()> {
    let params = read_params_json(&args.in_path)?;
    let layers = umbra::build_shadow_layers(&params);

    let json = if args.dtcg {
        let value = umbra::dtcg_shadow_value(
            &layers,
            &args.color,
            args.accent.as_deref(),
            args.format.into(),
        );
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string_pretty(&layers)?
    };

    println!("{json}");
    Ok(())
}

fn cmd_vars(args: VarsArgs) -> anyhow::Result<()> {
    let mut raw = String::new();
    File::open(&args.in_path)
        .with_context(|| format!("open token document '{}'", args.in_path.display()))?
        .read_to_string(&mut raw)
        .with_context(|| "read token document")?;

    let doc = umbra::parse_token_document(&raw)?;
    let mut engine = umbra::ShadowEngine::new();
    let lines = umbra::build_shadow_css_vars(&mut engine, &doc);

    let css = format!(":root {{\n{}\n}}\n", lines.join("\n"));

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, css)
                .with_context(|| format!("write css '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => print!("{css}"),
    }

    Ok(())
}
