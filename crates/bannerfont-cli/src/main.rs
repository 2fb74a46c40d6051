use anyhow::{Context, Result};
use bannerfont::{Direction, FontRepository, Justify, RenderOptions};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bannerfont", about = "Render text as FIGlet banners")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render text with a font
    Render {
        /// Font name or path to a .flf/.tlf file
        #[arg(short, long)]
        font: String,
        #[arg(short, long, default_value = "80")]
        width: usize,
        #[arg(short, long, value_enum, default_value = "auto")]
        justify: JustifyArg,
        #[arg(short, long, value_enum, default_value = "auto")]
        direction: DirectionArg,
        /// Mirror the banner horizontally
        #[arg(long)]
        reverse: bool,
        /// Turn the banner upside down
        #[arg(long)]
        flip: bool,
        /// Remove blank rows around the banner
        #[arg(long)]
        strip: bool,
        /// Surround the banner with exactly one blank row
        #[arg(long, conflicts_with = "strip")]
        normalize: bool,
        /// Extra font directory, searched before BANNERFONT_PATH
        #[arg(long = "font-dir")]
        font_dirs: Vec<PathBuf>,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List the fonts found in the search path
    List {
        #[arg(long = "font-dir")]
        font_dirs: Vec<PathBuf>,
    },
    /// Show the description stored in a font
    Info {
        #[arg(short, long)]
        font: String,
        /// Only the first line
        #[arg(long)]
        short: bool,
        #[arg(long = "font-dir")]
        font_dirs: Vec<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum JustifyArg {
    Auto,
    Left,
    Center,
    Right,
}

impl From<JustifyArg> for Justify {
    fn from(arg: JustifyArg) -> Self {
        match arg {
            JustifyArg::Auto => Justify::Auto,
            JustifyArg::Left => Justify::Left,
            JustifyArg::Center => Justify::Center,
            JustifyArg::Right => Justify::Right,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum DirectionArg {
    Auto,
    LeftToRight,
    RightToLeft,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Auto => Direction::Auto,
            DirectionArg::LeftToRight => Direction::LeftToRight,
            DirectionArg::RightToLeft => Direction::RightToLeft,
        }
    }
}

/// `--font-dir` entries come first, then `BANNERFONT_PATH`.
fn repository(font_dirs: Vec<PathBuf>) -> FontRepository {
    let env = FontRepository::from_env();
    FontRepository::new(font_dirs.into_iter().chain(env.search_paths().iter().cloned()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Cmd::Render {
            font,
            width,
            justify,
            direction,
            reverse,
            flip,
            strip,
            normalize,
            font_dirs,
            text,
        } => {
            let repo = repository(font_dirs);
            let font = repo
                .load(&font)
                .with_context(|| format!("cannot load font {font}"))?;
            let options = RenderOptions::default()
                .with_width(width)
                .with_justify(justify.into())
                .with_direction(direction.into());
            let mut banner = font.render(&text.join(" "), &options)?;
            if reverse {
                banner = banner.reverse();
            }
            if flip {
                banner = banner.flip();
            }
            if strip {
                banner = banner.strip_surrounding_blank_lines();
            }
            if normalize {
                banner = banner.normalize_surrounding_blank_lines();
            }
            print!("{banner}");
            if strip {
                println!();
            }
        }
        Cmd::List { font_dirs } => {
            let repo = repository(font_dirs);
            let names = repo.list();
            if names.is_empty() {
                log::warn!("no fonts found in {:?}", repo.search_paths());
            }
            for name in names {
                println!("{name}");
            }
        }
        Cmd::Info {
            font,
            short,
            font_dirs,
        } => {
            let repo = repository(font_dirs);
            println!("{}", repo.info(&font, short)?);
        }
    }
    Ok(())
}
