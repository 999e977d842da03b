//! PDF Quick Text CLI tool
//!
//! A command-line tool for placing text on existing PDF pages.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use pdf_quicktext::layout::DPI;
use pdf_quicktext::{StandardFont, TextSession, Unit, DEFAULT_FONT, DEFAULT_FONT_SIZE};

/// PDF Quick Text - Place text on existing PDF pages
#[derive(Parser)]
#[command(name = "pdf-quicktext")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Write a name 1 inch from the left and 2 inches from the top of page 1
    pdf-quicktext add form.pdf -o filled.pdf --text \"Jane Doe\" --left 1 --top 2

    # Use centimeters, a bold font and a larger size on the second page
    pdf-quicktext add form.pdf -o filled.pdf --page 1 --unit cm --left 3 --top 4.5 --font helveticabold --size 14 --text \"Approved\"

    # Show the media box of the first page
    pdf-quicktext dims form.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Unit used for --left and --top
#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    /// Inches
    In,
    /// Centimeters
    Cm,
}

impl From<UnitArg> for Unit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::In => Unit::Inches,
            UnitArg::Cm => Unit::Centimeters,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add a line of text to a page
    Add {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Page number, starting at 0
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Text to place
        #[arg(long)]
        text: String,

        /// Distance from the left edge of the page
        #[arg(long, allow_hyphen_values = true)]
        left: f64,

        /// Distance from the top edge of the page
        #[arg(long, allow_hyphen_values = true)]
        top: f64,

        /// Unit of --left and --top
        #[arg(long, value_enum, default_value_t = UnitArg::In)]
        unit: UnitArg,

        /// Font size in points
        #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
        size: f32,

        /// Standard font key (see the `fonts` command)
        #[arg(long, default_value = DEFAULT_FONT)]
        font: String,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show the media box of a page
    Dims {
        /// PDF file to inspect
        input: PathBuf,

        /// Page number, starting at 0
        #[arg(long, default_value_t = 0)]
        page: usize,
    },

    /// List the standard font keys
    Fonts,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add { input, output, page, text, left, top, unit, size, font, open } => {
            cmd_add(&input, &output, page, &text, left, top, unit.into(), size, &font, open)
        }
        Commands::Dims { input, page } => cmd_dims(&input, page),
        Commands::Fonts => {
            cmd_fonts();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Open a file with the system default application
fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Place one line of text and save the result
#[allow(clippy::too_many_arguments)]
fn cmd_add(
    input: &Path,
    output: &Path,
    page: usize,
    text: &str,
    left: f64,
    top: f64,
    unit: Unit,
    size: f32,
    font: &str,
    open: bool,
) -> Result<()> {
    let mut session = TextSession::load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    eprintln!("Adding text to page {} of {}...", page, input.display());

    session
        .edit_page(page, |s| s.add_text_in(text, left, top, unit, size, font))
        .with_context(|| format!("Failed to add text to page {}", page))?;

    session
        .save(output)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    eprintln!("Output: {}", output.display());

    if open {
        open_file(output)?;
    }

    Ok(())
}

/// Print the media box of a page
fn cmd_dims(input: &Path, page: usize) -> Result<()> {
    let mut session = TextSession::load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let media_box = session.edit_page(page, |s| s.page_dimensions())?;

    println!("File: {}", input.display());
    println!("Pages: {}", session.page_count());
    println!(
        "MediaBox: [{} {} {} {}]",
        media_box.x_left, media_box.y_bottom, media_box.x_right, media_box.y_top
    );
    println!(
        "Size: {} x {} pt ({:.2} x {:.2} in)",
        media_box.width(),
        media_box.height(),
        media_box.width() / DPI,
        media_box.height() / DPI
    );

    Ok(())
}

/// Print every standard font key with its PostScript name
fn cmd_fonts() {
    for font in StandardFont::ALL {
        println!("{:<22} {}", font.key(), font.base_font());
    }
}
