use std::env;
use std::path::PathBuf;

use clap::Parser;
use vitae::{load_resume, ExportError, Exporter, PageSize};

/// Render a resume record to a paginated PDF.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the resume JSON record
    resume: PathBuf,

    /// Output PDF path
    output: PathBuf,

    /// Theme name from the fixed registry
    #[arg(long, default_value = "minimalist")]
    theme: String,

    /// Page format: a4 or letter
    #[arg(long = "page-size", default_value = "a4")]
    page_size: String,

    /// Font family override for bundled assets
    #[arg(long)]
    font: Option<String>,

    /// Skip the remote font fetch step
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Clear the on-disk font cache before rendering
    #[arg(long, default_value_t = false)]
    clear_font_cache: bool,
}

fn main() -> Result<(), ExportError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "vitae=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let page_size = PageSize::from_name(&args.page_size)
        .ok_or_else(|| ExportError::UnknownPageSize(args.page_size.clone()))?;

    let mut builder = Exporter::builder().theme(args.theme.as_str()).page_size(page_size);
    if let Some(font) = &args.font {
        builder = builder.font_family(font.as_str());
    }
    if args.offline {
        builder = builder.offline();
    }
    let exporter = builder.build()?;

    if args.clear_font_cache {
        exporter.clear_font_cache()?;
    }

    let resume = load_resume(&args.resume)?;
    exporter.export_to_file(&resume, &args.output)?;

    println!("Wrote {}", args.output.display());
    Ok(())
}
