//! Markdown conversion through pandoc

use super::tools::{require_tool, run_tool, tool_available};
use super::UploadFormat;
use crate::error::PublishError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Engines tried in order when no usable engine was requested
const PDF_ENGINES: [&str; 5] = ["tectonic", "xelatex", "lualatex", "pdflatex", "wkhtmltopdf"];
const LATEX_ENGINES: [&str; 4] = ["tectonic", "xelatex", "lualatex", "pdflatex"];

/// Environment variable overriding the PDF body font
pub const SANS_FONT_ENV: &str = "TESS_PDF_SANS_FONT";

/// Convert `markdown` into `{out_dir}/{title}.{ext}`
pub async fn convert(
    markdown: &Path,
    out_dir: &Path,
    title: &str,
    format: UploadFormat,
    pdf_engine: Option<&str>,
) -> Result<PathBuf, PublishError> {
    require_tool("pandoc")?;

    let out = out_dir.join(format!("{}.{}", local_name(title), format.extension()));
    match format {
        UploadFormat::Docx => {
            run_tool("pandoc", "docx", &docx_args(markdown, &out)).await?;
        }
        UploadFormat::Pdf => {
            let engine = pick_pdf_engine(pdf_engine, tool_available);
            debug!("pdf engine: {:?}", engine);

            let font = engine.filter(|e| is_latex(e)).map(|_| sans_font());
            let header = match &font {
                Some(font) => {
                    let path = out_dir.join("tess-pandoc-header.tex");
                    tokio::fs::write(&path, font_header(font)).await?;
                    Some(path)
                }
                None => None,
            };

            let args = pdf_args(markdown, &out, engine, font.as_deref(), header.as_deref());
            run_tool("pandoc", "pdf", &args).await?;
        }
    }

    Ok(out)
}

pub fn docx_args(markdown: &Path, out: &Path) -> Vec<String> {
    vec![
        "-f".to_string(),
        "gfm".to_string(),
        "-t".to_string(),
        "docx".to_string(),
        "-o".to_string(),
        out.display().to_string(),
        markdown.display().to_string(),
    ]
}

pub fn pdf_args(
    markdown: &Path,
    out: &Path,
    engine: Option<&str>,
    font: Option<&str>,
    header: Option<&Path>,
) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        "gfm".to_string(),
        "-t".to_string(),
        "pdf".to_string(),
        "-o".to_string(),
        out.display().to_string(),
        markdown.display().to_string(),
    ];

    if let Some(engine) = engine {
        args.push(format!("--pdf-engine={}", engine));
    }

    if let Some(font) = font {
        for var in ["mainfont", "sansfont"] {
            args.push("-V".to_string());
            args.push(format!("{}={}", var, font));
        }
        args.push("-V".to_string());
        args.push("familydefault=sf".to_string());
    }

    if let Some(header) = header {
        args.push("-H".to_string());
        args.push(header.display().to_string());
    }

    args
}

/// The requested engine if usable, else the first available default
pub fn pick_pdf_engine<'a>(
    requested: Option<&'a str>,
    available: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    requested
        .map(str::trim)
        .filter(|e| !e.is_empty() && available(*e))
        .or_else(|| PDF_ENGINES.into_iter().find(|e| available(*e)))
}

fn is_latex(engine: &str) -> bool {
    LATEX_ENGINES.contains(&engine)
}

pub fn sans_font() -> String {
    std::env::var(SANS_FONT_ENV)
        .ok()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| default_sans_font().to_string())
}

fn default_sans_font() -> &'static str {
    if cfg!(target_os = "macos") {
        "Helvetica Neue"
    } else if cfg!(target_os = "windows") {
        "Arial"
    } else {
        "Noto Sans"
    }
}

pub fn font_header(font: &str) -> String {
    format!(
        "\\usepackage{{fontspec}}\n\\setmainfont{{{font}}}\n\\setsansfont{{{font}}}\n\\renewcommand{{\\familydefault}}{{\\sfdefault}}\n"
    )
}

/// Title made safe to use as a local file name
fn local_name(title: &str) -> String {
    title.replace(['/', '\\'], "-")
}
