use crate::api::{LatticeClient, ReviewSource};
use crate::cli::ExportArgs;
use crate::config::Config;
use crate::output::write_document;
use crate::publish::{self, tool_available, Drive, UploadFormat};
use crate::report::build_document;
use crate::tui::{print_completed, Tui};
use crate::workflow::{fetch_reviews, Outcome};
use anyhow::Context;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// What an interactive export produced
#[derive(Debug, Default)]
struct ExportSummary {
    path: PathBuf,
    link: Option<String>,
    /// Warnings held back until the terminal is restored
    notices: Vec<String>,
    /// Conversion or upload error; reported after the written path
    publish_error: Option<anyhow::Error>,
}

pub async fn execute(args: ExportArgs) -> anyhow::Result<()> {
    let config_path = Config::resolve_path(args.config.as_deref())?;
    info!("Loading config from {:?}", config_path);
    let config = Config::load(&config_path)?;

    let folder_id = non_blank(args.rclone_folder_id.as_deref());
    let drive = match folder_id {
        Some(folder_id) => {
            let remote = config.remote_name(args.rclone_remote.as_deref());
            Some(Drive::new(remote, folder_id).context("install rclone from https://rclone.org")?)
        }
        None => None,
    };

    let source: Arc<dyn ReviewSource> = Arc::new(LatticeClient::from_config(&config)?);

    let mut tui = Tui::enter()?;
    let result = run_interactive(&mut tui, source, &args, &config, drive).await;
    let completed = tui.finish()?;
    print_completed(&completed);

    let Some(summary) = result? else {
        return Ok(());
    };

    for notice in &summary.notices {
        eprintln!("{}", notice);
    }
    report_summary(summary, &mut io::stdout())
}

/// Print where the report went, then surface any publish failure
fn report_summary(summary: ExportSummary, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(out, "Wrote {}", summary.path.display())?;
    if let Some(link) = &summary.link {
        writeln!(out, "Uploaded {}", link)?;
    }

    match summary.publish_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn run_interactive(
    tui: &mut Tui,
    source: Arc<dyn ReviewSource>,
    args: &ExportArgs,
    config: &Config,
    drive: Option<Drive>,
) -> anyhow::Result<Option<ExportSummary>> {
    let selection = match tui.run_workflow(Arc::clone(&source)).await? {
        Outcome::Complete(selection) => selection,
        Outcome::Aborted => {
            debug!("selection aborted");
            return Ok(None);
        }
        Outcome::NoSelection(stage) => {
            debug!("nothing selected at {:?}", stage);
            return Ok(None);
        }
    };

    let limit = args.review_limit.unwrap_or(config.review_limit);
    let records = {
        let source = Arc::clone(&source);
        let cycle = selection.cycle.clone();
        tui.run_step("Fetching reviews", async move {
            fetch_reviews(source.as_ref(), &cycle, limit)
                .await
                .map_err(anyhow::Error::from)
        })
        .await?
    };

    let document = {
        let source = Arc::clone(&source);
        let subject = selection.subject.name.clone();
        let cycle = selection.cycle.name().to_string();
        let censor = args.censor;
        tui.run_step("Building report", async move {
            Ok::<_, anyhow::Error>(
                build_document(source.as_ref(), &subject, &cycle, records, censor).await,
            )
        })
        .await?
    };

    let mut summary = ExportSummary {
        path: write_document(&args.output_dir, &document)?,
        ..ExportSummary::default()
    };

    match drive {
        Some(drive) if tool_available("pandoc") => {
            let format = UploadFormat::parse(&args.upload_format);
            match upload(tui, &drive, &summary.path, &document.title, format, args).await {
                Ok(link) => summary.link = link,
                Err(e) => {
                    summary.publish_error = Some(e);
                    return Ok(Some(summary));
                }
            }

            if args.copy_templates {
                copy_templates(tui, &drive, args, config, &mut summary.notices).await;
            }
        }
        Some(drive) => {
            summary.notices.push(
                "pandoc not found; skipping Drive upload via rclone. Install pandoc to enable document export."
                    .to_string(),
            );
            if args.copy_templates {
                copy_templates(tui, &drive, args, config, &mut summary.notices).await;
            }
        }
        None if args.copy_templates => {
            summary
                .notices
                .push("--copy-templates requires --rclone-folder-id to be set".to_string());
        }
        None => {}
    }

    Ok(Some(summary))
}

async fn upload(
    tui: &mut Tui,
    drive: &Drive,
    markdown: &std::path::Path,
    title: &str,
    format: UploadFormat,
    args: &ExportArgs,
) -> anyhow::Result<Option<String>> {
    let scratch = tempfile::tempdir()?;

    let converted = {
        let markdown = markdown.to_path_buf();
        let dir = scratch.path().to_path_buf();
        let title = title.to_string();
        let engine = args.pdf_engine.clone();
        let label = format!("Converting to {}", format.extension().to_uppercase());
        tui.run_step(&label, async move {
            publish::convert(&markdown, &dir, &title, format, engine.as_deref())
                .await
                .context("pandoc conversion failed")
        })
        .await?
    };

    let drive = drive.clone();
    let dest = format.destination(title);
    let label = format!("Uploading to {}:", drive.remote());
    tui.run_step(&label, async move {
        drive
            .upload(&converted, &dest, format.import_format())
            .await
            .context("rclone upload failed")
    })
    .await
}

/// Template failures are reported, never fatal
async fn copy_templates(
    tui: &mut Tui,
    drive: &Drive,
    args: &ExportArgs,
    config: &Config,
    notices: &mut Vec<String>,
) {
    let templates = publish::templates(
        non_blank(args.template_hub_id.as_deref()).or(config.template_hub_id.as_deref()),
        non_blank(args.template_cover_id.as_deref()).or(config.template_cover_id.as_deref()),
        non_blank(args.template_review_id.as_deref()).or(config.template_review_id.as_deref()),
    );
    if templates.is_empty() {
        notices.push("no template ids configured; nothing to copy".to_string());
    }

    for template in templates {
        let name = template.name;
        let drive = drive.clone();
        let label = format!("Copying template: {}", name);
        let result = tui
            .run_step(&label, async move {
                drive
                    .copy_by_id(&template.file_id)
                    .await
                    .map_err(anyhow::Error::from)
            })
            .await;
        if let Err(e) = result {
            notices.push(format!("failed to copy template {}: {:#}", name, e));
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
