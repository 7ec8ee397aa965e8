//! docflow CLI: paginate a stored document and report page utilization.
//! The main interface is the library and its WASM bindings.

use anyhow::{bail, Context, Result};
use docflow::{FlowDocument, FlowEngine, LayoutConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: docflow <document.json> [--config <layout.json>]";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_PKG_NAME")))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut document_path = None;
    let mut config_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().context("--config needs a path")?);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if document_path.is_none() => document_path = Some(arg),
            other => bail!("unexpected argument `{other}`\n{USAGE}"),
        }
    }

    let Some(document_path) = document_path else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = match config_path {
        Some(path) => LayoutConfig::from_path(&path)
            .with_context(|| format!("failed to load layout config from {path}"))?,
        None => LayoutConfig::default(),
    };
    let engine = FlowEngine::new(config).context("invalid layout config")?;

    let document = FlowDocument::from_path(&document_path)
        .with_context(|| format!("failed to load document from {document_path}"))?;
    info!(
        path = %document_path,
        blocks = document.blocks.len(),
        "loaded document"
    );

    let usable_height = engine.usable_height(document.template);
    let stats = engine.stats(&document.blocks, document.template);

    println!(
        "{} pages, {} blocks, usable height {}px",
        stats.total_pages, stats.total_blocks, usable_height
    );
    for (index, page) in stats.per_page.iter().enumerate() {
        println!(
            "page {:>3}: {:>3} blocks  {:>5}px used  {:>5}px left  {:>6.1}%",
            index + 1,
            page.block_count,
            page.used_height,
            page.remaining_height,
            page.utilization_percent
        );
    }
    println!("average utilization {:.1}%", stats.average_utilization);

    Ok(())
}
