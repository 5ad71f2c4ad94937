use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use thumbgrid_app::{GalleryWidget, NodeFields, WidgetSettings};
use thumbgrid_core::WidgetId;
use thumbgrid_events::SyncBus;
use thumbgrid_graph::{DrawList, Vec2};

mod script;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines script of sync events and user actions
    script: PathBuf,

    /// Widget settings file (defaults to the user config directory)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Include the draw commands of the final frame in the report
    #[arg(long)]
    draw: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    fields: &'a NodeFields,
    outputs: Vec<&'a str>,
    entries: usize,
    size: Vec2,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draw: Option<DrawList>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => WidgetSettings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => WidgetSettings::load(),
    };

    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let steps = script::parse(&source)?;

    let bus = SyncBus::new();
    let mut widget = GalleryWidget::new(WidgetId::new(), settings);
    widget.attach(&bus);
    widget.finalize_layout();

    tracing::info!("Running {} step(s) on widget {}", steps.len(), widget.id());
    script::run(&bus, &mut widget, &steps);

    let draw = args.draw.then(|| {
        let mut list = DrawList::new();
        widget.paint(&mut list);
        list
    });
    let report = Report {
        fields: widget.fields(),
        outputs: widget.ports().names(),
        entries: widget.state().store.len(),
        size: widget.size(),
        preview: widget.preview().map(|p| p.index.0),
        draw,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
