//! JSON-lines scripts that drive a gallery headlessly.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use thumbgrid_app::GalleryWidget;
use thumbgrid_events::{SYNC_EVENT_NAME, SyncBus};
use thumbgrid_graph::{HitResult, Vec2};

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Backend push addressed to the widget.
    Sync { detail: Value },
    /// Arbitrary named event, broadcast on the bus.
    Event { name: String, detail: Value },
    Click { x: f32, y: f32 },
    DeleteAll,
    SetOutputCount { value: i64 },
    ApplyOutputCount,
    ClosePreview,
    Resize { width: f32, height: f32 },
}

/// Parse a script. Blank lines and lines starting with `#` are skipped.
pub fn parse(source: &str) -> Result<Vec<Step>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(number, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", number + 1))
        })
        .collect()
}

/// Run `steps` against `widget`, which must already be attached to `bus`.
pub fn run(bus: &SyncBus, widget: &mut GalleryWidget, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Sync { detail } => {
                bus.dispatch(SYNC_EVENT_NAME, Some(widget.id()), detail.clone());
                let applied = widget.poll_sync();
                tracing::debug!("Applied {} sync event(s)", applied);
            }
            Step::Event { name, detail } => {
                bus.dispatch(name, None, detail.clone());
                widget.poll_sync();
            }
            Step::Click { x, y } => {
                let hit = widget.on_pointer_down(Vec2::new(*x, *y));
                if hit == HitResult::None {
                    tracing::debug!("Click at ({}, {}) hit nothing", x, y);
                }
            }
            Step::DeleteAll => widget.mark_all_for_deletion(),
            Step::SetOutputCount { value } => widget.set_output_count(*value),
            Step::ApplyOutputCount => {
                widget.apply_output_count();
            }
            Step::ClosePreview => widget.close_preview(),
            Step::Resize { width, height } => {
                widget.resize(Vec2::new(*width, *height));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thumbgrid_app::WidgetSettings;
    use thumbgrid_core::WidgetId;

    fn widget(bus: &SyncBus) -> GalleryWidget {
        let settings = WidgetSettings {
            decode_in_background: false,
            ..WidgetSettings::default()
        };
        let mut widget = GalleryWidget::new(WidgetId::new(), settings);
        widget.attach(bus);
        widget.finalize_layout();
        widget
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let steps = parse(
            r#"
# seed the gallery
{"step": "sync", "detail": {"thumbs": [{"data": "a"}]}}

{"step": "delete_all"}
{"step": "set_output_count", "value": 4}
"#,
        )
        .unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1], Step::DeleteAll);
        assert_eq!(steps[2], Step::SetOutputCount { value: 4 });
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse("{\"step\": \"delete_all\"}\n{\"step\": \"jump\"}").unwrap_err();
        assert_eq!(err.to_string(), "line 2");
    }

    #[test]
    fn test_run_drives_widget() {
        let bus = SyncBus::new();
        let mut widget = widget(&bus);
        let steps = parse(
            r#"
{"step": "sync", "detail": {"mode": "full", "thumbs": [{"data": "a"}, {"data": "b"}], "selected": [0]}}
{"step": "sync", "detail": {"mode": "delta", "adds": [{"data": "c"}], "removes": [0], "selected": [1]}}
{"step": "click", "x": 16, "y": 146}
{"step": "set_output_count", "value": 3}
{"step": "apply_output_count"}
"#,
        )
        .unwrap();
        run(&bus, &mut widget, &steps);

        assert_eq!(widget.state().store.len(), 2);
        // The click lands on slot 0, the newest entry, and deselects it.
        assert_eq!(widget.fields().selected_indices, "");
        assert_eq!(widget.ports().names(), vec!["image_1", "image_2", "image_3"]);
    }

    #[test]
    fn test_foreign_events_are_ignored() {
        let bus = SyncBus::new();
        let mut widget = widget(&bus);
        run(
            &bus,
            &mut widget,
            &[Step::Event {
                name: "graph.executed".into(),
                detail: serde_json::json!({"thumbs": [{"data": "a"}]}),
            }],
        );
        assert!(widget.state().store.is_empty());
    }
}
