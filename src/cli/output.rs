//! Terminal output
//!
//! `TextRenderer` is the command line stand-in for the graph widget: each
//! render writes one graph to the wrapped writer in the chosen format. The
//! table helpers print the dashboard's list views.

use crate::graph::{RenderedGraph, ResourceGraph, to_dot};
use crate::models::{DebugPayload, EventRecord, ImageRecord, PodDetails, PodHealth, age_since};
use crate::panel::{GraphRenderer, RenderError};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::ValueEnum;
use std::io::Write;

/// How a graph is written to the terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Nodes grouped by rank, then the edge list
    #[default]
    Tree,
    /// Widget dataset and options as JSON
    Json,
    /// Graphviz source
    Dot,
}

/// Writes each rendered graph to `out`
pub struct TextRenderer<W: Write> {
    out: W,
    format: GraphFormat,
    quiet: bool,
    next_view: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, format: GraphFormat) -> Self {
        Self {
            out,
            format,
            quiet: false,
            next_view: 0,
        }
    }

    /// While quiet, renders hand out handles without writing anything
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_tree(&mut self, graph: &ResourceGraph) -> std::io::Result<()> {
        if graph.is_empty() {
            writeln!(self.out, "No related resources found")?;
            return Ok(());
        }

        for (rank, nodes) in graph.levels().iter().enumerate() {
            writeln!(self.out, "Level {}:", rank)?;
            for node in nodes {
                writeln!(self.out, "  ● {} [{}] {}", node.label, node.kind, node.color)?;
            }
        }

        if graph.edge_count() > 0 {
            writeln!(self.out, "Edges:")?;
            for edge in graph.edges() {
                writeln!(self.out, "  {} → {}", edge.from, edge.to)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> GraphRenderer for TextRenderer<W> {
    type Handle = usize;

    fn render(
        &mut self,
        graph: &ResourceGraph,
        rendered: &RenderedGraph,
    ) -> Result<Self::Handle, RenderError> {
        let view = self.next_view;
        self.next_view += 1;
        if self.quiet {
            return Ok(view);
        }

        match self.format {
            GraphFormat::Tree => self.write_tree(graph)?,
            GraphFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, rendered)
                    .map_err(|e| RenderError::Widget(e.to_string()))?;
                writeln!(self.out)?;
            }
            GraphFormat::Dot => self.out.write_all(to_dot(graph).as_bytes())?,
        }
        self.out.flush()?;
        Ok(view)
    }

    fn destroy(&mut self, handle: Self::Handle) {
        tracing::trace!("Discarding text view {}", handle);
    }
}

/// Print rows under headers with each column padded to its widest cell
pub fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> std::io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_row(out, &header_cells, &widths)?;
    for row in rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(
    out: &mut W,
    cells: &[String],
    widths: &[usize],
) -> std::io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

/// Details tab: every payload field except type and name
pub fn write_details<W: Write>(out: &mut W, payload: &DebugPayload) -> std::io::Result<()> {
    let rows = payload.detail_rows();
    if rows.is_empty() {
        return writeln!(out, "No details available");
    }
    let rows: Vec<Vec<String>> = rows.into_iter().map(|(k, v)| vec![k, v]).collect();
    write_table(out, &["FIELD", "VALUE"], &rows)
}

/// Related tab: one section per non-empty group
pub fn write_related<W: Write>(out: &mut W, payload: &DebugPayload) -> std::io::Result<()> {
    if payload.related.is_empty() {
        return writeln!(out, "No related resources found");
    }
    for (group, entries) in payload.related.non_empty_groups() {
        writeln!(out, "{} ({})", group.label(), entries.len())?;
        for entry in entries {
            let mut line = format!("  {}", entry.name);
            if let Some(status) = entry.status() {
                line.push_str(&format!("  status: {}", status));
            }
            if let Some(info) = entry.info() {
                line.push_str(&format!("  {}", info));
            }
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Events tab for a debug payload
pub fn write_payload_events<W: Write>(out: &mut W, payload: &DebugPayload) -> std::io::Result<()> {
    write_payload_events_at(out, payload, Utc::now())
}

fn write_payload_events_at<W: Write>(
    out: &mut W,
    payload: &DebugPayload,
    now: DateTime<Utc>,
) -> std::io::Result<()> {
    if payload.events.is_empty() {
        return writeln!(out, "No events found");
    }
    let rows: Vec<Vec<String>> = payload
        .events
        .iter()
        .map(|event| {
            vec![
                event.event_type.clone().unwrap_or_default(),
                event.reason.clone().unwrap_or_default(),
                event.count.map(|c| c.to_string()).unwrap_or_default(),
                age_since(parse_timestamp(event.last_timestamp.as_deref()), now),
                event.message.clone().unwrap_or_default(),
            ]
        })
        .collect();
    write_table(out, &["TYPE", "REASON", "COUNT", "LAST SEEN", "MESSAGE"], &rows)?;

    let abnormal = payload.events.iter().filter(|e| !e.is_normal()).count();
    if abnormal > 0 {
        writeln!(out, "{} of {} events are not Normal", abnormal, payload.events.len())?;
    }
    Ok(())
}

/// Backend timestamps are UTC `%Y-%m-%d %H:%M:%S`; RFC 3339 is accepted too
fn parse_timestamp(timestamp: Option<&str>) -> Option<DateTime<Utc>> {
    let timestamp = timestamp?;
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .map(|ts| ts.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(timestamp).map(|ts| ts.with_timezone(&Utc)))
        .ok()
}

pub fn write_health<W: Write>(out: &mut W, pods: &[PodHealth]) -> std::io::Result<()> {
    let rows: Vec<Vec<String>> = pods
        .iter()
        .map(|pod| {
            vec![
                pod.name.clone(),
                pod.status.clone(),
                pod.health.as_str().to_string(),
                pod.restarts.to_string(),
                pod.cpu.clone(),
                pod.memory.clone(),
                pod.age.clone(),
            ]
        })
        .collect();
    write_table(
        out,
        &["NAME", "STATUS", "HEALTH", "RESTARTS", "CPU", "MEMORY", "AGE"],
        &rows,
    )
}

pub fn write_images<W: Write>(out: &mut W, images: &[ImageRecord]) -> std::io::Result<()> {
    let with_namespace = images.iter().any(|i| i.namespace.is_some());
    let rows: Vec<Vec<String>> = images
        .iter()
        .map(|record| {
            let mut row = Vec::with_capacity(3);
            if with_namespace {
                row.push(record.namespace.clone().unwrap_or_default());
            }
            row.push(record.pod_name.clone());
            row.push(record.image.clone());
            row
        })
        .collect();
    if with_namespace {
        write_table(out, &["NAMESPACE", "POD", "IMAGE"], &rows)
    } else {
        write_table(out, &["POD", "IMAGE"], &rows)
    }
}

pub fn write_events<W: Write>(out: &mut W, events: &[EventRecord]) -> std::io::Result<()> {
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            vec![
                event.event_type.clone(),
                event.reason.clone(),
                event.object.clone(),
                event.count.to_string(),
                event.last_seen.clone(),
                event.message.clone(),
            ]
        })
        .collect();
    write_table(
        out,
        &["TYPE", "REASON", "OBJECT", "COUNT", "LAST SEEN", "MESSAGE"],
        &rows,
    )
}

pub fn write_pod<W: Write>(out: &mut W, pod: &PodDetails) -> std::io::Result<()> {
    let rows = vec![
        vec!["Name".to_string(), pod.name.clone()],
        vec!["Namespace".to_string(), pod.namespace.clone()],
        vec!["Status".to_string(), pod.status.clone()],
        vec!["Health".to_string(), pod.health.as_str().to_string()],
        vec!["Age".to_string(), pod.age.clone()],
        vec!["Created".to_string(), pod.created.clone()],
        vec!["Node".to_string(), pod.node.clone()],
        vec!["IP".to_string(), pod.ip.clone()],
        vec![
            "CPU".to_string(),
            format!("{} / {}", pod.resources.cpu.request, pod.resources.cpu.limit),
        ],
        vec![
            "Memory".to_string(),
            format!(
                "{} / {}",
                pod.resources.memory.request, pod.resources.memory.limit
            ),
        ],
        vec!["Restarts".to_string(), pod.total_restarts.to_string()],
    ];
    write_table(out, &["FIELD", "VALUE"], &rows)?;

    if !pod.labels.is_empty() {
        writeln!(out, "\nLabels:")?;
        for (key, value) in &pod.labels {
            writeln!(out, "  {}={}", key, value)?;
        }
    }

    if !pod.containers.is_empty() {
        writeln!(out, "\nContainers:")?;
        let rows: Vec<Vec<String>> = pod
            .containers
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.ready.to_string(),
                    c.restarts.to_string(),
                    c.state.clone().unwrap_or_default(),
                    c.image.clone(),
                ]
            })
            .collect();
        write_table(out, &["NAME", "READY", "RESTARTS", "STATE", "IMAGE"], &rows)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{LayoutSettings, Palette, build_graph};
    use crate::models::{RelationGroup, ResourceRef};

    fn payload() -> DebugPayload {
        let mut payload = DebugPayload::new("service", "web");
        payload
            .related
            .group_mut(RelationGroup::Pods)
            .push(ResourceRef::new("web-1").with_attribute("status", "Running"));
        payload
    }

    fn render(format: GraphFormat) -> String {
        let payload = payload();
        let graph = build_graph(&payload);
        let rendered = RenderedGraph::new(&graph, &Palette::default(), &LayoutSettings::default());
        let mut renderer = TextRenderer::new(Vec::new(), format);
        let handle = renderer.render(&graph, &rendered).unwrap();
        assert_eq!(handle, 0);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_tree_format_lists_ranks_and_edges() {
        let out = render(GraphFormat::Tree);
        assert!(out.contains("Level 0:"));
        assert!(out.contains("● web [Service]"));
        assert!(out.contains("Level 1:"));
        assert!(out.contains("web → web-1"));
    }

    #[test]
    fn test_json_format_is_widget_payload() {
        let out = render(GraphFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["data"]["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["options"]["physics"]["enabled"], false);
    }

    #[test]
    fn test_dot_format() {
        let out = render(GraphFormat::Dot);
        assert!(out.starts_with("digraph resources {"));
        assert!(out.contains("\"web\" -> \"web-1\";"));
    }

    #[test]
    fn test_quiet_renderer_writes_nothing() {
        let payload = payload();
        let graph = build_graph(&payload);
        let rendered = RenderedGraph::new(&graph, &Palette::default(), &LayoutSettings::default());
        let mut renderer = TextRenderer::new(Vec::new(), GraphFormat::Dot);
        renderer.set_quiet(true);
        assert_eq!(renderer.render(&graph, &rendered).unwrap(), 0);
        renderer.set_quiet(false);
        assert_eq!(renderer.render(&graph, &rendered).unwrap(), 1);
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.matches("digraph").count(), 1);
    }

    #[test]
    fn test_payload_events_show_age() {
        let payload: DebugPayload = serde_json::from_value(serde_json::json!({
            "type": "pod",
            "name": "web-1",
            "events": [
                { "type": "Warning", "reason": "BackOff", "count": 2,
                  "last_timestamp": "2024-05-01 10:00:00", "message": "restarting" },
                { "type": "Normal", "reason": "Pulled" }
            ]
        }))
        .unwrap();
        let now = DateTime::parse_from_rfc3339("2024-05-01T13:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut out = Vec::new();
        write_payload_events_at(&mut out, &payload, now).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[1].starts_with("Warning  BackOff  2"));
        assert!(lines[1].contains("3h"));
        assert!(lines[2].contains("N/A"));
        assert_eq!(lines[3], "1 of 2 events are not Normal");
    }

    #[test]
    fn test_table_alignment() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            &["NAME", "STATUS"],
            &[vec!["a-long-name".to_string(), "Running".to_string()]],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NAME         STATUS");
        assert_eq!(lines[1], "a-long-name  Running");
    }

    #[test]
    fn test_related_sections() {
        let mut out = Vec::new();
        write_related(&mut out, &payload()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Pods (1)"));
        assert!(text.contains("web-1  status: Running"));
    }
}
