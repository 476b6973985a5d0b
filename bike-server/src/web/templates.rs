//! Askama templates for the web frontend.

use askama::Template;
use chrono::SecondsFormat;

use crate::gbfs::Snapshot;
use crate::map::{LEGEND_ORDER, MapConfig, legend_label};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Map page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Id of the element Leaflet mounts into.
    pub container: String,
    pub summary: Vec<SummaryRowView>,
    pub total: usize,
    pub unmatched: usize,
    pub last_updated: Option<String>,
    /// Feed timestamp as `/api/map` serializes it, empty if unknown. The
    /// browser compares the two to spot a summary from an older snapshot.
    pub snapshot_stamp: String,
}

impl IndexTemplate {
    pub fn new(map: &MapConfig, snapshot: &Snapshot) -> Self {
        Self {
            container: map.container.clone(),
            summary: SummaryRowView::from_snapshot(snapshot),
            total: snapshot.len(),
            unmatched: snapshot.unmatched.len(),
            last_updated: snapshot
                .last_updated
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            snapshot_stamp: snapshot
                .last_updated
                .map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                .unwrap_or_default(),
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One row of the station summary, in legend order.
#[derive(Debug, Clone)]
pub struct SummaryRowView {
    pub label: &'static str,
    pub color: &'static str,
    pub slug: &'static str,
    pub count: usize,
}

impl SummaryRowView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Vec<Self> {
        LEGEND_ORDER
            .iter()
            .map(|&bucket| Self {
                label: legend_label(bucket),
                color: bucket.color(),
                slug: bucket.slug(),
                count: snapshot.count(bucket),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn summary_rows_follow_legend() {
        let rows = SummaryRowView::from_snapshot(&Snapshot::default());
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "Healthy Stations",
                "Coming Soon",
                "Out of Order",
                "Empty Stations",
                "Low Stations"
            ]
        );
        assert!(rows.iter().all(|r| r.count == 0));
    }

    #[test]
    fn index_renders_container_and_counts() {
        let snapshot = Snapshot {
            last_updated: DateTime::from_timestamp(1_700_000_000, 0),
            ..Snapshot::default()
        };
        let html = IndexTemplate::new(&MapConfig::default(), &snapshot)
            .render()
            .unwrap();

        assert!(html.contains(r#"id="map-id""#));
        assert!(html.contains("Healthy Stations"));
        assert!(html.contains("2023-11-14 22:13:20 UTC"));
        assert!(html.contains(r#"data-last-updated="2023-11-14T22:13:20Z""#));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = ErrorTemplate {
            title: "Feed unavailable".into(),
            message: "<b>bad</b>".into(),
            details: Some("HTTP error".into()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Feed unavailable"));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(html.contains("HTTP error"));
    }
}
