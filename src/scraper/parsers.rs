//! Schedule page extraction: locate day containers, pull one record per entry.

use crate::models::{GroupKey, Record, Schedule, ScheduleGroup};
use scraper::Html;
use tracing::debug;

use super::cleaner::{normalize_image_url, parse_anime_id, parse_audience, parse_info, parse_score};
use super::markup::{Markers, MarkupNode};

/// Title used when an entry has no readable title. Records carrying it are dropped.
pub const FALLBACK_TITLE: &str = "Unknown Title";

const IMAGE_ATTRS: [&str; 3] = ["data-src", "src", "data-lazy-src"];

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Origin that root-relative image paths resolve against.
    pub origin: String,
    pub markers: Markers,
}

impl ExtractOptions {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            markers: Markers::default(),
        }
    }
}

// ── Whole document ────────────────────────────────────────────────────────────

pub fn extract_schedule(html: &str, opts: &ExtractOptions) -> Schedule {
    let doc = Html::parse_document(html);

    let groups = locate_groups(doc.root_element(), &opts.markers)
        .into_iter()
        .map(|(key, container)| ScheduleGroup {
            label: key.label().to_string(),
            records: extract_records(container, key.label(), opts),
        })
        .collect();

    Schedule::from_groups(groups)
}

// ── Group locator ─────────────────────────────────────────────────────────────

/// One container per bucket present in the document, in bucket order.
pub fn locate_groups<N: MarkupNode>(root: N, markers: &Markers) -> Vec<(GroupKey, N)> {
    GroupKey::ALL
        .iter()
        .filter_map(|&key| {
            let found = root.first_with_class(&markers.group_class(key));
            if found.is_none() {
                debug!("No container for {}", key.label());
            }
            found.map(|container| (key, container))
        })
        .collect()
}

// ── Record extractor ──────────────────────────────────────────────────────────

pub fn extract_records<N: MarkupNode>(
    container: N,
    label: &str,
    opts: &ExtractOptions,
) -> Vec<Record> {
    let entries = container.descendants_with_class(opts.markers.entry);
    let found = entries.len();

    let records: Vec<Record> = entries
        .into_iter()
        .map(|entry| extract_record(entry, label, opts))
        .filter(|r| !r.title.is_empty() && r.title != FALLBACK_TITLE)
        .collect();

    if records.len() < found {
        debug!("{}: dropped {} untitled entries", label, found - records.len());
    }
    records
}

/// Build a record from one entry node. Missing sub-nodes degrade to `None`.
pub fn extract_record<N: MarkupNode>(entry: N, label: &str, opts: &ExtractOptions) -> Record {
    let m = &opts.markers;
    let link = entry.first_with_class(m.title_link);

    let id = link.and_then(|l| l.attribute("href").and_then(parse_anime_id));

    let title = non_empty_text(link)
        .or_else(|| non_empty_text(entry.first_with_class(m.title_fallback)))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let score_text = non_empty_text(entry.first_with_class(m.score))
        .or_else(|| non_empty_text(entry.first_with_class(m.score_fallback)))
        .unwrap_or_default();

    let audience = entry
        .first_with_class(m.audience)
        .and_then(|n| parse_audience(&n.trimmed_text()));

    let image_url = entry.first_with_tag(m.image_tag).and_then(|img| {
        IMAGE_ATTRS
            .iter()
            .filter_map(|a| img.attribute(a))
            .map(str::trim)
            .find(|v| !v.is_empty())
            .map(|raw| normalize_image_url(raw, &opts.origin))
    });

    let info = entry
        .first_with_class(m.info)
        .map(|n| parse_info(&n.text_content()))
        .unwrap_or_default();

    Record {
        id,
        title,
        score: parse_score(&score_text),
        audience,
        image_url,
        group: label.to_string(),
        air_date: info.air_date,
        episode_count: info.episode_count,
        episode_duration: info.episode_duration,
    }
}

fn non_empty_text<N: MarkupNode>(node: Option<N>) -> Option<String> {
    node.map(|n| n.trimmed_text()).filter(|t| !t.is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
