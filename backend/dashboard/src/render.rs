use chrono::Local;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::{
    dashboard::{Dashboard, Phase},
    record::{NOT_AVAILABLE, Record},
    text::{display_description, display_url},
};

pub const INVALID_DATE: &str = "Invalid Date";
pub const EMPTY_TABLE: &str = "No ads available";

const COLUMN_TITLES: [&str; 8] = [
    "Created At",
    "Description",
    "Video Link",
    "Image Link",
    "URL",
    "CTA",
    "Start Date",
    "Tag",
];

/// Wraps cells to the terminal width when there is one.
pub fn render(dashboard: &Dashboard) -> String {
    render_with(dashboard, ContentArrangement::Dynamic)
}

pub fn render_with(dashboard: &Dashboard, arrangement: ContentArrangement) -> String {
    let mut out = String::new();

    out.push_str("ADS\n\n");
    out.push_str(&format!(
        "Search: {}\n",
        if dashboard.criteria().search_term.is_empty() {
            "(search by description...)"
        } else {
            dashboard.criteria().search_term.as_str()
        }
    ));
    out.push_str(&format!("CTA: [{}] v\n", dashboard.criteria().category));

    if dashboard.dropdown_open() {
        for (index, option) in dashboard.category_options().iter().enumerate() {
            out.push_str(&format!("  {:>2}. {option}\n", index + 1));
        }
    }

    out.push('\n');

    if dashboard.phase() == Phase::Loading {
        out.push_str("Loading ads...\n");
        return out;
    }

    let mut table = Table::new();
    table
        .set_content_arrangement(arrangement)
        .set_header(COLUMN_TITLES);

    for record in dashboard.page_records() {
        table.add_row(cells(record).map(Cell::new));
    }

    out.push_str(&table.to_string());
    out.push('\n');

    if dashboard.page_records().is_empty() {
        out.push_str(EMPTY_TABLE);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!(
        "{}  Page {} of {}  {}\n",
        control("Previous", dashboard.has_previous()),
        dashboard.current_page(),
        dashboard.total_pages(),
        control("Next", dashboard.has_next()),
    ));

    out
}

pub fn format_created_at(raw: &str) -> String {
    crate::record::parse_created_at(raw)
        .map(|time| {
            time.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn cells(record: &Record) -> [String; 8] {
    [
        format_created_at(&record.created_at),
        display_description(&record.description),
        media(&record.video_link),
        media(&record.image_link),
        display_url(&record.url),
        record.cta.clone(),
        record.start_date.clone(),
        record.tag.clone(),
    ]
}

fn media(link: &str) -> String {
    if link == NOT_AVAILABLE {
        NOT_AVAILABLE.to_string()
    } else {
        format!("> {}", display_url(link))
    }
}

fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}
