//! HTML rendering for standings.
//!
//! Every render produces the complete content of the standings container;
//! loading, error and section states replace each other and are never merged.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};

use crate::models::TeamStanding;
use crate::standings::Section;
use crate::utils::escape_html;

/// Shown when neither a fresh fetch nor the cache produced standings.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch standings. Please try again later.";

const STYLESHEET: &str = "\
body{font-family:system-ui,sans-serif;background:#10131a;color:#e6e9ef;margin:0;padding:1rem}\
#standings{display:grid;gap:1rem;grid-template-columns:repeat(auto-fill,minmax(320px,1fr))}\
.card{background:#1a1f2b;border-radius:8px;padding:.75rem 1rem}\
.card h3{margin:.25rem 0 .5rem;color:#4080c0}\
.row{display:flex;justify-content:space-between;padding:.2rem 0;border-bottom:1px solid #262c3a}\
.badge{background:#303040;border-radius:4px;padding:0 .4rem;font-size:.8em}\
.small{color:#808080;font-size:.85em}\
footer{margin-top:1rem;color:#808080;font-size:.85em}";

/// Where rendered content goes. Each call replaces whatever was there.
pub trait RenderTarget {
    fn replace(&mut self, body: &str) -> Result<()>;
}

fn row(left: &str, right: &str) -> String {
    format!(r#"<div class="row"><span>{}</span><span>{}</span></div>"#, left, right)
}

fn card(title: &str, rows: &str) -> String {
    format!(r#"<article class="card"><h3>{}</h3>{}</article>"#, escape_html(title), rows)
}

fn notice_card(title: &str, message: &str) -> String {
    card(
        title,
        &row(&format!(r#"<span class="small">{}</span>"#, escape_html(message)), ""),
    )
}

pub fn loading_html() -> String {
    notice_card("Loading", "Fetching latest standings…")
}

pub fn error_html(message: &str) -> String {
    notice_card("Error", message)
}

fn team_row(rank: usize, team: &TeamStanding, show_conference: bool) -> String {
    let left = format!("{}. {}", rank, escape_html(&team.team_name));
    let badge = if show_conference {
        format!(r#"<span class="badge">{}</span>"#, escape_html(&team.conference_short))
    } else {
        String::new()
    };
    let right = format!(
        r#"{} <strong>{}</strong> pts <span class="small">• RW {} • GP {}</span>"#,
        badge, team.points, team.regulation_wins, team.games_played
    );
    row(&left, &right)
}

pub fn section_html(section: &Section) -> String {
    let rows: String = section
        .ranked()
        .map(|(rank, team)| team_row(rank, team, section.show_conference))
        .collect();
    card(&section.title, &rows)
}

pub fn sections_html(sections: &[Section]) -> String {
    sections.iter().map(section_html).collect()
}

/// Full document around the standings container, with the year in the footer.
pub fn page_html(body: &str, year: i32) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>PuckTracker Standings</title>\n",
            "<style>{}</style>\n",
            "</head>\n<body>\n",
            "<section id=\"standings\">{}</section>\n",
            "<footer>&copy; <span id=\"year\">{}</span> PuckTracker</footer>\n",
            "</body>\n</html>\n"
        ),
        STYLESHEET, body, year
    )
}

/// Writes each render as a complete HTML page to a file.
#[derive(Debug, Clone)]
pub struct HtmlFileTarget {
    path: PathBuf,
}

impl HtmlFileTarget {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderTarget for HtmlFileTarget {
    fn replace(&mut self, body: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let page = page_html(body, Utc::now().year());

        // Write then rename so readers never see a half-written page
        let tmp = self.path.with_extension("html.tmp");
        std::fs::write(&tmp, page)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
