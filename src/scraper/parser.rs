//! HTML parsing for the fcupdate.nl results page
//!
//! The page is a flat list of `matches-panel` divs. Panels with the
//! `align-left justify-center` classes carry a Dutch date heading
//! ("Maandag 15 augustus 2022") that applies to every match row after it,
//! until the next heading. Panels with the `Played` class carry one
//! finished match each.

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::warn;

use super::{ScrapedMatch, ScraperError};

static DATE_RE: OnceLock<Regex> = OnceLock::new();

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::ParseError(e.to_string()))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Parse every finished match from the results page.
///
/// Rows that lack team names, a parseable score or a preceding date
/// heading are skipped with a warning rather than failing the pass.
pub fn parse_match_results(html: &str) -> Result<Vec<ScrapedMatch>, ScraperError> {
    let document = Html::parse_document(html);

    let panel_selector = selector("div.matches-panel")?;
    let home_selector = selector(".left-team > span")?;
    let away_selector = selector(".right-team > span")?;
    let score_selector = selector(".score > div > i")?;

    let mut matches = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for panel in document.select(&panel_selector) {
        if has_class(&panel, "align-left") && has_class(&panel, "justify-center") {
            let heading = element_text(&panel);
            current_date = parse_dutch_date(&heading);
            if current_date.is_none() {
                warn!("unparseable date heading: {:?}", heading);
            }
            continue;
        }

        if !has_class(&panel, "Played") {
            continue;
        }

        let Some(date) = current_date else {
            warn!("skipping match row without a preceding date heading");
            continue;
        };

        let home_team = panel
            .select(&home_selector)
            .next()
            .map(|e| element_text(&e))
            .unwrap_or_default();
        let away_team = panel
            .select(&away_selector)
            .next()
            .map(|e| element_text(&e))
            .unwrap_or_default();

        if home_team.is_empty() || away_team.is_empty() {
            warn!("skipping match row with missing team names");
            continue;
        }

        // First and last score cell; the middle one is the divider.
        let cells: Vec<String> = panel.select(&score_selector).map(|e| element_text(&e)).collect();
        let home_goals = cells.first().and_then(|s| s.parse::<u32>().ok());
        let away_goals = cells.last().and_then(|s| s.parse::<u32>().ok());

        let (Some(home_goals), Some(away_goals)) = (home_goals, away_goals) else {
            warn!("skipping {} - {} with unparseable score", home_team, away_team);
            continue;
        };

        matches.push(ScrapedMatch {
            home_team,
            away_team,
            home_goals,
            away_goals,
            date,
        });
    }

    Ok(matches)
}

/// Parse a Dutch long date like "Maandag 15 augustus 2022". The weekday
/// prefix is optional and ignored.
pub fn parse_dutch_date(text: &str) -> Option<NaiveDate> {
    let re = DATE_RE
        .get_or_init(|| Regex::new(r"\b(\d{1,2})\s+([a-z]+)\s+(\d{4})\b").expect("valid regex"));

    let lower = text.to_lowercase();
    let caps = re.captures(&lower)?;

    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(month: &str) -> Option<u32> {
    let number = match month {
        "januari" => 1,
        "februari" => 2,
        "maart" => 3,
        "april" => 4,
        "mei" => 5,
        "juni" => 6,
        "juli" => 7,
        "augustus" => 8,
        "september" => 9,
        "oktober" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };

    Some(number)
}
