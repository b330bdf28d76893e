//! Schedule scraping: fetch the team schedule page and parse its game list.
//!
//! Parsing degrades per field rather than per page: a missing team block
//! becomes empty strings, a bad score becomes 0, a missing or unparsable
//! tip-off timestamp becomes "now". Only transport failures are hard errors,
//! and [`ScheduleScraper::fetch_games_or_fallback`] degrades even those to a
//! fixed placeholder schedule so a caller always has something to render.

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::Error;

/// Where a game sits relative to its live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Upcoming,
    Pregame,
    Live,
    Final,
}

impl GameStatus {
    /// Section rank for display ordering: live, then upcoming, then final.
    pub fn display_rank(self) -> u8 {
        match self {
            GameStatus::Live => 0,
            GameStatus::Pregame | GameStatus::Upcoming => 1,
            GameStatus::Final => 2,
        }
    }
}

/// Derive status from the tip-off instant: before the start a game is
/// upcoming, past `start + live_window` it is final, in between it is live.
///
/// The schedule markup also carries a status label, but the label lags the
/// clock; the window rule is the authoritative one. The label is still kept
/// on [`Game::status_label`] as data.
pub fn derive_status(start: DateTime<Utc>, now: DateTime<Utc>, live_window: Duration) -> GameStatus {
    if now < start {
        GameStatus::Upcoming
    } else if now > start + live_window {
        GameStatus::Final
    } else {
        GameStatus::Live
    }
}

/// One scheduled or in-progress game. Built fresh on every fetch and never
/// mutated; two fetches of the same matchup may differ if the page changed.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    /// Source identifier; empty when the markup does not carry one.
    pub game_id: String,
    /// Lowercased team name; for the home side this doubles as the stream
    /// page slug.
    pub home_team: String,
    pub away_team: String,
    pub home_team_full_name: String,
    pub away_team_full_name: String,
    pub home_team_abbrev: String,
    pub away_team_abbrev: String,
    pub home_score: i32,
    pub away_score: i32,
    /// Tip-off in the viewer's timezone. Always populated.
    pub game_time: DateTime<Local>,
    pub is_live: bool,
    pub status: GameStatus,
    /// Raw status text from the markup, e.g. "4th Qtr". Preserved verbatim;
    /// `status` is derived from the time window instead.
    pub status_label: String,
}

impl Game {
    /// "Away Full Name @ Home Full Name"
    pub fn matchup_title(&self) -> String {
        format!("{} @ {}", self.away_team_full_name, self.home_team_full_name)
    }

    pub fn formatted_date(&self) -> String {
        self.game_time.format("%b %-d, %Y").to_string()
    }

    pub fn formatted_time(&self) -> String {
        self.game_time.format("%-I:%M %p").to_string()
    }

    /// Stream page for this game; the source keys pages on the home team.
    pub fn stream_page_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.home_team.to_lowercase())
    }
}

/// Fetches the configured schedule page and parses it into [`Game`]s.
/// Stateless between calls; one request per invocation, no retry.
pub struct ScheduleScraper {
    client: Client,
    schedule_url: String,
    live_window: Duration,
}

impl ScheduleScraper {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.request_timeout())
                .build()
                .unwrap_or_else(|_| Client::new()),
            schedule_url: config.schedule_url.clone(),
            live_window: config.live_window(),
        }
    }

    /// Single attempt against the configured schedule page.
    pub async fn fetch_games(&self) -> Result<Vec<Game>, Error> {
        self.fetch_games_from(&self.schedule_url).await
    }

    /// Single attempt against an arbitrary schedule page (another team's).
    pub async fn fetch_games_from(&self, url: &str) -> Result<Vec<Game>, Error> {
        let resp = self.client.get(url).send().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::BadStatus { url: url.to_string(), status });
        }
        let html = resp.text().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok(self.parse_schedule(&html, Utc::now()))
    }

    /// Never block rendering on a scrape failure: any error is logged and
    /// replaced by [`fallback_games`].
    pub async fn fetch_games_or_fallback(&self) -> Vec<Game> {
        match self.fetch_games().await {
            Ok(games) => games,
            Err(e) => {
                warn!(error = %e, "schedule fetch failed, serving placeholder schedule");
                fallback_games(Utc::now())
            }
        }
    }

    /// Parse a schedule document at a fixed `now` instant.
    pub fn parse_schedule(&self, html: &str, now: DateTime<Utc>) -> Vec<Game> {
        let doc = Html::parse_document(html);
        let item_sel = Selector::parse(".item.upcoming").unwrap();
        let games: Vec<Game> = doc
            .select(&item_sel)
            .map(|el| self.parse_game_element(el, now))
            .collect();
        debug!(count = games.len(), "parsed schedule page");
        games
    }

    fn parse_game_element(&self, el: ElementRef<'_>, now: DateTime<Utc>) -> Game {
        let game_id = el.value().attr("data-id").unwrap_or_default().to_string();

        let (away_abbrev, away_name, away_score) = team_block(el, ".away-content .text");
        let (home_abbrev, home_name, home_score) = team_block(el, ".home-content .text");

        let status_label = select_text(el, ".liveevent-desc .sub-name");

        let start = extract_start_time(el).unwrap_or(now);
        let status = derive_status(start, now, self.live_window);

        Game {
            game_id,
            home_team: home_name.to_lowercase(),
            away_team: away_name.to_lowercase(),
            home_team_full_name: home_name,
            away_team_full_name: away_name,
            home_team_abbrev: home_abbrev,
            away_team_abbrev: away_abbrev,
            home_score,
            away_score,
            game_time: start.with_timezone(&Local),
            is_live: status == GameStatus::Live,
            status,
            status_label,
        }
    }
}

/// (abbreviation, display name, score) for one side's team block.
fn team_block(el: ElementRef<'_>, selector: &str) -> (String, String, i32) {
    let sel = Selector::parse(selector).unwrap();
    match el.select(&sel).next() {
        Some(block) => {
            let abbrev = select_text(block, ".code");
            let name = select_text(block, ".name");
            let score = select_text(block, ".score").parse().unwrap_or(0);
            (abbrev, name, score)
        }
        None => (String::new(), String::new(), 0),
    }
}

fn select_text(el: ElementRef<'_>, selector: &str) -> String {
    let sel = Selector::parse(selector).unwrap();
    el.select(&sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// The page renders tip-off client-side: the `.game-desc .date` element's id
/// is referenced by an inline script carrying a `moment('<utc>')` call, and
/// the instant lives between those delimiters.
fn extract_start_time(el: ElementRef<'_>) -> Option<DateTime<Utc>> {
    let date_sel = Selector::parse(".game-desc .date").unwrap();
    let date_id = el.select(&date_sel).next()?.value().attr("id")?.to_string();
    if date_id.is_empty() {
        return None;
    }
    let script_sel = Selector::parse("script").unwrap();
    let script = el
        .select(&script_sel)
        .map(|s| s.inner_html())
        .find(|text| text.contains(&date_id))?;
    let raw = script.split("moment('").nth(1)?.split("')").next()?;
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Fixed placeholder schedule served when the real source is unreachable:
/// one game an hour into its live window and two upcoming tip-offs.
pub fn fallback_games(now: DateTime<Utc>) -> Vec<Game> {
    vec![
        placeholder("Timberwolves", "Lakers", "MIN", "LAL", now - Duration::hours(1), GameStatus::Live),
        placeholder("Warriors", "Suns", "GSW", "PHX", now + Duration::hours(2), GameStatus::Upcoming),
        placeholder("Mavericks", "Celtics", "DAL", "BOS", now + Duration::hours(3), GameStatus::Upcoming),
    ]
}

fn placeholder(
    home: &str,
    away: &str,
    home_abbrev: &str,
    away_abbrev: &str,
    start: DateTime<Utc>,
    status: GameStatus,
) -> Game {
    Game {
        game_id: String::new(),
        home_team: home.to_lowercase(),
        away_team: away.to_lowercase(),
        home_team_full_name: home.to_string(),
        away_team_full_name: away.to_string(),
        home_team_abbrev: home_abbrev.to_string(),
        away_team_abbrev: away_abbrev.to_string(),
        home_score: 0,
        away_score: 0,
        game_time: start.with_timezone(&Local),
        is_live: status == GameStatus::Live,
        status,
        status_label: String::new(),
    }
}

/// Order used by game pickers: live games first, then by section rank.
/// Stable, so source order is kept within a section.
pub fn sort_for_display(games: &mut [Game]) {
    games.sort_by_key(|g| (std::cmp::Reverse(g.is_live), g.status.display_rank()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minutes(m: i64) -> Duration {
        Duration::minutes(m)
    }

    #[test]
    fn status_window_boundaries() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 3, 0, 0).unwrap();
        let window = minutes(150);

        assert_eq!(derive_status(start, start - minutes(1), window), GameStatus::Upcoming);
        assert_eq!(derive_status(start, start, window), GameStatus::Live);
        assert_eq!(derive_status(start, start + minutes(60), window), GameStatus::Live);
        assert_eq!(derive_status(start, start + window, window), GameStatus::Live);
        assert_eq!(derive_status(start, start + window + minutes(1), window), GameStatus::Final);
    }

    #[test]
    fn display_rank_orders_sections() {
        assert!(GameStatus::Live.display_rank() < GameStatus::Upcoming.display_rank());
        assert_eq!(GameStatus::Pregame.display_rank(), GameStatus::Upcoming.display_rank());
        assert!(GameStatus::Upcoming.display_rank() < GameStatus::Final.display_rank());
    }

    #[test]
    fn sort_puts_live_before_upcoming_before_final() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 3, 0, 0).unwrap();
        let mut games = vec![
            placeholder("Mavericks", "Celtics", "DAL", "BOS", now - Duration::hours(6), GameStatus::Final),
            placeholder("Warriors", "Suns", "GSW", "PHX", now + Duration::hours(2), GameStatus::Upcoming),
            placeholder("Timberwolves", "Lakers", "MIN", "LAL", now - Duration::hours(1), GameStatus::Live),
        ];
        sort_for_display(&mut games);
        assert_eq!(games[0].status, GameStatus::Live);
        assert_eq!(games[1].status, GameStatus::Upcoming);
        assert_eq!(games[2].status, GameStatus::Final);
    }
}
