//! Static directory of the 30 NBA franchises and their stream page slugs.

use serde::Serialize;

/// One NBA franchise. `slug` is the path segment the stream source keys the
/// team's page on; for most teams it matches the lowercased name, but not
/// for all (Trail Blazers → `blazers`).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NbaTeam {
    pub id: &'static str,
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub city: &'static str,
    pub full_name: &'static str,
    pub slug: &'static str,
}

impl NbaTeam {
    pub fn stream_page_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.slug)
    }
}

pub const TEAMS: [NbaTeam; 30] = [
    NbaTeam { id: "atl", name: "Hawks", abbreviation: "ATL", city: "Atlanta", full_name: "Atlanta Hawks", slug: "hawks" },
    NbaTeam { id: "bos", name: "Celtics", abbreviation: "BOS", city: "Boston", full_name: "Boston Celtics", slug: "celtics" },
    NbaTeam { id: "bkn", name: "Nets", abbreviation: "BKN", city: "Brooklyn", full_name: "Brooklyn Nets", slug: "nets" },
    NbaTeam { id: "cha", name: "Hornets", abbreviation: "CHA", city: "Charlotte", full_name: "Charlotte Hornets", slug: "hornets" },
    NbaTeam { id: "chi", name: "Bulls", abbreviation: "CHI", city: "Chicago", full_name: "Chicago Bulls", slug: "bulls" },
    NbaTeam { id: "cle", name: "Cavaliers", abbreviation: "CLE", city: "Cleveland", full_name: "Cleveland Cavaliers", slug: "cavaliers" },
    NbaTeam { id: "dal", name: "Mavericks", abbreviation: "DAL", city: "Dallas", full_name: "Dallas Mavericks", slug: "mavericks" },
    NbaTeam { id: "den", name: "Nuggets", abbreviation: "DEN", city: "Denver", full_name: "Denver Nuggets", slug: "nuggets" },
    NbaTeam { id: "det", name: "Pistons", abbreviation: "DET", city: "Detroit", full_name: "Detroit Pistons", slug: "pistons" },
    NbaTeam { id: "gsw", name: "Warriors", abbreviation: "GSW", city: "Golden State", full_name: "Golden State Warriors", slug: "warriors" },
    NbaTeam { id: "hou", name: "Rockets", abbreviation: "HOU", city: "Houston", full_name: "Houston Rockets", slug: "rockets" },
    NbaTeam { id: "ind", name: "Pacers", abbreviation: "IND", city: "Indiana", full_name: "Indiana Pacers", slug: "pacers" },
    NbaTeam { id: "lac", name: "Clippers", abbreviation: "LAC", city: "Los Angeles", full_name: "LA Clippers", slug: "clippers" },
    NbaTeam { id: "lal", name: "Lakers", abbreviation: "LAL", city: "Los Angeles", full_name: "Los Angeles Lakers", slug: "lakers" },
    NbaTeam { id: "mem", name: "Grizzlies", abbreviation: "MEM", city: "Memphis", full_name: "Memphis Grizzlies", slug: "grizzlies" },
    NbaTeam { id: "mia", name: "Heat", abbreviation: "MIA", city: "Miami", full_name: "Miami Heat", slug: "heat" },
    NbaTeam { id: "mil", name: "Bucks", abbreviation: "MIL", city: "Milwaukee", full_name: "Milwaukee Bucks", slug: "bucks" },
    NbaTeam { id: "min", name: "Timberwolves", abbreviation: "MIN", city: "Minnesota", full_name: "Minnesota Timberwolves", slug: "timberwolves" },
    NbaTeam { id: "nop", name: "Pelicans", abbreviation: "NOP", city: "New Orleans", full_name: "New Orleans Pelicans", slug: "pelicans" },
    NbaTeam { id: "nyk", name: "Knicks", abbreviation: "NYK", city: "New York", full_name: "New York Knicks", slug: "knicks" },
    NbaTeam { id: "okc", name: "Thunder", abbreviation: "OKC", city: "Oklahoma City", full_name: "Oklahoma City Thunder", slug: "thunder" },
    NbaTeam { id: "orl", name: "Magic", abbreviation: "ORL", city: "Orlando", full_name: "Orlando Magic", slug: "magic" },
    NbaTeam { id: "phi", name: "76ers", abbreviation: "PHI", city: "Philadelphia", full_name: "Philadelphia 76ers", slug: "76ers" },
    NbaTeam { id: "phx", name: "Suns", abbreviation: "PHX", city: "Phoenix", full_name: "Phoenix Suns", slug: "suns" },
    NbaTeam { id: "por", name: "Trail Blazers", abbreviation: "POR", city: "Portland", full_name: "Portland Trail Blazers", slug: "blazers" },
    NbaTeam { id: "sac", name: "Kings", abbreviation: "SAC", city: "Sacramento", full_name: "Sacramento Kings", slug: "kings" },
    NbaTeam { id: "sas", name: "Spurs", abbreviation: "SAS", city: "San Antonio", full_name: "San Antonio Spurs", slug: "spurs" },
    NbaTeam { id: "tor", name: "Raptors", abbreviation: "TOR", city: "Toronto", full_name: "Toronto Raptors", slug: "raptors" },
    NbaTeam { id: "uta", name: "Jazz", abbreviation: "UTA", city: "Utah", full_name: "Utah Jazz", slug: "jazz" },
    NbaTeam { id: "was", name: "Wizards", abbreviation: "WAS", city: "Washington", full_name: "Washington Wizards", slug: "wizards" },
];

pub fn all() -> &'static [NbaTeam] {
    &TEAMS
}

/// Case-insensitive lookup by id, abbreviation, slug, or short name.
pub fn find(query: &str) -> Option<&'static NbaTeam> {
    let q = query.trim().to_lowercase();
    TEAMS.iter().find(|t| {
        t.id == q || t.slug == q || t.abbreviation.to_lowercase() == q || t.name.to_lowercase() == q
    })
}
