//! Fixed league tables: teams, home venues, broadcast presets and tip-off slots.

use crate::Team;

pub struct CatalogEntry {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub venue: &'static str,
}

const fn entry(abbreviation: &'static str, name: &'static str, venue: &'static str) -> CatalogEntry {
    CatalogEntry { abbreviation, name, venue }
}

/// Order matters: schedule pairings index into this table by seed.
pub const TEAMS: [CatalogEntry; 30] = [
    // East: Atlantic
    entry("BOS", "Boston Celtics", "TD Garden"),
    entry("BKN", "Brooklyn Nets", "Barclays Center"),
    entry("NYK", "New York Knicks", "Madison Square Garden"),
    entry("PHI", "Philadelphia 76ers", "Wells Fargo Center"),
    entry("TOR", "Toronto Raptors", "Scotiabank Arena"),
    // East: Central
    entry("CHI", "Chicago Bulls", "United Center"),
    entry("CLE", "Cleveland Cavaliers", "Rocket Mortgage FieldHouse"),
    entry("DET", "Detroit Pistons", "Little Caesars Arena"),
    entry("IND", "Indiana Pacers", "Gainbridge Fieldhouse"),
    entry("MIL", "Milwaukee Bucks", "Fiserv Forum"),
    // East: Southeast
    entry("ATL", "Atlanta Hawks", "State Farm Arena"),
    entry("CHA", "Charlotte Hornets", "Spectrum Center"),
    entry("MIA", "Miami Heat", "FTX Arena"),
    entry("ORL", "Orlando Magic", "Amway Center"),
    entry("WAS", "Washington Wizards", "Capital One Arena"),
    // West: Northwest
    entry("DEN", "Denver Nuggets", "Ball Arena"),
    entry("MIN", "Minnesota Timberwolves", "Target Center"),
    entry("OKC", "Oklahoma City Thunder", "Paycom Center"),
    entry("POR", "Portland Trail Blazers", "Moda Center"),
    entry("UTA", "Utah Jazz", "Vivint Arena"),
    // West: Pacific
    entry("GSW", "Golden State Warriors", "Chase Center"),
    entry("LAC", "Los Angeles Clippers", "Crypto.com Arena"),
    entry("LAL", "Los Angeles Lakers", "Crypto.com Arena"),
    entry("PHX", "Phoenix Suns", "Footprint Center"),
    entry("SAC", "Sacramento Kings", "Golden 1 Center"),
    // West: Southwest
    entry("DAL", "Dallas Mavericks", "American Airlines Center"),
    entry("HOU", "Houston Rockets", "Toyota Center"),
    entry("MEM", "Memphis Grizzlies", "FedExForum"),
    entry("NOP", "New Orleans Pelicans", "Smoothie King Center"),
    entry("SAS", "San Antonio Spurs", "AT&T Center"),
];

pub const BROADCAST_PRESETS: [&[&str]; 8] = [
    &["ESPN"],
    &["TNT"],
    &["ABC"],
    &["NBA TV"],
    &["ESPN", "Local"],
    &["TNT", "Local"],
    &["Local"],
    &["League Pass"],
];

/// Tip-off (hour, minute) in league time; the last two are West Coast starts.
pub const TIP_OFF_SLOTS: [(u32, u32); 6] = [(19, 0), (19, 30), (20, 0), (20, 30), (22, 0), (22, 30)];

impl CatalogEntry {
    pub fn to_team(&self) -> Team {
        Team {
            id: self.abbreviation.to_string(),
            name: self.name.to_string(),
            abbreviation: self.abbreviation.to_string(),
        }
    }
}

/// Team at `index`, wrapping around the catalog.
pub fn team_at(index: usize) -> Team {
    TEAMS[index % TEAMS.len()].to_team()
}

pub fn team_by_abbreviation(abbreviation: &str) -> Option<Team> {
    TEAMS
        .iter()
        .find(|t| t.abbreviation == abbreviation)
        .map(CatalogEntry::to_team)
}

pub fn all_teams() -> Vec<Team> {
    TEAMS.iter().map(CatalogEntry::to_team).collect()
}

/// Home venue for a team, `"<name> Arena"` for teams outside the catalog.
pub fn venue_for(team: &Team) -> String {
    TEAMS
        .iter()
        .find(|t| t.abbreviation == team.id)
        .map(|t| t.venue.to_string())
        .unwrap_or_else(|| format!("{} Arena", team.name))
}

pub fn broadcasts_at(index: usize) -> Vec<String> {
    BROADCAST_PRESETS[index % BROADCAST_PRESETS.len()]
        .iter()
        .map(|b| b.to_string())
        .collect()
}
