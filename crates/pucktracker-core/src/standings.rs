//! Sorting and grouping of normalized standings into display sections.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{TeamStanding, UNKNOWN};

// ============================================================================
// Divisions
// ============================================================================

/// Divisions that get their own section, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    Atlantic,
    Metropolitan,
    Central,
    Pacific,
}

impl Division {
    pub const ALL: [Division; 4] = [
        Division::Atlantic,
        Division::Metropolitan,
        Division::Central,
        Division::Pacific,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Division::Atlantic => "Atlantic",
            Division::Metropolitan => "Metropolitan",
            Division::Central => "Central",
            Division::Pacific => "Pacific",
        }
    }

    pub fn section_title(&self) -> String {
        format!("{} Division", self.name())
    }
}

// ============================================================================
// Sections
// ============================================================================

/// A titled, ordered list of teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub teams: Vec<TeamStanding>,
    /// Division sections hide the conference badge
    pub show_conference: bool,
}

impl Section {
    fn new(title: impl Into<String>, teams: Vec<TeamStanding>, show_conference: bool) -> Self {
        Self {
            title: title.into(),
            teams,
            show_conference,
        }
    }

    /// Teams paired with their 1-based rank within this section.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &TeamStanding)> {
        self.teams.iter().enumerate().map(|(i, t)| (i + 1, t))
    }
}

/// Points descending, then regulation wins descending, then name ascending.
pub fn compare_teams(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.regulation_wins.cmp(&a.regulation_wins))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

/// Sorted copy; the input is left untouched.
pub fn sorted_teams(teams: &[TeamStanding]) -> Vec<TeamStanding> {
    let mut sorted = teams.to_vec();
    sorted.sort_by(compare_teams);
    sorted
}

/// Group by division name, keeping input order within each group.
/// An empty division name groups under "Unknown".
pub fn group_by_division(teams: &[TeamStanding]) -> HashMap<&str, Vec<&TeamStanding>> {
    let mut groups: HashMap<&str, Vec<&TeamStanding>> = HashMap::new();
    for team in teams {
        let key = if team.division.is_empty() {
            UNKNOWN
        } else {
            team.division.as_str()
        };
        groups.entry(key).or_default().push(team);
    }
    groups
}

fn conference_section(title: &str, conference: &str, overall: &[TeamStanding]) -> Section {
    let teams = overall
        .iter()
        .filter(|t| t.conference == conference)
        .cloned()
        .collect();
    Section::new(title, teams, true)
}

/// Overall, East and West are always present. Division sections follow for
/// each known division that has at least one team; other divisions are
/// dropped.
pub fn build_sections(teams: &[TeamStanding]) -> Vec<Section> {
    let overall = sorted_teams(teams);

    let mut sections = vec![
        conference_section("East", "Eastern", &overall),
        conference_section("West", "Western", &overall),
    ];

    let by_division = group_by_division(&overall);
    for division in Division::ALL {
        if let Some(members) = by_division.get(division.name()) {
            let members: Vec<TeamStanding> = members.iter().map(|t| (*t).clone()).collect();
            sections.push(Section::new(
                division.section_title(),
                sorted_teams(&members),
                false,
            ));
        }
    }

    sections.insert(0, Section::new("Overall", overall, true));
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, points: u32, rw: u32, conference: &str, division: &str) -> TeamStanding {
        TeamStanding::new(name, points, 0, rw, conference, division)
    }

    fn names(section: &Section) -> Vec<&str> {
        section.teams.iter().map(|t| t.team_name.as_str()).collect()
    }

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_points_dominate() {
        let a = team("Zeta", 20, 0, "Eastern", "Atlantic");
        let b = team("Alpha", 19, 15, "Eastern", "Atlantic");
        assert_eq!(compare_teams(&a, &b), Ordering::Less);
        assert_eq!(compare_teams(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_tie_breakers() {
        let more_rw = team("Zeta", 10, 5, "Eastern", "Atlantic");
        let fewer_rw = team("Alpha", 10, 4, "Eastern", "Atlantic");
        assert_eq!(compare_teams(&more_rw, &fewer_rw), Ordering::Less);

        let alpha = team("Alpha", 10, 5, "Eastern", "Atlantic");
        let beta = team("Beta", 10, 5, "Western", "Pacific");
        assert_eq!(compare_teams(&alpha, &beta), Ordering::Less);
        assert_eq!(compare_teams(&alpha, &alpha.clone()), Ordering::Equal);
    }

    #[test]
    fn test_sorting_is_idempotent_and_non_mutating() {
        let teams = vec![
            team("C", 5, 1, "Eastern", "Atlantic"),
            team("A", 9, 2, "Western", "Central"),
            team("B", 9, 3, "Western", "Pacific"),
            team("D", 5, 1, "Eastern", "Metropolitan"),
        ];
        let original = teams.clone();

        let once = sorted_teams(&teams);
        let twice = sorted_teams(&once);
        assert_eq!(once, twice);
        assert_eq!(teams, original);

        let order: Vec<_> = once.iter().map(|t| t.team_name.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_section_order_and_filters() {
        let teams = vec![
            team("Bruins", 12, 5, "Eastern", "Atlantic"),
            team("Rangers", 14, 6, "Eastern", "Metropolitan"),
            team("Stars", 11, 4, "Western", "Central"),
            team("Kraken", 9, 3, "Western", "Pacific"),
        ];

        let sections = build_sections(&teams);
        assert_eq!(
            titles(&sections),
            vec![
                "Overall",
                "East",
                "West",
                "Atlantic Division",
                "Metropolitan Division",
                "Central Division",
                "Pacific Division",
            ]
        );
        assert_eq!(names(&sections[0]), vec!["Rangers", "Bruins", "Stars", "Kraken"]);
        assert_eq!(names(&sections[1]), vec!["Rangers", "Bruins"]);
        assert_eq!(names(&sections[2]), vec!["Stars", "Kraken"]);
        assert!(sections[..3].iter().all(|s| s.show_conference));
        assert!(sections[3..].iter().all(|s| !s.show_conference));
    }

    #[test]
    fn test_conference_filter_uses_full_name() {
        // "Eastish" shortens to "East" but is not the Eastern conference
        let teams = vec![team("Odd", 3, 1, "Eastish", "Atlantic")];
        let sections = build_sections(&teams);
        assert!(sections[1].teams.is_empty());
        assert!(sections[2].teams.is_empty());
        assert_eq!(names(&sections[3]), vec!["Odd"]);
    }

    #[test]
    fn test_only_known_non_empty_divisions() {
        let teams = vec![
            team("P1", 4, 1, "Western", "Pacific"),
            team("U1", 8, 1, "Western", "Unknown"),
            team("A1", 6, 1, "Eastern", "Atlantic"),
        ];
        let sections = build_sections(&teams);
        assert_eq!(
            titles(&sections),
            vec!["Overall", "East", "West", "Atlantic Division", "Pacific Division"]
        );
        // Dropped division still counts in the overall and conference views
        assert_eq!(names(&sections[0]), vec!["U1", "A1", "P1"]);
        assert_eq!(names(&sections[2]), vec!["U1", "P1"]);
    }

    #[test]
    fn test_empty_input_keeps_fixed_sections() {
        let sections = build_sections(&[]);
        assert_eq!(titles(&sections), vec!["Overall", "East", "West"]);
        assert!(sections.iter().all(|s| s.teams.is_empty()));
    }

    #[test]
    fn test_ranked_is_one_based() {
        let sections = build_sections(&[
            team("Low", 1, 0, "Eastern", "Atlantic"),
            team("High", 2, 0, "Eastern", "Atlantic"),
        ]);
        let ranks: Vec<_> = sections[0].ranked().map(|(r, t)| (r, t.team_name.as_str())).collect();
        assert_eq!(ranks, vec![(1, "High"), (2, "Low")]);
    }

    #[test]
    fn test_group_by_division_unknown_key() {
        let mut blank = team("Blank", 1, 0, "Eastern", "Atlantic");
        blank.division = String::new();
        let teams = vec![blank, team("A", 2, 0, "Eastern", "Atlantic")];
        let groups = group_by_division(&teams);
        assert_eq!(groups[UNKNOWN].len(), 1);
        assert_eq!(groups["Atlantic"].len(), 1);
    }

    #[test]
    fn test_division_section_title() {
        assert_eq!(Division::Metropolitan.section_title(), "Metropolitan Division");
    }
}
