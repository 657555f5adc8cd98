//! Response teams — generated rosters assigned to a plan's steps.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ResponseConfig;

/// The responder tier a step is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponderTier {
    Tier1,
    Tier2,
    Forensics,
    Management,
}

impl std::fmt::Display for ResponderTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponderTier::Tier1 => write!(f, "Tier 1"),
            ResponderTier::Tier2 => write!(f, "Tier 2"),
            ResponderTier::Forensics => write!(f, "Forensics"),
            ResponderTier::Management => write!(f, "Management"),
        }
    }
}

/// A member of a generated response team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    /// Expertise level 1 (junior) to 5 (principal).
    pub expertise: u8,
    pub available: bool,
}

/// A response team assigned to a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTeam {
    /// Unique team ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Specialty tags.
    pub specialties: Vec<String>,
    /// Generated roster, 3 to 5 members.
    pub members: Vec<TeamMember>,
    /// Average response-time estimate in minutes.
    pub avg_response_minutes: u32,
}

const MEMBER_NAMES: [&str; 12] = [
    "Imani Okafor",
    "Lucas Ferreira",
    "Priya Raman",
    "Tomasz Nowak",
    "Aisha Diallo",
    "Henrik Larsen",
    "Mei-Ling Chou",
    "Diego Alvarez",
    "Nadia Petrova",
    "Kwame Mensah",
    "Sofia Rinaldi",
    "Arjun Bhatt",
];

const MEMBER_ROLES: [&str; 5] = [
    "SOC Analyst",
    "Network Engineer",
    "Forensics Specialist",
    "Field Technician",
    "Incident Commander",
];

/// Generate a response team with a random roster.
pub(crate) fn create_team<R: Rng>(
    config: &ResponseConfig,
    name: &str,
    specialties: &[&str],
    rng: &mut R,
) -> ResponseTeam {
    let size = rng.gen_range(config.min_team_size..=config.max_team_size);
    let members = (0..size)
        .map(|_| TeamMember {
            name: MEMBER_NAMES.choose(rng).expect("name pool not empty").to_string(),
            role: MEMBER_ROLES.choose(rng).expect("role pool not empty").to_string(),
            expertise: rng.gen_range(1..=5),
            available: rng.gen_bool(0.75),
        })
        .collect();

    ResponseTeam {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        members,
        avg_response_minutes: rng.gen_range(config.min_response_minutes..=config.max_response_minutes),
    }
}
