/// Character used when a link names an unknown one.
pub const DEFAULT_CHARACTER: &str = "gojo";

/// Power/speed/technique card values, 0-100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Stats {
    /// Raw power.
    pub power: u8,
    /// Speed.
    pub speed: u8,
    /// Technique.
    pub technique: u8,
}

/// A selectable mission character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Character {
    /// Stable id used in share links.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short tagline.
    pub desc: &'static str,
    /// Franchise the character comes from.
    pub universe: &'static str,
    /// Roster card stats.
    pub stats: Stats,
    /// Avatar image path.
    pub avatar: &'static str,
    /// Label shown above the character's dialog.
    pub speaker: &'static str,
}

const fn stats(power: u8, speed: u8, technique: u8) -> Stats {
    Stats {
        power,
        speed,
        technique,
    }
}

/// Characters offered on the form, in display order.
pub static ROSTER: [Character; 5] = [
    Character {
        id: "gojo",
        name: "GOJO SATORU",
        desc: "Special Grade",
        universe: "JUJUTSU KAISEN",
        stats: stats(99, 95, 99),
        avatar: "/avatar/Gojo_satoru.webp",
        speaker: "AGENT GOJO",
    },
    Character {
        id: "leon",
        name: "LEON SCOTT KENNEDY",
        desc: "Survival Expert",
        universe: "RESIDENT EVIL",
        stats: stats(85, 80, 95),
        avatar: "/avatar/Leon_scott_keneddy.webp",
        speaker: "AGENT LEON",
    },
    Character {
        id: "levi",
        name: "LEVI ACKERMEN",
        desc: "Humanity's Strongest",
        universe: "ATTACK ON TITAN",
        stats: stats(95, 99, 98),
        avatar: "/avatar/Levi_ackermen.webp",
        speaker: "CAPTAIN LEVI",
    },
    Character {
        id: "eren",
        name: "EREN JAEGER",
        desc: "Colossal Titan",
        universe: "ATTACK ON TITAN",
        stats: stats(99, 85, 90),
        avatar: "/avatar/Eren_jaeger.webp",
        speaker: "EREN JAEGER",
    },
    Character {
        id: "caleb",
        name: "CALEB",
        desc: "Mystic Protector",
        universe: "LOVE AND DEEPSPACE",
        stats: stats(92, 88, 90),
        avatar: "/avatar/Caleb.webp",
        speaker: "CALEB",
    },
];

/// Ids from older share links, still resolvable but no longer offered.
static LEGACY: [Character; 3] = [
    Character {
        id: "vanguard",
        name: "AGENT VANGUARD",
        desc: "Legacy operative",
        universe: "MISSION ARCHIVE",
        stats: stats(80, 80, 80),
        avatar: "/comicpanel.webp",
        speaker: "AGENT VANGUARD",
    },
    Character {
        id: "chrono",
        name: "AGENT CHRONO",
        desc: "Legacy operative",
        universe: "MISSION ARCHIVE",
        stats: stats(80, 80, 80),
        avatar: "/comicpanel.webp",
        speaker: "AGENT CHRONO",
    },
    Character {
        id: "neon",
        name: "AGENT NEON",
        desc: "Legacy operative",
        universe: "MISSION ARCHIVE",
        stats: stats(80, 80, 80),
        avatar: "/comicpanel2.webp",
        speaker: "AGENT NEON",
    },
];

/// Exact lookup over the roster and legacy ids.
pub fn find_character(id: &str) -> Option<&'static Character> {
    ROSTER.iter().chain(LEGACY.iter()).find(|c| c.id == id)
}

/// Lookup that falls back to the default character for unknown ids.
pub fn resolve_character(id: &str) -> &'static Character {
    find_character(id).unwrap_or(&ROSTER[0])
}

/// Roster entries whose name or tagline contains `query`, ignoring case.
///
/// An empty query returns the whole roster.
pub fn search_characters(query: &str) -> Vec<&'static Character> {
    let q = query.trim().to_lowercase();
    ROSTER
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&q) || c.desc.to_lowercase().contains(&q))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/mission/character.rs"]
mod tests;
