//! Static situation, audience, and persona catalogs.
//!
//! The catalogs seed pickers and free-text fields; nothing here talks to the
//! network. Persona selection is randomized so repeated training sessions
//! don't always offer the same partners.

use rand::seq::SliceRandom;

/// A training scenario grouping personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioOption {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// A role-play identity offered for training dialogues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaOption {
    pub id: &'static str,
    pub scenario_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SITUATIONS: &[&str] = &[
    "Date — First coffee date",
    "Date — Dinner after a long break",
    "Corporate — All-hands mixer",
    "Corporate — Cross-team lunch",
    "Friends — House party",
    "Family — Dinner with friends and kids",
    "Neighbors — Elevator/entrance",
    "Neighbors — Courtyard/park bench",
    "Travel — Airport lounge / train",
    "Events — Museum/gallery opening",
    "Fitness — Gym/class pre/post",
    "Hobby — Book club first visit",
];

pub const AUDIENCES: &[&str] = &[
    "Work — Colleague from another department",
    "Work — New hire you just met",
    "Work — Manager from another team",
    "Date — Returning to dating",
    "Date — Thoughtful book-lover",
    "Friends — Friend-of-a-friend",
    "Family — Couple with a toddler",
    "Neighbors — Elderly neighbor",
    "Neighbors — New young family",
    "Hobby — Amateur photographer",
    "Fitness — Casual runner / gym-goer",
    "Culture — Gallery-goer",
];

pub const SCENARIOS: &[ScenarioOption] = &[
    ScenarioOption {
        id: "corporate",
        title: "Corporate",
        description: "Work event, cross-team mixer",
    },
    ScenarioOption {
        id: "date",
        title: "Date",
        description: "Light first date or coffee chat",
    },
];

pub const PERSONAS: &[PersonaOption] = &[
    PersonaOption {
        id: "corp_peer",
        scenario_id: "corporate",
        title: "Colleague (peer)",
        description: "Friendly, curious, from another team",
    },
    PersonaOption {
        id: "corp_manager",
        scenario_id: "corporate",
        title: "Manager (other team)",
        description: "Supportive, concise, time-aware",
    },
    PersonaOption {
        id: "corp_new_hire",
        scenario_id: "corporate",
        title: "New Hire",
        description: "Eager, exploring, open to tips",
    },
    PersonaOption {
        id: "corp_designer",
        scenario_id: "corporate",
        title: "Product Designer",
        description: "Practical, visual thinker, loves examples",
    },
    PersonaOption {
        id: "corp_data_analyst",
        scenario_id: "corporate",
        title: "Data Analyst",
        description: "Curious, enjoys small facts and patterns",
    },
    PersonaOption {
        id: "corp_sales_rep",
        scenario_id: "corporate",
        title: "Sales Rep",
        description: "Energetic, story-driven, people-focused",
    },
    PersonaOption {
        id: "corp_remote_worker",
        scenario_id: "corporate",
        title: "Remote Teammate",
        description: "Calm, appreciates routines and tools",
    },
    PersonaOption {
        id: "corp_contractor",
        scenario_id: "corporate",
        title: "Contractor",
        description: "Pragmatic, project-based, cross-company",
    },
    PersonaOption {
        id: "corp_hr_partner",
        scenario_id: "corporate",
        title: "HR Partner",
        description: "Warm, people-first, mindful of tone",
    },
    PersonaOption {
        id: "corp_ops_engineer",
        scenario_id: "corporate",
        title: "Ops Engineer",
        description: "Quietly practical, enjoys solving glitches",
    },
    PersonaOption {
        id: "corp_marketer",
        scenario_id: "corporate",
        title: "Marketing",
        description: "Trends-aware, likes campaigns and events",
    },
    PersonaOption {
        id: "corp_intern",
        scenario_id: "corporate",
        title: "Intern",
        description: "Learning fast, curious about teams and paths",
    },
    PersonaOption {
        id: "corp_returnee",
        scenario_id: "corporate",
        title: "Returnee",
        description: "Back from leave, easing into updates",
    },
    PersonaOption {
        id: "date_returning",
        scenario_id: "date",
        title: "Returning to Dating",
        description: "Warm, a bit cautious, sincere",
    },
    PersonaOption {
        id: "date_book_lover",
        scenario_id: "date",
        title: "Book Lover",
        description: "Thoughtful, curious, story-friendly",
    },
    PersonaOption {
        id: "date_foodie",
        scenario_id: "date",
        title: "Foodie",
        description: "Playful, loves local spots",
    },
    PersonaOption {
        id: "date_outdoors",
        scenario_id: "date",
        title: "Outdoors Fan",
        description: "Light, nature-loving, weekend hikes",
    },
    PersonaOption {
        id: "date_music_fan",
        scenario_id: "date",
        title: "Music Fan",
        description: "Gigs, playlists, curious about venues",
    },
    PersonaOption {
        id: "date_pet_owner",
        scenario_id: "date",
        title: "Pet Owner",
        description: "Warm, playful, everyday stories",
    },
    PersonaOption {
        id: "date_traveler",
        scenario_id: "date",
        title: "Traveler",
        description: "City walks, small discoveries over big trips",
    },
    PersonaOption {
        id: "date_cinema_buff",
        scenario_id: "date",
        title: "Cinema Buff",
        description: "Likes recs, light spoilers only",
    },
    PersonaOption {
        id: "date_art_teacher",
        scenario_id: "date",
        title: "Art Teacher",
        description: "Patient, creative, loves small exhibitions",
    },
    PersonaOption {
        id: "date_science_nerd",
        scenario_id: "date",
        title: "Science Nerd",
        description: "Fun facts, simple explanations, kind tone",
    },
    PersonaOption {
        id: "date_calm_introvert",
        scenario_id: "date",
        title: "Calm Introvert",
        description: "Gentle pace, appreciates open prompts",
    },
    PersonaOption {
        id: "date_extrovert_fun",
        scenario_id: "date",
        title: "Lively Extrovert",
        description: "Playful, enjoys banter and stories",
    },
];

/// Personas belonging to one scenario, in catalog order.
pub fn personas_for(scenario_id: &str) -> Vec<&'static PersonaOption> {
    PERSONAS.iter().filter(|persona| persona.scenario_id == scenario_id).collect()
}

/// The persona with the given id, if present.
pub fn persona(id: &str) -> Option<&'static PersonaOption> {
    PERSONAS.iter().find(|persona| persona.id == id)
}

/// A random selection of up to `count` personas across all scenarios.
pub fn random_personas(count: usize) -> Vec<&'static PersonaOption> {
    let mut selection: Vec<_> = PERSONAS.iter().collect();
    selection.shuffle(&mut rand::thread_rng());
    selection.truncate(count);
    selection
}
