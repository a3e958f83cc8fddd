//! Winterhold town and the College of Winterhold.
//!
//! Atmosphere is narrated on every visit; first-time beats and reactions to
//! the Staff of Cinders are guarded by scene flags.

use campaign_state::{Allegiance, CampaignState, SceneFlags};

/// Places covered by the Winterhold trigger set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinterholdSite {
    Town,
    FrozenHearth,
    JarlsLonghouse,
    CollegeBridge,
    CollegeCourtyard,
    HallOfElements,
    HallOfAttainment,
    Arcanaeum,
    Midden,
    ArchMageQuarters,
    Saarthal,
}

impl WinterholdSite {
    /// Resolve a normalised location key.
    pub fn from_key(key: &str) -> Option<Self> {
        let site = match key {
            "winterhold" | "winterhold_town" | "winterhold_ruins" => WinterholdSite::Town,
            "winterhold_frozen_hearth" | "frozen_hearth" => WinterholdSite::FrozenHearth,
            "winterhold_jarls_longhouse" | "jarls_longhouse" | "jarl_korir_court" => {
                WinterholdSite::JarlsLonghouse
            }
            "winterhold_college_bridge" | "college_bridge" => WinterholdSite::CollegeBridge,
            "college_courtyard" | "winterhold_college" => WinterholdSite::CollegeCourtyard,
            "college_hall_of_elements" | "hall_of_elements" => WinterholdSite::HallOfElements,
            "college_hall_of_attainment" | "hall_of_attainment" => WinterholdSite::HallOfAttainment,
            "college_arcanaeum" | "arcanaeum" | "college_library" => WinterholdSite::Arcanaeum,
            "college_midden" | "midden" => WinterholdSite::Midden,
            "college_arch_mage_quarters" | "arch_mage_quarters" => WinterholdSite::ArchMageQuarters,
            "saarthal_excavation" | "saarthal" => WinterholdSite::Saarthal,
            _ => return None,
        };
        Some(site)
    }
}

/// Collects events, emitting one-shot beats only the first time.
struct Narration<'a> {
    events: Vec<String>,
    flags: &'a mut SceneFlags,
}

impl Narration<'_> {
    fn say(&mut self, text: &str) {
        self.events.push(text.to_string());
    }

    fn once(&mut self, beat: &str, text: &str) {
        if self.flags.mark(beat) {
            self.say(text);
        }
    }
}

/// Events for a Winterhold or College location key.
pub fn winterhold_events(key: &str, state: &mut CampaignState) -> Vec<String> {
    let Some(site) = WinterholdSite::from_key(key) else {
        return Vec::new();
    };

    let member = state.player.college_member;
    let rank = state.player.college_rank().to_string();
    let has_staff = state.player.has_staff_of_cinders;
    let imperial = state.civil_war_state.player_alliance == Allegiance::Imperial;

    let mut n = Narration {
        events: Vec::new(),
        flags: &mut state.scene_flags,
    };

    match site {
        WinterholdSite::Town => {
            n.once(
                "winterhold_first_arrival",
                "Winterhold greets you like a half-remembered nightmare: broken streets, drifting \
                 snow, and the Sea of Ghosts gnawing at the cliff below. Most of the old city is \
                 gone, swallowed by the Great Collapse.",
            );
            if imperial {
                n.once(
                    "winterhold_imperial_tension",
                    "A pair of Winterhold guards watch you with cold arithmetic. Imperial colors \
                     earn a long stare here, where 'Empire' still sounds like 'occupation'.",
                );
            }
            if has_staff {
                n.once(
                    "staff_of_cinders_seen_in_town",
                    "A local fisherman notices the black-and-ember runes on your staff and goes \
                     pale. \"That's... Cindershroud.\" He says it like a warning prayer.",
                );
            }
            n.say("The wind here cuts like a lecture. Even the aurora looks judgmental.");
        }
        WinterholdSite::FrozenHearth => {
            n.say(
                "The Frozen Hearth is cramped warmth: stew, wet wool, and locals pretending \
                 they're not listening. Everyone is listening.",
            );
            if has_staff {
                n.once(
                    "staff_of_cinders_inn_reaction",
                    "A traveling bard falls silent mid-verse when he sees your staff. Then, very \
                     softly: \"I thought that heirloom was a story.\"",
                );
            }
        }
        WinterholdSite::JarlsLonghouse => {
            n.say(
                "Winterhold's court is small and sharp-edged. Even the banners look tired. The \
                 Jarl measures strangers by how much trouble they can become.",
            );
            if member {
                n.once(
                    "jarl_reacts_to_college",
                    "Korir's mouth tightens when he realizes you're College. \"Keep your spells on \
                     your side of the bridge,\" he says, as if the bridge were a treaty.",
                );
            }
        }
        WinterholdSite::CollegeBridge => {
            n.once(
                "college_bridge_first_time",
                "The bridge to the College is a thin line between two worlds: town and tower, \
                 suspicion and scholarship. The drop below is educational.",
            );
            if member {
                n.say(&format!(
                    "The wards recognize you, {rank}. The shimmer parts like a curtain, and the \
                     College's attention settles on you for a heartbeat before moving on."
                ));
            } else if n.flags.mark("college_admission_test_offered") {
                n.say(
                    "Faralda steps into your path, hands relaxed but ready. \"No one enters the \
                     College without demonstrating some measure of ability. Show me a spell, then \
                     we talk.\"",
                );
            } else {
                n.say("Faralda watches your hands. The air tastes faintly of wards and expectations.");
            }
            if has_staff {
                n.once(
                    "staff_of_cinders_college_notice",
                    "A student whispers as you pass: \"Those runes... that's not common \
                     enchantment.\" Another answers: \"That's not common anything.\"",
                );
            }
        }
        WinterholdSite::CollegeCourtyard => {
            n.say(
                "Inside the courtyard the wind feels tamer. Snow settles softly on old stone. The \
                 College carries itself like it expects the world to apologize.",
            );
            if member {
                n.once(
                    "college_first_lessons_hook",
                    "Tolfdir is mid-lecture, gesturing at an invisible diagram of reality. \"Ah! \
                     Good. Another mind willing to be wrong in public. Come, class is starting.\"",
                );
            }
        }
        WinterholdSite::HallOfElements => {
            n.say(
                "The Hall of the Elements hums with practiced danger: sparks that don't quite \
                 burn, frost that doesn't quite melt, and singed eyebrows nobody mentions.",
            );
            if member {
                n.once(
                    "college_students_intro_done",
                    "Onmund, Brelyna Maryon and J'zargo step out of the student crowd, your peers \
                     at last, sizing up the newcomer the faculty already seems to know.",
                );
            }
        }
        WinterholdSite::HallOfAttainment => {
            n.say(
                "The Hall of Attainment is quieter: sleeping quarters, murmured study, and a \
                 hundred ambitions stacked like books.",
            );
        }
        WinterholdSite::Arcanaeum => {
            n.say(
                "The Arcanaeum smells of ink and old leather, and its silence judges you. Urag \
                 gro-Shub guards the shelves like a dragon guards a hoard.",
            );
            if has_staff {
                n.once(
                    "staff_of_cinders_arcanaeum",
                    "Urag's eyes follow the staff's runes for a long moment. \"That enchantment is \
                     old.\" He pauses. \"Do not wave it near my books.\"",
                );
            }
        }
        WinterholdSite::Midden => {
            n.say(
                "The Midden is colder than the outside, not in temperature but in intent. Old \
                 experiments have left scratches in the stone like regret.",
            );
        }
        WinterholdSite::ArchMageQuarters => {
            n.say(
                "The Arch-Mage's quarters feel like a room that expects history to happen inside \
                 it. The air is clean; the politics are not.",
            );
        }
        WinterholdSite::Saarthal => {
            n.say(
                "Saarthal is a mouth in the ice. Lantern light spills across carved stone older \
                 than Nord songs, and the draugr inside have had centuries to practice patience.",
            );
            n.once(
                "saarthal_eye_of_magnus_hook",
                "Tolfdir clears his throat as if to apologize to the past. \"We may have found \
                 something. Something significant. Stay close.\"",
            );
        }
    }

    n.events
}
