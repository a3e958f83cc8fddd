//! Whiterun and its districts, with siege narration during the Battle of Whiterun.

use campaign_state::{Allegiance, CampaignState};

/// Events for a Whiterun location key.
///
/// While the battle is active every Whiterun event list opens with a siege
/// header, and district text escalates with the battle stage.
pub fn whiterun_events(key: &str, state: &CampaignState) -> Vec<String> {
    let mut events = Vec::new();
    if !key.contains("whiterun") {
        return events;
    }

    let civil_war = &state.civil_war_state;
    let siege = civil_war.siege_active();
    let stage = civil_war.siege_stage();
    let faction = civil_war.battle_of_whiterun_faction;

    if siege {
        let label = faction.map(|f| f.display_name()).unwrap_or("Unknown");
        events.push(format!("[Battle of Whiterun | {label} | Stage {stage}/5]"));
    }

    let district = if key.contains("plains") {
        Some(plains_district(siege, stage))
    } else if key.contains("wind") {
        Some(wind_district(siege, stage))
    } else if key.contains("cloud") {
        Some(cloud_district(siege, stage))
    } else if key.starts_with("whiterun") {
        Some(if siege {
            "Whiterun is at war. Improvised barricades brace the gates and the guards' faces are \
             grim. Every entrance is watched. The city you knew is a battlefield now."
        } else {
            "The gates of Whiterun stand before you. Guards watch from the walls as merchants and \
             travelers pass through the ancient stone gateway."
        })
    } else {
        None
    };
    events.extend(district.map(str::to_string));

    let party = &state.companions;
    if siege {
        if party.is_present("hadvar") {
            events.push(
                if faction == Some(Allegiance::Imperial) {
                    "Hadvar scans the street and nods grimly. \"Hold the line. We protect these \
                     people. That's why we're here.\""
                } else {
                    "Hadvar is tense beside you. He says nothing, but his hand never leaves his \
                     sword hilt."
                }
                .to_string(),
            );
        }
        if party.is_present("ralof") {
            events.push(
                if faction == Some(Allegiance::Stormcloak) {
                    "Ralof grips your arm. \"Push forward! Skyrim is watching what we do here.\""
                } else {
                    "Ralof surveys the fighting with a complicated expression. He says nothing, \
                     but you can see him weighing every step."
                }
                .to_string(),
            );
        }
    } else if key.starts_with("whiterun") && party.is_present("lydia") {
        events.push(
            "Lydia smiles as she looks around. \"It's good to be back in Whiterun, my Thane,\" \
             she says softly."
                .to_string(),
        );
    }

    events
}

fn plains_district(siege: bool, stage: u8) -> &'static str {
    match (siege, stage) {
        (true, 3..) => {
            "The Plains District is a war zone. Market stalls lie overturned, fire licks at the \
             Bannered Mare's eaves, and Imperial and Stormcloak dead share the cobblestones."
        }
        (true, _) => {
            "The Plains District is on edge. Merchants have shuttered their stalls and armed \
             guards patrol in force. The sound of battle echoes off the stone walls."
        }
        (false, _) => {
            "You enter the bustling Plains District. Merchants call out their wares, and the \
             smell of fresh bread drifts from the Bannered Mare."
        }
    }
}

fn wind_district(siege: bool, stage: u8) -> &'static str {
    match (siege, stage) {
        (true, 4..) => {
            "The Wind District is contested. Ash speckles the Gildergreen's branches, Jorrvaskr's \
             doors are barred, and steel rings where prayers once echoed."
        }
        (true, _) => {
            "The Wind District is braced for violence. Citizens have retreated indoors and the \
             healers of Kynareth's temple move urgently between the wounded."
        }
        (false, _) => {
            "The Wind District stretches before you. The Gildergreen's branches sway gently, and \
             Jorrvaskr's mead hall stands proud among the homes."
        }
    }
}

fn cloud_district(siege: bool, stage: u8) -> &'static str {
    match (siege, stage) {
        (true, 1..) => {
            "The Cloud District is locked down. Dragonsreach's great doors are sealed from \
             within and guards hold the bridge chokepoint. The air smells of smoke and steel."
        }
        (true, _) => {
            "You climb to the Cloud District under a sky heavy with tension. Dragonsreach looms \
             above, its banners snapping in a wind that carries distant war drums."
        }
        (false, _) => {
            "You climb to the Cloud District. Dragonsreach looms above, its ancient Nordic \
             architecture a testament to Whiterun's storied past."
        }
    }
}
