//! # Prompt Templates
//!
//! Text sent to the narrator. The system prompt sets the voice; each builder
//! produces the user prompt for one kind of request.

/// Standing instructions for the narrator.
pub const SYSTEM_PROMPT: &str = "You are The Loom, the narrative engine for Rogulator, a roguelike dungeon crawler.
Your role is to weave engaging, atmospheric descriptions that bring the dungeon to life.

Style guidelines:
- Be concise but evocative (1-3 sentences typically)
- Match the tone to the situation (tense in combat, mysterious in exploration)
- Occasional dry humor is welcome
- Reference the player's state when relevant (low health = desperation, new weapon = confidence)
- Build connections between encounters when possible
- Never break the fourth wall unless specifically appropriate

The dungeon aesthetic: A strange place between mundane and mythic.
A \"grocery run\" might be a corner store that's somehow become a labyrinth.
Goblins might be former employees. Rats are just rats, but unsettlingly large.";

pub fn room_description(context_json: &str) -> String {
    format!(
        "Given this game state:\n{}\n\nGenerate a brief atmospheric description of the room the player just entered.\n1-2 sentences. Focus on mood and any notable features.",
        context_json
    )
}

pub fn combat_narration(
    attacker: &str,
    target: &str,
    damage: i32,
    target_hp: i32,
    was_kill: bool,
) -> String {
    let remaining = if was_kill {
        "DEFEATED".to_string()
    } else {
        target_hp.to_string()
    };
    format!(
        "Narrate this combat action in one vivid sentence:\n- Attacker: {}\n- Target: {}\n- Damage dealt: {}\n- Target HP remaining: {}\n\nBe dramatic but brief. Vary your descriptions.",
        attacker, target, damage, remaining
    )
}

pub fn monster_encounter(monster_name: &str, context_json: &str) -> String {
    format!(
        "A {} is encountered.\n\nGame context:\n{}\n\nGenerate a brief (1 sentence) description of how this creature appears or reacts to the player.",
        monster_name, context_json
    )
}

pub fn macguffin_pickup(name: &str, description: &str) -> String {
    format!(
        "The player just picked up the {}.\nDescription: {}\n\nGenerate a brief (1-2 sentences) moment of acquisition. Make it feel significant but not overwrought.",
        name, description
    )
}

pub fn victory(macguffin_name: &str, turns: u64, monsters_defeated: u32) -> String {
    format!(
        "The player escaped the dungeon with the {}!\n- Turns taken: {}\n- Enemies defeated: {}\n\nGenerate a brief (2-3 sentences) victory message. Acknowledge their accomplishment with appropriate gravitas or humor depending on the macguffin.",
        macguffin_name, turns, monsters_defeated
    )
}

pub fn defeat(killed_by: &str, floor_number: u32) -> String {
    format!(
        "The player was defeated by a {} on floor {}.\n\nGenerate a brief (1-2 sentences) death message. Dark but not cruel. Maybe a touch of dark humor.",
        killed_by, floor_number
    )
}
