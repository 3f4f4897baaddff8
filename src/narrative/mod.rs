//! # Narrative Module
//!
//! The boundary between the engine and an optional text-generation
//! collaborator.
//!
//! After a turn the session turns notable events into [`NarrativeRequest`]s,
//! captures a [`NarrativeContext`] snapshot, and asks its [`Narrator`] for
//! flavor text. Whatever comes back is appended to the message log; nothing
//! in the game depends on it.

pub mod prompts;
pub mod traits;

pub use traits::*;

use crate::game::{GameEvent, GameState, TurnOutcome};
use crate::{balance, RogulatorError, RogulatorResult};
use serde::{Deserialize, Serialize};

/// Cost class of a request, from cheap and frequent to rare and important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeTier {
    Quick,
    Standard,
    Premium,
}

/// A monster near the player, as seen by the narrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSummary {
    pub name: String,
    pub hp: i32,
}

/// Snapshot of the game handed to the narrator alongside each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeContext {
    pub floor_number: u32,
    /// Room type name, or `"corridor"` outside every room
    pub room_type: String,
    /// `"hp/max"`
    pub player_hp: String,
    pub player_weapon: String,
    pub has_macguffin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macguffin_name: Option<String>,
    pub nearby_monsters: Vec<MonsterSummary>,
    /// Texts of the most recent log messages, oldest first
    pub recent_events: Vec<String>,
}

impl NarrativeContext {
    /// Captures the narrator's view of `state`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{GameState, NarrativeContext, RunConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let state = GameState::new_game(RunConfig::default(), &mut StdRng::seed_from_u64(2));
    /// let context = NarrativeContext::capture(&state);
    /// assert_eq!(context.room_type, "entry");
    /// assert_eq!(context.player_hp, "30/30");
    /// assert_eq!(context.player_weapon, "bare fists");
    /// ```
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let radius = balance::NARRATIVE_RADIUS;

        let room_type = state
            .floor
            .room_at(player.position)
            .map_or_else(|| "corridor".to_string(), |room| room.room_type.to_string());

        let nearby_monsters = state
            .floor
            .living_monsters()
            .filter(|monster| {
                (monster.position.x - player.position.x).abs() <= radius
                    && (monster.position.y - player.position.y).abs() <= radius
            })
            .map(|monster| MonsterSummary {
                name: monster.name().to_string(),
                hp: monster.current_hp,
            })
            .collect();

        Self {
            floor_number: state.floor.number,
            room_type,
            player_hp: format!("{}/{}", player.hp, player.max_hp),
            player_weapon: player.weapon_name().to_string(),
            has_macguffin: player.has_macguffin,
            macguffin_name: state
                .floor
                .macguffin
                .as_ref()
                .map(|macguffin| macguffin.name().to_string()),
            nearby_monsters,
            recent_events: state
                .recent_messages(balance::NARRATIVE_RECENT_EVENTS)
                .map(|message| message.text.clone())
                .collect(),
        }
    }

    /// Pretty-printed JSON, the form embedded in prompts.
    pub fn to_json(&self) -> RogulatorResult<String> {
        serde_json::to_string_pretty(self).map_err(RogulatorError::from)
    }
}

/// Something worth narrating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NarrativeRequest {
    /// The player just entered a room
    RoomDescription,
    Combat {
        attacker: String,
        target: String,
        damage: i32,
        target_hp: i32,
        was_kill: bool,
    },
    /// A monster waits in the room the player just entered
    MonsterEncounter { monster_name: String },
    MacguffinPickup { name: String, description: String },
    Victory {
        macguffin_name: String,
        turns: u64,
        monsters_defeated: u32,
    },
    Defeat { killed_by: String, floor_number: u32 },
}

impl NarrativeRequest {
    pub fn tier(&self) -> NarrativeTier {
        match self {
            NarrativeRequest::RoomDescription | NarrativeRequest::Combat { .. } => {
                NarrativeTier::Quick
            }
            NarrativeRequest::MonsterEncounter { .. } | NarrativeRequest::MacguffinPickup { .. } => {
                NarrativeTier::Standard
            }
            NarrativeRequest::Victory { .. } | NarrativeRequest::Defeat { .. } => {
                NarrativeTier::Premium
            }
        }
    }

    /// Builds the user prompt for this request.
    pub fn prompt(&self, context: &NarrativeContext) -> RogulatorResult<String> {
        let prompt = match self {
            NarrativeRequest::RoomDescription => prompts::room_description(&context.to_json()?),
            NarrativeRequest::Combat {
                attacker,
                target,
                damage,
                target_hp,
                was_kill,
            } => prompts::combat_narration(attacker, target, *damage, *target_hp, *was_kill),
            NarrativeRequest::MonsterEncounter { monster_name } => {
                prompts::monster_encounter(monster_name, &context.to_json()?)
            }
            NarrativeRequest::MacguffinPickup { name, description } => {
                prompts::macguffin_pickup(name, description)
            }
            NarrativeRequest::Victory {
                macguffin_name,
                turns,
                monsters_defeated,
            } => prompts::victory(macguffin_name, *turns, *monsters_defeated),
            NarrativeRequest::Defeat {
                killed_by,
                floor_number,
            } => prompts::defeat(killed_by, *floor_number),
        };
        Ok(prompt)
    }

    /// Requests worth making after a resolved turn, in event order.
    ///
    /// `state` must be the state after the turn, so that counters and the
    /// macguffin description are current.
    pub fn from_outcome(outcome: &TurnOutcome, state: &GameState) -> Vec<NarrativeRequest> {
        let mut requests = Vec::new();
        for event in &outcome.events {
            match event {
                GameEvent::RoomEntered { room_id, .. } => {
                    requests.push(NarrativeRequest::RoomDescription);
                    let lurker = state.floor.room(*room_id).and_then(|room| {
                        state
                            .floor
                            .living_monsters()
                            .find(|monster| room.contains(monster.position))
                    });
                    if let Some(monster) = lurker {
                        requests.push(NarrativeRequest::MonsterEncounter {
                            monster_name: monster.name().to_string(),
                        });
                    }
                }
                GameEvent::PlayerAttacked {
                    monster_name,
                    damage,
                    killed: true,
                    ..
                } => requests.push(NarrativeRequest::Combat {
                    attacker: "the player".to_string(),
                    target: monster_name.clone(),
                    damage: *damage,
                    target_hp: 0,
                    was_kill: true,
                }),
                GameEvent::MacguffinCollected { name } => {
                    let description = state
                        .floor
                        .macguffin
                        .as_ref()
                        .map(|macguffin| macguffin.template.description.clone())
                        .unwrap_or_default();
                    requests.push(NarrativeRequest::MacguffinPickup {
                        name: name.clone(),
                        description,
                    });
                }
                GameEvent::Victory => requests.push(NarrativeRequest::Victory {
                    macguffin_name: state
                        .floor
                        .macguffin
                        .as_ref()
                        .map_or_else(|| "treasure".to_string(), |m| m.name().to_string()),
                    turns: state.turn,
                    monsters_defeated: state.statistics.monsters_defeated,
                }),
                GameEvent::PlayerDied { killed_by } => requests.push(NarrativeRequest::Defeat {
                    killed_by: killed_by.clone(),
                    floor_number: state.floor_number,
                }),
                _ => {}
            }
        }
        requests
    }
}
