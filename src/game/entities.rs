//! # Entities Module
//!
//! Templates and live instances for everything that occupies a floor.
//!
//! A template is an immutable description (a "Goblin", a "Rusty Sword"); an
//! instance owns a copy of its template and adds the per-instance state that
//! changes during play (position, current health, collected flag).

use super::{EntityId, Position};
use crate::balance;
use serde::{Deserialize, Serialize};

/// How a monster moves once it has noticed the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterBehavior {
    /// Closes in on the player
    Aggressive,
    /// Also closes in; differs only in narration
    Passive,
    /// Keeps its distance (does not pursue)
    Fleeing,
    /// Never moves
    Stationary,
}

impl MonsterBehavior {
    /// Whether a monster with this behavior paths toward the player.
    pub fn pursues(self) -> bool {
        matches!(self, MonsterBehavior::Aggressive | MonsterBehavior::Passive)
    }
}

/// Attitude toward the player. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterDisposition {
    Hostile,
    Neutral,
    Friendly,
}

/// Immutable description of a monster species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    pub damage: i32,
    /// Chance to act each turn, in `[0, 1]`
    pub speed: f64,
    pub behavior: MonsterBehavior,
    pub disposition: MonsterDisposition,
    pub symbol: char,
    pub color: String,
}

/// A monster living on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub instance_id: EntityId,
    pub template: MonsterTemplate,
    pub position: Position,
    pub current_hp: i32,
}

impl Monster {
    /// Instantiates a template at full health.
    pub fn new(instance_id: EntityId, template: MonsterTemplate, position: Position) -> Self {
        let current_hp = template.max_hp;
        Self {
            instance_id,
            template,
            position,
            current_hp,
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// A monster at zero health or below is dead even before removal.
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }
}

/// Item categories, each with its own pickup effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// `effect` is bonus damage
    Weapon,
    /// `effect` is damage reduction
    Armor,
    /// `effect` is health restored
    Consumable,
    Key,
    /// `effect` is the amount of gold
    Gold,
}

/// Immutable description of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub effect: i32,
    pub symbol: char,
    pub color: String,
}

/// An item lying on a floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub instance_id: EntityId,
    pub template: ItemTemplate,
    pub position: Position,
}

impl Item {
    pub fn new(instance_id: EntityId, template: ItemTemplate, position: Position) -> Self {
        Self {
            instance_id,
            template,
            position,
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }
}

/// Flavor quirk carried by some macguffins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacguffinQuirk {
    Fragile,
    Glowing,
    Heavy,
    AttractsEnemies,
}

/// Immutable description of a quest object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacguffinTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub symbol: char,
    pub color: String,
    pub quirk: Option<MacguffinQuirk>,
}

/// The floor's quest object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macguffin {
    pub instance_id: EntityId,
    pub template: MacguffinTemplate,
    pub position: Position,
    /// Flips to true exactly once
    pub collected: bool,
}

impl Macguffin {
    pub fn new(instance_id: EntityId, template: MacguffinTemplate, position: Position) -> Self {
        Self {
            instance_id,
            template,
            position,
            collected: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub weapon: Option<ItemTemplate>,
    pub armor: Option<ItemTemplate>,
    /// Reserved slot, never filled by pickups
    pub trinket: Option<ItemTemplate>,
    pub gold: u32,
    pub keys: u32,
    pub has_macguffin: bool,
}

impl Player {
    /// Creates a fresh player at full health with nothing equipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{Player, Position};
    ///
    /// let player = Player::new(Position::new(5, 5));
    /// assert_eq!(player.hp, player.max_hp);
    /// assert_eq!(player.attack_damage(), 2);
    /// ```
    pub fn new(position: Position) -> Self {
        Self {
            position,
            hp: balance::PLAYER_STARTING_HP,
            max_hp: balance::PLAYER_STARTING_HP,
            weapon: None,
            armor: None,
            trinket: None,
            gold: 0,
            keys: 0,
            has_macguffin: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Base damage plus the equipped weapon's bonus.
    pub fn attack_damage(&self) -> i32 {
        balance::PLAYER_BASE_DAMAGE + self.weapon.as_ref().map_or(0, |weapon| weapon.effect)
    }

    /// Damage absorbed by the equipped armor.
    pub fn damage_reduction(&self) -> i32 {
        self.armor.as_ref().map_or(0, |armor| armor.effect)
    }

    /// Name of the equipped weapon, for display and narration.
    pub fn weapon_name(&self) -> &str {
        self.weapon
            .as_ref()
            .map_or("bare fists", |weapon| weapon.name.as_str())
    }

    /// Restores up to `amount` health without exceeding the maximum.
    ///
    /// Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.min(self.max_hp - self.hp).max(0);
        self.hp += healed;
        healed
    }
}
