//! Remaining-uses calculator for dnd5e-style items: spell slots, charges,
//! ammunition and consumable quantity, as shown next to the HUD buttons.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How many uses remain on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemUses {
    pub available: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(default)]
    pub is_ammunition: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Spell,
    Weapon,
    Feat,
    Consumable,
    Loot,
    Equipment,
    Tool,
    Backpack,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitedUses {
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumeKind {
    Attribute,
    Ammo,
    Material,
    Charges,
}

/// A `consume` block: using this item spends something else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consume {
    #[serde(rename = "type")]
    pub kind: ConsumeKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default = "one")]
    pub amount: i64,
}

fn one() -> i64 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreparationMode {
    Prepared,
    Always,
    Pact,
    Innate,
    Atwill,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recharge {
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub charged: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProperties {
    /// Thrown.
    #[serde(default)]
    pub thr: bool,
    /// Returning.
    #[serde(default)]
    pub ret: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default = "one")]
    pub quantity: i64,
    #[serde(default)]
    pub uses: Option<LimitedUses>,
    #[serde(default)]
    pub consume: Option<Consume>,
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub preparation_mode: Option<PreparationMode>,
    #[serde(default)]
    pub recharge: Option<Recharge>,
    #[serde(default)]
    pub properties: WeaponProperties,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    pub value: i64,
    pub max: i64,
}

/// The slice of actor state the calculator reads: owned items by id,
/// slot pools by name ("pact", "spell1", ...), and free-form attributes
/// addressed by dotted path for `consume.type == attribute`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActorResources {
    pub items: IndexMap<String, Item>,
    pub spells: IndexMap<String, SpellSlots>,
    pub attributes: Value,
}

impl ActorResources {
    pub fn attribute_number(&self, path: &str) -> Option<f64> {
        let mut node = &self.attributes;
        for part in path.split('.') {
            node = node.get(part)?;
        }
        node.as_f64()
    }
}

/// Compute the remaining uses for one item, or `None` when the item has no
/// use-counting semantics at all.
pub fn uses_for_item(actor: &ActorResources, item: &Item) -> Option<ItemUses> {
    if let Some(consume) = item.consume.as_ref() {
        if consume.target.is_some() {
            return consume_uses(actor, consume);
        }
    }
    if let Some(uses) = item.uses {
        if uses.max > 0 || uses.value > 0 {
            return Some(limited_uses(uses, item.quantity));
        }
    }
    match item.kind {
        ItemKind::Feat => feat_uses(item),
        ItemKind::Consumable | ItemKind::Loot => Some(ItemUses {
            available: item.quantity,
            maximum: None,
            is_ammunition: false,
        }),
        ItemKind::Spell => spell_uses(actor, item),
        ItemKind::Weapon => weapon_uses(item),
        _ => None,
    }
}

/// Per-charge uses scaled by item quantity: a stack of three 5-charge
/// wands with 2 left on the open one shows 12/15.
fn limited_uses(uses: LimitedUses, quantity: i64) -> ItemUses {
    let mut available = uses.value;
    let mut maximum = uses.max;
    if quantity > 0 {
        available += (quantity - 1) * maximum;
        maximum *= quantity;
    }
    ItemUses {
        available,
        maximum: Some(maximum),
        is_ammunition: false,
    }
}

fn consume_uses(actor: &ActorResources, consume: &Consume) -> Option<ItemUses> {
    let target = consume.target.as_deref()?;
    let (mut available, mut maximum) = match consume.kind {
        ConsumeKind::Attribute => (
            actor.attribute_number(target).map_or(0, |v| v as i64),
            None,
        ),
        ConsumeKind::Ammo | ConsumeKind::Material => {
            (actor.items.get(target).map_or(0, |t| t.quantity), None)
        }
        ConsumeKind::Charges => match actor.items.get(target) {
            Some(t) => match t.uses {
                Some(uses) => {
                    let u = limited_uses(uses, t.quantity);
                    (u.available, u.maximum)
                }
                None => (0, None),
            },
            None => (0, None),
        },
    };
    if consume.amount > 1 {
        available = available.div_euclid(consume.amount);
        if let Some(m) = maximum {
            maximum = Some(m.div_euclid(consume.amount));
        }
    }
    Some(ItemUses {
        available,
        maximum,
        is_ammunition: true,
    })
}

fn feat_uses(item: &Item) -> Option<ItemUses> {
    let recharge = item.recharge?;
    recharge.value?;
    Some(ItemUses {
        available: if recharge.charged { 1 } else { 0 },
        maximum: Some(1),
        is_ammunition: false,
    })
}

fn spell_uses(actor: &ActorResources, item: &Item) -> Option<ItemUses> {
    let slots = match item.preparation_mode {
        Some(PreparationMode::Pact) => actor.spells.get("pact")?,
        Some(PreparationMode::Innate) | Some(PreparationMode::Atwill) => return None,
        _ => {
            if item.level <= 0 {
                return None;
            }
            actor.spells.get(&format!("spell{}", item.level))?
        }
    };
    Some(ItemUses {
        available: slots.value,
        maximum: Some(slots.max),
        is_ammunition: false,
    })
}

fn weapon_uses(item: &Item) -> Option<ItemUses> {
    // Thrown and not returning: quantity is the use count.
    if item.properties.thr && !item.properties.ret {
        return Some(ItemUses {
            available: item.quantity,
            maximum: None,
            is_ammunition: false,
        });
    }
    None
}
