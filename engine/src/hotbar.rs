//! Legacy hotbar-macro recognition: extracts the actor/item reference from
//! the command text of macros written by older helper modules, so their
//! buttons can be mapped back to inventory items.

use std::sync::LazyLock;

use regex::Regex;

/// Reference extracted from a macro's command text. Ids and names are
/// whatever the macro carried; resolution against the world is the
/// caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTarget {
    pub actor_id: Option<String>,
    pub actor_name: Option<String>,
    pub item_id: Option<String>,
    pub item_name: Option<String>,
    pub item_type: Option<String>,
}

// The JS originals paired quotes with backreferences; the regex crate has
// none, so opening and closing quotes match independently from one class.
static MACRO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Legacy dnd5e system Roll Item macros
        r#"^\s*game\s*\.\s*dnd5e\s*\.\s*rollItemMacro\s*\(\s*["'`](?P<itemName>[^"'`]+)["'`]\s*\)\s*;?\s*$"#,
        r#"^\s*game\s*\.\s*dnd5e\s*\.macros\s*\.\s*rollItem\s*\(\s*["'`](?P<itemName>[^"'`]+)["'`]\s*\)\s*;?\s*$"#,
        // Standard dnd5e system Roll Item macro
        r#"^\s*dnd5e\s*\.\s*documents\s*\.macro\s*\.\s*rollItem\s*\(\s*["'`](?P<itemName>[^"'`]+)["'`]\s*\)\s*;?\s*$"#,
        // MinorQOL.doRoll
        r#"(?s)MinorQOL\.doRoll\(event, "(?P<itemName>[^"]+)", \{type: "(?P<itemType>[^"]+)".*\}\);?"#,
        // BetterRolls.quickRoll(itemName)
        r#"^\s*BetterRolls\s*\.\s*quickRoll\s*\(\s*["'`](?P<itemName>[^"'`]+)["'`]\s*\)\s*;?\s*$"#,
        // BetterRolls.vanillaRoll(actorId, itemId) / quickRollById(actorId, itemId)
        r#"^\s*BetterRolls\s*\.\s*(vanillaRoll|quickRollById)\s*\(\s*["'`](?P<actorID>[^"'`]+)["'`]\s*,\s*["'`](?P<itemID>[^"'`]+)["'`]\s*\)\s*;?\s*$"#,
        // BetterRolls.quickRollByName(actorName, itemName)
        r#"^\s*BetterRolls\s*\.\s*quickRollByName\s*\(\s*["'`](?P<actorName>[^"'`]+)["'`]\s*,\s*["'`](?P<itemName>[^"'`]+)["'`]\s*\)\s*;?\s*$"#,
        // BetterRolls 1.5.0 macros
        r#"(?is)^const actorId = "(?P<actorID>[^"]+)";\nconst itemId = "(?P<itemID>[^"]+)";\nconst actorToRoll = [^\n]*;\nconst itemToRoll = actorToRoll\?\.items\.get\(itemId\);"#,
        // ItemMacro.runMacro(actorId, itemId)
        r#"^\s*ItemMacro\s*\.\s*runMacro\s*\(\s*["'`](?P<actorID>[^"'`]+)["'`]\s*,\s*["'`](?P<itemID>[^"'`]+)["'`]\s*\)\s*;?\s*$"#,
        // Comment: // HotbarUses5e: ActorID="X" ItemID="Y"
        r#"(?is)^(.*\n)?\s*//\s*HotbarUses5e:\s*ActorID\s*=\s*["'`](?P<actorID>[^"'`]+)["'`]\s*ItemID\s*=\s*["'`](?P<itemID>[^"'`]+)["'`]\s*(\n.*)?$"#,
        // Comments: // HotbarUses5e: ActorName="X" ItemName="Y" ItemType="Z"
        // (ActorName and ItemType optional)
        r#"(?is)^(.*\n)?\s*//\s*HotbarUses5e:\s*(ActorName\s*=\s*["'`](?P<actorName>[^"'`]+)["'`]\s*)?ItemName\s*=\s*["'`](?P<itemName>[^"'`]+)["'`]\s*ItemType\s*=\s*["'`](?P<itemType>[^"'`]+)["'`]\s*(\n.*)?$"#,
        r#"(?is)^(.*\n)?\s*//\s*HotbarUses5e:\s*(ActorName\s*=\s*["'`](?P<actorName>[^"'`]+)["'`]\s*)?ItemName\s*=\s*["'`](?P<itemName>[^"'`]+)["'`]\s*(\n.*)?$"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("macro pattern must compile"))
    .collect()
});

/// First pattern match wins, mirroring the order the helper modules were
/// historically probed in.
pub fn parse_macro_command(command: &str) -> Option<MacroTarget> {
    MACRO_PATTERNS
        .iter()
        .find_map(|re| re.captures(command))
        .map(|caps| MacroTarget {
            actor_id: caps.name("actorID").map(|m| m.as_str().to_string()),
            actor_name: caps.name("actorName").map(|m| m.as_str().to_string()),
            item_id: caps.name("itemID").map(|m| m.as_str().to_string()),
            item_name: caps.name("itemName").map(|m| m.as_str().to_string()),
            item_type: caps.name("itemType").map(|m| m.as_str().to_string()),
        })
}
