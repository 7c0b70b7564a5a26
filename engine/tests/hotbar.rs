use engine::hotbar::parse_macro_command;

#[test]
fn legacy_dnd5e_roll_item_by_name() {
    let target = parse_macro_command(r#"game.dnd5e.rollItemMacro("Torch");"#).unwrap();
    assert_eq!(target.item_name.as_deref(), Some("Torch"));
    assert!(target.item_id.is_none());

    let target = parse_macro_command(r#"game.dnd5e.macros.rollItem('Lamp')"#).unwrap();
    assert_eq!(target.item_name.as_deref(), Some("Lamp"));
}

#[test]
fn modern_dnd5e_roll_item_by_name() {
    let target = parse_macro_command(r#"dnd5e.documents.macro.rollItem("Hooded Lantern");"#).unwrap();
    assert_eq!(target.item_name.as_deref(), Some("Hooded Lantern"));
}

#[test]
fn minor_qol_carries_the_item_type() {
    let command = r#"MinorQOL.doRoll(event, "Torch", {type: "consumable", versatile: false});"#;
    let target = parse_macro_command(command).unwrap();
    assert_eq!(target.item_name.as_deref(), Some("Torch"));
    assert_eq!(target.item_type.as_deref(), Some("consumable"));
}

#[test]
fn better_rolls_by_id_and_by_name() {
    let target = parse_macro_command(r#"BetterRolls.quickRollById("actor9", "item4");"#).unwrap();
    assert_eq!(target.actor_id.as_deref(), Some("actor9"));
    assert_eq!(target.item_id.as_deref(), Some("item4"));

    let target = parse_macro_command(r#"BetterRolls.vanillaRoll("a1", "i1")"#).unwrap();
    assert_eq!(target.actor_id.as_deref(), Some("a1"));
    assert_eq!(target.item_id.as_deref(), Some("i1"));

    let target =
        parse_macro_command(r#"BetterRolls.quickRollByName("Mialee", "Dancing Lights")"#).unwrap();
    assert_eq!(target.actor_name.as_deref(), Some("Mialee"));
    assert_eq!(target.item_name.as_deref(), Some("Dancing Lights"));

    let target = parse_macro_command(r#"BetterRolls.quickRoll("Candle")"#).unwrap();
    assert_eq!(target.item_name.as_deref(), Some("Candle"));
}

#[test]
fn better_rolls_150_two_line_macro() {
    let command = "const actorId = \"abc123\";\nconst itemId = \"def456\";\nconst actorToRoll = canvas.tokens.placeables.find(t => t.actor?.id === actorId)?.actor ?? game.actors.get(actorId);\nconst itemToRoll = actorToRoll?.items.get(itemId);";
    let target = parse_macro_command(command).unwrap();
    assert_eq!(target.actor_id.as_deref(), Some("abc123"));
    assert_eq!(target.item_id.as_deref(), Some("def456"));
}

#[test]
fn item_macro_run_macro() {
    let target = parse_macro_command(r#"ItemMacro.runMacro("actor2", "item8");"#).unwrap();
    assert_eq!(target.actor_id.as_deref(), Some("actor2"));
    assert_eq!(target.item_id.as_deref(), Some("item8"));
}

#[test]
fn hotbar_uses_comment_forms() {
    let command = "let x = 1;\n// HotbarUses5e: ActorID=\"a7\" ItemID=\"i3\"\nconsole.log(x);";
    let target = parse_macro_command(command).unwrap();
    assert_eq!(target.actor_id.as_deref(), Some("a7"));
    assert_eq!(target.item_id.as_deref(), Some("i3"));

    let command = "// HotbarUses5e: ActorName=\"Mialee\" ItemName=\"Torch\" ItemType=\"consumable\"";
    let target = parse_macro_command(command).unwrap();
    assert_eq!(target.actor_name.as_deref(), Some("Mialee"));
    assert_eq!(target.item_name.as_deref(), Some("Torch"));
    assert_eq!(target.item_type.as_deref(), Some("consumable"));

    // Name-only form, no actor and no type.
    let command = "// HotbarUses5e: ItemName=\"Torch\"";
    let target = parse_macro_command(command).unwrap();
    assert_eq!(target.item_name.as_deref(), Some("Torch"));
    assert!(target.actor_name.is_none());
    assert!(target.item_type.is_none());
}

#[test]
fn unrelated_commands_do_not_match() {
    assert!(parse_macro_command("game.togglePause(true);").is_none());
    assert!(parse_macro_command("").is_none());
    assert!(parse_macro_command("rollItemMacro without the namespace").is_none());
}
