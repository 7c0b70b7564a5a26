use clap::{Parser, Subcommand, ValueEnum};
use std::{fs, path::PathBuf};

use engine::dialog::confirm_source_toggle;
use engine::memory::MemoryHost;
use engine::roll::Dice;
use engine::uses::{ActorResources, uses_for_item};
use engine::{
    Catalog, FlagOwner, LightingProfile, RequestedProfile, Settings, TokenRef, builtin_lights,
    builtin_visions, resolve_traced,
};

#[derive(Copy, Clone, ValueEnum)]
enum Kind {
    Lights,
    Visions,
}

#[derive(Subcommand)]
enum Cmd {
    /// List a preset catalog (builtin, or loaded from a YAML file)
    Presets {
        /// Which builtin catalog to list
        #[arg(long, value_enum, default_value_t = Kind::Lights)]
        kind: Kind,
        /// Load the catalog from a YAML file instead of the builtin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Resolve a request against a token state and print the result
    Resolve {
        /// Path to a YAML LightingProfile for the token's current state
        /// (a dark token when omitted)
        #[arg(long)]
        current: Option<PathBuf>,
        /// Path to a YAML RequestedProfile with the explicit values
        #[arg(long)]
        requested: Option<PathBuf>,
        /// Light preset id applied as the middle tier
        #[arg(long)]
        light: Option<String>,
        /// Print which tier supplied each field
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Demo: toggle a light source on and off against an in-memory token
    ToggleDemo {
        /// Light preset id to toggle
        #[arg(long, default_value = "torch")]
        source: String,
        /// RNG seed for the activation roll
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Roll the source to chat on activation
        #[arg(long, default_value_t = false)]
        roll: bool,
    },
    /// Compute remaining uses for one item of an actor resource file
    Uses {
        /// Path to a YAML ActorResources document
        #[arg(long)]
        actor: PathBuf,
        /// Item id to inspect
        #[arg(long)]
        item: String,
    },
    /// Parse a legacy hotbar macro command and print the extracted target
    ParseMacro {
        /// The macro's command text
        command: String,
    },
}

#[derive(Parser)]
#[command(name = "lighthud-cli")]
#[command(about = "Token lighting engine CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn load_catalog(kind: Kind, file: Option<&PathBuf>) -> anyhow::Result<Catalog> {
    let builtin_kind = match kind {
        Kind::Lights => "light",
        Kind::Visions => "vision",
    };
    match file {
        Some(path) => Catalog::load_path(builtin_kind, path),
        None => Ok(match kind {
            Kind::Lights => builtin_lights(),
            Kind::Visions => builtin_visions(),
        }),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Presets { kind, file } => {
            let catalog = load_catalog(kind, file.as_ref())?;
            for element in catalog.iter() {
                let duration = element
                    .duration_minutes
                    .map(|m| format!(" ({m} min)"))
                    .unwrap_or_default();
                println!("{:<18} {}{}", element.id, element.name, duration);
            }
        }
        Cmd::Resolve {
            current,
            requested,
            light,
            trace,
        } => {
            let current: LightingProfile = match current {
                Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
                None => LightingProfile::dark(),
            };
            let requested: RequestedProfile = match requested {
                Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
                None => RequestedProfile::default(),
            };
            let lights = builtin_lights();
            let preset = match light.as_deref() {
                Some(id) => Some(lights.get(id)?),
                None => None,
            };
            let (resolved, tiers) = resolve_traced(&requested, &current, preset);
            println!("{}", serde_json::to_string_pretty(&resolved)?);
            if trace {
                for (field, tier) in tiers {
                    println!("{:<20} <- {:?}", field.name(), tier);
                }
            }
        }
        Cmd::ToggleDemo { source, seed, roll } => {
            let mut host = MemoryHost::new();
            host.tokens.insert("tok-1", LightingProfile::dark());
            let token = TokenRef::new("scene-1", "tok-1").with_actor("actor-1");
            let owner = FlagOwner::Actor("actor-1".to_string());
            let catalog = builtin_lights();
            let settings = Settings {
                roll_item: roll,
                ..Settings::default()
            };
            let mut dice = Dice::from_seed(seed);

            for step in ["on", "off"] {
                let outcome = confirm_source_toggle(
                    &mut host.tokens,
                    &mut host.effects,
                    &mut host.flags,
                    &catalog,
                    &settings,
                    &token,
                    &owner,
                    &source,
                    Some(&mut dice),
                    |line| println!("chat: {line}"),
                    |msg, _| eprintln!("warning: {msg}"),
                )?;
                let profile = host
                    .tokens
                    .profile("tok-1")
                    .ok_or_else(|| anyhow::anyhow!("demo token vanished"))?;
                println!(
                    "{step}: {:?} dim={} bright={}",
                    outcome, profile.dim_light, profile.bright_light
                );
            }
        }
        Cmd::Uses { actor, item } => {
            let actor: ActorResources = serde_yaml::from_str(&fs::read_to_string(actor)?)?;
            let found = actor
                .items
                .get(&item)
                .ok_or_else(|| anyhow::anyhow!("no item '{item}' in actor file"))?;
            match uses_for_item(&actor, found) {
                Some(uses) => {
                    let max = uses
                        .maximum
                        .map(|m| format!("/{m}"))
                        .unwrap_or_default();
                    let ammo = if uses.is_ammunition { " (ammo)" } else { "" };
                    println!("{}: {}{}{}", found.name, uses.available, max, ammo);
                }
                None => println!("{}: unlimited", found.name),
            }
        }
        Cmd::ParseMacro { command } => match engine::hotbar::parse_macro_command(&command) {
            Some(target) => {
                let show = |label: &str, value: &Option<String>| {
                    if let Some(v) = value {
                        println!("{label}={v}");
                    }
                };
                show("actorId", &target.actor_id);
                show("actorName", &target.actor_name);
                show("itemId", &target.item_id);
                show("itemName", &target.item_name);
                show("itemType", &target.item_type);
            }
            None => {
                println!("no target recognised");
            }
        },
    }
    Ok(())
}
