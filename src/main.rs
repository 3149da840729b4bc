//! Scrapforge - Entry Point
//!
//! Headless driver: loads the catalog, rolls a new character and lets the
//! auto-battle stepper fight a run of encounters, printing the event log.
//!
//! Usage: `scrapforge [seed] [battles] [tick-ms]` or `scrapforge export [dir]`

use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use scrapforge::data::{export_default_data, DEFAULT_DATA_DIR};
use scrapforge::game::MessageCategory;
use scrapforge::{AutoBattle, Catalog, CharacterState, Engine, Report};

/// Battles fought when no count is given
const DEFAULT_BATTLES: u32 = 10;
/// Delay between automatic turns
const DEFAULT_TICK: Duration = Duration::from_millis(150);
/// Turns before the driver gives up on a battle and tries to retreat
const MAX_TURNS_PER_BATTLE: u32 = 200;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("export") {
        let dir = args.get(1).map_or(DEFAULT_DATA_DIR, String::as_str);
        export_default_data(dir).with_context(|| format!("exporting default data to {}", dir))?;
        println!("Default catalog written to {}", dir);
        return Ok(());
    }

    let seed = match args.first() {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid seed '{}'", raw))?,
        None => rand::random(),
    };
    let battles = match args.get(1) {
        Some(raw) => raw.parse::<u32>().with_context(|| format!("invalid battle count '{}'", raw))?,
        None => DEFAULT_BATTLES,
    };
    let tick = match args.get(2) {
        Some(raw) => Duration::from_millis(raw.parse::<u64>().with_context(|| format!("invalid tick '{}'", raw))?),
        None => DEFAULT_TICK,
    };

    log::info!("Starting Scrapforge v{} (seed {})", env!("CARGO_PKG_VERSION"), seed);

    let catalog = Catalog::load_from_dir(DEFAULT_DATA_DIR);
    catalog.validate().context("catalog failed validation")?;
    if catalog.skills.primary().is_none() {
        bail!("catalog has no skills");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let engine = Engine::new(&catalog);
    let mut state = CharacterState::new_character(&catalog, &mut rng);
    print_recent(&state, 1);

    for _ in 0..battles {
        run_battle(&engine, &mut state, &mut rng, tick)?;
    }

    println!(
        "\nLevel {} | {} XP | {} gold | floor {}/{} depth {} | {} items",
        state.level,
        state.xp,
        state.gold,
        state.area.floor,
        state.area.unlocked,
        state.area.depth,
        state.inventory.count()
    );
    log::info!("Scrapforge run finished");
    Ok(())
}

/// Heal up if needed, explore into a fight and let auto-battle finish it
fn run_battle(engine: &Engine<'_>, state: &mut CharacterState, rng: &mut StdRng, tick: Duration) -> Result<()> {
    let stats = engine.stats(state);
    if state.hp * 2 < stats.hp_max {
        print_report(&engine.rest(state)?);
    }
    print_report(&engine.explore(state, rng)?);

    let mut auto = match engine.catalog().skills.primary() {
        Some(skill) => AutoBattle::new().with_skill(skill.id.clone()),
        None => AutoBattle::new(),
    };
    auto.start(state);

    let mut turns = 0;
    while auto.is_active() {
        std::thread::sleep(tick);
        // Liveness is re-checked after every tick
        if !auto.is_active() {
            break;
        }
        if let Some(report) = auto.step(engine, state, rng)? {
            print_report(&report);
        }
        turns += 1;
        if turns >= MAX_TURNS_PER_BATTLE {
            auto.cancel();
            log::warn!("Battle exceeded {} turns, retreating", MAX_TURNS_PER_BATTLE);
            while state.in_battle() {
                print_report(&engine.player_flee(state, rng)?);
            }
        }
    }
    Ok(())
}

fn print_report(report: &Report) {
    for line in &report.lines {
        println!("{}", line);
    }
}

fn print_recent(state: &CharacterState, n: usize) {
    for message in state.log.recent(n) {
        match message.category {
            MessageCategory::Warning => eprintln!("! {}", message.text),
            _ => println!("{}", message.text),
        }
    }
}
