//! Flag Royale headless runner
//!
//! Plays matches at a simulated 60 Hz until a champion is crowned and logs
//! the results. Set `RUST_LOG=debug` to see every elimination.

#[cfg(not(target_arch = "wasm32"))]
use flag_royale::consts::FRAME_DT;
#[cfg(not(target_arch = "wasm32"))]
use flag_royale::{Engine, EngineEvent, EngineResult, MatchPhase, Participant, Roster, Settings};

/// Host time budget before giving up on a match (simulated seconds)
#[cfg(not(target_arch = "wasm32"))]
const MAX_MATCH_SECS: f32 = 4.0 * 60.0 * 60.0;

#[cfg(not(target_arch = "wasm32"))]
fn demo_roster() -> Roster {
    let countries = [
        ("ar", "Argentina", "South America"),
        ("br", "Brazil", "South America"),
        ("cl", "Chile", "South America"),
        ("co", "Colombia", "South America"),
        ("ao", "Angola", "Africa"),
        ("eg", "Egypt", "Africa"),
        ("ng", "Nigeria", "Africa"),
        ("td", "Chad", "Africa"),
        ("de", "Germany", "Europe"),
        ("fr", "France", "Europe"),
        ("it", "Italy", "Europe"),
        ("pt", "Portugal", "Europe"),
        ("cn", "China", "Asia"),
        ("in", "India", "Asia"),
        ("jp", "Japan", "Asia"),
        ("kr", "South Korea", "Asia"),
        ("au", "Australia", "Oceania"),
        ("nz", "New Zealand", "Oceania"),
        ("ca", "Canada", "North America"),
        ("mx", "Mexico", "North America"),
    ];

    Roster::new(
        countries
            .iter()
            .map(|(code, name, continent)| Participant::new(*code, *name).in_group(*continent))
            .collect(),
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> EngineResult<()> {
    let settings = Settings::default().with_points_to_win(3);
    let roster = demo_roster();
    log::info!(
        "Roster: {} participants in {} groups",
        roster.len(),
        roster.groups().len()
    );

    let mut engine = Engine::new(settings, roster)?;
    // First start happens before layout, like a page that hasn't sized its canvas yet
    engine.start_round()?;
    engine.set_viewport(1280.0, 720.0);

    let mut elapsed = 0.0;
    while engine.phase() != MatchPhase::Champion {
        if elapsed > MAX_MATCH_SECS {
            log::warn!("No champion after {:.0}s of simulated time", elapsed);
            break;
        }

        for event in engine.advance(FRAME_DT) {
            match event {
                EngineEvent::RoundStarted {
                    round,
                    entities,
                    arena_radius,
                } => log::info!("Round {round}: {entities} flags, arena {arena_radius:.0}px"),
                EngineEvent::Eliminated { code, .. } => log::debug!("{code} is out"),
                EngineEvent::RoundEnded(winner) => {
                    log::info!("Round {} winner: {}", winner.round, winner.name)
                }
                EngineEvent::ChampionReached(entry) => {
                    log::info!("Champion: {} with {} wins", entry.name, entry.wins)
                }
                _ => {}
            }
        }
        elapsed += FRAME_DT;
    }

    println!("\nFinal standings after {:.0}s:", elapsed);
    for (rank, entry) in engine.rankings().entries().iter().enumerate() {
        println!("{:>3}. {:<16} {} wins", rank + 1, entry.name, entry.wins);
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flag Royale (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm; nothing to run here
}
