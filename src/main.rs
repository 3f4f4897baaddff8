//! # Rogulator Headless Runner
//!
//! Plays a run without a front-end: either a scripted list of commands or the
//! built-in autopilot, then prints the outcome.

use clap::Parser;
use log::{info, warn};
use rogulator::{
    Autopilot, Command, GameSession, GameState, GameStatus, InputHandler, RogulatorResult,
    RunConfig, RunSize, TileType,
};

/// Command line arguments for the headless runner.
#[derive(Parser, Debug)]
#[command(name = "rogulator")]
#[command(about = "A turn-based roguelike engine, played headless")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run size (quick, short, medium, long, epic)
    #[arg(long, default_value = "quick")]
    size: RunSize,

    /// Key script (wasd/hjkl to move, `.` to rest) or a JSON array of commands
    #[arg(short, long)]
    commands: Option<String>,

    /// Let the autopilot play after the script is exhausted
    #[arg(long)]
    autoplay: bool,

    /// Stop after this many turns
    #[arg(long, default_value_t = 1000)]
    max_turns: u64,

    /// Print the final state as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> RogulatorResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Rogulator v{}", rogulator::VERSION);

    let seed = args.seed.unwrap_or(12345);
    let mut session = GameSession::new(RunConfig::for_size(args.size), seed);
    info!("Run {} seeded with {}", session.state().run_id, seed);

    let input = InputHandler::new();
    let script = match &args.commands {
        Some(text) if text.trim_start().starts_with('[') => input.parse_json(text)?,
        Some(text) => input.parse_script(text)?,
        None => Vec::new(),
    };

    for command in script {
        if session.state().is_game_ended() || session.state().turn >= args.max_turns {
            break;
        }
        session.apply(command);
    }

    if args.autoplay {
        run_autopilot(&mut session, args.max_turns);
    }

    let state = session.state();
    if args.json {
        println!("{}", state.save_to_json()?);
    } else {
        print_summary(state);
    }

    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(log_level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp(None)
            .init();
    }
}

/// Lets the autopilot play until the run ends or the turn limit is hit.
fn run_autopilot(session: &mut GameSession, max_turns: u64) {
    let mut autopilot = Autopilot::new();
    while !session.state().is_game_ended() && session.state().turn < max_turns {
        let command = match autopilot.next_direction(session.state()) {
            Some(direction) => Command::Move(direction),
            None => {
                warn!("Autopilot has no route; resting");
                Command::Rest
            }
        };
        if !session.apply(command).turn_taken {
            warn!("Autopilot command {:?} did not take a turn; stopping", command);
            break;
        }
    }
}

fn print_summary(state: &GameState) {
    println!("{}", render_floor(state));
    println!();
    for message in &state.messages {
        println!("[{:>4}] {}", message.turn, message.text);
    }
    println!();

    let outcome = match state.status {
        GameStatus::Playing => "still playing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    };
    let stats = &state.statistics;
    println!(
        "Run {} ({}): {} after {} turns, HP {}/{}",
        state.run_id, state.config.size, outcome, state.turn, state.player.hp, state.player.max_hp
    );
    println!(
        "Monsters defeated: {}, damage dealt: {}, damage taken: {}, items: {}, steps: {}, rooms: {}",
        stats.monsters_defeated,
        stats.damage_dealt,
        stats.damage_taken,
        stats.items_collected,
        stats.steps_taken,
        stats.rooms_entered
    );
}

/// ASCII view of the explored floor.
fn render_floor(state: &GameState) -> String {
    let floor = &state.floor;
    let mut out = String::new();
    for (y, row) in floor.tiles.iter().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            let pos = rogulator::Position::new(x as i32, y as i32);
            let glyph = if pos == state.player.position {
                '@'
            } else if !tile.explored {
                ' '
            } else if let Some(monster) = floor
                .living_monsters()
                .find(|m| tile.visible && m.position == pos)
            {
                monster.template.symbol
            } else if let Some(item) = floor.items.values().find(|i| i.position == pos) {
                item.template.symbol
            } else if let Some(macguffin) = floor
                .macguffin
                .as_ref()
                .filter(|m| !m.collected && m.position == pos)
            {
                macguffin.template.symbol
            } else {
                match tile.tile_type {
                    TileType::Wall => '#',
                    TileType::Floor => '.',
                    TileType::Door => '+',
                    TileType::StairsDown => '>',
                    TileType::StairsUp => '<',
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
