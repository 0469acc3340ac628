//! # Lode Terminal Driver
//!
//! A line-oriented harness around the game core: reads commands, invokes
//! the engine, prints what happened. Rendering is a handful of `println!`
//! calls; anything fancier belongs in a different front end.

use clap::Parser;
use lode::game::engine;
use lode::input::{self, MineCommand, TownCommand};
use lode::town::{self, CourtshipOutcome, PurchaseOutcome, TreatmentOutcome};
use lode::{
    config, save, BlastTick, GenerationConfig, Generator, HealthStatus, LodeResult, Material,
    Mine, MineGenerator, Player, Position,
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command line arguments for the Lode terminal driver.
#[derive(Parser, Debug)]
#[command(name = "lode")]
#[command(about = "A turn-based mining roguelike: dig deep, strike it rich, get out alive")]
#[command(version)]
struct Args {
    /// Random seed for mine generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for save files
    #[arg(long, default_value = ".")]
    save_dir: PathBuf,

    /// Resume from the save files instead of starting a new game
    #[arg(long)]
    load: bool,
}

/// Why the mine loop handed control back.
enum MineExit {
    /// Rode the elevator into daylight
    ToTown,
    /// Health ran out with no insurance
    Dead,
    /// Money ran out
    Broke,
    /// The user quit the program
    Quit,
}

fn main() -> LodeResult<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    info!("starting lode v{} (seed {seed})", lode::VERSION);

    let (mut player, mut mine) = if args.load {
        save::load_game(&args.save_dir, &mut rng)?
    } else {
        let mine = MineGenerator::new().generate(&GenerationConfig::new(seed), &mut rng)?;
        (Player::new(), mine)
    };

    println!("LODE v{} (seed {seed})", lode::VERSION);
    println!("You arrive in town with ${} to your name.", player.money);
    println!("Type 'help' for commands.");

    town_loop(&args, &mut player, &mut mine, &mut rng)
}

fn town_loop(
    args: &Args,
    player: &mut Player,
    mine: &mut Mine,
    rng: &mut StdRng,
) -> LodeResult<()> {
    let stdin = io::stdin();
    loop {
        // The bank watches the market whether or not anyone sells.
        if town::reroll_market(player, rng) {
            println!("Word around town: mineral prices have moved.");
        }

        print!("[town] > ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            return Ok(());
        };
        let line = line?;
        let Some(command) = input::parse_town_command(&line) else {
            println!("Hm? Try 'help'.");
            continue;
        };

        match command {
            TownCommand::Descend => {
                println!("You descend into the mine...");
                engine::change_location(player, mine, Position::origin(), rng)?;
                match mine_loop(player, mine, rng)? {
                    MineExit::ToTown => println!("You ride back up into daylight."),
                    MineExit::Dead => {
                        println!("You died in the dark. The mine keeps what it takes.");
                        return Ok(());
                    }
                    MineExit::Broke => {
                        println!("Your debts have caught up with you. Game over.");
                        return Ok(());
                    }
                    MineExit::Quit => return Ok(()),
                }
            }
            TownCommand::Buy(item) => match town::purchase(player, item) {
                PurchaseOutcome::Purchased => {
                    println!("One {}: ${}.", item.name(), item.price())
                }
                PurchaseOutcome::AlreadyOwned => println!("You already own that!"),
                PurchaseOutcome::InsufficientFunds => println!("You can't afford that!"),
            },
            TownCommand::Sell(mineral) => {
                let proceeds = town::sell(player, mineral);
                println!("Sold your {} for ${proceeds}.", mineral.name());
            }
            TownCommand::SellAll => {
                let proceeds = town::sell_all(player);
                println!("Sold the lot for ${proceeds}.");
            }
            TownCommand::Prices => {
                let prices = &player.prices;
                println!(
                    "Today's prices: coal ${}, silver ${}, gold ${}, platinum ${}",
                    prices.coal, prices.silver, prices.gold, prices.platinum
                );
            }
            TownCommand::Stay => match town::overnight_stay(player) {
                TreatmentOutcome::Treated => {
                    println!("A night's rest. Health {}.", player.health)
                }
                TreatmentOutcome::AlreadyHealthy => println!("Nothing ails you."),
                _ => println!("Paying customers only."),
            },
            TownCommand::Heal => {
                let spent = town::full_heal(player);
                if spent > 0 {
                    println!("Patched up to {} health for ${spent}.", player.health);
                } else {
                    println!("Nothing to treat (or nothing to pay with).");
                }
            }
            TownCommand::Insurance => match town::buy_insurance(player) {
                TreatmentOutcome::Treated => {
                    println!(
                        "Insured for the next {} turns.",
                        config::INSURANCE_DURATION_TURNS
                    )
                }
                TreatmentOutcome::AlreadyInsured => println!("You're already covered."),
                _ => println!("Paying customers only."),
            },
            TownCommand::Tip(quality) => match town::buy_tip(player, mine, quality, rng) {
                Some(hint) => println!(
                    "The barkeep leans in: look between ({}, {}) and ({}, {}).",
                    hint.origin.x,
                    hint.origin.y,
                    hint.origin.x + hint.width as i32 - 1,
                    hint.origin.y + hint.height as i32 - 1
                ),
                None => println!("You can't afford that tip!"),
            },
            TownCommand::Court => {
                let outcome = town::court(player);
                match outcome {
                    CourtshipOutcome::TooPoor => {
                        println!("She won't even look at you. Come back rich.")
                    }
                    CourtshipOutcome::Interested => {
                        println!("\"Work harder, and you could be somebody.\"")
                    }
                    CourtshipOutcome::WantsDiamond => {
                        println!("\"They say diamonds are a girl's best friend...\"")
                    }
                    CourtshipOutcome::ModestWedding => {
                        println!("\"You're not rich, but this IS a lovely ring.\"")
                    }
                    CourtshipOutcome::GrandWedding => println!("\"I'm all yours!\""),
                }
                if outcome.is_ending() {
                    println!(
                        "A wedding! Final fortune: ${} over {} turns. You win!",
                        player.money, player.turn_number
                    );
                    return Ok(());
                }
            }
            TownCommand::Status => print_status(player),
            TownCommand::Save => {
                save::save_game(&args.save_dir, player, mine)?;
                println!("Game saved.");
            }
            TownCommand::Help => print_town_help(),
            TownCommand::Quit => return Ok(()),
        }
    }
}

fn mine_loop(player: &mut Player, mine: &mut Mine, rng: &mut StdRng) -> LodeResult<MineExit> {
    let stdin = io::stdin();
    loop {
        print!(
            "[mine ({}, {}) hp {} ${}] > ",
            player.position.x, player.position.y, player.health, player.money
        );
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            return Ok(MineExit::Quit);
        };
        let line = line?;
        let Some(command) = input::parse_mine_command(&line) else {
            println!("Hm? Try 'help'.");
            continue;
        };

        match command {
            MineCommand::Move(direction) => {
                let dest = player.position.step(direction);
                let events = engine::change_location(player, mine, dest, rng)?;
                for event in &events {
                    if let Some(message) = event.message() {
                        println!("{message}");
                    }
                }
            }
            MineCommand::PrimeDynamite => {
                match player.prime_dynamite(mine, player.position) {
                    Ok(()) => println!("You light the fuse. RUN!"),
                    Err(err) => println!("{err}"),
                }
            }
            MineCommand::Map => print_map(mine, player),
            MineCommand::RideToTop => {
                match engine::ride_elevator_to_top(player, mine, rng)? {
                    Some(_) => println!("Going up!"),
                    None => println!("You can't do that now!"),
                }
            }
            MineCommand::RideToBottom => {
                match engine::ride_elevator_to_bottom(player, mine, rng)? {
                    Some(_) => println!("To the depths!"),
                    None => println!("You can't do that now!"),
                }
            }
            MineCommand::Status => print_status(player),
            MineCommand::Help => print_mine_help(),
            MineCommand::Leave => return Ok(MineExit::ToTown),
        }

        // The fuse burns once per action taken.
        if let BlastTick::Detonated { player_caught } = player.dynamite_countdown(mine)? {
            println!("BOOM!");
            if player_caught {
                println!("You were too close to the blast!");
                player.health -= config::BLAST_DAMAGE;
            }
        }

        // Cosmetic sparkle over the last find.
        mine.tick_recent_find();

        // Past the top of the shaft means back to town.
        if player.position == Position::EXIT {
            return Ok(MineExit::ToTown);
        }

        match player.check_health() {
            HealthStatus::Alive => {}
            HealthStatus::Revived => println!("Thank goodness for insurance!"),
            HealthStatus::Died => return Ok(MineExit::Dead),
        }
        if player.money < 0 {
            return Ok(MineExit::Broke);
        }
    }
}

fn print_status(player: &Player) {
    println!(
        "${}  |  health {}  |  turn {}",
        player.money, player.health, player.turn_number
    );
    println!(
        "pack: coal {}, silver {}, gold {}, platinum {}{}",
        player.coal,
        player.silver,
        player.gold,
        player.platinum,
        if player.has_diamond { ", THE DIAMOND" } else { "" }
    );
    let mut gear: Vec<&str> = Vec::new();
    for (owned, name) in [
        (player.has_shovel, "shovel"),
        (player.has_axe, "axe"),
        (player.has_bucket, "bucket"),
        (player.has_dynamite, "dynamite"),
        (player.has_flashlight, "flashlight"),
        (player.has_hardhat, "hard hat"),
        (player.has_insurance, "insurance"),
    ] {
        if owned {
            gear.push(name);
        }
    }
    println!(
        "gear: {}",
        if gear.is_empty() {
            "nothing but your hands".to_string()
        } else {
            gear.join(", ")
        }
    );
}

/// Downsampled minimap: one character per block, '#' where any tile in the
/// block is explored, '@' for the player's block.
fn print_map(mine: &Mine, player: &Player) {
    const BLOCK_X: i32 = 4;
    const BLOCK_Y: i32 = 8;
    let cols = (mine.width() as i32 + BLOCK_X - 1) / BLOCK_X;
    let rows = (mine.height() as i32 + BLOCK_Y - 1) / BLOCK_Y;

    for row in 0..rows {
        let mut line = String::new();
        for col in 0..cols {
            let player_block =
                player.position.x / BLOCK_X == col && player.position.y / BLOCK_Y == row;
            let mut explored = false;
            'block: for dx in 0..BLOCK_X {
                for dy in 0..BLOCK_Y {
                    let pos = Position::new(col * BLOCK_X + dx, row * BLOCK_Y + dy);
                    if mine.is_explored(pos) == Some(true)
                        && mine.material(pos) != Some(Material::Shaft)
                        && mine.material(pos) != Some(Material::Elevator)
                    {
                        explored = true;
                        break 'block;
                    }
                }
            }
            line.push(if player_block {
                '@'
            } else if explored {
                '#'
            } else {
                '.'
            });
        }
        println!("{line}");
    }
}

fn print_mine_help() {
    println!("move: up/down/left/right (also wasd-ish: w a d, or vi: h j k l)");
    println!("dyn       prime dynamite where you stand, then RUN");
    println!("map       show where you've dug");
    println!("t / b     ride the elevator to the top / deepest explored row");
    println!("status    what you're carrying");
    println!("leave     abandon the expedition (walk the elevator up instead!)");
}

fn print_town_help() {
    println!("mine                descend into the mine");
    println!("buy <item>          shovel, axe, bucket, dynamite, flashlight, hardhat");
    println!("sell <mineral|all>  coal, silver, gold, platinum");
    println!("prices              today's market");
    println!("stay / heal         hospital: one night ($100) / heal to full ($10 per point)");
    println!("insurance           50 turns of death protection ($250)");
    println!("tip <cheap|good|best>  where's the diamond? ($250/$750/$1500)");
    println!("court               pay court at the tavern (rich miners only)");
    println!("save / quit         save in town, or call it a day");
}
