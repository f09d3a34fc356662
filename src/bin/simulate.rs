//! Monte Carlo comparison of the three policies on one board.
//!
//! Plays N seeded turns per policy and prints the realized payout
//! distribution next to the exact expected value from the engine.

use std::time::Instant;

use pickomino::constants::MAX_DICE;
use pickomino::simulation::simulate_many;
use pickomino::{Board, Policy, Strategy};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut board_path = String::from("board.json");
    let mut turns = 100_000usize;
    let mut seed = 42u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--turns" => {
                i += 1;
                turns = args[i].parse().expect("Invalid --turns");
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("Invalid --seed");
            }
            "--help" | "-h" => {
                println!("Usage: simulate [OPTIONS] [BOARD_JSON]");
                println!("  --turns N        Turns to simulate per policy (default: 100000)");
                println!("  --seed S         Random seed (default: 42)");
                println!("  POSITIONAL       Path to the board description (default: board.json)");
                std::process::exit(0);
            }
            other => {
                if other.starts_with('-') {
                    eprintln!("Unknown argument: {}", other);
                    std::process::exit(1);
                }
                board_path = other.to_string();
            }
        }
        i += 1;
    }

    let board = match Board::load(&board_path) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Failed to load {}: {}", board_path, e);
            std::process::exit(1);
        }
    };
    println!(
        "Board: tiles {:?}, others {:?}, own {:?} (penalty {})",
        board.tiles(),
        board.others(),
        board.own(),
        board.penalty
    );
    println!("Simulating {} turns per policy (seed {})", turns, seed);
    println!();
    println!("Policy      | Exact EV | Mean     | Std dev | Min | Max | Time (s)");
    println!("------------|----------|----------|---------|-----|-----|---------");

    for (name, policy) in [
        ("optimal", Policy::Optimal),
        ("heuristic", Policy::Heuristic),
        ("risk-averse", Policy::RiskAverse),
    ] {
        let mut strategy = Strategy::new(policy);
        let exact = strategy.analyse(&board, MAX_DICE, 0, 0);
        let start = Instant::now();
        let result = simulate_many(&mut strategy, &board, turns, seed);
        let elapsed = start.elapsed().as_secs_f64();
        println!(
            "{:<11} | {:+8.4} | {:+8.4} | {:7.4} | {:3} | {:3} | {:8.2}",
            name, exact, result.mean, result.std_dev, result.min, result.max, elapsed
        );
    }
}
