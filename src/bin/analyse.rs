//! Analyse a board: print per-policy expected values and, given a throw,
//! a concrete recommendation with the strategy's reasoning.

use pickomino::constants::MAX_DICE;
use pickomino::{dice, Board, Policy, Strategy};

fn parse_policy(name: &str) -> Option<Policy> {
    match name {
        "optimal" => Some(Policy::Optimal),
        "heuristic" => Some(Policy::Heuristic),
        "risk-averse" => Some(Policy::RiskAverse),
        _ => None,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut board_path = String::from("board.json");
    let mut throw_str: Option<String> = None;
    let mut score = 0usize;
    let mut used_str = String::new();
    let mut policy = Policy::Optimal;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--throw" => {
                i += 1;
                throw_str = Some(args[i].clone());
            }
            "--score" => {
                i += 1;
                score = args[i].parse().expect("Invalid --score");
            }
            "--used" => {
                i += 1;
                used_str = args[i].clone();
            }
            "--policy" => {
                i += 1;
                policy = parse_policy(&args[i]).expect("Invalid --policy");
            }
            "--help" | "-h" => {
                println!("Usage: analyse [OPTIONS] [BOARD_JSON]");
                println!("  --throw DICE     Dice string to recommend on, e.g. WW4441");
                println!("  --score N        Accumulated score so far (default: 0)");
                println!("  --used FACES     Faces already claimed, e.g. W5 (default: none)");
                println!("  --policy NAME    optimal | heuristic | risk-averse (default: optimal)");
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

    let used = match dice::mask_from_str(&used_str) {
        Ok(mask) => mask,
        Err(e) => {
            eprintln!("Invalid --used: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("Policy      | EV of a fresh 8-dice turn");
    println!("------------|---------------------------");
    for (name, p) in [
        ("optimal", Policy::Optimal),
        ("heuristic", Policy::Heuristic),
        ("risk-averse", Policy::RiskAverse),
    ] {
        let mut strategy = Strategy::new(p);
        let ev = strategy.analyse(&board, MAX_DICE, 0, 0);
        println!("{:<11} | {:+.4}", name, ev);
    }

    if let Some(throw_str) = throw_str {
        let faces = match dice::faces_from_str(&throw_str) {
            Ok(faces) => faces,
            Err(e) => {
                eprintln!("Invalid --throw: {}", e);
                std::process::exit(1);
            }
        };
        let throw = match pickomino::Throw::from_faces(&faces) {
            Ok(throw) => throw,
            Err(e) => {
                eprintln!("Invalid --throw: {}", e);
                std::process::exit(1);
            }
        };

        println!();
        println!(
            "Throw {} with score {} and claimed [{}]:",
            throw,
            score,
            dice::mask_to_string(used)
        );
        let mut strategy = Strategy::new(policy);
        let mut trace = Vec::new();
        let (action, face) = strategy.select_traced(&throw, &board, score, used, &mut trace);
        for line in &trace {
            println!("  {}", line);
        }
        match face {
            Some(face) => println!(
                "Recommendation: take {} and {}",
                dice::face_to_char(face),
                action.label()
            ),
            None => println!("Recommendation: {}", action.label()),
        }
    }
}
