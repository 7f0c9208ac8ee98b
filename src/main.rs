use std::io::{self, Write};

use backtrack_katas::grid::{DEMO_PUZZLE, MIN_WORD_LENGTH};
use backtrack_katas::utils::loading;
use backtrack_katas::{expand_braces, permutations, Grid, KataResult};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[macro_use]
extern crate text_io;

fn print_help() {
    println!("Commands:");
    println!("\tpuzzle                 reset to the demo puzzle");
    println!("\tload <file.json>       load a grid from a json array of rows");
    println!("\trandom <rows> <cols>   generate a random grid");
    println!("\tshow                   print the current grid");
    println!("\tfind <word>            look for a word snaking through the grid");
    println!("\twords <dict.txt> [min] list dictionary words found on the grid");
    println!("\tperm <chars>           list all permutations");
    println!("\texpand <expr>          list all brace expansions");
    println!("\tquit");
}

fn demo_grid() -> KataResult<Grid> {
    Grid::from_rows(&DEMO_PUZZLE)
}

/// Runs one command against the current grid. Returns false when the user wants to leave.
fn run_command(grid: &mut Grid, line: &str) -> KataResult<bool> {
    let line = line.trim();
    let (cmd, args) = match line.split_once(' ') {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (line, ""),
    };

    match cmd {
        "" | "quit" | "exit" => return Ok(false),
        "help" => print_help(),
        "puzzle" => {
            *grid = demo_grid()?;
            print!("{}", grid);
        }
        "load" => {
            *grid = Grid::from_file(args)?;
            info!("loaded {}x{} grid from {}", grid.rows(), grid.cols(), args);
            print!("{}", grid);
        }
        "random" => {
            let dims = args
                .split_whitespace()
                .map(|x| x.parse::<usize>())
                .collect::<Result<Vec<_>, _>>();
            match dims.as_deref() {
                Ok(&[rows, cols]) => {
                    *grid = Grid::random(rows, cols, &mut rand::thread_rng())?;
                    print!("{}", grid);
                }
                _ => println!("Usage: random <rows> <cols>"),
            }
        }
        "show" => print!("{}", grid),
        "find" => match grid.find_path(args) {
            Some(path) => println!("{:?} found: {}", args, serde_json::to_string(&path)?),
            None => println!("{:?} not found", args),
        },
        "words" => {
            let mut parts = args.split_whitespace();
            let path = parts.next().unwrap_or_default();
            let min_length = parts
                .next()
                .and_then(|m| m.parse().ok())
                .unwrap_or(MIN_WORD_LENGTH);
            let words = loading::read_word_file(path, min_length)?;
            println!("Number of Words: {}", words.len());
            let dict = loading::build_dictionary(&words)?;
            let found = grid.words_in(&dict, min_length);
            println!("Found {} words: {:?}", found.len(), found);
        }
        "perm" => {
            let mut count = 0;
            for p in permutations(args)? {
                println!("{}", p);
                count += 1;
            }
            println!("{} permutations", count);
        }
        "expand" => {
            for s in expand_braces(args)? {
                println!("{}", s);
            }
        }
        other => {
            println!("Unknown command {:?}", other);
            print_help();
        }
    }
    Ok(true)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut grid = match demo_grid() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    println!("============ Backtracking Katas ============");
    print!("{}", grid);
    print_help();
    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            warn!("could not flush prompt: {}", e);
        }
        let line: String = match try_read!("{}\n") {
            Ok(line) => line,
            Err(_) => break,
        };
        match run_command(&mut grid, &line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!("command {:?} failed", line.trim());
                println!("Error: {}", e);
            }
        }
    }
}
