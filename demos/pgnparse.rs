// Parses PGN files and prints the move tree of each game.
// Usage: RUST_LOG=pgn_tree=debug cargo run --example pgnparse -- [--lossy] [PGN]...

use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use pgn_tree::{fen::Fen, Game, MoveRecord, PgnSource, Variation};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pgnparse")]
#[command(about = "Print PGN games as trees of resolved moves")]
struct Args {
    /// PGN files. Reads standard input if none are given.
    #[arg(value_name = "PGN")]
    files: Vec<PathBuf>,

    /// Skip games that fail to parse instead of stopping.
    #[arg(short, long)]
    lossy: bool,

    /// Print the final position of each game.
    #[arg(short, long)]
    fen: bool,
}

fn print_move(record: &MoveRecord, indent: usize) {
    let pad = "  ".repeat(indent);
    match (record.color(), record.from(), record.to()) {
        (Some(color), Some(from), Some(to)) => {
            print!("{pad}{} {color} {from}-{to}", record.san);
        }
        _ => print!("{pad}{}", record.san),
    }
    for nag in &record.nags {
        print!(" {nag}");
    }
    if let Some(ref comment) = record.comment {
        print!(" {{{comment}}}");
    }
    println!();

    for variation in &record.variations {
        print_line(variation, indent + 1);
    }
}

fn print_line(line: &Variation, indent: usize) {
    for record in line {
        print_move(record, indent);
    }
}

fn print_game(index: usize, game: &Game, fen: bool) {
    println!(
        "# game {} ({} moves) {}",
        index + 1,
        game.move_pairs_count(),
        game.outcome().map_or("", |outcome| outcome.as_str())
    );
    for (name, value) in game.tags().iter() {
        println!("[{name} \"{value}\"]");
    }
    print_line(game.moves(), 0);
    if fen {
        println!("{}", Fen(game.final_state()));
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let sources = if args.files.is_empty() {
        vec![PgnSource::from_reader(io::stdin().lock()).context("reading stdin")?]
    } else {
        args.files
            .iter()
            .map(|path| {
                PgnSource::open(path).with_context(|| format!("reading {}", path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let mut index = 0;
    for source in &sources {
        let games = if args.lossy {
            source.parse_games_lossy()
        } else {
            source.parse_games()?
        };
        for game in &games {
            print_game(index, game, args.fen);
            index += 1;
        }
    }

    Ok(())
}
