use pgn_tree::{fen::Fen, parse_game};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, NoneAsEmptyString};

#[serde_as]
#[derive(Deserialize)]
struct Record {
    #[serde_as(as = "NoneAsEmptyString")]
    start: Option<Fen>,
    movetext: String,
    plies: usize,
    #[serde_as(as = "DisplayFromStr")]
    fen: Fen,
}

#[test]
fn test_continuations() {
    let mut reader = csv::Reader::from_path("tests/continuations.csv").expect("reader");

    for (i, record) in reader.deserialize().enumerate() {
        let record: Record = record.expect("record");

        let game = parse_game(&record.movetext, record.start.map(Fen::into_state))
            .unwrap_or_else(|err| panic!("line {}: {err}", i + 1));

        assert_eq!(game.moves().plies(), record.plies, "line {}", i + 1);
        assert_eq!(
            Fen(game.final_state()).to_string(),
            record.fen.to_string(),
            "line {}",
            i + 1
        );
        assert_eq!(Fen(game.final_state()), record.fen, "line {}", i + 1);
    }
}
