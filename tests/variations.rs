use pgn_tree::{
    fen::Fen, parse_game, parse_sequence, CastlingSide, Color, GameState, ParseError,
    ParseErrorKind, Role, Square,
};

fn state(fen: &str) -> GameState {
    fen.parse::<Fen>().expect("valid fen").into_state()
}

#[test]
fn test_known_continuation() {
    let game = parse_game("1.e4 e5 2.Nf3", None).expect("valid movetext");
    let state = game.final_state();
    assert_eq!(state.board.piece_at(Square::F3), Some(Color::White.knight()));
    assert_eq!(state.board.piece_at(Square::E4), Some(Color::White.pawn()));
    assert_eq!(state.board.piece_at(Square::E5), Some(Color::Black.pawn()));
    assert_eq!(state.board.piece_at(Square::G1), None);
}

#[test]
fn test_variation_nesting() {
    let game = parse_game("1. e4 (1. d4 d5) e5", None).expect("valid movetext");
    let moves = game.moves();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].to(), Some(Square::E4));
    assert_eq!(moves[1].to(), Some(Square::E5));
    assert!(moves[1].variations.is_empty());

    assert_eq!(moves[0].variations.len(), 1);
    let queens_pawn = &moves[0].variations[0];
    assert_eq!(queens_pawn.len(), 2);
    assert_eq!(queens_pawn[0].from(), Some(Square::D2));
    assert_eq!(queens_pawn[1].from(), Some(Square::D7));

    // The variation was parsed without the e4 pawn.
    let mut branch = GameState::new();
    queens_pawn.replay(&mut branch);
    assert_eq!(branch.board.piece_at(Square::E4), None);
    assert_eq!(branch.board.piece_at(Square::E2), Some(Color::White.pawn()));
    assert_eq!(branch.board.piece_at(Square::D4), Some(Color::White.pawn()));
}

#[test]
fn test_sibling_and_nested_variations() {
    let game = parse_game(
        "1. e4 e5 (1... c5 2. Nf3 (2. Nc3 Nc6) d6) (1... e6 2. d4) 2. Nf3 *",
        None,
    )
    .expect("valid movetext");
    let e5 = &game.moves()[1];
    assert_eq!(e5.variations.len(), 2);
    assert_eq!(e5.variations[0][1].variations[0][1].from(), Some(Square::B8));
    assert_eq!(e5.variations[1][1].to(), Some(Square::D4));
    assert_eq!(game.moves().plies(), 3);
}

#[test]
fn test_rewind_then_replay() {
    let moves = parse_sequence("1. e4 d5 2. exd5 Qxd5 3. Nc3 Qa5 4. d4 c6", GameState::new())
        .expect("valid movetext");

    let mut state = GameState::new();
    moves.replay(&mut state);
    let before = state.clone();

    let mut rewound = state.clone();
    moves[moves.len() - 1].rewind(&mut rewound);
    assert_eq!(rewound.turn, Color::Black);
    moves[moves.len() - 1].replay(&mut rewound);
    assert_eq!(rewound, before);

    for record in moves.iter().rev() {
        record.rewind(&mut state);
    }
    assert_eq!(state, GameState::new());
}

#[test]
fn test_castling() {
    let setup = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let moves = parse_sequence("1. O-O O-O-O", state(setup)).expect("valid movetext");
    assert_eq!(moves[0].castle(), Some(CastlingSide::KingSide));
    assert_eq!(moves[0].from(), Some(Square::E1));
    assert_eq!(moves[0].to(), Some(Square::G1));
    assert_eq!(moves[1].castle(), Some(CastlingSide::QueenSide));

    let mut after = state(setup);
    moves.replay(&mut after);
    assert_eq!(after.board.piece_at(Square::G1), Some(Color::White.king()));
    assert_eq!(after.board.piece_at(Square::F1), Some(Color::White.rook()));
    assert_eq!(after.board.piece_at(Square::H1), None);
    assert_eq!(after.board.piece_at(Square::C8), Some(Color::Black.king()));
    assert_eq!(after.board.piece_at(Square::D8), Some(Color::Black.rook()));

    assert_eq!(
        parse_sequence("1. O-O", state("r3k2r/8/8/8/8/8/8/R3KB1R w KQkq - 0 1")),
        Err(ParseError::AmbiguousOrUnresolvedMove {
            token: "O-O".to_owned()
        })
    );
}

#[test]
fn test_en_passant() {
    let game = parse_game("1. e4 a6 2. e5 d5 3. exd6", None).expect("valid movetext");
    let exd6 = &game.moves()[4];
    assert!(exd6.is_en_passant());
    assert_eq!(exd6.captured(), Some(Role::Pawn));
    assert_eq!(exd6.ep_square(), Some(Square::D5));

    let state = game.final_state();
    assert_eq!(state.board.piece_at(Square::D6), Some(Color::White.pawn()));
    assert_eq!(state.board.piece_at(Square::D5), None);

    let bare = parse_game("1. e4 a6 2. e5 d5 3. ed6", None).expect("valid movetext");
    assert!(bare.moves()[4].is_en_passant());
    assert_eq!(bare.final_state(), game.final_state());

    assert_eq!(
        parse_game("1. e4 a6 2. e5 d6 3. exf6", None),
        Err(ParseError::InvalidEnPassant {
            token: "exf6".to_owned()
        })
    );
}

#[test]
fn test_malformed_input() {
    assert_eq!(
        parse_game("1. e4 e5 2. Zf3", None),
        Err(ParseError::MalformedToken {
            token: "Zf3".to_owned()
        })
    );
    assert_eq!(
        "[FEN \"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq\"]\n1. e4"
            .parse::<pgn_tree::Game>()
            .expect_err("short fen")
            .kind(),
        ParseErrorKind::InvalidStartingPosition
    );
}

#[test]
fn test_first_candidate_wins() {
    // Both rooks reach d4. The one found first is taken.
    let moves = parse_sequence("1. Rd4", state("4k3/8/8/8/R6R/8/8/4K3 w - - 0 1"))
        .expect("valid movetext");
    assert_eq!(moves[0].from(), Some(Square::H4));
}

#[test]
fn test_knight_check_is_not_seen() {
    // White is in check from the knight on f3, yet the rook move resolves.
    let moves = parse_sequence("1. Ra2", state("4k3/8/8/8/8/5n2/8/R3K3 w - - 0 1"))
        .expect("valid movetext");
    assert_eq!(moves[0].from(), Some(Square::A1));
}

#[test]
fn test_unreachable_origin() {
    for movetext in ["1. Nb1b5", "1. Pe2e5", "1. e4 d5 2. Pe4h7", "1. e4=Q"] {
        assert_eq!(
            parse_sequence(movetext, GameState::new())
                .expect_err(movetext)
                .kind(),
            ParseErrorKind::AmbiguousOrUnresolvedMove,
            "{movetext}"
        );
    }

    let moves = parse_sequence("1. Pe2e4 d5 2. Pe4d5", GameState::new()).expect("valid movetext");
    assert_eq!(moves[2].captured(), Some(Role::Pawn));
}
