#![cfg(feature = "serde")]

use pgn_tree::Game;
use serde_json::json;

#[test]
fn test_serialize_game() {
    let game: Game = "[White \"Anderssen\"]\n\
                      [FEN \"4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\"]\n\
                      1. e4 $1 {Onward.} (1. e3) Kd7 *"
        .parse()
        .expect("valid game");

    let value = serde_json::to_value(&game).expect("serializable");
    assert_eq!(
        value["tags"]["entries"],
        json!([
            ["White", "Anderssen"],
            ["FEN", "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"]
        ])
    );
    assert_eq!(value["starting_state"], json!("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));

    let e4 = &value["moves"][0];
    assert_eq!(e4["san"], json!("e4"));
    assert_eq!(e4["nags"], json!([1]));
    assert_eq!(e4["comment"], json!("Onward."));
    assert_eq!(
        e4["ply"],
        json!({
            "Move": {
                "color": "white",
                "m": {
                    "Normal": {
                        "role": "pawn",
                        "from": "e2",
                        "capture": null,
                        "to": "e4",
                        "promotion": null
                    }
                }
            }
        })
    );
    assert_eq!(e4["variations"][0][0]["san"], json!("e3"));
    assert_eq!(value["moves"][2]["ply"], json!({ "End": "*" }));
}
