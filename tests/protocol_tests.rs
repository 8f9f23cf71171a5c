use gridlock::protocol::{cell_from_token, cell_token, trim_frame, EMPTY_CELL_TOKEN, STATUS_FIELD_COUNT};
use gridlock::{
    decode_move, decode_side, decode_status, encode_move, encode_side, encode_status, Board,
    BoardUpdate, CellState, DecodeError, Side, UNDECIDED,
};
use proptest::prelude::*;

const A: CellState = CellState::Owned(Side::A);
const B: CellState = CellState::Owned(Side::B);
const E: CellState = CellState::Empty;

#[test]
fn decodes_reference_frame() {
    let update = decode_status("3,2,0,1,2,0,1,2,0,1,2,-1").unwrap();
    assert_eq!(update.score_a, 3);
    assert_eq!(update.score_b, 2);
    assert_eq!(update.cells, [A, B, E, A, B, E, A, B, E]);
    assert_eq!(update.winner, UNDECIDED);

    let mut board = Board::new();
    board.apply(&update);
    assert_eq!(board.score_a(), 3);
    assert_eq!(board.score_b(), 2);
    assert_eq!(board.cells(), &update.cells);
}

#[test]
fn tolerates_delimiter_and_padding() {
    let update = decode_status("1,0,2,2,2,2,0,2,2,2,2,-1\n\0\0\0").unwrap();
    assert_eq!(update.cells[4], A);
    assert_eq!(trim_frame(" 5 \r\n"), "5");
}

#[test]
fn unknown_cell_integers_mean_empty() {
    let update = decode_status("0,0,7,-3,2,2,2,2,2,2,2,-1").unwrap();
    assert_eq!(update.cells[0], E);
    assert_eq!(update.cells[1], E);
    assert_eq!(cell_from_token(1), B);
    assert_eq!(cell_token(E), EMPTY_CELL_TOKEN);
}

#[test]
fn wrong_field_count_is_rejected() {
    let err = decode_status("1,2,0,1").unwrap_err();
    assert_eq!(
        err,
        DecodeError::FieldCount {
            found: 4,
            frame: "1,2,0,1".to_string()
        }
    );
    assert!(decode_status("").is_err());
    let long = format!("{},9", "0,".repeat(STATUS_FIELD_COUNT - 1));
    assert!(matches!(decode_status(&long), Err(DecodeError::FieldCount { .. })));
}

#[test]
fn non_numeric_fields_are_rejected() {
    assert!(matches!(
        decode_status("x,0,2,2,2,2,2,2,2,2,2,-1"),
        Err(DecodeError::Score { field: 0, .. })
    ));
    assert!(matches!(
        decode_status("0,300,2,2,2,2,2,2,2,2,2,-1"),
        Err(DecodeError::Score { field: 1, .. })
    ));
    assert!(matches!(
        decode_status("0,0,2,2,2,q,2,2,2,2,2,-1"),
        Err(DecodeError::Cell { field: 5, .. })
    ));
    let err = decode_status("0,0,2,2,2,2,2,2,2,2,2,?").unwrap_err();
    assert_eq!(err.frame(), "0,0,2,2,2,2,2,2,2,2,2,?");
    assert!(err.to_string().contains("winner"));
}

#[test]
fn encodes_empty_cells_as_two() {
    let mut update = BoardUpdate::empty(4, 1);
    update.cells[0] = A;
    update.cells[8] = B;
    assert_eq!(encode_status(&update), "4,1,0,2,2,2,2,2,2,2,1,-1");
}

#[test]
fn move_frames() {
    assert_eq!(encode_move(7), "7");
    assert_eq!(decode_move("7\n").unwrap(), 7);
    assert!(matches!(decode_move("9"), Err(DecodeError::Move { .. })));
    assert!(matches!(decode_move("-1"), Err(DecodeError::Move { .. })));
    assert!(decode_move("left").is_err());
}

#[test]
fn side_tokens() {
    assert_eq!(decode_side(&encode_side(Side::A)), Side::A);
    assert_eq!(decode_side(&encode_side(Side::B)), Side::B);
    assert_eq!(decode_side("1\0\0\0"), Side::B);
    assert_eq!(decode_side("10"), Side::B);
    assert_eq!(decode_side("ready"), Side::A);
    assert_eq!(decode_side(""), Side::A);
}

fn cell_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![Just(0), Just(1), Just(EMPTY_CELL_TOKEN)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn status_frames_reencode_byte_for_byte(
        score_a in any::<u8>(),
        score_b in any::<u8>(),
        cells in proptest::collection::vec(cell_strategy(), 9),
    ) {
        let body: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        let frame = format!("{},{},{},-1", score_a, score_b, body.join(","));
        let update = decode_status(&frame).unwrap();
        prop_assert_eq!(encode_status(&update), frame);
    }

    #[test]
    fn garbage_never_panics(raw in ".{0,64}") {
        let _ = decode_status(&raw);
        let _ = decode_move(&raw);
        let _ = decode_side(&raw);
    }
}
