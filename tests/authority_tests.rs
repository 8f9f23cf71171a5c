use gridlock::authority::accept_pair;
use gridlock::{
    bot, decode_status, serve_match, Authority, Board, BoardError, CellState, FrameReader,
    FrameWriter, InMemoryTransport, MoveRejection, Side, TcpTransport, CELL_COUNT,
};
use rand::{rngs::SmallRng, SeedableRng};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::{timeout, Duration};

#[test]
fn authority_enforces_turns() {
    let mut authority = Authority::new();
    assert_eq!(authority.to_move(), Side::A);
    assert_eq!(authority.apply_move(Side::B, 0), Err(MoveRejection::NotYourTurn(Side::B)));
    authority.apply_move(Side::A, 0).unwrap();
    assert_eq!(
        authority.apply_move(Side::B, 0),
        Err(MoveRejection::Board(BoardError::Occupied(0)))
    );
    authority.apply_move(Side::B, 1).unwrap();
    assert_eq!(authority.accepted(), 2);
    assert_eq!(authority.rejected(), 2);
    assert_eq!(authority.status_frame(), "0,0,0,1,2,2,2,2,2,2,2,-1");
}

#[test]
fn finished_match_rejects_moves() {
    let mut authority = Authority::new();
    for cell in 0..CELL_COUNT {
        let side = authority.to_move();
        authority.apply_move(side, cell).unwrap();
    }
    assert!(authority.is_finished());
    assert_eq!(authority.apply_move(Side::B, 0), Err(MoveRejection::GameOver));
}

#[tokio::test]
async fn serves_handshake_and_applies_moves() -> anyhow::Result<()> {
    let ((auth_a_rx, auth_a_tx), (mut a_rx, mut a_tx)) = InMemoryTransport::pair();
    let ((auth_b_rx, auth_b_tx), (mut b_rx, mut b_tx)) = InMemoryTransport::pair();
    let (stop_tx, stop_rx) = watch::channel(false);
    let match_task = tokio::spawn(serve_match(
        [(auth_a_rx, auth_a_tx), (auth_b_rx, auth_b_tx)],
        Duration::from_secs(60),
        stop_rx,
    ));

    assert_eq!(a_rx.recv().await?, "0");
    assert_eq!(b_rx.recv().await?, "1");
    assert_eq!(a_rx.recv().await?, "ready");
    assert_eq!(b_rx.recv().await?, "ready");
    assert!(decode_status(&a_rx.recv().await?)?.cells.iter().all(|c| c.is_empty()));
    b_rx.recv().await?;

    // Out of turn: rejected but still answered with the current board.
    b_tx.send("4").await?;
    let frame = decode_status(&b_rx.recv().await?)?;
    assert_eq!(frame.cells[4], CellState::Empty);
    a_rx.recv().await?;

    a_tx.send("4").await?;
    let frame = decode_status(&a_rx.recv().await?)?;
    assert_eq!(frame.cells[4], CellState::Owned(Side::A));
    assert_eq!(decode_status(&b_rx.recv().await?)?, frame);

    a_tx.send("not a move").await?;
    assert_eq!(decode_status(&a_rx.recv().await?)?, frame);

    stop_tx.send(true)?;
    let board = timeout(Duration::from_secs(1), match_task).await???;
    assert_eq!(board.cell(4), Some(CellState::Owned(Side::A)));
    assert_eq!(board.count(Side::A), 1);
    Ok(())
}

#[tokio::test]
async fn periodic_broadcast_repeats_the_board() -> anyhow::Result<()> {
    let ((auth_a_rx, auth_a_tx), (mut a_rx, _a_tx)) = InMemoryTransport::pair();
    let ((auth_b_rx, auth_b_tx), (_b_rx, _b_tx)) = InMemoryTransport::pair();
    let (_stop_tx, stop_rx) = watch::channel(false);
    let match_task = tokio::spawn(serve_match(
        [(auth_a_rx, auth_a_tx), (auth_b_rx, auth_b_tx)],
        Duration::from_millis(20),
        stop_rx,
    ));

    a_rx.recv().await?;
    a_rx.recv().await?;
    let first = a_rx.recv().await?;
    let repeat = timeout(Duration::from_secs(1), a_rx.recv()).await??;
    assert_eq!(first, repeat);
    match_task.abort();
    Ok(())
}

#[tokio::test]
async fn dropped_player_ends_the_match() -> anyhow::Result<()> {
    let ((auth_a_rx, auth_a_tx), a_end) = InMemoryTransport::pair();
    let ((auth_b_rx, auth_b_tx), _b_end) = InMemoryTransport::pair();
    let (_stop_tx, stop_rx) = watch::channel(false);
    drop(a_end);

    let result = timeout(
        Duration::from_secs(1),
        serve_match(
            [(auth_a_rx, auth_a_tx), (auth_b_rx, auth_b_tx)],
            Duration::from_secs(60),
            stop_rx,
        ),
    )
    .await?;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn bots_play_a_full_match() -> anyhow::Result<()> {
    let ((auth_a_rx, auth_a_tx), (mut a_rx, mut a_tx)) = InMemoryTransport::pair();
    let ((auth_b_rx, auth_b_tx), (mut b_rx, mut b_tx)) = InMemoryTransport::pair();
    let (_stop_tx, stop_rx) = watch::channel(false);
    let mut rng_a = SmallRng::seed_from_u64(7);
    let mut rng_b = SmallRng::seed_from_u64(8);

    let run = async {
        tokio::try_join!(
            serve_match(
                [(auth_a_rx, auth_a_tx), (auth_b_rx, auth_b_tx)],
                Duration::from_millis(50),
                stop_rx,
            ),
            bot::play(&mut a_rx, &mut a_tx, &mut rng_a),
            bot::play(&mut b_rx, &mut b_tx, &mut rng_b),
        )
    };
    let (board, seen_a, seen_b): (Board, Board, Board) =
        timeout(Duration::from_secs(5), run).await??;

    assert!(board.is_full());
    assert_eq!(board.count(Side::A), 5);
    assert_eq!(board.count(Side::B), 4);
    assert_eq!(seen_a, board);
    assert_eq!(seen_b, board);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn accepts_two_clients_over_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (_stop_tx, stop_rx) = watch::channel(false);

    let server = tokio::spawn(async move {
        let players = accept_pair(&listener).await?;
        serve_match(players, Duration::from_secs(60), stop_rx).await
    });

    let (mut a_rx, mut a_tx) = TcpTransport::connect(addr).await?;
    let (mut b_rx, mut b_tx) = TcpTransport::connect(addr).await?;
    assert_eq!(a_rx.recv().await?, "0");
    assert_eq!(b_rx.recv().await?, "1");
    assert_eq!(a_rx.recv().await?, "ready");
    assert_eq!(b_rx.recv().await?, "ready");

    let mut rng_a = SmallRng::seed_from_u64(1);
    let mut rng_b = SmallRng::seed_from_u64(2);
    let mover = gridlock::RandomMover::new();
    let mut board = Board::new();
    while !board.is_full() {
        let frame_a = a_rx.recv().await?;
        let frame_b = b_rx.recv().await?;
        assert_eq!(frame_a, frame_b);
        board = Board::from(&decode_status(&frame_a)?);
        match board.next_to_move() {
            Side::A => {
                if let Some(cell) = mover.choose(&mut rng_a, &board) {
                    a_tx.send(&gridlock::encode_move(cell)).await?;
                }
            }
            Side::B => {
                if let Some(cell) = mover.choose(&mut rng_b, &board) {
                    b_tx.send(&gridlock::encode_move(cell)).await?;
                }
            }
        }
    }

    let final_board = timeout(Duration::from_secs(2), server).await???;
    assert_eq!(final_board, board);
    Ok(())
}
