use gridlock::{bot, serve_match, InMemoryTransport, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use tokio::sync::watch;
use tokio::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let ((auth_a_rx, auth_a_tx), (mut bot_a_rx, mut bot_a_tx)) = InMemoryTransport::pair();
    let ((auth_b_rx, auth_b_tx), (mut bot_b_rx, mut bot_b_tx)) = InMemoryTransport::pair();
    let (_stop_tx, stop_rx) = watch::channel(false);

    let authority = serve_match(
        [(auth_a_rx, auth_a_tx), (auth_b_rx, auth_b_tx)],
        Duration::from_millis(50),
        stop_rx,
    );
    let a = bot::play(&mut bot_a_rx, &mut bot_a_tx, &mut rng1);
    let b = bot::play(&mut bot_b_rx, &mut bot_b_tx, &mut rng2);

    let (board, seen_a, seen_b) = tokio::try_join!(authority, a, b)?;

    let result = json!({
        "board": board,
        "marks": {
            "A": board.count(Side::A),
            "B": board.count(Side::B),
        },
        "full": board.is_full(),
        "agreed": seen_a == board && seen_b == board,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
