#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::atomic::AtomicBool;
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::time::Instant;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use gridlock::{
    authority::{accept_pair, DEFAULT_BROADCAST_INTERVAL},
    bot, decode_side, init_logging, serve_match,
    settings::DEFAULT_CONFIG_PATH,
    terminal::{spawn_stdin_reader, TerminalCommand, TerminalRenderer},
    ConnectionConfig, DecodeStats, FrameReader, InputEvent, MoveEmitter, PointerButton, Session,
    SharedBoard, SyncDecoder, TcpTransport,
};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::sync::{mpsc, watch};
#[cfg(feature = "std")]
use tokio::task::JoinHandle;
#[cfg(feature = "std")]
use tokio::time::{interval, Duration, MissedTickBehavior};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Join a match run by a remote authority.
    Client {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
    },
    /// Two players taking turns on this terminal.
    Local,
    /// Referee one match between the first two clients to connect.
    Authority {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, help = "Milliseconds between unsolicited status broadcasts")]
        broadcast_ms: Option<u64>,
    },
    /// Connect a random-move bot to an authority.
    Bot {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
const TICK: Duration = Duration::from_millis(16);

#[cfg(feature = "std")]
fn elapsed_ms(start: &Instant) -> u32 {
    u32::try_from(start.elapsed().as_millis()).unwrap_or(u32::MAX)
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Client { config } => {
            let result = run_client(&config).await;
            if let Err(e) = &result {
                log::error!("{}", e);
            }
            // The stdin reader keeps the runtime from shutting down on its own.
            std::process::exit(if result.is_ok() { 0 } else { 1 });
        }
        Commands::Local => {
            let start = Instant::now();
            let session = Session::local(elapsed_ms(&start));
            run_frontend(session, start, None).await;
            std::process::exit(0);
        }
        Commands::Authority { bind, broadcast_ms } => {
            let listener = TcpListener::bind(&bind).await?;
            log::info!("authority listening on {}", bind);
            let players = accept_pair(&listener).await?;

            let (stop_tx, stop_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    let _ = stop_tx.send(true);
                }
            });
            let every = broadcast_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_BROADCAST_INTERVAL);
            let board = serve_match(players, every, stop_rx).await?;
            log::info!("final board: {:?}", board);
        }
        Commands::Bot { config, seed } => {
            let config = ConnectionConfig::load(&config).map_err(|e| anyhow::anyhow!(e))?;
            let (mut reader, mut writer) = TcpTransport::connect(config.address()).await?;
            let mut rng = seeded_rng(seed);
            let board = bot::play(&mut reader, &mut writer, &mut rng).await?;
            log::info!("match over: {:?}", board);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_client(config_path: &str) -> anyhow::Result<()> {
    let config = ConnectionConfig::load(config_path).map_err(|e| anyhow::anyhow!(e))?;
    log::info!("connecting to {}", config.address());
    let (mut reader, writer) = TcpTransport::connect(config.address()).await?;
    let side = decode_side(&reader.recv().await?);
    log::info!("playing side {:?}", side);

    let start = Instant::now();
    let board = Arc::new(SharedBoard::new());
    let ready = Arc::new(AtomicBool::new(false));
    let (stop_tx, stop_rx) = watch::channel(false);
    let decoder = SyncDecoder::new(board.clone(), ready.clone()).spawn(reader, stop_rx);
    let (emitter, _emitter_task) = MoveEmitter::spawn(writer);

    let session = Session::remote(side, Box::new(emitter), board, ready, elapsed_ms(&start));
    run_frontend(session, start, Some(&decoder)).await;

    let _ = stop_tx.send(true);
    match decoder.await {
        Ok(Ok(DecodeStats { applied, skipped })) => {
            log::info!("session closed: {} frames applied, {} skipped", applied, skipped);
            Ok(())
        }
        Ok(Err(e)) => Err(e),
        Err(e) => Err(anyhow::anyhow!("decoder task failed: {}", e)),
    }
}

/// Drive `session` from the terminal until it quits or the decoder stops.
#[cfg(feature = "std")]
async fn run_frontend(
    mut session: Session,
    start: Instant,
    decoder: Option<&JoinHandle<anyhow::Result<DecodeStats>>>,
) {
    let (tx, mut commands) = mpsc::unbounded_channel();
    let _stdin = spawn_stdin_reader(tx);
    let mut renderer = TerminalRenderer::new();
    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while session.is_running() {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                session.handle(InputEvent::Quit);
            }
            _ = ticker.tick() => {}
        }

        while let Ok(command) = commands.try_recv() {
            match command {
                TerminalCommand::Event(event) => {
                    session.handle(event);
                }
                TerminalCommand::Cell(cell) => {
                    let spot = session.cell_centre(cell);
                    session.handle(InputEvent::Motion { x: spot.x, y: spot.y });
                    session.handle(InputEvent::Press {
                        x: spot.x,
                        y: spot.y,
                        button: PointerButton::Primary,
                    });
                }
            }
        }

        session.step(elapsed_ms(&start));
        session.render(&mut renderer);

        if decoder.is_some_and(|d| d.is_finished()) {
            log::warn!("connection to authority ended");
            break;
        }
    }
}
