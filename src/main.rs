#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_arbiter::{
    init_logging, BotPlayer, Dimensions, InMemoryTransport, MatchNode, PlayerClient, PlayerId,
    ServerConfig, TcpTransport, MAX_LINE_LEN, MIN_DIMENSION, PLAYER1_PORT, PLAYER2_PORT,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use serde_json::json;
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Log level (error, warn, info, debug, trace). Overrides BATTLESHIP_LOG.
    #[arg(long, global = true)]
    log_level: Option<log::LevelFilter>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Seat {
    One,
    Two,
}

#[cfg(feature = "std")]
impl From<Seat> for PlayerId {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::One => PlayerId::One,
            Seat::Two => PlayerId::Two,
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Accept one connection per player and referee a single match.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = PLAYER1_PORT)]
        player1_port: u16,
        #[arg(long, default_value_t = PLAYER2_PORT)]
        player2_port: u16,
        #[arg(long, default_value_t = 300, help = "Seconds a player may stay silent before forfeiting")]
        timeout_secs: u64,
        #[arg(long, default_value_t = MAX_LINE_LEN)]
        max_line_len: usize,
    },
    /// Connect a bot player to a running server.
    Bot {
        #[arg(long, default_value = "127.0.0.1:2201")]
        connect: String,
        #[arg(long, value_enum, default_value_t = Seat::One)]
        seat: Seat,
        #[arg(long, default_value_t = MIN_DIMENSION)]
        width: i32,
        #[arg(long, default_value_t = MIN_DIMENSION)]
        height: i32,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Referee a bot-vs-bot match in this process and print a JSON report.
    Local {
        #[arg(long, default_value_t = MIN_DIMENSION)]
        width: i32,
        #[arg(long, default_value_t = MIN_DIMENSION)]
        height: i32,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
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
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::Serve {
            host,
            player1_port,
            player2_port,
            timeout_secs,
            max_line_len,
        } => {
            let config = ServerConfig {
                host,
                ports: [player1_port, player2_port],
                read_timeout: Duration::from_secs(timeout_secs),
                max_line_len,
            };
            config.validate()?;
            serve(config).await?;
        }
        Commands::Bot {
            connect,
            seat,
            width,
            height,
            seed,
        } => {
            let mut rng = make_rng(seed);
            let transport = TcpTransport::connect(&connect).await?;
            log::info!("connected to {}", connect);
            let mut client = PlayerClient::new(Box::new(BotPlayer::new()), Box::new(transport));
            let status = client
                .run(&mut rng, seat.into(), Dimensions { width, height })
                .await?;
            println!("{:?} after {} shots", status, client.shots());
        }
        Commands::Local {
            width,
            height,
            seed,
        } => {
            let dimensions = Dimensions { width, height };
            let mut rng1 = make_rng(seed);
            let mut rng2 = make_rng(seed.map(|s| s.wrapping_add(1)));

            let (server1, client1) = InMemoryTransport::pair();
            let (server2, client2) = InMemoryTransport::pair();

            let server = async move {
                let mut node = MatchNode::new(Box::new(server1), Box::new(server2));
                node.run().await
            };
            let player1 = async move {
                let mut client = PlayerClient::new(Box::new(BotPlayer::new()), Box::new(client1));
                let status = client.run(&mut rng1, PlayerId::One, dimensions).await?;
                Ok::<_, anyhow::Error>((status, client.shots()))
            };
            let player2 = async move {
                let mut client = PlayerClient::new(Box::new(BotPlayer::new()), Box::new(client2));
                let status = client.run(&mut rng2, PlayerId::Two, dimensions).await?;
                Ok::<_, anyhow::Error>((status, client.shots()))
            };

            let (outcome, res1, res2) = tokio::try_join!(server, player1, player2)?;
            let report = json!({
                "outcome": outcome,
                "player1": {"status": res1.0, "shots": res1.1},
                "player2": {"status": res2.0, "shots": res2.1},
            });
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener1 = TcpListener::bind(config.bind_addr(PlayerId::One)).await?;
    let listener2 = TcpListener::bind(config.bind_addr(PlayerId::Two)).await?;
    log::info!(
        "waiting for players on {} and {}",
        listener1.local_addr()?,
        listener2.local_addr()?
    );

    let (stream1, addr1) = listener1.accept().await?;
    log::info!("player 1 connected from {}", addr1);
    let (stream2, addr2) = listener2.accept().await?;
    log::info!("player 2 connected from {}", addr2);

    let transport1 = TcpTransport::with_config(stream1, config.read_timeout, config.max_line_len);
    let transport2 = TcpTransport::with_config(stream2, config.read_timeout, config.max_line_len);
    let mut node = MatchNode::new(Box::new(transport1), Box::new(transport2));
    let outcome = node.run().await?;
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}
