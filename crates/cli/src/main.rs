use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};
use domain::Role;
use server::{Claims, Config, JwtKeys};

#[derive(Parser)]
#[command(name = "cinema")]
#[command(version = env!("APP_VERSION"))]
#[command(about = "Movie, screening and cinema catalogue server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Print a signed bearer token
    Token(TokenArgs),
}

#[derive(Args, Clone)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "CINEMA_PORT", default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "CINEMA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Database file path
    #[arg(short, long, env = "CINEMA_DATABASE", default_value = "cinema.db")]
    database: String,

    /// Maximum pooled database connections
    #[arg(long, default_value = "5")]
    max_connections: u32,

    /// TMDB API key
    #[arg(long, env = "TMDB_API_KEY", default_value = "", hide_env_values = true)]
    tmdb_api_key: String,

    /// Language for TMDB responses
    #[arg(long, env = "TMDB_LANGUAGE", default_value = "en-US")]
    tmdb_language: String,

    /// TMDB request timeout in seconds
    #[arg(long, default_value = "10")]
    tmdb_timeout: u64,

    /// Secret used to sign and verify bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

#[derive(Args)]
struct TokenArgs {
    /// Subject (caller name) stored in the token
    #[arg(long)]
    subject: String,

    /// ADMIN or USER
    #[arg(long, default_value = "USER")]
    role: Role,

    /// Token lifetime in hours
    #[arg(long, default_value = "24")]
    ttl_hours: i64,

    /// Secret used to sign the token
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Token(args)) => {
            let keys = JwtKeys::new(args.jwt_secret.as_bytes());
            let ttl = chrono::Duration::hours(args.ttl_hours);
            let claims = Claims::new(args.subject, args.role, ttl);
            println!("{}", keys.issue(&claims)?);
            Ok(())
        }
        Some(Command::Serve(args)) => serve(args).await,
        None => serve(cli.serve).await,
    }
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let database_url = format!("sqlite:{}?mode=rwc", args.database);

    let jwt_secret = args
        .jwt_secret
        .ok_or("JWT_SECRET (or --jwt-secret) is required to serve")?;
    if args.tmdb_api_key.is_empty() {
        tracing::warn!("TMDB_API_KEY is not set, TMDB requests will be rejected");
    }

    let mut config = Config::new(addr, database_url, args.tmdb_api_key, jwt_secret);
    config.max_connections = args.max_connections;
    config.tmdb_language = args.tmdb_language;
    config.tmdb_timeout_secs = args.tmdb_timeout;

    tracing::info!("cinema {} starting", env!("APP_VERSION"));
    server::run_server(config).await
}
