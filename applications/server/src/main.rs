/// Cadence Server - stateless queue resolver service
use cadence_core::Role;
use cadence_server::{
    config::ServerConfig,
    create_router,
    services::{import_catalog, AuthService, CatalogFile},
    state::AppState,
};
use cadence_storage::Database;
use clap::{Parser, Subcommand};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-server")]
#[command(about = "Cadence queue resolver server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Role: user, artist or admin
        #[arg(short, long, default_value = "user", value_parser = parse_role)]
        role: Role,
    },
    /// List all users
    ListUsers,
    /// Load tracks and playlists from a JSON seed file
    ImportCatalog {
        /// Seed file path
        path: PathBuf,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::from_str(s).ok_or_else(|| format!("unknown role '{s}' (expected user, artist or admin)"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            username,
            password,
            role,
        } => add_user(&config, &username, &password, role).await?,
        Commands::ListUsers => list_users(&config).await?,
        Commands::ImportCatalog { path } => import(&config, &path).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Cadence Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = Arc::new(Database::connect(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));

    let app_state = AppState::new(db, auth_service, config.player);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::from_settings(&config.auth)
}

async fn add_user(
    config: &ServerConfig,
    username: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<()> {
    let db = Database::connect(&config.storage.database_url).await?;

    let password_hash = auth_service(config).hash_password(password)?;
    let user = cadence_storage::users::create(db.pool(), username, role, &password_hash).await?;

    println!("Created {} '{}' ({})", user.role, user.name, user.id);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.storage.database_url).await?;
    let users = cadence_storage::users::get_all(db.pool()).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({})", user.id, user.name, user.role);
    }

    Ok(())
}

async fn import(config: &ServerConfig, path: &Path) -> anyhow::Result<()> {
    let file = CatalogFile::read(path)?;
    let db = Database::connect(&config.storage.database_url).await?;

    let summary = import_catalog(&db, &file).await?;
    println!(
        "Imported {} tracks ({} already present) and {} playlists ({} already present)",
        summary.tracks_added,
        summary.tracks_skipped,
        summary.playlists_added,
        summary.playlists_skipped
    );

    Ok(())
}
