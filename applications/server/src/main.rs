/// Stowaway Server - record collection API
use clap::{Parser, Subcommand};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use stowaway_core::{types::CreateUser, RecordStore};
use stowaway_discogs::DiscogsClient;
use stowaway_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use stowaway_storage::LocalStorageContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stowaway-server")]
#[command(about = "Stowaway record collection server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "STOWAWAY_CONFIG")]
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
        /// First name
        #[arg(long, default_value = "")]
        first_name: String,
        /// Last name
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stowaway_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            first_name,
            last_name,
        } => {
            let user = CreateUser {
                username,
                first_name,
                last_name,
            };
            add_user(&config, user, &password).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
    }

    Ok(())
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<LocalStorageContext> {
    ensure_parent_dir(&config.storage.database_url)?;
    let db = LocalStorageContext::connect(&config.storage.database_url).await?;
    tracing::info!("Database connected");
    Ok(db)
}

/// SQLite will not create missing directories for a file URL
fn ensure_parent_dir(database_url: &str) -> anyhow::Result<()> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    if path.is_empty() || path.starts_with(':') {
        return Ok(());
    }

    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Stowaway Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db: Arc<dyn RecordStore> = Arc::new(open_store(&config).await?);

    let auth_service = Arc::new(
        AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_expiration_hours,
        )
        .with_hash_cost(config.auth.bcrypt_cost),
    );
    tracing::info!("Auth service initialized");

    if config.discogs.token.as_deref().map_or(true, str::is_empty) {
        tracing::warn!("No Discogs token configured; catalog search may be rejected upstream");
    }
    let catalog = Arc::new(DiscogsClient::new(config.discogs.client_config())?);
    tracing::info!("Discogs client targeting {}", catalog.base_url());

    let app_state = AppState::new(db, auth_service, catalog);
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

async fn add_user(config: &ServerConfig, user: CreateUser, password: &str) -> anyhow::Result<()> {
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    let db = open_store(config).await?;
    let auth_service =
        AuthService::new(String::new(), 0).with_hash_cost(config.auth.bcrypt_cost);

    let password_hash = auth_service.hash_password(password)?;
    let user = db.create_user(user, &password_hash).await?;

    tracing::info!("Created user {} (id {})", user.username, user.id);
    println!("Created user {} with id {}", user.username, user.id);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let db = open_store(config).await?;
    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} ({} {})",
            user.id, user.username, user.first_name, user.last_name
        );
    }

    Ok(())
}
