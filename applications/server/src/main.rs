/// Portal Server - account registration and login
use clap::{Parser, Subcommand};
use portal_server::{
    config::ServerConfig,
    create_router,
    services::{AuthService, CredentialEncoder, CredentialScheme, CredentialService},
    state::AppState,
};
use portal_storage::SqliteAccountStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portal-server")]
#[command(about = "Portal account registration and login server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Register a new account
    AddUser {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all accounts (id, name, email)
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "portal_server=info,portal_storage=info,tower_http=info".into()
            }),
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
            name,
            email,
            password,
        } => {
            add_user(config, &name, &email, &password).await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

/// Open the store (fatal on failure) and wrap it in the credential service
async fn credential_service(config: &ServerConfig) -> anyhow::Result<CredentialService> {
    let store = SqliteAccountStore::open(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    let encoder = CredentialEncoder::new(config.auth.credential_scheme, config.auth.bcrypt_cost);
    if encoder.scheme() == CredentialScheme::LegacyBase64 {
        tracing::warn!(
            "New credentials are stored as reversible base64; switch auth.credential_scheme to bcrypt"
        );
    }

    Ok(CredentialService::new(Arc::new(store), encoder))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Portal Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let credentials = Arc::new(credential_service(&config).await?);

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ));
    tracing::info!("Auth service initialized");

    let app_state = AppState::new(credentials, auth_service);
    let app = create_router(app_state, &config.server);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn add_user(
    config: ServerConfig,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let credentials = credential_service(&config).await?;

    let account = credentials.register(name, email, password).await?;
    println!("Created account {} - {} <{}>", account.id, account.name, account.email);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let credentials = credential_service(&config).await?;

    let accounts = credentials.list_accounts().await?;

    println!("Users:");
    for account in accounts {
        println!("  {} - {} <{}>", account.id, account.name, account.email);
    }

    Ok(())
}
