use anyhow::anyhow;
use astralith::core::application::{Application, ApplicationParts, ApplicationServices};
use astralith::core::config::{Config, Storage};
use astralith::domain::insights::{InsightRepository, default_analyzers};
use astralith::domain::integrations::IntegrationRepository;
use astralith::domain::pulse::PulseRepository;
use astralith::domain::teams::TeamRepository;
use astralith::domain::vault::EventRepository;
use astralith::domain::{auth, insights, integrations, pulse, teams, vault};
use astralith::inbound::http::router;
use astralith::outbound::db::connection;
use astralith::outbound::db::repository::Repository;
use astralith::outbound::identity::JwtIdentityAdapter;
use astralith::outbound::memory::MemoryRepository;
use clap::{Parser, Subcommand};
use std::process::exit;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type ApplicationAlias<R> = Application<
    auth::Service<JwtIdentityAdapter>,
    teams::Service<R>,
    integrations::Service<R>,
    insights::Service<R, R>,
    pulse::Service<R, insights::Service<R, R>>,
    vault::Service<R>,
>;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, env = "ASTRALITH_CONFIG")]
    config_path: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API.
    Run,
    /// Apply pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<(), anyhow::Error> {
    let config = Config::parse(cli.config_path)?;
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let command = cli.command.unwrap_or(Commands::Run);

    match config.storage {
        Storage::Memory => {
            if let Commands::Migrate = command {
                return Err(anyhow!("migrations require postgres storage"));
            }

            tracing::warn!("using in-memory storage, data is lost on shutdown");
            let application = create_application(MemoryRepository::new(), config)?;
            run_server(application).await
        }
        Storage::Postgres => {
            let pool = connection::connect(&config.db)
                .await
                .map_err(|e| anyhow!("could not connect to the database: {e}"))?;
            connection::migrate(&pool).await?;
            tracing::debug!("database migrations applied");

            match command {
                Commands::Migrate => Ok(()),
                Commands::Run => {
                    let application = create_application(Repository::new(pool), config)?;
                    run_server(application).await
                }
            }
        }
    }
}

fn create_application<R>(repo: R, config: Config) -> Result<ApplicationAlias<R>, anyhow::Error>
where
    R: TeamRepository
        + IntegrationRepository
        + InsightRepository
        + PulseRepository
        + EventRepository
        + Clone,
{
    tracing::debug!("creating identity adapter");
    let identity_adapter = JwtIdentityAdapter::new(&config.identity)
        .map_err(|e| anyhow!("failed to create identity adapter: {e}"))?;

    let insight_service = insights::Service::new(repo.clone(), repo.clone(), default_analyzers());

    Ok(Application::new(
        config,
        ApplicationParts {
            auth_service: auth::Service::new(identity_adapter),
            team_service: teams::Service::new(repo.clone()),
            integration_service: integrations::Service::new(repo.clone()),
            insight_service: insight_service.clone(),
            pulse_service: pulse::Service::new(repo.clone(), insight_service),
            vault_service: vault::Service::new(repo),
        },
    ))
}

async fn run_server<APP>(app: APP) -> anyhow::Result<()>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    let listen_addr = app.config().listen_addr;
    let router = router(app);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| anyhow!("server failed to bind {listen_addr}: {e}"))?;

    tracing::info!(
        "listening on {}",
        listener
            .local_addr()
            .map_err(|_| anyhow!("failed to get local_addr"))?
    );

    axum::serve(listener, router)
        .await
        .map_err(|_| anyhow!("failed to start server"))
}
