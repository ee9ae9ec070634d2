use database::DbRepository;
use web_server::AppState;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves the API against PostgreSQL using `config.toml` and `.env`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config()?;
    let _guard = configuration::init_logging(&config.logging)?;

    let pool = database::connect().await?;
    database::run_migrations(&pool).await?;

    let addr = config.server.socket_addr()?;
    let state = AppState::new(DbRepository::new(pool), config);
    web_server::run_server(state, addr).await
}
