use lambda_http::{run, Error};
use tracing::info;
use bookshelf::catalog::controller::build_router;
use bookshelf::core::controller::AppState;
use bookshelf::core::domain::{Configuration, RunMode};
use bookshelf::core::repository::RepositoryStore;
use bookshelf::utils::logging::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html for the lambda mode

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env()?;
    setup_tracing(config.log_level.as_str());

    let state = AppState::new(config.clone(), RepositoryStore::new());

    match config.run_mode {
        RunMode::Lambda => {
            info!(branch = config.branch_id.as_str(), "serving catalog through lambda runtime");
            run(build_router::<lambda_http::Body>(state)).await
        }
        RunMode::Local => {
            info!(branch = config.branch_id.as_str(), address = %config.bind_address, "serving catalog");
            axum::Server::bind(&config.bind_address)
                .serve(build_router::<axum::body::Body>(state).into_make_service())
                .await?;
            Ok(())
        }
    }
}
