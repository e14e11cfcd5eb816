use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath, from_fn};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use payroll::config::{Config, StorageBackend};
use payroll::db::{init_db, run_migrations};
use payroll::docs::ApiDoc;
use payroll::middleware::error_envelope;
use payroll::repository::{EmployeeRepository, InMemoryEmployeeRepository, MySqlEmployeeRepository};
use payroll::service::EmployeeService;
use payroll::{routes, telemetry};

/// Emails loaded per query while warming the email index.
const EMAIL_WARMUP_BATCH: u32 = 500;

async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn EmployeeRepository>> {
    match config.storage_backend {
        StorageBackend::Mysql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = init_db(url).await?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(MySqlEmployeeRepository::new(pool)))
        }
        StorageBackend::Memory => Ok(Arc::new(InMemoryEmployeeRepository::new())),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;
    let _guard = telemetry::init(&config);

    info!(
        addr = %config.server_addr,
        storage = %config.storage_backend,
        "Server starting..."
    );

    let repository = build_repository(&config).await?;
    let service = Data::new(EmployeeService::new(repository));

    let service_for_warmup = service.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = service_for_warmup
            .warmup_email_index(EMAIL_WARMUP_BATCH)
            .await
        {
            error!(error = %e, "Failed to warm up email index");
        }
    });

    let server_addr = config.server_addr.clone();
    let config_data = Data::new(config);

    HttpServer::new(move || {
        let config = config_data.clone();
        App::new()
            .app_data(config.clone())
            .app_data(service.clone())
            .wrap(from_fn(error_envelope))
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                // wildcard {_:.*} so the JS/CSS assets resolve
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}
