use anyhow::Context;
use clap::Parser;
use cube_solver::adapters::{build_solver, build_store, export};
use cube_solver::app::{schema, stdio};
use cube_solver::config::{AppConfig, CliConfig, Command};
use cube_solver::utils::{logger, validation::Validate};
use cube_solver::{ApiRequest, ApiResponse, Router, SolveRecordStore, SolveService};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, config.log_level(), config.log_format());

    tracing::info!("Starting cube-solver");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let mut service = SolveService::new(build_solver(&config)?, build_store(&config)?);
    if let Some(timeout) = config.persist_timeout() {
        service = service.with_persist_timeout(timeout);
    }
    let router = Arc::new(Router::new(service));

    let response = match cli.command {
        Command::Solve { body } => {
            let request = ApiRequest::post("/solve", read_body(&body).await?);
            router.dispatch_guarded(request).await
        }
        Command::Validate { body } => {
            let request = ApiRequest::post("/validate", read_body(&body).await?);
            router.dispatch_guarded(request).await
        }
        Command::Health => router.dispatch_guarded(ApiRequest::get("/health")).await,
        Command::History {
            limit,
            offset,
            csv: Some(path),
        } => {
            let mut query = std::collections::HashMap::new();
            query.extend(limit.map(|v| ("limit".to_string(), v)));
            query.extend(offset.map(|v| ("offset".to_string(), v)));
            let page = schema::parse_history_query(&query)?;

            let (records, total) = router.service().store().list(page.limit, page.offset).await?;
            let file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            export::write_history_csv(file, &records)?;

            tracing::info!("📁 Exported {} of {} solves", records.len(), total);
            println!("📁 Exported {} of {} solves to {}", records.len(), total, path.display());
            return Ok(());
        }
        Command::History { limit, offset, csv: None } => {
            let mut request = ApiRequest::get("/history");
            if let Some(limit) = limit {
                request = request.with_query("limit", limit);
            }
            if let Some(offset) = offset {
                request = request.with_query("offset", offset);
            }
            router.dispatch_guarded(request).await
        }
        Command::Stdio => {
            let served = stdio::serve(
                Arc::clone(&router),
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
            tracing::info!("Input closed after {} requests", served);
            return Ok(());
        }
    };

    print_response(&response)?;

    if !response.is_success() {
        std::process::exit(exit_code(&response));
    }

    Ok(())
}

async fn read_body(path: &Path) -> anyhow::Result<Vec<u8>> {
    if CliConfig::reads_stdin(path) {
        let mut body = Vec::new();
        tokio::io::stdin().read_to_end(&mut body).await?;
        Ok(body)
    } else {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read request body from {}", path.display()))
    }
}

fn print_response(response: &ApiResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}

// 根據狀態碼決定退出碼
fn exit_code(response: &ApiResponse) -> i32 {
    match response.status {
        400..=499 => 2,
        500..=599 => 3,
        _ => 1,
    }
}
