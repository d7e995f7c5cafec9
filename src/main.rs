use clap::Parser;
use juststreamit::app::export;
use juststreamit::config::Command;
use juststreamit::core::Renderer;
use juststreamit::domain::model::HomePage;
use juststreamit::utils::error::{CatalogueError, ErrorSeverity};
use juststreamit::utils::logger;
use juststreamit::{
    CliConfig, HttpCatalogue, MovieService, OutputFormat, TerminalRenderer, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting juststreamit");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.effective_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Catalogue endpoint: {}", config.api.base_url);

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &TomlConfig) -> juststreamit::Result<()> {
    let service = MovieService::new(HttpCatalogue::from_config(config)?);
    let format = cli.format;

    match &cli.command {
        Command::Home => {
            if matches!(format, OutputFormat::Csv | OutputFormat::Tsv) {
                return Err(CatalogueError::InvalidConfigValueError {
                    field: "format".to_string(),
                    value: format!("{:?}", format).to_lowercase(),
                    reason: "home supports text or json".to_string(),
                });
            }
            let home = service
                .home_page(&config.home.carousel_requests(), config.home.hero)
                .await;
            show_home(format, &home)
        }
        Command::Genre { genre, skip, total } => {
            let items = service.movies_by_genre(genre, *skip, *total).await?;
            tracing::info!("✅ {} titles for '{}'", items.len(), genre);
            match format {
                OutputFormat::Text => {
                    let mut renderer = TerminalRenderer::new(std::io::stdout().lock());
                    renderer.carousel(genre, &Ok(items))
                }
                _ => export::write_items(std::io::stdout().lock(), format, &items),
            }
        }
        Command::Details { id } => {
            let details = service.movie_details(*id).await?;
            match format {
                OutputFormat::Text => {
                    TerminalRenderer::new(std::io::stdout().lock()).details(&details)
                }
                _ => export::write_details(std::io::stdout().lock(), &details),
            }
        }
        Command::Search { query, page } => {
            let items = service.search(query, *page).await?;
            tracing::info!("✅ {} titles match '{}'", items.len(), query);
            match format {
                OutputFormat::Text => {
                    TerminalRenderer::new(std::io::stdout().lock()).list(&items)
                }
                _ => export::write_items(std::io::stdout().lock(), format, &items),
            }
        }
        Command::Genres => {
            let genres = MovieService::<HttpCatalogue>::available_genres();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(genres)?);
                }
                _ => genres.iter().for_each(|genre| println!("{}", genre)),
            }
            Ok(())
        }
    }
}

fn show_home(format: OutputFormat, home: &HomePage) -> juststreamit::Result<()> {
    if format == OutputFormat::Json {
        let carousels: Vec<serde_json::Value> = home
            .carousels
            .iter()
            .map(|carousel| match &carousel.items {
                Ok(items) => serde_json::json!({
                    "title": carousel.title,
                    "genre": carousel.genre,
                    "items": items,
                }),
                Err(e) => serde_json::json!({
                    "title": carousel.title,
                    "genre": carousel.genre,
                    "error": e.to_string(),
                }),
            })
            .collect();
        let hero = match &home.hero {
            Some(Ok(hero)) => serde_json::to_value(&hero.details)?,
            Some(Err(e)) => serde_json::json!({ "error": e.to_string() }),
            None => serde_json::Value::Null,
        };
        let body = serde_json::json!({ "hero": hero, "carousels": carousels });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let mut renderer = TerminalRenderer::new(std::io::stdout().lock());
    if let Some(hero) = &home.hero {
        renderer.hero(hero)?;
    }
    for carousel in &home.carousels {
        renderer.carousel(&carousel.title, &carousel.items)?;
    }
    Ok(())
}
