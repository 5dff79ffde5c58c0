// src/bin/ticker_server.rs
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;

use ticker_selector::server::{configure, not_found_handler, AppState};
use ticker_selector::{load_catalog, Messages, SelectorConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = SelectorConfig::from_env()?;
    let catalog = load_catalog(&config)?;
    let language = env::var("TICKER_LANG").unwrap_or_else(|_| "en".to_string());
    let messages = Messages::for_language(&language);
    let state = web::Data::new(AppState::new(config.clone(), catalog, messages));
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    println!("🚀 Ticker selector running on http://{}", bind_address);
    println!("📋 Available endpoints:");
    println!("  • GET    /search?q=&limit=              - Ranked catalog matches");
    println!("  • GET    /validate?symbol=              - Format check");
    println!("  • GET    /presets                       - Index presets");
    println!("  • POST   /selections                    - Open a selection");
    println!("  • GET    /selections/{{id}}               - Current selection");
    println!("  • DELETE /selections/{{id}}               - Close a selection");
    println!("  • POST   /selections/{{id}}/symbols       - Add a ticker");
    println!("  • DELETE /selections/{{id}}/symbols/{{s}}   - Remove a ticker");
    println!("  • POST   /selections/{{id}}/preset        - Load an index preset");
    println!("  • GET    /selections/{{id}}/events        - Change notifications (SSE)");
    println!("  • POST   /submit                        - Validate a serialized selection");
    println!("  • GET    /health                        - Health check");
    println!(
        "📚 Catalog: {} symbols, selection bounds {}-{}",
        state.catalog.len(),
        config.limits.min_selection(),
        config.limits.max_selection()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .default_service(web::to(not_found_handler))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
