use anyhow::Result;
use colored::Colorize;

use duallist_types::AppConfig;

pub fn show_config(config: &AppConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Server:".cyan().bold());
    println!("  Listen: {}", config.server.get_socket_addr());
    println!("  Body limit: {} bytes", config.server.body_limit_bytes);
    println!(
        "  Backlog: {}{}",
        config.server.listen_backlog,
        if config.server.reuse_port { " (SO_REUSEPORT)" } else { "" }
    );
    if config.server.cors_origins.is_empty() {
        println!("  CORS origins: {}", "any".yellow());
    } else {
        println!("  CORS origins: {}", config.server.cors_origins.join(", "));
    }

    println!("{}", "Store:".cyan().bold());
    println!("  Seed count: {}", config.store.seed_count);
    println!("  Add placement: {}", config.store.add_placement);

    println!("{}", "Queues:".cyan().bold());
    println!("  Add flush: {}ms", config.queue.add_flush_ms);
    println!("  Update flush: {}ms", config.queue.update_flush_ms);
    match config.queue.max_pending {
        Some(cap) => println!("  Max pending: {}", cap),
        None => println!("  Max pending: {}", "unbounded".yellow()),
    }

    println!("{}", "Pagination:".cyan().bold());
    println!("  Default limit: {}", config.pagination.default_limit);
    println!("  Max limit: {}", config.pagination.max_limit);
    Ok(())
}

pub fn get_config_value(config: &AppConfig, key: &str) -> Result<()> {
    println!("{}", lookup(config, key)?);
    Ok(())
}

fn lookup(config: &AppConfig, key: &str) -> Result<String> {
    let value = match key {
        "server.port" => config.server.port.to_string(),
        "server.allow_lan_access" => config.server.allow_lan_access.to_string(),
        "server.body_limit_bytes" => config.server.body_limit_bytes.to_string(),
        "server.cors_origins" => config.server.cors_origins.join(","),
        "server.reuse_port" => config.server.reuse_port.to_string(),
        "server.listen_backlog" => config.server.listen_backlog.to_string(),
        "store.seed_count" => config.store.seed_count.to_string(),
        "store.add_placement" => config.store.add_placement.to_string(),
        "queue.add_flush_ms" => config.queue.add_flush_ms.to_string(),
        "queue.update_flush_ms" => config.queue.update_flush_ms.to_string(),
        "queue.max_pending" => {
            config.queue.max_pending.map_or_else(|| "none".to_string(), |cap| cap.to_string())
        },
        "pagination.default_limit" => config.pagination.default_limit.to_string(),
        "pagination.max_limit" => config.pagination.max_limit.to_string(),
        _ => anyhow::bail!("Unknown config key: {}", key),
    };
    Ok(value)
}
