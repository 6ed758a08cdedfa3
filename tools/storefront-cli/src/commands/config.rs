//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorageBackend, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("path", &ctx.config.catalog.path);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("backend", ctx.config.storage.backend.as_str());
    if ctx.config.storage.backend == StorageBackend::File {
        ctx.output.kv("dir", &ctx.config.storage.dir);
    }
    ctx.output.kv("namespace", &ctx.config.storage.namespace);
    ctx.output.kv("slot", &ctx.config.cart_slot());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "processing_delay_ms",
        &ctx.config.checkout.processing_delay_ms.to_string(),
    );

    Ok(())
}

fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(catalog))?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    if !ctx.cwd.join(catalog).exists() {
        ctx.output
            .warn(&format!("Catalog not found yet: {}", catalog));
    }

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    match ctx.catalog() {
        Ok(catalog) if catalog.is_empty() => warnings.push("catalog has no products".to_string()),
        Ok(catalog) => ctx
            .output
            .kv("catalog", &format!("{} products", catalog.len())),
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if ctx.config.storage.namespace.trim().is_empty() {
        errors.push("storage.namespace must not be empty".to_string());
    }
    if ctx.config.storage.backend == StorageBackend::Memory {
        warnings.push("storage.backend = \"memory\" forgets the cart on exit".to_string());
    }
    if ctx.config.checkout.processing_delay_ms > 60_000 {
        warnings.push(format!(
            "checkout.processing_delay_ms is {} (over a minute)",
            ctx.config.checkout.processing_delay_ms
        ));
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
