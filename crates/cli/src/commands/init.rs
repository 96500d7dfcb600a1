use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::{env, fs};

use taskbridge_core::{Settings, config::CONFIG_FILE_NAMES};

pub fn init_command(cwd: Option<&Path>, force: bool) -> Result<i32> {
    let root = match cwd {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let root = root
        .canonicalize()
        .context("Failed to canonicalize workspace root")?;

    let config_path = root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(1);
    }

    println!("🚀 Initializing taskbridge in: {}", root.display());
    let settings = Settings {
        bundles_dir: Some(PathBuf::from(crate::host::DEFAULT_BUNDLES_DIR)),
        ..Settings::default()
    };
    settings
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    fs::create_dir_all(root.join(crate::host::DEFAULT_BUNDLES_DIR))
        .context("Failed to create bundles directory")?;

    println!("✅ Created config: {}", config_path.display());
    println!("\n📌 Next steps:");
    println!("   Install a builder under {}/<name>_<version>/bin/{}", crate::host::DEFAULT_BUNDLES_DIR, settings.tool);
    println!("   or set \"use-specific-builder-home\" and \"manual-builder-home\" under \"preferences\"");
    Ok(0)
}
