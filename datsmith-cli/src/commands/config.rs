use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{Settings, settings_path};

/// Show the settings file location and its effective contents.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "datsmith Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let settings = Settings::load()?;
    log::info!("  key            = {}", settings.key.unwrap_or_default());
    log::info!("  case_sensitive = {}", settings.case_sensitive);
    log::info!("  parallel       = {}", settings.parallel);
    match &settings.output_dir {
        Some(dir) => log::info!("  output_dir     = {}", dir.display()),
        None => log::info!(
            "  output_dir     = {}",
            "(current directory)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }

    if !path.exists() {
        crate::log_blank();
        log::info!("Example settings.toml:");
        log::info!("{}", Settings::default().to_toml()?);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
