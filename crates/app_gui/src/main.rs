#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use anyhow::{Context, Result};
use app::{UiApp, WINDOW_TITLE};
use eframe::{NativeOptions, egui};
use plant_core::{AppConfig, Classifier, config::DEFAULT_CONFIG_FILE};
use std::path::Path;
use std::sync::Arc;

const APP_VERSION: &str = env!("PLANT_CLASSIFIER_VERSION");

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("starting plant classifier v{APP_VERSION}");

    let (cfg, classifier) = match startup(Path::new(DEFAULT_CONFIG_FILE)) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("{e:#}");
            app::show_error("Plant classifier cannot start", &format!("{e:#}"));
            return Err(e);
        }
    };

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([600.0, 750.0]),
        ..Default::default()
    };
    let thumbnail_size = cfg.thumbnail_size;
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            Ok(Box::new(UiApp::new(
                cc,
                classifier,
                thumbnail_size,
                APP_VERSION,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("application stopped with error: {e}"))
}

/// Reads the config and loads the model. Any failure here is reported to the
/// user before the window opens.
fn startup(config_path: &Path) -> Result<(AppConfig, Arc<Classifier>)> {
    let cfg = AppConfig::load_or_default(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let classifier = load_classifier(&cfg)?;
    Ok((cfg, Arc::new(classifier)))
}

#[cfg(feature = "onnx")]
fn load_classifier(cfg: &AppConfig) -> Result<Classifier> {
    Classifier::from_config(cfg)
        .with_context(|| format!("cannot load model {}", cfg.model_path.display()))
}

#[cfg(not(feature = "onnx"))]
fn load_classifier(cfg: &AppConfig) -> Result<Classifier> {
    anyhow::bail!(
        "built without an inference backend, cannot run {}; enable the `onnx` feature",
        cfg.model_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn malformed_config_fails_startup() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "thumbnail_size = \"big\"")?;
        let Err(err) = startup(&path) else {
            anyhow::bail!("startup accepted a malformed config");
        };
        let message = format!("{err:#}");
        assert!(message.starts_with("failed to read"));
        assert!(message.contains("invalid configuration"));
        Ok(())
    }

    #[test]
    fn missing_model_fails_startup_naming_the_file() -> Result<()> {
        let dir = tempdir()?;
        let model = dir.path().join("absent.onnx");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, format!("model_path = {:?}\n", model.display().to_string()))?;
        let Err(err) = startup(&path) else {
            anyhow::bail!("startup succeeded without a model file");
        };
        assert!(format!("{err:#}").contains(&model.display().to_string()));
        Ok(())
    }
}
