use anyhow::Result;
use image::{Rgb, RgbImage};
use ndarray::Array4;
use plant_core::{
    AppConfig, Classifier, ClassifierError, Decision, LabelTable, UNPREDICTABLE_MESSAGE,
};
use std::fs;
use tempfile::tempdir;

/// Stand-in model that always answers with the same probabilities.
fn fixed(probs: Vec<f32>) -> Box<dyn plant_core::Inference> {
    Box::new(move |_: &Array4<f32>| -> plant_core::Result<Vec<f32>> { Ok(probs.clone()) })
}

#[test]
fn photo_on_disk_is_classified_as_watermelon() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("melon.jpg");
    RgbImage::from_pixel(640, 480, Rgb([30, 160, 40])).save(&path)?;

    let labels = LabelTable::builtin();
    let mut probs = vec![0.1; labels.len()];
    probs[labels.len() - 1] = 0.9;
    let classifier = Classifier::new(fixed(probs), labels);

    let c = classifier.classify_path(&path)?;
    assert_eq!(c.decision, Decision::Label("watermelon".into()));
    assert_eq!(
        c.display_text(),
        "🌿 Predicted Class: watermelon\nConfidence Level: 0.90"
    );
    Ok(())
}

#[test]
fn uniform_scores_are_unpredictable() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("blur.png");
    RgbImage::new(150, 150).save(&path)?;

    let n = LabelTable::builtin().len();
    let classifier = Classifier::new(fixed(vec![1.0 / n as f32; n]), LabelTable::builtin());
    assert_eq!(classifier.classify_path(&path)?.display_text(), UNPREDICTABLE_MESSAGE);
    Ok(())
}

#[test]
fn unreadable_image_is_reported_not_panicked() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("empty.png");
    fs::write(&path, b"")?;
    let classifier = Classifier::new(fixed(vec![1.0]), LabelTable::builtin());
    let err = classifier.classify_path(&path).unwrap_err();
    assert!(matches!(err, ClassifierError::Image { .. }));
    Ok(())
}

#[test]
fn config_supplies_labels_but_not_model_contract() -> Result<()> {
    let dir = tempdir()?;
    let labels_path = dir.path().join("labels.txt");
    fs::write(&labels_path, "rose\ntulip\n")?;
    let cfg_path = dir.path().join("plant_classifier.toml");
    fs::write(
        &cfg_path,
        format!("labels_path = {:?}\n", labels_path.display().to_string()),
    )?;
    let cfg = AppConfig::load_or_default(&cfg_path)?;

    let img_path = dir.path().join("flower.png");
    RgbImage::new(8, 8).save(&img_path)?;

    let classifier = Classifier::with_config(fixed(vec![0.61, 0.39]), &cfg)?;
    assert_eq!(
        classifier.classify_path(&img_path)?.decision,
        Decision::Label("rose".into())
    );

    let classifier = Classifier::with_config(fixed(vec![0.39, 0.38]), &cfg)?;
    assert_eq!(classifier.classify_path(&img_path)?.decision, Decision::Unpredictable);

    fs::write(&cfg_path, "input_size = 224\n")?;
    assert!(matches!(
        AppConfig::load_or_default(&cfg_path),
        Err(ClassifierError::Config { .. })
    ));
    Ok(())
}
