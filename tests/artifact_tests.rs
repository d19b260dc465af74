mod support;

use gamerec_api::{
    error::AppError,
    services::{
        artifacts::{FEATURE_COLUMNS_FILE, MODEL_FILE, SCALER_FILE},
        load_recommendation_system,
    },
};
use support::write_artifacts;

#[test]
fn test_load_valid_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    let system = load_recommendation_system(dir.path()).unwrap();
    assert_eq!(
        system.feature_columns(),
        ["game_average_rating", "category_preference", "never_built"]
    );
    assert_eq!(system.predict(&[4.0, 2.0, 7.0]), 5.0);
}

#[test]
fn test_missing_model_file() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    std::fs::remove_file(dir.path().join(MODEL_FILE)).unwrap();

    let error = load_recommendation_system(dir.path()).unwrap_err();
    assert!(matches!(error, AppError::ArtifactUnavailable(ref msg) if msg.contains(MODEL_FILE)));
}

#[test]
fn test_corrupt_scaler_file() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    std::fs::write(dir.path().join(SCALER_FILE), b"\x80\x04\x95 not json").unwrap();

    let error = load_recommendation_system(dir.path()).unwrap_err();
    assert!(matches!(error, AppError::ArtifactUnavailable(ref msg) if msg.contains(SCALER_FILE)));
}

#[test]
fn test_scaler_mean_and_scale_disagree() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    std::fs::write(
        dir.path().join(SCALER_FILE),
        r#"{ "mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0] }"#,
    )
    .unwrap();

    let error = load_recommendation_system(dir.path()).unwrap_err();
    assert!(matches!(error, AppError::ArtifactUnavailable(_)));
}

#[test]
fn test_columns_wider_than_model() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    std::fs::write(
        dir.path().join(FEATURE_COLUMNS_FILE),
        r#"["a", "b", "c", "d"]"#,
    )
    .unwrap();

    let error = load_recommendation_system(dir.path()).unwrap_err();
    assert!(matches!(error, AppError::ArtifactUnavailable(ref msg) if msg.contains("mismatch")));
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let error = load_recommendation_system(dir.path().join("absent")).unwrap_err();
    assert!(matches!(error, AppError::ArtifactUnavailable(_)));
}
