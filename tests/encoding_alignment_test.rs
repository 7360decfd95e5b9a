// ABOUTME: Integration tests for train/serve vector encoding and the affine scaler
// ABOUTME: Verifies the length invariant and soft handling of schema skew
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use strideguard::errors::AppError;
use strideguard::intelligence::encoding::{
    encode_features, FeatureAlignment, Scaler, OUT_OF_VOCABULARY_CODE,
};
use strideguard::intelligence::features::{FeatureSet, CANONICAL_FEATURE_ORDER};

fn minimal_feature_set() -> FeatureSet {
    let mut features = FeatureSet::default();
    features.insert_numeric("acwr", 1.25);
    features.insert_numeric("acute_load", 35.0);
    features.insert_categorical("age_group", "masters");
    features.insert_categorical("experience_level", "novice");
    features
}

#[test]
fn test_canonical_alignment_matches_the_frozen_contract() {
    let alignment = FeatureAlignment::canonical();

    assert_eq!(alignment.len(), 17);
    assert_eq!(
        alignment.feature_order,
        CANONICAL_FEATURE_ORDER
            .iter()
            .map(|&n| n.to_owned())
            .collect::<Vec<_>>()
    );

    // Alphabetical label coding, matching training-time label encoding
    let age_codes = &alignment.categories["age_group"];
    assert_eq!(age_codes["adult"], 0);
    assert_eq!(age_codes["masters"], 1);
    assert_eq!(age_codes["senior"], 2);
    assert_eq!(age_codes["young_adult"], 3);

    let exp_codes = &alignment.categories["experience_level"];
    assert_eq!(exp_codes["advanced"], 0);
    assert_eq!(exp_codes["expert"], 1);
    assert_eq!(exp_codes["intermediate"], 2);
    assert_eq!(exp_codes["novice"], 3);
}

#[test]
fn test_encode_always_yields_order_length() {
    let alignment = FeatureAlignment::canonical();
    let encoded = encode_features(&minimal_feature_set(), &alignment);
    assert_eq!(encoded.len(), alignment.len());
}

#[test]
fn test_encode_maps_categoricals_through_the_code_table() {
    let alignment = FeatureAlignment::canonical();
    let encoded = encode_features(&minimal_feature_set(), &alignment);

    let age_group_idx = alignment
        .feature_order
        .iter()
        .position(|n| n == "age_group")
        .unwrap();
    let experience_idx = alignment
        .feature_order
        .iter()
        .position(|n| n == "experience_level")
        .unwrap();

    assert!((encoded[age_group_idx] - 1.0).abs() < 1e-12); // masters
    assert!((encoded[experience_idx] - 3.0).abs() < 1e-12); // novice
}

#[test]
fn test_encode_unseen_category_uses_oov_sentinel() {
    let alignment = FeatureAlignment::canonical();
    let mut features = minimal_feature_set();
    features.insert_categorical("age_group", "veteran");

    let encoded = encode_features(&features, &alignment);
    let idx = alignment
        .feature_order
        .iter()
        .position(|n| n == "age_group")
        .unwrap();
    assert!((encoded[idx] - OUT_OF_VOCABULARY_CODE as f64).abs() < 1e-12);
}

#[test]
fn test_encode_missing_feature_defaults_to_zero() {
    let alignment = FeatureAlignment::canonical();
    let features = minimal_feature_set(); // most canonical names absent

    let encoded = encode_features(&features, &alignment);
    let monotony_idx = alignment
        .feature_order
        .iter()
        .position(|n| n == "monotony")
        .unwrap();
    assert!((encoded[monotony_idx]).abs() < 1e-12);
}

#[test]
fn test_alignment_roundtrips_through_persisted_bytes() {
    let canonical = FeatureAlignment::canonical();
    let bytes = serde_json::to_vec(&canonical).unwrap();
    let loaded = FeatureAlignment::from_bytes(&bytes).unwrap();

    assert_eq!(loaded.feature_order, canonical.feature_order);
    assert_eq!(
        loaded.categories["age_group"]["young_adult"],
        canonical.categories["age_group"]["young_adult"]
    );
}

#[test]
fn test_alignment_rejects_empty_feature_order() {
    let result = FeatureAlignment::from_bytes(br#"{"feature_order":[],"categories":{}}"#);
    assert!(matches!(result, Err(AppError::ArtifactLoad(_))));
}

#[test]
fn test_scaler_applies_the_training_time_transform() {
    let scaler = Scaler {
        mean: vec![10.0, 0.0, 4.0],
        scale: vec![2.0, 1.0, 0.5],
    };
    let scaled = scaler.transform(&[12.0, 3.0, 5.0]).unwrap();
    assert!((scaled[0] - 1.0).abs() < 1e-12);
    assert!((scaled[1] - 3.0).abs() < 1e-12);
    assert!((scaled[2] - 2.0).abs() < 1e-12);
}

#[test]
fn test_scaler_zero_variance_column_passes_through() {
    let scaler = Scaler {
        mean: vec![5.0],
        scale: vec![0.0],
    };
    let scaled = scaler.transform(&[7.0]).unwrap();
    assert!((scaled[0] - 2.0).abs() < 1e-12);
}

#[test]
fn test_scaler_length_mismatch_is_an_internal_error() {
    let scaler = Scaler {
        mean: vec![0.0, 0.0],
        scale: vec![1.0, 1.0],
    };
    assert!(matches!(
        scaler.transform(&[1.0]),
        Err(AppError::Internal(_))
    ));
}

#[test]
fn test_scaler_rejects_inconsistent_artifact() {
    let result = Scaler::from_bytes(br#"{"mean":[0.0,0.0],"scale":[1.0]}"#);
    assert!(matches!(result, Err(AppError::ArtifactLoad(_))));
}
