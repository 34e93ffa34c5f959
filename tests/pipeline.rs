// End-to-end load of the bundled data directory

use mumbai_housing::{AgeCategory, AppConfig, AppContext, PropertyInput};
use std::path::Path;

fn load() -> AppContext {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    AppContext::load(&AppConfig::from_data_dir(&dir)).expect("bundled data should load")
}

#[test]
fn bundled_model_matches_encoder_layout() {
    let ctx = load();
    let summary = ctx.summary();

    assert_eq!(summary.feature_count, 107);
    assert_eq!(summary.region_count, 104);
    assert_eq!(summary.units, "Lakhs");
    assert_eq!(summary.model_fingerprint.map(|f| f.len()), Some(64));
}

#[test]
fn bundled_prediction_is_positive() {
    let ctx = load();
    let prediction = ctx
        .predict(&PropertyInput {
            bhk: 1,
            area: 1000.0,
            age: AgeCategory::New,
            region: Some("bandra west".to_string()),
        })
        .unwrap();

    assert!(prediction.price > 0.0);
    assert!(prediction.display.ends_with("Lakhs"));
}

#[test]
fn regions_without_listings_have_no_median() {
    let ctx = load();
    let view = ctx.view();

    assert_eq!(view.get("panvel").unwrap().median_price, None);
    assert_eq!(view.get("dombivali").unwrap().median_price, None);
    assert!(view.get("worli").unwrap().median_price.is_some());
    assert!(view.mean_median(&["panvel", "worli"]).is_some());
}

#[test]
fn reloading_gives_identical_view() {
    assert_eq!(load().view(), load().view());
}
