//! Property tests for stored totals and the energy budget

mod common;

use calorie_tracker::services::{today, EntryService};
use calorie_tracker_shared::{sum_calories, UserForm};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("sedentary", 1.2)]
#[case("light", 1.375)]
#[case("moderate", 1.55)]
#[case("active", 1.725)]
#[case("very_active", 1.9)]
#[case("легкий", 1.375)]
#[case("couch", 1.2)]
#[tokio::test]
async fn test_registered_tdee_uses_activity_tier(#[case] activity: &str, #[case] multiplier: f64) {
    let app = common::TestApp::new().await;
    let mut controller = app.controller();
    let form = UserForm {
        activity: activity.to_string(),
        ..common::user_form()
    };

    let energy = controller.register_user(&form).await.unwrap().energy;

    assert_eq!(energy.bmr, 1673.75);
    assert!((energy.tdee - 1673.75 * multiplier).abs() < 1e-9);
}

#[rstest]
#[case("f", 1507.75)]
#[case("чоловік", 1673.75)]
#[case("other", 1507.75)]
#[tokio::test]
async fn test_registered_bmr_uses_gender_constant(#[case] gender: &str, #[case] bmr: f64) {
    let app = common::TestApp::new().await;
    let mut controller = app.controller();
    let form = UserForm {
        gender: gender.to_string(),
        ..common::user_form()
    };

    let energy = controller.register_user(&form).await.unwrap().energy;
    assert_eq!(energy.bmr, bmr);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The in-memory running total never drifts from what storage sums up
    #[test]
    fn prop_running_total_matches_storage(calories in prop::collection::vec(0u32..5000, 0..20)) {
        tokio_test::block_on(async {
            let app = common::TestApp::new().await;
            let mut controller = app.controller();
            let user_id = controller.register_user(&common::user_form()).await.unwrap().user.id;

            for (i, value) in calories.iter().enumerate() {
                let form = common::direct_entry(&format!("item {}", i), *value as f64);
                controller.log_entry(&form).await.unwrap();
            }

            let expected = sum_calories(calories.iter().map(|c| *c as f64));
            let stored = EntryService::daily_total(app.pool(), user_id, today()).await.unwrap();
            let running = controller.running_total();

            assert_eq!(running.entries, calories.len() as i64);
            assert_eq!(stored.entry_count, calories.len() as i64);
            assert!((running.calories - expected).abs() < 1e-6);
            assert!((stored.total_calories - expected).abs() < 1e-6);
            assert!((controller.energy_balance().unwrap().remaining
                - (controller.selection().unwrap().energy.tdee - expected)).abs() < 1e-6);
        });
    }
}
