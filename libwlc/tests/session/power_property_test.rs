// power_property_test.rs — closed-loop power control properties

use libwlc::power::Plan;
use libwlc::test_support::MockRig;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Ptx never leaves 0..=100 and a single request never moves it
    // against its own sign.
    #[test]
    fn requests_move_ptx_in_their_direction(
        requests in prop::collection::vec(-10i8..=20, 1..12),
    ) {
        let rig = MockRig::new();
        let mut power = rig.controller();
        power.apply_negotiated_setup();

        for r in requests {
            let before = power.state().ptx_percent();
            let plan = power.apply(r);
            let after = power.state().ptx_percent();
            prop_assert!(after <= 100);
            if r > 0 {
                prop_assert!(after >= before, "raise {} took {} -> {}", r, before, after);
            } else if r < 0 {
                prop_assert!(after <= before, "lower {} took {} -> {}", r, before, after);
            }
            if plan == Plan::AtLimit {
                prop_assert_eq!(after, before);
            }
            prop_assert_eq!(rig.rf.ldo(), power.state().ldo_setting());
        }
    }
}
