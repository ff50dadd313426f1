use capital_budgeting::budgeting::{average_rate_of_return, payback_period, Payback};
use proptest::prelude::*;

fn flows() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1_000.0f64..1_000.0, 1..12)
}

proptest! {
    #[test]
    fn arr_is_order_independent(investment in 1.0f64..10_000.0, mut cf in flows()) {
        let before = average_rate_of_return(investment, &cf).unwrap().percent;
        cf.reverse();
        let after = average_rate_of_return(investment, &cf).unwrap().percent;
        prop_assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn payback_is_smallest_reaching_prefix(investment in 0.0f64..5_000.0, cf in flows()) {
        let prefix = |n: usize| cf[..n].iter().sum::<f64>();
        match payback_period(investment, &cf) {
            Payback::Achieved(n) => {
                prop_assert!(n >= 1 && n <= cf.len());
                prop_assert!(prefix(n) >= investment);
                for k in 1..n {
                    prop_assert!(prefix(k) < investment);
                }
            }
            Payback::NotAchieved => {
                for k in 1..=cf.len() {
                    prop_assert!(prefix(k) < investment);
                }
            }
        }
    }
}
