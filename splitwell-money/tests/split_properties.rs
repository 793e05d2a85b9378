use proptest::prelude::*;
use splitwell_money::{Money, Rate, multiply_rate, split_by_percentage, split_equal};

fn percentages_summing_to_hundred(cuts: &[u32]) -> Vec<f64> {
    let mut remaining = 100u32;
    let mut percentages = Vec::with_capacity(cuts.len() + 1);
    for &cut in cuts {
        let taken = cut.min(remaining);
        remaining -= taken;
        percentages.push(f64::from(taken));
    }
    percentages.push(f64::from(remaining));
    percentages
}

proptest! {
    #[test]
    fn split_equal_is_exact(
        total in -1_000_000_000_000i64..=1_000_000_000_000,
        parts in 1usize..=50,
    ) {
        let shares = split_equal(Money::from_scaled(total), parts).expect("split failed");
        prop_assert_eq!(shares.len(), parts);
        let sum: Money = shares.iter().sum();
        prop_assert_eq!(sum, Money::from_scaled(total));
        for pair in shares.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
            prop_assert!((pair[0] - pair[1]).scaled() <= 1);
        }
    }

    #[test]
    fn split_by_full_percentage_is_exact(
        total in 0i64..=1_000_000_000_000,
        cuts in prop::collection::vec(0u32..=100, 0..=7),
    ) {
        let percentages = percentages_summing_to_hundred(&cuts);
        let shares = split_by_percentage(Money::from_scaled(total), &percentages)
            .expect("split failed");
        prop_assert_eq!(shares.len(), percentages.len());
        let sum: Money = shares.iter().sum();
        prop_assert_eq!(sum, Money::from_scaled(total));
        prop_assert!(shares.iter().all(|share| !share.is_negative()));
    }

    #[test]
    fn identity_rate_preserves_value(value in i64::MIN / 2..=i64::MAX / 2) {
        let money = Money::from_scaled(value);
        prop_assert_eq!(multiply_rate(money, Rate::IDENTITY), Ok(money));
    }
}
