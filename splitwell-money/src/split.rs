use crate::{Money, MoneyError, SCALE, to_scaled};

const FULL_PERCENT: i64 = 100 * SCALE;

/// Splits `total` into `parts` shares that sum to `total` exactly.
///
/// Every share gets `total div parts`; the remainder goes one unit at a time
/// to the first shares in order. Floor division keeps the remainder within
/// `0..parts` for negative totals too.
pub fn split_equal(total: Money, parts: usize) -> Result<Vec<Money>, MoneyError> {
    if parts == 0 {
        return Err(MoneyError::ZeroShares);
    }
    let count = i64::try_from(parts).map_err(|_| MoneyError::Overflow)?;
    let base = total.0.div_euclid(count);
    let remainder = total.0.rem_euclid(count) as usize;

    Ok((0..parts)
        .map(|idx| {
            if idx < remainder {
                Money(base + 1)
            } else {
                Money(base)
            }
        })
        .collect())
}

/// Splits `total` by percentages given in human units (`12.5` == 12.5%).
///
/// Percentages are scaled to four decimals. Truncation residue is handed out
/// one unit at a time to the first shares, so the shares sum to exactly
/// `total * sum(percentages) / 100` (rounded down), i.e. `total` when the
/// percentages add up to 100.
pub fn split_by_percentage(total: Money, percentages: &[f64]) -> Result<Vec<Money>, MoneyError> {
    if total.is_negative() {
        return Err(MoneyError::NegativeNotAllowed);
    }

    let scaled = percentages
        .iter()
        .enumerate()
        .map(|(index, &percentage)| scale_percentage(index, percentage))
        .collect::<Result<Vec<i64>, _>>()?;

    let percent_sum: i64 = scaled.iter().sum();
    if percent_sum > FULL_PERCENT {
        return Err(MoneyError::PercentageSumExceeds100);
    }

    let total_wide = i128::from(total.0);
    let denominator = i128::from(FULL_PERCENT);

    let mut shares = scaled
        .iter()
        .map(|&percentage| {
            i64::try_from(total_wide * i128::from(percentage) / denominator)
                .map_err(|_| MoneyError::Overflow)
        })
        .collect::<Result<Vec<i64>, _>>()?;

    let allocated = total_wide * i128::from(percent_sum) / denominator;
    let distributed: i128 = shares.iter().map(|&share| i128::from(share)).sum();
    let residual = usize::try_from(allocated - distributed).map_err(|_| MoneyError::Overflow)?;
    debug_assert!(residual <= shares.len());

    for share in shares.iter_mut().take(residual) {
        *share += 1;
    }

    Ok(shares.into_iter().map(Money).collect())
}

fn scale_percentage(index: usize, percentage: f64) -> Result<i64, MoneyError> {
    if !percentage.is_finite() {
        return Err(MoneyError::InvalidNumber);
    }
    if !(0.0..=100.0).contains(&percentage) {
        return Err(MoneyError::PercentageOutOfRange { index });
    }
    to_scaled(percentage).map(Money::scaled)
}
