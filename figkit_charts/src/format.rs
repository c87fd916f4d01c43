// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels.

const MINUS: char = '\u{2212}';

/// Number of decimals needed to tell apart values `step` apart.
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "a finite f64 has an exponent above -330"
        )]
        let digits = (-exponent) as usize;
        digits
    }
}

/// Formats `v` with `precision` decimals and comma thousands separators.
///
/// Negative values use the typographic minus sign; a value that rounds to zero never carries a
/// sign.
pub fn format_fixed(v: f64, precision: usize) -> String {
    if !v.is_finite() {
        return String::from("NaN");
    }
    let raw = format!("{:.*}", precision, v.abs());
    let (int, frac) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let is_zero = raw.bytes().all(|b| b == b'0' || b == b'.');

    let mut out = String::with_capacity(raw.len() + int.len() / 3 + 1);
    if v < 0.0 && !is_zero {
        out.push(MINUS);
    }
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats a tick value with the precision implied by the tick `step`.
pub fn format_tick(v: f64, step: f64) -> String {
    format_fixed(v, precision_fixed(step))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn precision_follows_the_step() {
        assert_eq!(precision_fixed(1.0), 0, "unit step");
        assert_eq!(precision_fixed(50.0), 0, "coarse step");
        assert_eq!(precision_fixed(0.2), 1, "tenths");
        assert_eq!(precision_fixed(0.05), 2, "hundredths");
        assert_eq!(precision_fixed(0.0), 0, "zero step");
    }

    #[test]
    fn tick_labels_group_and_sign() {
        assert_eq!(format_tick(0.4, 0.2), "0.4", "tenths");
        assert_eq!(format_tick(-0.4, 0.2), "\u{2212}0.4", "minus sign");
        assert_eq!(format_tick(12_500.0, 500.0), "12,500", "thousands");
        assert_eq!(format_tick(-1_250_000.0, 250_000.0), "\u{2212}1,250,000", "millions");
        assert_eq!(format_tick(-0.0001, 0.1), "0.0", "negative zero drops the sign");
        assert_eq!(format_tick(100.0, 20.0), "100", "three digits");
    }
}
