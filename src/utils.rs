use crate::plot::axis::Scale;

/// Return the larger of two floats, ignoring NaN on either side.
pub fn max_float(a: f64, b: f64) -> f64 {
    a.max(b)
}

/// Return the smaller of two floats, ignoring NaN on either side.
pub fn min_float(a: f64, b: f64) -> f64 {
    a.min(b)
}

/// Minimum and maximum of a sequence, skipping NaN entries.
/// Returns `None` when nothing is left to compare.
///
/// # Examples
///
/// ```
/// # use scattertk::utils::extent;
/// assert_eq!(extent(&[3.0, f64::NAN, -1.0, 2.0]), Some([-1.0, 3.0]));
/// assert_eq!(extent(&[]), None);
/// ```
pub fn extent(values: &[f64]) -> Option<[f64; 2]> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| match acc {
            None => Some([v, v]),
            Some([lo, hi]) => Some([min_float(lo, v), max_float(hi, v)]),
        })
}

pub fn linear_scale_float(value: f64, domain: &[f64; 2], range: &[f64; 2]) -> f64 {
    let proportion = (value - domain[0]) / (domain[1] - domain[0]);
    (range[1] - range[0]) * proportion + range[0]
}

pub fn log_scale_float(value: f64, domain: &[f64; 2], range: &[f64; 2]) -> f64 {
    let proportion =
        (value.log10() - domain[0].log10()) / (domain[1].log10() - domain[0].log10());
    (range[1] - range[0]) * proportion + range[0]
}

pub fn sqrt_scale_float(value: f64, domain: &[f64; 2], range: &[f64; 2]) -> f64 {
    let proportion = (value.sqrt() - domain[0].sqrt()) / (domain[1].sqrt() - domain[0].sqrt());
    (range[1] - range[0]) * proportion + range[0]
}

/// Scale a value from `domain` into `range`.
///
/// A degenerate or non-finite domain maps every value to the middle of the
/// range. With `clamp` set, values below the clamp are raised to it first
/// (keeps log scales away from zero).
pub fn scale_floats(
    value: f64,
    domain: &[f64; 2],
    range: &[f64; 2],
    scale: &Scale,
    clamp: Option<f64>,
) -> f64 {
    let midpoint = (range[0] + range[1]) / 2.0;
    if !domain[0].is_finite() || !domain[1].is_finite() || domain[0] == domain[1] {
        return midpoint;
    }
    let value = match clamp {
        Some(min) if value < min => min,
        _ => value,
    };
    let domain = match clamp {
        Some(min) => [max_float(domain[0], min), max_float(domain[1], min)],
        None => *domain,
    };
    let scaled = match scale {
        Scale::LINEAR => linear_scale_float(value, &domain, range),
        Scale::SQRT => sqrt_scale_float(value, &domain, range),
        Scale::LOG => log_scale_float(value, &domain, range),
    };
    if scaled.is_finite() {
        scaled
    } else {
        midpoint
    }
}
