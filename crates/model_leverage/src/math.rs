//! Safe fixed-point arithmetic - no unwrap, no panics, saturating on overflow

/// Fixed-point scale for ratios (1.0 = 1e18)
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Basis points scale (10,000 bps = 100%)
pub const BPS: u128 = 10_000;

/// Add u128 with saturation at MAX
pub fn add_u128(a: u128, b: u128) -> u128 {
    a.saturating_add(b)
}

/// Subtract u128 with saturation at 0
pub fn sub_u128(a: u128, b: u128) -> u128 {
    a.saturating_sub(b)
}

/// Minimum of two u128
pub fn min_u128(a: u128, b: u128) -> u128 {
    if a < b { a } else { b }
}

/// Full 256-bit product of two u128 as (hi, lo)
fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a1, a0) = (a >> 64, a & MASK);
    let (b1, b0) = (b >> 64, b & MASK);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    let mid = (p00 >> 64) + (p01 & MASK) + (p10 & MASK);
    let lo = (p00 & MASK) | (mid << 64);
    let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
    (hi, lo)
}

/// `a * b / d` as (quotient, remainder), or None if the quotient overflows
fn mul_div_rem(a: u128, b: u128, d: u128) -> Option<(u128, u128)> {
    let (hi, lo) = mul_wide(a, b);
    if hi == 0 {
        return Some((lo / d, lo % d));
    }
    if hi >= d {
        return None;
    }

    // Long division of the 256-bit product; remainder stays below d
    let mut rem = hi;
    let mut quot = 0u128;
    for i in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> i) & 1);
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quot |= 1u128 << i;
        }
    }
    Some((quot, rem))
}

/// `a * b / d` rounded down
///
/// Exact over the full 256-bit intermediate product. Saturates at
/// `u128::MAX` when the quotient does not fit. Returns 0 when `d == 0`.
pub fn mul_div(a: u128, b: u128, d: u128) -> u128 {
    if d == 0 {
        return 0;
    }
    match mul_div_rem(a, b, d) {
        Some((q, _)) => q,
        None => u128::MAX,
    }
}

/// `a * b / d` rounded up
pub fn mul_div_up(a: u128, b: u128, d: u128) -> u128 {
    if d == 0 {
        return 0;
    }
    match mul_div_rem(a, b, d) {
        Some((q, 0)) => q,
        Some((q, _)) => add_u128(q, 1),
        None => u128::MAX,
    }
}

/// Multiply an amount by a WAD ratio
pub fn wad_mul(amount: u128, ratio: u128) -> u128 {
    mul_div(amount, ratio, WAD)
}

/// Divide an amount by a WAD ratio (returns 0 if ratio is 0)
pub fn wad_div(amount: u128, ratio: u128) -> u128 {
    mul_div(amount, WAD, ratio)
}

/// Pad an amount so that losing `bps` basis points still leaves `amount`
///
/// `ceil(amount * BPS / (BPS - bps))`; saturates when `bps >= BPS`.
pub fn pad_bps(amount: u128, bps: u128) -> u128 {
    if bps >= BPS {
        return if amount == 0 { 0 } else { u128::MAX };
    }
    mul_div_up(amount, BPS, BPS - bps)
}

/// Shrink an amount by `bps` basis points (floored at 0)
pub fn haircut_bps(amount: u128, bps: u128) -> u128 {
    mul_div(amount, sub_u128(BPS, bps), BPS)
}
