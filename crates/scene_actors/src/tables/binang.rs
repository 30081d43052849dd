use crate::scene::BINANG_HALF_TURN;

pub const DEG_TO_BINANG: &str = "DEG_TO_BINANG";

pub fn binang_to_degrees(binang: f64) -> f64 {
    binang * (180.0 / BINANG_HALF_TURN)
}

/// `DEG_TO_BINANG(<degrees, 3 decimals>)` for a binary-angle value.
pub fn binang_expr(binang: f64) -> String {
    let degrees = binang_to_degrees(binang);
    // -0.0 would print as "-0.000"
    let degrees = if degrees == 0.0 { 0.0 } else { degrees };
    format!("{DEG_TO_BINANG}({degrees:.3})")
}

/// Evaluates a rotation token to its binary-angle value.
///
/// Accepts `DEG_TO_BINANG(<degrees>)` or a plain integer literal.
pub fn eval_binang(expr: &str) -> Option<i64> {
    let trimmed = expr.trim();
    match trimmed
        .strip_prefix(DEG_TO_BINANG)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => {
            let degrees = inner.trim().parse::<f64>().ok()?;
            if !degrees.is_finite() {
                return None;
            }
            Some((degrees * (BINANG_HALF_TURN / 180.0)).round_ties_even() as i64)
        }
        None => parse_int(trimmed),
    }
}

/// Parses a hexadecimal (`0x`) or decimal integer with an optional sign.
///
/// Only one leading sign is accepted, and never after the `0x` prefix.
pub fn parse_int(token: &str) -> Option<i64> {
    let trimmed = token.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    if !digits.chars().next().is_some_and(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let magnitude = i128::from(u64::from_str_radix(digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

pub fn format_hex(value: i64) -> String {
    if value < 0 {
        format!("-0x{:X}", value.unsigned_abs())
    } else {
        format!("0x{value:X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_formats_as_ninety_degrees() {
        assert_eq!(binang_expr(16384.0), "DEG_TO_BINANG(90.000)");
        assert_eq!(binang_expr(-0.0), "DEG_TO_BINANG(0.000)");
        assert_eq!(binang_expr(-8192.0), "DEG_TO_BINANG(-45.000)");
    }

    #[test]
    fn eval_handles_macro_and_literals() {
        assert_eq!(eval_binang("DEG_TO_BINANG(90.000)"), Some(0x4000));
        assert_eq!(eval_binang(" DEG_TO_BINANG( -180.0 ) "), Some(-0x8000));
        assert_eq!(eval_binang("0x4000"), Some(0x4000));
        assert_eq!(eval_binang("-300"), Some(-300));
        assert_eq!(eval_binang("DEG_TO_BINANG(abc)"), None);
        assert_eq!(eval_binang("ROT_Y"), None);
    }

    #[test]
    fn three_decimal_expression_recovers_binang() {
        for binang in [0.0, 100.0, 1234.0, 16384.0, -7000.0, 32767.0] {
            let expr = binang_expr(binang);
            assert_eq!(eval_binang(&expr), Some(binang as i64), "expr={expr}");
        }
    }

    #[test]
    fn parse_int_accepts_hex_and_decimal() {
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("-0x10"), Some(-16));
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("ACTOR_EN_DOOR"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775808"), None);
    }

    #[test]
    fn parse_int_rejects_repeated_or_misplaced_signs() {
        assert_eq!(parse_int("--9223372036854775808"), None);
        assert_eq!(parse_int("--1"), None);
        assert_eq!(parse_int("+-1"), None);
        assert_eq!(parse_int("0x-10"), None);
        assert_eq!(parse_int("0x+10"), None);
        assert_eq!(parse_int("-0x"), None);
    }

    #[test]
    fn hex_formatting_keeps_sign_outside_prefix() {
        assert_eq!(format_hex(0x4000), "0x4000");
        assert_eq!(format_hex(-0x4000), "-0x4000");
        assert_eq!(format_hex(0), "0x0");
    }
}
