use crate::tdr::TestResult;
use std::fmt::Write;

/// Line prefix expected by the downstream log ingester.
pub const FAILURE_TAG: &str = "|ftestres=0,";

/// Render one line per failed test:
///
/// `|ftestres=0,{name},{meas},{high},{low},{nominal},{units},{operator}\n`
///
/// Fields are positional. An absent measurement or operator is an empty field.
/// No failed tests yields an empty string.
pub fn render_failure_report(failed: &[TestResult]) -> String {
    let mut out = String::new();
    for test in failed {
        let meas = test.meas().map(|m| m.to_string()).unwrap_or_default();
        let operator = test.operator().map(|op| op.as_str()).unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{}{},{},{},{},{},{},{}",
            FAILURE_TAG,
            test.name(),
            meas,
            fmt_number(test.high_limit()),
            fmt_number(test.low_limit()),
            fmt_number(test.nominal()),
            test.units(),
            operator,
        );
    }
    out
}

/// Shortest round-trip form, as the ingester has always received it:
/// integral values keep one decimal ("5.0"), others are plain ("4.9"), and
/// exponents below -4 or from 16 up switch to scientific ("1e-05", "1e+16").
pub fn fmt_number(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest mantissa, e.g. "1.5e-7".
    let sci = format!("{:e}", x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}
