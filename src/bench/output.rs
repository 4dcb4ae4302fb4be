//! Parsing of the encrypted regression programs' stdout.
//!
//! The programs print the elapsed time on the first line and finish with a
//! line such as `inter, coef: 1.5, 2.5`; the pair after the last colon is the
//! decrypted fit.
use crate::{
    error::{BenchErr, Result},
    model::Fit,
};

/// What one invocation reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutput {
    pub duration: u64,
    pub fit: Fit,
}

pub fn parse_output(stdout: &str) -> Result<RunOutput> {
    let first = stdout.lines().next().unwrap_or_default().trim();
    let duration = first
        .parse::<u64>()
        .map_err(|_| malformed("an integer duration on the first line", first))?;

    let (_, tail) = stdout
        .rsplit_once(':')
        .ok_or_else(|| malformed("a `: (intercept, coefficient)` suffix", stdout))?;

    Ok(RunOutput {
        duration,
        fit: parse_pair(tail)?,
    })
}

/// Parses `(a, b)` or `a, b` into a fit with intercept `a` and slope `b`.
pub fn parse_pair(text: &str) -> Result<Fit> {
    let text = text.trim();
    let inner = match text.strip_prefix('(') {
        Some(rest) => rest
            .strip_suffix(')')
            .ok_or_else(|| malformed("a closing parenthesis", text))?,
        None => text,
    };

    let mut parts = inner.split(',').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok(Fit::new(number(a)?, number(b)?)),
        _ => Err(malformed("a pair `(intercept, coefficient)`", text)),
    }
}

fn number(s: &str) -> Result<f64> {
    s.parse::<f64>().map_err(|_| malformed("a number", s))
}

fn malformed(what: &'static str, got: &str) -> BenchErr {
    BenchErr::MalformedOutput {
        what,
        got: got.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stub_output() {
        let out = parse_output("42\nran ok: (1.5, 2.5)").unwrap();
        assert_eq!(out.duration, 42);
        assert_eq!(out.fit, Fit::new(1.5, 2.5));
    }

    #[test]
    fn parses_program_style_output_without_parens() {
        let stdout = "\
1234
Encrypting plaintexts...
Plaintext encrypted! Time used: 12ms
Results of homomorphic computations
inter, coef: -3.25, 1.5e2
";
        let out = parse_output(stdout).unwrap();
        assert_eq!(out.duration, 1234);
        assert_eq!(out.fit, Fit::new(-3.25, 150.0));
    }

    #[test]
    fn uses_text_after_last_colon() {
        let out = parse_output("7\na: 1\nb: (2, 3)\n").unwrap();
        assert_eq!(out.fit, Fit::new(2.0, 3.0));
    }

    #[test]
    fn rejects_non_integer_duration() {
        let err = parse_output("12.5\nx: (1, 2)").unwrap_err();
        assert!(matches!(
            err,
            BenchErr::MalformedOutput { got, .. } if got == "12.5"
        ));
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(parse_output("42\nno pair here").is_err());
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(parse_pair("(1.0, 2.0, 3.0)").is_err());
        assert!(parse_pair("(1.0)").is_err());
        assert!(parse_pair("(1.0, 2.0").is_err());
    }

    #[test]
    fn rejects_non_numeric_coefficient() {
        assert!(parse_pair("(1.0, __import__('os'))").is_err());
    }
}
