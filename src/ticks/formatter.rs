// src/ticks/formatter.rs
//! Tick label formatters.
//!
//! A formatter writes one value into a caller-owned [`LabelBuf`] and returns
//! the number of bytes written. It must not keep the buffer past the call.

use super::ticker::LabelBuf;
use anyhow::{bail, Result};
use std::fmt::{self, Write};

/// Significant digits of the default `%g` label format.
pub const DEFAULT_PRECISION: usize = 6;

pub trait Formatter {
    fn format(&self, value: f32, buf: &mut LabelBuf) -> usize;
}

impl<F> Formatter for F
where
    F: Fn(f32, &mut LabelBuf) -> usize,
{
    fn format(&self, value: f32, buf: &mut LabelBuf) -> usize {
        self(value, buf)
    }
}

/// `%g` with six significant digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format(&self, value: f32, buf: &mut LabelBuf) -> usize {
        buf.clear();
        let _ = write_g(buf, value as f64, DEFAULT_PRECISION);
        buf.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Fixed(usize),
    Exp(usize),
    General(usize),
}

/// A printf-style format with a single `%f`, `%e` or `%g` conversion and
/// optional literal text around it, e.g. `"%.1f m"`. `%%` is a literal percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintfFormatter {
    prefix: String,
    conversion: Conversion,
    suffix: String,
}

impl PrintfFormatter {
    pub fn new(spec: &str) -> Result<Self> {
        let mut prefix = String::new();
        let mut chars = spec.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '%' {
                prefix.push(c);
                continue;
            }
            if let Some((_, '%')) = chars.peek() {
                chars.next();
                prefix.push('%');
                continue;
            }

            let rest = &spec[i + 1..];
            let (precision, conv_at) = match rest.strip_prefix('.') {
                Some(digits) => {
                    let n = digits.bytes().take_while(u8::is_ascii_digit).count();
                    let p = digits[..n].parse::<usize>().unwrap_or(0);
                    (Some(p), 1 + n)
                }
                None => (None, 0),
            };
            let Some(conv) = rest[conv_at..].chars().next() else {
                bail!("format '{}' ends inside a conversion", spec);
            };
            let conversion = match conv {
                'f' | 'F' => Conversion::Fixed(precision.unwrap_or(6)),
                'e' | 'E' => Conversion::Exp(precision.unwrap_or(6)),
                'g' | 'G' => Conversion::General(precision.unwrap_or(DEFAULT_PRECISION)),
                other => bail!("unsupported conversion '%{}' in '{}'", other, spec),
            };
            let suffix = rest[conv_at + conv.len_utf8()..].replace("%%", "%");
            return Ok(Self {
                prefix,
                conversion,
                suffix,
            });
        }
        bail!("format '{}' has no numeric conversion", spec)
    }
}

impl Formatter for PrintfFormatter {
    fn format(&self, value: f32, buf: &mut LabelBuf) -> usize {
        buf.clear();
        buf.push_str(&self.prefix);
        let value = value as f64;
        let _ = match self.conversion {
            Conversion::Fixed(p) => write!(buf, "{:.*}", p, value),
            Conversion::Exp(p) => write_e(buf, value, p),
            Conversion::General(p) => write_g(buf, value, p),
        };
        buf.push_str(&self.suffix);
        buf.len()
    }
}

/// Writes `value` like C's `%.{precision}e` (`1.50e+03`).
pub fn write_e<W: Write>(out: &mut W, value: f64, precision: usize) -> fmt::Result {
    if !value.is_finite() {
        return write_non_finite(out, value);
    }
    let mut sci = LabelBuf::<48>::new();
    write!(sci, "{:.*e}", precision, value)?;
    let (mantissa, exp) = split_exp(sci.as_str());
    write_mantissa_exp(out, mantissa, exp)
}

/// Writes `value` like C's `%.{precision}g`: fixed or scientific notation by
/// magnitude, trailing fractional zeros removed.
pub fn write_g<W: Write>(out: &mut W, value: f64, precision: usize) -> fmt::Result {
    if !value.is_finite() {
        return write_non_finite(out, value);
    }
    let p = precision.max(1);
    let mut sci = LabelBuf::<48>::new();
    write!(sci, "{:.*e}", p - 1, value)?;
    let (mantissa, exp) = split_exp(sci.as_str());
    if exp < -4 || exp >= p as i32 {
        return write_mantissa_exp(out, trim_fraction(mantissa), exp);
    }
    let decimals = (p as i32 - 1 - exp).max(0) as usize;
    let mut fixed = LabelBuf::<64>::new();
    write!(fixed, "{:.*}", decimals, value)?;
    out.write_str(trim_fraction(fixed.as_str()))
}

fn write_non_finite<W: Write>(out: &mut W, value: f64) -> fmt::Result {
    let text = if value.is_nan() {
        "nan"
    } else if value < 0.0 {
        "-inf"
    } else {
        "inf"
    };
    out.write_str(text)
}

fn split_exp(sci: &str) -> (&str, i32) {
    match sci.split_once('e') {
        Some((m, e)) => (m, e.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn write_mantissa_exp<W: Write>(out: &mut W, mantissa: &str, exp: i32) -> fmt::Result {
    let sign = if exp < 0 { '-' } else { '+' };
    write!(out, "{}e{}{:02}", mantissa, sign, exp.abs())
}

fn trim_fraction(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(value: f64) -> String {
        let mut s = String::new();
        write_g(&mut s, value, DEFAULT_PRECISION).unwrap();
        s
    }

    fn fmt_with(f: &dyn Formatter, value: f32) -> String {
        let mut buf: LabelBuf = LabelBuf::new();
        let n = f.format(value, &mut buf);
        assert_eq!(n, buf.len());
        buf.as_str().to_owned()
    }

    #[test]
    fn test_general_format_matches_printf() {
        assert_eq!(g(0.0), "0");
        assert_eq!(g(0.1 + 0.2), "0.3");
        assert_eq!(g(2.5), "2.5");
        assert_eq!(g(-10.0), "-10");
        assert_eq!(g(123456.0), "123456");
        assert_eq!(g(1234567.0), "1.23457e+06");
        assert_eq!(g(0.0001), "0.0001");
        assert_eq!(g(0.00001), "1e-05");
        assert_eq!(g(f64::NAN), "nan");
        assert_eq!(g(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_default_formatter_on_f32() {
        assert_eq!(fmt_with(&DefaultFormatter, 0.1), "0.1");
        assert_eq!(fmt_with(&DefaultFormatter, 5.0), "5");
    }

    #[test]
    fn test_printf_formatter() {
        let f = PrintfFormatter::new("%.1f m").unwrap();
        assert_eq!(fmt_with(&f, 2.34), "2.3 m");
        let f = PrintfFormatter::new("x=%g%%").unwrap();
        assert_eq!(fmt_with(&f, 0.5), "x=0.5%");
        let f = PrintfFormatter::new("%.2e").unwrap();
        assert_eq!(fmt_with(&f, 1500.0), "1.50e+03");
    }

    #[test]
    fn test_printf_formatter_rejects_bad_specs() {
        assert!(PrintfFormatter::new("no conversion").is_err());
        assert!(PrintfFormatter::new("%d").is_err());
        assert!(PrintfFormatter::new("trailing %").is_err());
    }

    #[test]
    fn test_closure_formatter() {
        let deg = |v: f32, buf: &mut LabelBuf| {
            buf.clear();
            let _ = write!(buf, "{}°", v as i32);
            buf.len()
        };
        assert_eq!(fmt_with(&deg, 45.0), "45°");
    }
}
