//! printf-style template rendering for localized messages.
//!
//! Registry templates are written with positional printf verbs, for example
//! `"用户 %s 的余额不足 %.2f 元"`. [`sprintf`] substitutes [`FormatArg`]s into
//! such a template.
//!
//! # Supported directives
//!
//! `%[flags][width][.precision]verb` with flags `-`, `+`, space, `0` and `#`.
//!
//! | Verb          | Accepts              | Output                              |
//! |---------------|----------------------|-------------------------------------|
//! | `%v`          | anything             | natural representation              |
//! | `%s`          | string, char         | text (precision truncates)          |
//! | `%q`          | string, char         | quoted and escaped                  |
//! | `%d`          | integers             | decimal                             |
//! | `%x` `%X`     | integers, string     | hex (`#` adds `0x`)                 |
//! | `%o` `%b`     | integers             | octal / binary                      |
//! | `%c`          | char, integers       | the character                       |
//! | `%f` `%F`     | float                | fixed point, default precision 6    |
//! | `%e` `%E`     | float                | exponent form, `1.500000e+06`       |
//! | `%g` `%G`     | float                | `%e` or `%f` form, see below        |
//! | `%t`          | bool                 | `true` / `false`                    |
//! | `%%`          | nothing              | a literal `%`                       |
//!
//! `%g` precision counts significant digits and trailing zeros are removed.
//! The exponent form is chosen when the exponent is below -4 or at least
//! the precision. Without a precision the shortest round-trip digits are
//! used with a cutover of 6, so `%v` of `1e-7` gives `1e-07` and `%g` of
//! `1e21` gives `1e+21`. On integers, precision is a minimum digit count
//! and disables the `0` flag: `%.3d` of 7 gives `007`.
//!
//! Not supported: explicit argument indexes (`%[1]d`) and `*` for width or
//! precision. Their `[` or `*` is read as the verb, so the directive renders
//! as a bad-verb marker and consumes an argument.
//!
//! # Mismatches
//!
//! Rendering never fails and never panics. Problems are written inline so
//! they stay visible in the produced message:
//!
//! - missing argument: `%!d(MISSING)`
//! - verb not applicable to the argument, or unknown verb: `%!d(str=abc)`
//! - unused arguments: `%!(EXTRA i64=1, str=x)` appended at the end
//! - template ends right after `%`: `%!(NOVERB)`
//!
//! Width and precision are clamped to [`MAX_WIDTH`].

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Upper bound applied to width and precision.
pub const MAX_WIDTH: usize = 10_000;

/// Decimal exponent from which shortest `%g`/`%v` output switches to exponent form.
const SHORTEST_EXPONENT_CUTOVER: i64 = 6;

/// One positional argument for [`sprintf`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl FormatArg {
    /// Short type label used in mismatch markers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "str",
            Self::Int(_) => "i64",
            Self::Uint(_) => "u64",
            Self::Float(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
        }
    }

    /// Parses command-line style input: integer, then float, then bool,
    /// otherwise the raw string.
    #[must_use]
    pub fn parse_loose(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            Self::Int(n)
        } else if let Ok(n) = raw.parse::<u64>() {
            Self::Uint(n)
        } else if let Ok(f) = raw.parse::<f64>()
            && raw.chars().any(|c| c.is_ascii_digit())
        {
            Self::Float(f)
        } else if let Ok(b) = raw.parse::<bool>() {
            Self::Bool(b)
        } else {
            Self::Str(raw.to_string())
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) if n.is_sign_negative() && !n.is_nan() => {
                write!(f, "-{}", general(n.abs(), None, false))
            }
            Self::Float(n) => f.write_str(&general(*n, None, false)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FormatArg {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FormatArg {
            fn from(value: $ty) -> Self {
                Self::Uint(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<isize> for FormatArg {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

/// Builds a `Vec<FormatArg>` from heterogeneous values.
///
/// ```rust
/// use errdef_common::format_args_vec;
/// let args = format_args_vec!["alice", 42, 3.5];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! format_args_vec {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::errors::template::FormatArg::from($arg)),*]
    };
}

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Result of scanning a template without rendering it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateScan {
    /// Verbs that consume an argument, in order.
    pub verbs: Vec<char>,
    /// True if the template ends right after a `%`.
    pub dangling: bool,
}

impl TemplateScan {
    /// Number of arguments the template expects.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.verbs.len()
    }
}

/// Lists the argument-consuming verbs of `template`.
#[must_use]
pub fn scan(template: &str) -> TemplateScan {
    let mut result = TemplateScan::default();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match parse_directive(&mut chars) {
            Some((_, '%')) => {}
            Some((_, verb)) => result.verbs.push(verb),
            None => {
                result.dangling = true;
                break;
            }
        }
    }
    result
}

/// Renders `template` with positional `args`.
#[must_use]
pub fn sprintf(template: &str, args: &[FormatArg]) -> String {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some((directive, verb)) = parse_directive(&mut chars) else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        let Some(arg) = args.get(next_arg) else {
            out.push_str("%!");
            out.push(verb);
            out.push_str("(MISSING)");
            continue;
        };
        next_arg += 1;
        match render(verb, &directive, arg) {
            Some(rendered) => pad_into(&mut out, rendered, &directive),
            None => {
                out.push_str("%!");
                out.push(verb);
                out.push('(');
                push_kind_value(&mut out, arg);
                out.push(')');
            }
        }
    }

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next_arg..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            push_kind_value(&mut out, arg);
        }
        out.push(')');
    }
    out
}

fn push_kind_value(out: &mut String, arg: &FormatArg) {
    out.push_str(arg.kind());
    out.push('=');
    out.push_str(&arg.to_string());
}

/// Parses flags, width, precision and the verb following a `%`.
/// Returns `None` when the template ends before a verb.
fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Option<(Directive, char)> {
    let mut directive = Directive::default();
    while let Some(&flag) = chars.peek() {
        match flag {
            '-' => directive.minus = true,
            '+' => directive.plus = true,
            ' ' => directive.space = true,
            '0' => directive.zero = true,
            '#' => directive.sharp = true,
            _ => break,
        }
        chars.next();
    }
    directive.width = read_number(chars);
    if chars.peek() == Some(&'.') {
        chars.next();
        directive.precision = Some(read_number(chars).unwrap_or(0));
    }
    chars.next().map(|verb| (directive, verb))
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let current = value.unwrap_or(0);
        value = Some(
            current
                .saturating_mul(10)
                .saturating_add(digit as usize)
                .min(MAX_WIDTH),
        );
    }
    value
}

struct Rendered {
    text: String,
    /// Zero padding goes after this many leading chars (sign and radix prefix).
    prefix_len: usize,
    numeric: bool,
}

impl Rendered {
    fn text(text: String) -> Self {
        Self {
            text,
            prefix_len: 0,
            numeric: false,
        }
    }
}

fn render(verb: char, d: &Directive, arg: &FormatArg) -> Option<Rendered> {
    use FormatArg as A;
    match (verb, arg) {
        ('v', A::Str(s)) | ('s', A::Str(s)) => Some(Rendered::text(truncate(s, d.precision))),
        ('v', A::Char(c)) | ('s', A::Char(c)) | ('c', A::Char(c)) => {
            Some(Rendered::text(c.to_string()))
        }
        ('v', A::Bool(b)) | ('t', A::Bool(b)) => Some(Rendered::text(b.to_string())),
        ('q', A::Str(s)) => Some(Rendered::text(format!("{s:?}"))),
        ('q', A::Char(c)) => Some(Rendered::text(format!("{c:?}"))),
        ('v', A::Int(n)) | ('d', A::Int(n)) => Some(integer(*n < 0, n.unsigned_abs(), 10, d, false)),
        ('v', A::Uint(n)) | ('d', A::Uint(n)) => Some(integer(false, *n, 10, d, false)),
        ('x', A::Int(n)) => Some(integer(*n < 0, n.unsigned_abs(), 16, d, false)),
        ('X', A::Int(n)) => Some(integer(*n < 0, n.unsigned_abs(), 16, d, true)),
        ('o', A::Int(n)) => Some(integer(*n < 0, n.unsigned_abs(), 8, d, false)),
        ('b', A::Int(n)) => Some(integer(*n < 0, n.unsigned_abs(), 2, d, false)),
        ('x', A::Uint(n)) => Some(integer(false, *n, 16, d, false)),
        ('X', A::Uint(n)) => Some(integer(false, *n, 16, d, true)),
        ('o', A::Uint(n)) => Some(integer(false, *n, 8, d, false)),
        ('b', A::Uint(n)) => Some(integer(false, *n, 2, d, false)),
        ('x', A::Str(s)) => Some(Rendered::text(hex_bytes(s, false))),
        ('X', A::Str(s)) => Some(Rendered::text(hex_bytes(s, true))),
        ('c', A::Int(n)) => Some(Rendered::text(code_point(u64::try_from(*n).ok()))),
        ('c', A::Uint(n)) => Some(Rendered::text(code_point(Some(*n)))),
        ('v', A::Float(f)) | ('g', A::Float(f)) | ('G', A::Float(f)) => {
            let body = general(f.abs(), d.precision, verb == 'G');
            Some(float(*f, body, d))
        }
        ('f', A::Float(f)) | ('F', A::Float(f)) => {
            let body = format!("{:.*}", d.precision.unwrap_or(6), f.abs());
            Some(float(*f, body, d))
        }
        ('e', A::Float(f)) | ('E', A::Float(f)) => {
            let body = exponent(f.abs(), d.precision.unwrap_or(6), verb == 'E');
            Some(float(*f, body, d))
        }
        _ => None,
    }
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    }
}

fn sign_prefix(negative: bool, d: &Directive) -> &'static str {
    if negative {
        "-"
    } else if d.plus {
        "+"
    } else if d.space {
        " "
    } else {
        ""
    }
}

fn integer(negative: bool, magnitude: u64, radix: u32, d: &Directive, upper: bool) -> Rendered {
    let digits = match (radix, upper) {
        (16, true) => format!("{magnitude:X}"),
        (16, false) => format!("{magnitude:x}"),
        (8, _) => format!("{magnitude:o}"),
        (2, _) => format!("{magnitude:b}"),
        _ => magnitude.to_string(),
    };
    let radix_prefix = match (d.sharp, radix, upper) {
        (true, 16, true) => "0X",
        (true, 16, false) => "0x",
        (true, 8, _) => "0",
        (true, 2, _) => "0b",
        _ => "",
    };
    let digits = match d.precision {
        Some(0) if magnitude == 0 => String::new(),
        Some(p) if digits.len() < p => format!("{digits:0>p$}"),
        _ => digits,
    };
    let sign = sign_prefix(negative, d);
    Rendered {
        prefix_len: sign.len() + radix_prefix.len(),
        text: format!("{sign}{radix_prefix}{digits}"),
        // An explicit precision sets the digit count; width then pads with spaces.
        numeric: d.precision.is_none(),
    }
}

fn float(value: f64, body: String, d: &Directive) -> Rendered {
    let sign = sign_prefix(value.is_sign_negative() && !value.is_nan(), d);
    Rendered {
        prefix_len: sign.len(),
        text: format!("{sign}{body}"),
        numeric: value.is_finite(),
    }
}

/// Exponent notation with a signed, at least two digit exponent.
fn exponent(value: f64, precision: usize, upper: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{:.*e}", precision, value);
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let (exp_sign, exp_digits) = match exp.strip_prefix('-') {
        Some(rest) => ('-', rest),
        None => ('+', exp),
    };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{exp_sign}{exp_digits:0>2}")
}

/// `%g`: exponent form for exponents below -4 or at least the precision,
/// fixed form otherwise, trailing zeros removed.
///
/// Precision counts significant digits (0 is treated as 1). Without one the
/// shortest round-trip digits are used and the cutover exponent is 6.
fn general(value: f64, precision: Option<usize>, upper: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let (scientific, cutover) = match precision {
        Some(p) => {
            let p = p.max(1);
            (format!("{:.*e}", p - 1, value), i64::try_from(p).unwrap_or(i64::MAX))
        }
        None => (format!("{value:e}"), SHORTEST_EXPONENT_CUTOVER),
    };
    let (mantissa, exp) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exp: i64 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= cutover {
        let marker = if upper { 'E' } else { 'e' };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!(
            "{}{marker}{exp_sign}{:02}",
            strip_fraction_zeros(mantissa),
            exp.unsigned_abs()
        );
    }
    match precision {
        Some(p) => {
            let decimals = usize::try_from(i64::try_from(p.max(1)).unwrap_or(i64::MAX) - 1 - exp)
                .unwrap_or(0);
            strip_fraction_zeros(&format!("{value:.decimals$}")).to_string()
        }
        None => value.to_string(),
    }
}

fn strip_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn hex_bytes(s: &str, upper: bool) -> String {
    s.bytes()
        .map(|b| {
            if upper {
                format!("{b:02X}")
            } else {
                format!("{b:02x}")
            }
        })
        .collect()
}

fn code_point(value: Option<u64>) -> String {
    value
        .and_then(|n| u32::try_from(n).ok())
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

fn pad_into(out: &mut String, rendered: Rendered, d: &Directive) {
    let len = rendered.text.chars().count();
    let fill = d.width.unwrap_or(0).saturating_sub(len);
    if fill == 0 {
        out.push_str(&rendered.text);
    } else if d.minus {
        out.push_str(&rendered.text);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if d.zero && rendered.numeric {
        let (prefix, digits) = rendered.text.split_at(rendered.prefix_len);
        out.push_str(prefix);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(&rendered.text);
    }
}
