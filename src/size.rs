use crate::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
enum Unit {
    B,
    KiB,
    MiB,
    GiB,
    TiB,
}

const MULTIPLIERS: [u64; 5] = [
    /* B */ 1,
    /* KiB */ 1024,
    /* MiB */ 1024 * 1024,
    /* GiB */ 1024 * 1024 * 1024,
    /* TiB */ 1024 * 1024 * 1024 * 1024,
];

impl Unit {
    fn from_letter(x: char, input: &str) -> Result<Self> {
        match x.to_ascii_uppercase() {
            'K' => Ok(Unit::KiB),
            'M' => Ok(Unit::MiB),
            'G' => Ok(Unit::GiB),
            'T' => Ok(Unit::TiB),
            y if y.is_ascii_alphabetic() => Err(Error::UnknownSuffix(x)),
            _ => Err(Error::InvalidSize(input.to_owned())),
        }
    }

    fn multiplier(self) -> u64 {
        MULTIPLIERS[self as usize]
    }
}

fn digits_len(x: &str) -> usize {
    x.find(|c: char| !c.is_ascii_digit()).unwrap_or(x.len())
}

/// Parses sizes like `10`, `3.5K`, `1GB` or `20mb` into a number of bytes.
///
/// Units are binary (K = 1024) and case insensitive, a trailing `B` is
/// ignored. Fractional sizes are rounded toward zero.
pub fn parse_size(x: &str) -> Result<u64> {
    let invalid = || Error::InvalidSize(x.to_owned());

    let int_len = digits_len(x);
    if int_len == 0 {
        return Err(invalid());
    }

    let mut rest = &x[int_len..];
    let mut fractional = false;
    if let Some(after_dot) = rest.strip_prefix('.') {
        let frac_len = digits_len(after_dot);
        if frac_len == 0 {
            return Err(invalid());
        }
        fractional = true;
        rest = &after_dot[frac_len..];
    }
    let number = &x[..x.len() - rest.len()];

    let mut suffix = rest.chars();
    let unit = match (suffix.next(), suffix.next(), suffix.next()) {
        (None, _, _) => Unit::B,
        (Some('B'), None, _) | (Some('b'), None, _) => Unit::B,
        (Some(u), None, _) => Unit::from_letter(u, x)?,
        (Some(u), Some('B'), None) | (Some(u), Some('b'), None) => Unit::from_letter(u, x)?,
        _ => return Err(invalid()),
    };

    if fractional {
        let n: f64 = number.parse().map_err(|_| invalid())?;
        let bytes = (n * unit.multiplier() as f64).floor();
        if bytes >= u64::MAX as f64 {
            return Err(Error::SizeOverflow(x.to_owned()));
        }
        Ok(bytes as u64)
    } else {
        // only digits are left here, parsing fails on overflow alone
        let n: u64 = number
            .parse()
            .map_err(|_| Error::SizeOverflow(x.to_owned()))?;
        n.checked_mul(unit.multiplier())
            .ok_or_else(|| Error::SizeOverflow(x.to_owned()))
    }
}

#[allow(non_upper_case_globals)]
pub fn size_to_string(s: u64) -> String {
    const KiB: u64 = 1024;
    const MiB: u64 = 1048576;
    const GiB: u64 = 1073741824;
    const TiB: u64 = 1099511627776;

    match s {
        0..=1023 => format!("{}", s),
        1024..=1048575 => format!("{} KiB", s / KiB),
        1048576..=1073741823 => format!("{} MiB", s / MiB),
        1073741824..=1099511627775 => format!("{} GiB", s / GiB),
        1099511627776..=u64::MAX => format!("{} TiB", s / TiB),
    }
}
