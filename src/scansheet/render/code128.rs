//! Code 128 symbology, numeric subset (code set C).
//!
//! Set C packs two digits per symbol, so a payload must be a non-empty,
//! even-length string of ASCII digits. A symbol is laid out as
//!
//! ```text
//! START-C  pair  pair  ...  check  STOP
//! ```
//!
//! where `check = (105 + Σ i·value_i) mod 103`, `i` counting pairs from 1.
//! Each symbol is three bars and three spaces (the stop adds a final bar),
//! described below by its element widths in modules.

use crate::error::EncodeError;

const START_C: usize = 105;
const STOP: usize = 106;

/// Modules in every data, check and start symbol
pub const SYMBOL_MODULES: usize = 11;
/// Modules in the stop pattern, including its terminating bar
pub const STOP_MODULES: usize = 13;

#[rustfmt::skip]
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232", "2331112",
];

/// Symbol values for `payload`: start, data pairs, check, stop.
pub fn symbols(payload: &str) -> Result<Vec<usize>, EncodeError> {
    if payload.is_empty() {
        return Err(EncodeError::Empty);
    }
    if let Some((position, found)) = payload
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(EncodeError::InvalidCharacter { position, found });
    }
    if payload.len() % 2 != 0 {
        return Err(EncodeError::OddLength(payload.len()));
    }

    let digits = payload.as_bytes();
    let mut values = Vec::with_capacity(digits.len() / 2 + 3);
    values.push(START_C);

    let mut sum = START_C;
    for (i, pair) in digits.chunks_exact(2).enumerate() {
        let value = usize::from(pair[0] - b'0') * 10 + usize::from(pair[1] - b'0');
        sum += (i + 1) * value;
        values.push(value);
    }

    values.push(sum % 103);
    values.push(STOP);
    Ok(values)
}

/// Bar/space modules for `payload`, `true` for a dark module. Quiet zones are
/// not included.
pub fn modules(payload: &str) -> Result<Vec<bool>, EncodeError> {
    let values = symbols(payload)?;
    let mut out = Vec::with_capacity((values.len() - 1) * SYMBOL_MODULES + STOP_MODULES);

    for value in values {
        // Elements alternate bar, space, bar, ...
        for (element, width) in PATTERNS[value].bytes().enumerate() {
            let dark = element % 2 == 0;
            for _ in 0..(width - b'0') {
                out.push(dark);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_has_the_right_width() {
        for (value, pattern) in PATTERNS.iter().enumerate() {
            let width: u32 = pattern.bytes().map(|b| u32::from(b - b'0')).sum();
            let expected = if value == STOP { STOP_MODULES } else { SYMBOL_MODULES };
            assert_eq!(width as usize, expected, "pattern {}", value);
        }
    }

    #[test]
    fn check_symbol_for_known_payload() {
        // 105 + 1*12 + 2*34 + 3*56 + 4*78 + 5*90 + 6*12 = 1187, 1187 mod 103 = 54
        let values = symbols("123456789012").unwrap();
        assert_eq!(values, vec![105, 12, 34, 56, 78, 90, 12, 54, 106]);
    }

    #[test]
    fn twelve_digits_take_101_modules() {
        let modules = modules("123456789012").unwrap();
        assert_eq!(modules.len(), 8 * SYMBOL_MODULES + STOP_MODULES);
        // Starts and ends on a bar
        assert!(modules[0]);
        assert!(modules[modules.len() - 1]);
    }

    #[test]
    fn start_c_pattern_leads() {
        let modules = modules("00").unwrap();
        // 211232: bar 2, space 1, bar 1, space 2, bar 3, space 2
        let expected = [
            true, true, false, true, false, false, true, true, true, false, false,
        ];
        assert_eq!(&modules[..11], &expected);
    }

    #[test]
    fn rejects_bad_payloads() {
        assert_eq!(symbols(""), Err(EncodeError::Empty));
        assert_eq!(symbols("123"), Err(EncodeError::OddLength(3)));
        assert_eq!(
            symbols("12a4"),
            Err(EncodeError::InvalidCharacter {
                position: 2,
                found: 'a'
            })
        );
    }
}
