//! CPF (Brazilian individual taxpayer number) generation and validation.
//!
//! A CPF is 9 base digits followed by two modulo-11 check digits, usually
//! written as `ddd.ddd.ddd-dd`.

use rand::Rng;

/// Number of base digits before the check digits.
const BASE_LEN: usize = 9;

/// Total number of digits in a CPF.
const CPF_LEN: usize = 11;

/// Length of the punctuated `ddd.ddd.ddd-dd` form.
const FORMATTED_LEN: usize = 14;

fn check_digit(digits: &[u8]) -> u8 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| *d as u32 * (first_weight - i as u32))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { (11 - remainder) as u8 }
}

/// Compute both check digits for 9 base digits.
///
/// The first uses weights 10..=2 over the base, the second weights 11..=2
/// over the base followed by the first check digit.
pub fn check_digits(base: &[u8; BASE_LEN]) -> [u8; 2] {
    let first = check_digit(base);
    let mut extended = [0u8; BASE_LEN + 1];
    extended[..BASE_LEN].copy_from_slice(base);
    extended[BASE_LEN] = first;
    [first, check_digit(&extended)]
}

/// Generate the 11 digits of a valid CPF using the given random source.
///
/// Base digits that are all the same are redrawn, since such numbers are
/// rejected by [`validate`].
pub fn generate_digits<R: Rng + ?Sized>(rng: &mut R) -> [u8; CPF_LEN] {
    let base = loop {
        let mut base = [0u8; BASE_LEN];
        for d in base.iter_mut() {
            *d = rng.gen_range(0..10);
        }
        if !all_same(&base) {
            break base;
        }
    };

    let [first, second] = check_digits(&base);
    let mut digits = [0u8; CPF_LEN];
    digits[..BASE_LEN].copy_from_slice(&base);
    digits[BASE_LEN] = first;
    digits[BASE_LEN + 1] = second;
    digits
}

/// Generate a valid, formatted CPF (`ddd.ddd.ddd-dd`).
pub fn generate() -> String {
    format_digits(&generate_digits(&mut rand::thread_rng()))
}

/// Render 11 digits as `ddd.ddd.ddd-dd`.
pub fn format_digits(digits: &[u8; CPF_LEN]) -> String {
    let mut out = String::with_capacity(FORMATTED_LEN);
    for (i, d) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(char::from(b'0' + d));
    }
    out
}

/// Render 11 digits without punctuation.
pub fn bare_digits(digits: &[u8; CPF_LEN]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Check a CPF in bare (`ddddddddddd`) or formatted (`ddd.ddd.ddd-dd`) form.
pub fn validate(input: &str) -> bool {
    match parse_digits(input) {
        Some(digits) => {
            let base: [u8; BASE_LEN] = match digits[..BASE_LEN].try_into() {
                Ok(base) => base,
                Err(_) => return false,
            };
            !all_same(&digits) && check_digits(&base) == [digits[9], digits[10]]
        }
        None => false,
    }
}

fn parse_digits(input: &str) -> Option<[u8; CPF_LEN]> {
    let bytes = input.trim().as_bytes();
    let formatted = match bytes.len() {
        CPF_LEN => false,
        FORMATTED_LEN => true,
        _ => return None,
    };

    let mut digits = [0u8; CPF_LEN];
    let mut n = 0;
    for (i, b) in bytes.iter().enumerate() {
        let separator = match (formatted, i) {
            (true, 3) | (true, 7) => Some(b'.'),
            (true, 11) => Some(b'-'),
            _ => None,
        };
        match separator {
            Some(expected) if *b == expected => {}
            Some(_) => return None,
            None if b.is_ascii_digit() => {
                digits[n] = b - b'0';
                n += 1;
            }
            None => return None,
        }
    }
    Some(digits)
}

fn all_same(digits: &[u8]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}
