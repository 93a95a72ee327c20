//! Natural (numeric-aware) string ordering
//!
//! Filenames sort with embedded digit runs compared as numbers, so
//! `item2.json` comes before `item10.json`. Letter comparison is
//! case-insensitive, with byte order as the final tiebreak to keep the
//! ordering total.

use std::cmp::Ordering;

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let an = take_digits(&mut ai);
                    let bn = take_digits(&mut bi);
                    match cmp_digit_runs(&an, &bn) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                } else {
                    let al = ac.to_lowercase();
                    let bl = bc.to_lowercase();
                    match al.cmp(bl) {
                        Ordering::Equal => {
                            ai.next();
                            bi.next();
                        }
                        ord => return ord,
                    }
                }
            }
        }
    }
}

fn take_digits(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = it.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        it.next();
    }
    digits
}

/// Compare two digit runs numerically without overflowing: strip leading
/// zeros, then longer runs are larger, and equal lengths compare textually.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let at = a.trim_start_matches('0');
    let bt = b.trim_start_matches('0');
    at.len().cmp(&bt.len()).then_with(|| at.cmp(bt))
}
