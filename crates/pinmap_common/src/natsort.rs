//! Natural-order string comparison for port name lists.
//!
//! Numeric runs compare by numeric value rather than lexicographically, so
//! `LED2` sorts before `LED10`. Spaces are skipped during comparison and a
//! strict lexical comparison breaks any remaining ties.

use std::cmp::Ordering;

/// End-of-string sentinel used while walking past either input's length.
const NUL: char = '\0';

fn char_at(chars: &[char], i: usize) -> char {
    chars.get(i).copied().unwrap_or(NUL)
}

/// Compares two strings in natural order.
///
/// Runs of ASCII digits are compared as numbers: a shorter digit run is
/// smaller, and equal-length runs compare digit by digit with the first
/// difference deciding. Outside digit runs, characters compare as usual
/// with spaces skipped. Fully equal walks fall back to `str::cmp` so the
/// ordering stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ac: Vec<char> = a.chars().collect();
    let bc: Vec<char> = b.chars().collect();
    let mut ia = 0usize;
    let mut ib = 0usize;
    loop {
        let mut ca = char_at(&ac, ia);
        let mut cb = char_at(&bc, ib);

        while ca.is_whitespace() {
            ia += 1;
            ca = char_at(&ac, ia);
        }
        while cb.is_whitespace() {
            ib += 1;
            cb = char_at(&bc, ib);
        }

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            // Equal-length runs compare by their first differing digit;
            // a run that ends first is the smaller number.
            let mut bias = Ordering::Equal;
            loop {
                ca = char_at(&ac, ia);
                cb = char_at(&bc, ib);
                let da = ca.is_ascii_digit();
                let db = cb.is_ascii_digit();
                if !da && !db {
                    break;
                }
                if !da {
                    return Ordering::Less;
                }
                if !db {
                    return Ordering::Greater;
                }
                if bias == Ordering::Equal {
                    bias = ca.cmp(&cb);
                }
                ia += 1;
                ib += 1;
            }
            if bias != Ordering::Equal {
                return bias;
            }
        }

        if ca == NUL && cb == NUL {
            return a.cmp(b);
        }
        match ca.cmp(&cb) {
            Ordering::Equal => {}
            ord => return ord,
        }
        ia += 1;
        ib += 1;
    }
}
