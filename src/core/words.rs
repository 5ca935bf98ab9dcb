//! Number-to-words conversion for claim receipts.
//!
//! Receipts spell the bill total out in words following the Indian
//! numbering system (crore, lakh, thousand). The conversion works on the
//! whole-rupee part of the amount as displayed: the value is first rounded
//! to two decimals, then the paise are dropped, so the words always match
//! the printed figure.

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Words for 1..=99. Zero yields an empty string.
fn two_digits(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else {
        let tens = TENS[(n / 10) as usize];
        let ones = ONES[(n % 10) as usize];
        if ones.is_empty() {
            tens.to_string()
        } else {
            format!("{tens} {ones}")
        }
    }
}

/// Words for 1..=999. Zero yields an empty string.
fn three_digits(n: u64) -> String {
    debug_assert!(n < 1000);
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => two_digits(r),
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, r) => format!("{} Hundred {}", ONES[h as usize], two_digits(r)),
    }
}

/// Converts an amount to capitalized English words in the Indian system.
///
/// Fractional paise are dropped after rounding to two decimals, so
/// `4530.004` and `4529.996` both read "Four Thousand Five Hundred Thirty".
/// The caller appends "Only" where the document calls for it.
#[must_use]
pub fn amount_to_words(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let mut rupees = if rounded.is_finite() && rounded > 0.0 {
        rounded.trunc() as u64
    } else {
        0
    };

    if rupees == 0 {
        return "Zero".to_string();
    }

    // Indian grouping: crore (10^7), lakh (10^5), thousand (10^3), then 0..999.
    let mut parts = Vec::new();
    let crore = rupees / 10_000_000;
    if crore > 0 {
        // Amounts beyond 100 crore recurse so "One Hundred Twenty Crore" reads right.
        if crore >= 100 {
            parts.push(format!("{} Crore", amount_to_words(crore as f64)));
        } else {
            parts.push(format!("{} Crore", two_digits(crore)));
        }
        rupees %= 10_000_000;
    }
    let lakh = rupees / 100_000;
    if lakh > 0 {
        parts.push(format!("{} Lakh", two_digits(lakh)));
        rupees %= 100_000;
    }
    let thousand = rupees / 1000;
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digits(thousand)));
        rupees %= 1000;
    }
    if rupees > 0 {
        parts.push(three_digits(rupees));
    }

    parts.join(" ")
}
