//! European wheel layout.
//!
//! Single zero, 37 pockets. The red/black split is the standard one and
//! never changes at runtime.

use crate::types::Color;

/// Number of pockets on the wheel (0 through 36).
pub const POCKETS: u8 = 37;

/// Highest pocket number.
pub const MAX_NUMBER: u8 = POCKETS - 1;

/// Red pockets on a European wheel.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Color of a pocket. Zero is green.
pub fn color_of(number: u8) -> Color {
    if number == 0 {
        Color::Green
    } else if RED_NUMBERS.contains(&number) {
        Color::Red
    } else {
        Color::Black
    }
}

/// Black pockets, in ascending order.
pub fn black_numbers() -> Vec<u8> {
    (1..=MAX_NUMBER)
        .filter(|n| !RED_NUMBERS.contains(n))
        .collect()
}

pub fn is_valid_number(number: u8) -> bool {
    number <= MAX_NUMBER
}
