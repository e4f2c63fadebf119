//! Core protocol error codes.
//!
//! Every error is a fixed 32-byte encoding: `0`, the error code, the
//! sequence number of the failed request, a 32-bit datum (the offending
//! value or resource id where the code defines one), minor and major opcode
//! of the failed request.

/// Error-code names, codes 1..=17.
const NAMES: [&str; 17] = [
    "Request",        //  1
    "Value",          //  2
    "Window",         //  3
    "Pixmap",         //  4
    "Atom",           //  5
    "Cursor",         //  6
    "Font",           //  7
    "Match",          //  8
    "Drawable",       //  9
    "Access",         // 10
    "Alloc",          // 11
    "Colormap",       // 12
    "GContext",       // 13
    "IDChoice",       // 14
    "Name",           // 15
    "Length",         // 16
    "Implementation", // 17
];

/// Error code sent when a GetAtomName probe walks off the end of the
/// server's atom table.
pub const ATOM: u8 = 5;

/// Name of a core error code, if known.
pub fn error_name(code: u8) -> Option<&'static str> {
    if (1..=17).contains(&code) {
        Some(NAMES[(code - 1) as usize])
    } else {
        None
    }
}

/// Whether the 32-bit datum of this error code carries a meaningful value.
///
/// Request, Match, Access, Alloc, Name, Length, and Implementation errors
/// leave the field unused.
pub fn error_has_value(code: u8) -> bool {
    matches!(code, 2 | 3 | 4 | 5 | 6 | 7 | 9 | 12 | 13 | 14)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(error_name(1), Some("Request"));
        assert_eq!(error_name(2), Some("Value"));
        assert_eq!(error_name(17), Some("Implementation"));
        assert_eq!(error_name(0), None);
        assert_eq!(error_name(18), None);
    }

    #[test]
    fn value_bearing_codes() {
        assert!(error_has_value(2));
        assert!(error_has_value(3));
        assert!(!error_has_value(1));
        assert!(!error_has_value(8));
        assert!(!error_has_value(17));
    }
}
