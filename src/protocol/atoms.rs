//! Predefined atoms.
//!
//! The server pre-interns atoms 1..=68 with fixed names; every connection's
//! atom cache is seeded with them so transcripts can annotate atom ids
//! before any InternAtom traffic has been observed.

/// Highest predefined atom id.
pub const PREDEFINED_MAX: u32 = 68;

/// Names of the predefined atoms, indexed by `atom - 1`.
pub const PREDEFINED: [&str; PREDEFINED_MAX as usize] = [
    "PRIMARY",             //  1
    "SECONDARY",           //  2
    "ARC",                 //  3
    "ATOM",                //  4
    "BITMAP",              //  5
    "CARDINAL",            //  6
    "COLORMAP",            //  7
    "CURSOR",              //  8
    "CUT_BUFFER0",         //  9
    "CUT_BUFFER1",         // 10
    "CUT_BUFFER2",         // 11
    "CUT_BUFFER3",         // 12
    "CUT_BUFFER4",         // 13
    "CUT_BUFFER5",         // 14
    "CUT_BUFFER6",         // 15
    "CUT_BUFFER7",         // 16
    "DRAWABLE",            // 17
    "FONT",                // 18
    "INTEGER",             // 19
    "PIXMAP",              // 20
    "POINT",               // 21
    "RECTANGLE",           // 22
    "RESOURCE_MANAGER",    // 23
    "RGB_COLOR_MAP",       // 24
    "RGB_BEST_MAP",        // 25
    "RGB_BLUE_MAP",        // 26
    "RGB_DEFAULT_MAP",     // 27
    "RGB_GRAY_MAP",        // 28
    "RGB_GREEN_MAP",       // 29
    "RGB_RED_MAP",         // 30
    "STRING",              // 31
    "VISUALID",            // 32
    "WINDOW",              // 33
    "WM_COMMAND",          // 34
    "WM_HINTS",            // 35
    "WM_CLIENT_MACHINE",   // 36
    "WM_ICON_NAME",        // 37
    "WM_ICON_SIZE",        // 38
    "WM_NAME",             // 39
    "WM_NORMAL_HINTS",     // 40
    "WM_SIZE_HINTS",       // 41
    "WM_ZOOM_HINTS",       // 42
    "MIN_SPACE",           // 43
    "NORM_SPACE",          // 44
    "MAX_SPACE",           // 45
    "END_SPACE",           // 46
    "SUPERSCRIPT_X",       // 47
    "SUPERSCRIPT_Y",       // 48
    "SUBSCRIPT_X",         // 49
    "SUBSCRIPT_Y",         // 50
    "UNDERLINE_POSITION",  // 51
    "UNDERLINE_THICKNESS", // 52
    "STRIKEOUT_ASCENT",    // 53
    "STRIKEOUT_DESCENT",   // 54
    "ITALIC_ANGLE",        // 55
    "X_HEIGHT",            // 56
    "QUAD_WIDTH",          // 57
    "WEIGHT",              // 58
    "POINT_SIZE",          // 59
    "RESOLUTION",          // 60
    "COPYRIGHT",           // 61
    "NOTICE",              // 62
    "FONT_NAME",           // 63
    "FAMILY_NAME",         // 64
    "FULL_NAME",           // 65
    "CAP_HEIGHT",          // 66
    "WM_CLASS",            // 67
    "WM_TRANSIENT_FOR",    // 68
];

/// Name of a predefined atom, if `atom` is in the predefined range.
pub fn predefined_name(atom: u32) -> Option<&'static str> {
    if atom >= 1 && atom <= PREDEFINED_MAX {
        Some(PREDEFINED[(atom - 1) as usize])
    } else {
        None
    }
}

/// Per-connection mirror of the server's atom internments.
///
/// Seeded with the predefined range, optionally extended by prefetched names,
/// and grown as InternAtom/GetAtomName replies are observed. The server may
/// in principle reuse ids, so later internments overwrite.
#[derive(Debug, Default)]
pub struct AtomTable {
    map: std::collections::HashMap<u32, String>,
}

impl AtomTable {
    /// New table seeded with the predefined atoms.
    pub fn new() -> Self {
        let mut table = Self::default();
        for (i, name) in PREDEFINED.iter().enumerate() {
            table.map.insert(i as u32 + 1, (*name).to_string());
        }
        table
    }

    /// Seed names fetched from the server, starting right above the
    /// predefined range.
    pub fn seed_fetched(&mut self, names: &[String]) {
        for (i, name) in names.iter().enumerate() {
            self.map
                .insert(PREDEFINED_MAX + 1 + i as u32, name.clone());
        }
    }

    /// Record an observed (atom, name) internment.
    pub fn intern(&mut self, atom: u32, name: String) {
        self.map.insert(atom, name);
    }

    pub fn lookup(&self, atom: u32) -> Option<&str> {
        self.map.get(&atom).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_range() {
        assert_eq!(predefined_name(0), None);
        assert_eq!(predefined_name(1), Some("PRIMARY"));
        assert_eq!(predefined_name(39), Some("WM_NAME"));
        assert_eq!(predefined_name(68), Some("WM_TRANSIENT_FOR"));
        assert_eq!(predefined_name(69), None);
    }

    #[test]
    fn table_is_seeded_with_predefined_names() {
        let table = AtomTable::new();
        assert_eq!(table.len(), PREDEFINED_MAX as usize);
        assert_eq!(table.lookup(1), Some("PRIMARY"));
        assert_eq!(table.lookup(68), Some("WM_TRANSIENT_FOR"));
        assert_eq!(table.lookup(69), None);
    }

    #[test]
    fn fetched_names_land_above_the_predefined_range() {
        let mut table = AtomTable::new();
        table.seed_fetched(&["WM_STATE".to_string(), "CLIPBOARD".to_string()]);
        assert_eq!(table.lookup(69), Some("WM_STATE"));
        assert_eq!(table.lookup(70), Some("CLIPBOARD"));
    }

    #[test]
    fn later_internments_overwrite() {
        let mut table = AtomTable::new();
        table.intern(200, "FIRST".to_string());
        table.intern(200, "SECOND".to_string());
        assert_eq!(table.lookup(200), Some("SECOND"));
    }
}
