/*!
 * Core request descriptors.
 *
 * One [`RequestSpec`] per core major opcode (1-119 plus 127), carrying the
 * fixed-prefix field layout, the variable-suffix plan, and the reply shape
 * where the request has one. Offsets are in the normal request form; the
 * decoder shifts offsets past the 16-bit length field when the BIG-REQUESTS
 * form is in play.
 */

use super::names::*;
use super::types::FieldKind::*;
use super::types::{
    Elem, FieldKind, FieldSpec, LenSrc, ReplySpec, RequestSpec, SuffixKind, SuffixSpec, ValueSpec,
    Width,
};

/// Major opcodes of the core protocol, organized by functional category.
pub mod opcode {
    // Window management
    pub const CREATE_WINDOW: u8 = 1;
    pub const CHANGE_WINDOW_ATTRIBUTES: u8 = 2;
    pub const GET_WINDOW_ATTRIBUTES: u8 = 3;
    pub const DESTROY_WINDOW: u8 = 4;
    pub const DESTROY_SUBWINDOWS: u8 = 5;
    pub const CHANGE_SAVE_SET: u8 = 6;
    pub const REPARENT_WINDOW: u8 = 7;
    pub const MAP_WINDOW: u8 = 8;
    pub const MAP_SUBWINDOWS: u8 = 9;
    pub const UNMAP_WINDOW: u8 = 10;
    pub const UNMAP_SUBWINDOWS: u8 = 11;
    pub const CONFIGURE_WINDOW: u8 = 12;
    pub const CIRCULATE_WINDOW: u8 = 13;
    pub const GET_GEOMETRY: u8 = 14;
    pub const QUERY_TREE: u8 = 15;

    // Atoms and properties
    pub const INTERN_ATOM: u8 = 16;
    pub const GET_ATOM_NAME: u8 = 17;
    pub const CHANGE_PROPERTY: u8 = 18;
    pub const DELETE_PROPERTY: u8 = 19;
    pub const GET_PROPERTY: u8 = 20;
    pub const LIST_PROPERTIES: u8 = 21;
    pub const SET_SELECTION_OWNER: u8 = 22;
    pub const GET_SELECTION_OWNER: u8 = 23;
    pub const CONVERT_SELECTION: u8 = 24;
    pub const SEND_EVENT: u8 = 25;

    // Input grabs and pointer/keyboard queries
    pub const GRAB_POINTER: u8 = 26;
    pub const UNGRAB_POINTER: u8 = 27;
    pub const GRAB_BUTTON: u8 = 28;
    pub const UNGRAB_BUTTON: u8 = 29;
    pub const CHANGE_ACTIVE_POINTER_GRAB: u8 = 30;
    pub const GRAB_KEYBOARD: u8 = 31;
    pub const UNGRAB_KEYBOARD: u8 = 32;
    pub const GRAB_KEY: u8 = 33;
    pub const UNGRAB_KEY: u8 = 34;
    pub const ALLOW_EVENTS: u8 = 35;
    pub const GRAB_SERVER: u8 = 36;
    pub const UNGRAB_SERVER: u8 = 37;
    pub const QUERY_POINTER: u8 = 38;
    pub const GET_MOTION_EVENTS: u8 = 39;
    pub const TRANSLATE_COORDINATES: u8 = 40;
    pub const WARP_POINTER: u8 = 41;
    pub const SET_INPUT_FOCUS: u8 = 42;
    pub const GET_INPUT_FOCUS: u8 = 43;
    pub const QUERY_KEYMAP: u8 = 44;

    // Fonts and text
    pub const OPEN_FONT: u8 = 45;
    pub const CLOSE_FONT: u8 = 46;
    pub const QUERY_FONT: u8 = 47;
    pub const QUERY_TEXT_EXTENTS: u8 = 48;
    pub const LIST_FONTS: u8 = 49;
    pub const LIST_FONTS_WITH_INFO: u8 = 50;
    pub const SET_FONT_PATH: u8 = 51;
    pub const GET_FONT_PATH: u8 = 52;

    // Pixmaps
    pub const CREATE_PIXMAP: u8 = 53;
    pub const FREE_PIXMAP: u8 = 54;

    // Graphics contexts and drawing
    pub const CREATE_GC: u8 = 55;
    pub const CHANGE_GC: u8 = 56;
    pub const COPY_GC: u8 = 57;
    pub const SET_DASHES: u8 = 58;
    pub const SET_CLIP_RECTANGLES: u8 = 59;
    pub const FREE_GC: u8 = 60;
    pub const CLEAR_AREA: u8 = 61;
    pub const COPY_AREA: u8 = 62;
    pub const COPY_PLANE: u8 = 63;
    pub const POLY_POINT: u8 = 64;
    pub const POLY_LINE: u8 = 65;
    pub const POLY_SEGMENT: u8 = 66;
    pub const POLY_RECTANGLE: u8 = 67;
    pub const POLY_ARC: u8 = 68;
    pub const FILL_POLY: u8 = 69;
    pub const POLY_FILL_RECTANGLE: u8 = 70;
    pub const POLY_FILL_ARC: u8 = 71;
    pub const PUT_IMAGE: u8 = 72;
    pub const GET_IMAGE: u8 = 73;
    pub const POLY_TEXT8: u8 = 74;
    pub const POLY_TEXT16: u8 = 75;
    pub const IMAGE_TEXT8: u8 = 76;
    pub const IMAGE_TEXT16: u8 = 77;

    // Colormaps
    pub const CREATE_COLORMAP: u8 = 78;
    pub const FREE_COLORMAP: u8 = 79;
    pub const COPY_COLORMAP_AND_FREE: u8 = 80;
    pub const INSTALL_COLORMAP: u8 = 81;
    pub const UNINSTALL_COLORMAP: u8 = 82;
    pub const LIST_INSTALLED_COLORMAPS: u8 = 83;
    pub const ALLOC_COLOR: u8 = 84;
    pub const ALLOC_NAMED_COLOR: u8 = 85;
    pub const ALLOC_COLOR_CELLS: u8 = 86;
    pub const ALLOC_COLOR_PLANES: u8 = 87;
    pub const FREE_COLORS: u8 = 88;
    pub const STORE_COLORS: u8 = 89;
    pub const STORE_NAMED_COLOR: u8 = 90;
    pub const QUERY_COLORS: u8 = 91;
    pub const LOOKUP_COLOR: u8 = 92;

    // Cursors
    pub const CREATE_CURSOR: u8 = 93;
    pub const CREATE_GLYPH_CURSOR: u8 = 94;
    pub const FREE_CURSOR: u8 = 95;
    pub const RECOLOR_CURSOR: u8 = 96;

    // Server queries and control
    pub const QUERY_BEST_SIZE: u8 = 97;
    pub const QUERY_EXTENSION: u8 = 98;
    pub const LIST_EXTENSIONS: u8 = 99;
    pub const CHANGE_KEYBOARD_MAPPING: u8 = 100;
    pub const GET_KEYBOARD_MAPPING: u8 = 101;
    pub const CHANGE_KEYBOARD_CONTROL: u8 = 102;
    pub const GET_KEYBOARD_CONTROL: u8 = 103;
    pub const BELL: u8 = 104;
    pub const CHANGE_POINTER_CONTROL: u8 = 105;
    pub const GET_POINTER_CONTROL: u8 = 106;
    pub const SET_SCREEN_SAVER: u8 = 107;
    pub const GET_SCREEN_SAVER: u8 = 108;
    pub const CHANGE_HOSTS: u8 = 109;
    pub const LIST_HOSTS: u8 = 110;
    pub const SET_ACCESS_CONTROL: u8 = 111;
    pub const SET_CLOSE_DOWN_MODE: u8 = 112;
    pub const KILL_CLIENT: u8 = 113;
    pub const ROTATE_PROPERTIES: u8 = 114;
    pub const FORCE_SCREEN_SAVER: u8 = 115;
    pub const SET_POINTER_MAPPING: u8 = 116;
    pub const GET_POINTER_MAPPING: u8 = 117;
    pub const SET_MODIFIER_MAPPING: u8 = 118;
    pub const GET_MODIFIER_MAPPING: u8 = 119;
    pub const NO_OPERATION: u8 = 127;
}

const fn f(name: &'static str, offset: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, offset, kind }
}

const fn s(name: &'static str, kind: SuffixKind) -> SuffixSpec {
    SuffixSpec { name, kind }
}

const fn v(bit: u32, name: &'static str, kind: FieldKind) -> ValueSpec {
    ValueSpec { bit, name, kind }
}

// Common list element shapes.

const POINT: Elem = Elem::Struct {
    name: "POINT",
    size: 4,
    fields: &[f("x", 0, Int16), f("y", 2, Int16)],
};

const RECTANGLE: Elem = Elem::Struct {
    name: "RECTANGLE",
    size: 8,
    fields: &[
        f("x", 0, Int16),
        f("y", 2, Int16),
        f("width", 4, Uint16),
        f("height", 6, Uint16),
    ],
};

const ARC: Elem = Elem::Struct {
    name: "ARC",
    size: 12,
    fields: &[
        f("x", 0, Int16),
        f("y", 2, Int16),
        f("width", 4, Uint16),
        f("height", 6, Uint16),
        f("angle1", 8, Int16),
        f("angle2", 10, Int16),
    ],
};

const SEGMENT: Elem = Elem::Struct {
    name: "SEGMENT",
    size: 8,
    fields: &[
        f("x1", 0, Int16),
        f("y1", 2, Int16),
        f("x2", 4, Int16),
        f("y2", 6, Int16),
    ],
};

const TIMECOORD: Elem = Elem::Struct {
    name: "TIMECOORD",
    size: 8,
    fields: &[f("time", 0, Timestamp), f("x", 4, Int16), f("y", 6, Int16)],
};

const FONTPROP: Elem = Elem::Struct {
    name: "FONTPROP",
    size: 8,
    fields: &[f("name", 0, Atom), f("value", 4, Card32)],
};

const CHARINFO: Elem = Elem::Struct {
    name: "CHARINFO",
    size: 12,
    fields: &[
        f("left-side-bearing", 0, Int16),
        f("right-side-bearing", 2, Int16),
        f("character-width", 4, Int16),
        f("ascent", 6, Int16),
        f("descent", 8, Int16),
        f("attributes", 10, Card16),
    ],
};

const COLORITEM: Elem = Elem::Struct {
    name: "COLORITEM",
    size: 12,
    fields: &[
        f("pixel", 0, Card32),
        f("red", 4, Uint16),
        f("green", 6, Uint16),
        f("blue", 8, Uint16),
        f("flags", 10, Bitmask8(COLOR_FLAGS)),
    ],
};

const RGB: Elem = Elem::Struct {
    name: "RGB",
    size: 8,
    fields: &[
        f("red", 0, Uint16),
        f("green", 2, Uint16),
        f("blue", 4, Uint16),
    ],
};

// LISTofVALUE specifications, in ascending bit order.

/// CreateWindow / ChangeWindowAttributes window attributes.
pub static WINDOW_VALUES: &[ValueSpec] = &[
    v(0, "background-pixmap", Alt32(BACKGROUND_PIXMAP_ALT)),
    v(1, "background-pixel", Card32),
    v(2, "border-pixmap", Alt32(COPY_FROM_PARENT_ALT)),
    v(3, "border-pixel", Card32),
    v(4, "bit-gravity", Enum8(BIT_GRAVITY)),
    v(5, "win-gravity", Enum8(WIN_GRAVITY)),
    v(6, "backing-store", Enum8(BACKING_STORE)),
    v(7, "backing-planes", Card32),
    v(8, "backing-pixel", Card32),
    v(9, "override-redirect", Bool8),
    v(10, "save-under", Bool8),
    v(11, "event-mask", Bitmask32(EVENT_MASK)),
    v(12, "do-not-propagate-mask", Bitmask32(EVENT_MASK)),
    v(13, "colormap", Alt32(COPY_FROM_PARENT_ALT)),
    v(14, "cursor", Alt32(NONE_ALT)),
];

/// ConfigureWindow geometry changes.
pub static CONFIGURE_VALUES: &[ValueSpec] = &[
    v(0, "x", Int16),
    v(1, "y", Int16),
    v(2, "width", Uint16),
    v(3, "height", Uint16),
    v(4, "border-width", Uint16),
    v(5, "sibling", Xid),
    v(6, "stack-mode", Enum8(STACK_MODE)),
];

/// CreateGC / ChangeGC graphics-context components.
pub static GC_VALUES: &[ValueSpec] = &[
    v(0, "function", Enum8(GC_FUNCTION)),
    v(1, "plane-mask", Card32),
    v(2, "foreground", Card32),
    v(3, "background", Card32),
    v(4, "line-width", Uint16),
    v(5, "line-style", Enum8(GC_LINE_STYLE)),
    v(6, "cap-style", Enum8(GC_CAP_STYLE)),
    v(7, "join-style", Enum8(GC_JOIN_STYLE)),
    v(8, "fill-style", Enum8(GC_FILL_STYLE)),
    v(9, "fill-rule", Enum8(GC_FILL_RULE)),
    v(10, "tile", Xid),
    v(11, "stipple", Xid),
    v(12, "tile-stipple-x-origin", Int16),
    v(13, "tile-stipple-y-origin", Int16),
    v(14, "font", Xid),
    v(15, "subwindow-mode", Enum8(GC_SUBWINDOW_MODE)),
    v(16, "graphics-exposures", Bool8),
    v(17, "clip-x-origin", Int16),
    v(18, "clip-y-origin", Int16),
    v(19, "clip-mask", Alt32(NONE_ALT)),
    v(20, "dash-offset", Uint16),
    v(21, "dashes", Uint8),
    v(22, "arc-mode", Enum8(GC_ARC_MODE)),
];

/// ChangeKeyboardControl settings.
pub static KEYBOARD_VALUES: &[ValueSpec] = &[
    v(0, "key-click-percent", Int8),
    v(1, "bell-percent", Int8),
    v(2, "bell-pitch", Int16),
    v(3, "bell-duration", Int16),
    v(4, "led", Uint8),
    v(5, "led-mode", Enum8(LED_MODE)),
    v(6, "key", Keycode),
    v(7, "auto-repeat-mode", Enum8(AUTO_REPEAT_MODE)),
];

// Shared field list for the QueryFont-shaped replies.

const FONT_INFO_FIELDS: &[FieldSpec] = &[
    f("min-bounds.left-side-bearing", 8, Int16),
    f("min-bounds.right-side-bearing", 10, Int16),
    f("min-bounds.character-width", 12, Int16),
    f("min-bounds.ascent", 14, Int16),
    f("min-bounds.descent", 16, Int16),
    f("min-bounds.attributes", 18, Card16),
    f("max-bounds.left-side-bearing", 24, Int16),
    f("max-bounds.right-side-bearing", 26, Int16),
    f("max-bounds.character-width", 28, Int16),
    f("max-bounds.ascent", 30, Int16),
    f("max-bounds.descent", 32, Int16),
    f("max-bounds.attributes", 34, Card16),
    f("min-char-or-byte2", 40, Uint16),
    f("max-char-or-byte2", 42, Uint16),
    f("default-char", 44, Uint16),
    f("draw-direction", 48, Enum8(DRAW_DIRECTION)),
    f("min-byte1", 49, Uint8),
    f("max-byte1", 50, Uint8),
    f("all-chars-exist", 51, Bool8),
    f("font-ascent", 52, Int16),
    f("font-descent", 54, Int16),
];

// Reply shapes.

static GET_WINDOW_ATTRIBUTES_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("backing-store", 1, Enum8(BACKING_STORE)),
        f("visual", 8, Xid),
        f("class", 12, Enum16(WINDOW_CLASS)),
        f("bit-gravity", 14, Enum8(BIT_GRAVITY)),
        f("win-gravity", 15, Enum8(WIN_GRAVITY)),
        f("backing-planes", 16, Card32),
        f("backing-pixel", 20, Card32),
        f("save-under", 24, Bool8),
        f("map-is-installed", 25, Bool8),
        f("map-state", 26, Enum8(MAP_STATE)),
        f("override-redirect", 27, Bool8),
        f("colormap", 28, Alt32(NONE_ALT)),
        f("all-event-masks", 32, Bitmask32(EVENT_MASK)),
        f("your-event-mask", 36, Bitmask32(EVENT_MASK)),
        f("do-not-propagate-mask", 40, Bitmask16(EVENT_MASK)),
    ],
    fixed_len: 44,
    suffixes: &[],
};

static GET_GEOMETRY_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("depth", 1, Uint8),
        f("root", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
        f("width", 16, Uint16),
        f("height", 18, Uint16),
        f("border-width", 20, Uint16),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static QUERY_TREE_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("root", 8, Xid),
        f("parent", 12, Alt32(NONE_ALT)),
        f("n-children", 16, Uint16),
    ],
    fixed_len: 32,
    suffixes: &[s(
        "children",
        SuffixKind::List {
            elem: Elem::Scalar(Xid),
            len: LenSrc::Field(16, Width::U16),
        },
    )],
};

static INTERN_ATOM_REPLY: ReplySpec = ReplySpec {
    fields: &[f("atom", 8, Atom)],
    fixed_len: 32,
    suffixes: &[],
};

static GET_ATOM_NAME_REPLY: ReplySpec = ReplySpec {
    fields: &[f("name-len", 8, Uint16)],
    fixed_len: 32,
    suffixes: &[s(
        "name",
        SuffixKind::String8(LenSrc::Field(8, Width::U16)),
    )],
};

static GET_PROPERTY_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f(
            "format",
            1,
            Format {
                strict: false,
                allow_zero: true,
            },
        ),
        f("type", 8, Atom),
        f("bytes-after", 12, Uint32),
        f("value-len", 16, Uint32),
    ],
    fixed_len: 32,
    suffixes: &[s(
        "value",
        SuffixKind::FormatList {
            format_offset: 1,
            len: LenSrc::Field(16, Width::U32),
        },
    )],
};

static LIST_PROPERTIES_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-atoms", 8, Uint16)],
    fixed_len: 32,
    suffixes: &[s(
        "atoms",
        SuffixKind::List {
            elem: Elem::Scalar(Atom),
            len: LenSrc::Field(8, Width::U16),
        },
    )],
};

static GET_SELECTION_OWNER_REPLY: ReplySpec = ReplySpec {
    fields: &[f("owner", 8, Alt32(NONE_ALT))],
    fixed_len: 32,
    suffixes: &[],
};

static GRAB_STATUS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("status", 1, Enum8(GRAB_STATUS))],
    fixed_len: 32,
    suffixes: &[],
};

static QUERY_POINTER_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("same-screen", 1, Bool8),
        f("root", 8, Xid),
        f("child", 12, Alt32(NONE_ALT)),
        f("root-x", 16, Int16),
        f("root-y", 18, Int16),
        f("win-x", 20, Int16),
        f("win-y", 22, Int16),
        f("mask", 24, Bitmask16(KEY_BUT_MASK)),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static GET_MOTION_EVENTS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-events", 8, Uint32)],
    fixed_len: 32,
    suffixes: &[s(
        "events",
        SuffixKind::List {
            elem: TIMECOORD,
            len: LenSrc::Field(8, Width::U32),
        },
    )],
};

static TRANSLATE_COORDINATES_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("same-screen", 1, Bool8),
        f("child", 8, Alt32(NONE_ALT)),
        f("dst-x", 12, Int16),
        f("dst-y", 14, Int16),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static GET_INPUT_FOCUS_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("revert-to", 1, Enum8(REVERT_TO)),
        f("focus", 8, Alt32(FOCUS_ALT)),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static QUERY_KEYMAP_REPLY: ReplySpec = ReplySpec {
    fields: &[],
    fixed_len: 8,
    suffixes: &[s(
        "keys",
        SuffixKind::List {
            elem: Elem::Scalar(Card8),
            len: LenSrc::Const(32),
        },
    )],
};

static QUERY_FONT_REPLY: ReplySpec = ReplySpec {
    fields: FONT_INFO_FIELDS,
    fixed_len: 60,
    suffixes: &[
        s(
            "properties",
            SuffixKind::List {
                elem: FONTPROP,
                len: LenSrc::Field(46, Width::U16),
            },
        ),
        s(
            "char-infos",
            SuffixKind::List {
                elem: CHARINFO,
                len: LenSrc::Field(56, Width::U32),
            },
        ),
    ],
};

static QUERY_TEXT_EXTENTS_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("draw-direction", 1, Enum8(DRAW_DIRECTION)),
        f("font-ascent", 8, Int16),
        f("font-descent", 10, Int16),
        f("overall-ascent", 12, Int16),
        f("overall-descent", 14, Int16),
        f("overall-width", 16, Int32),
        f("overall-left", 20, Int32),
        f("overall-right", 24, Int32),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static LIST_FONTS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-names", 8, Uint16)],
    fixed_len: 32,
    suffixes: &[s(
        "names",
        SuffixKind::List {
            elem: Elem::Str,
            len: LenSrc::Field(8, Width::U16),
        },
    )],
};

/// One reply per font; the series ends with a zero-length name.
static LIST_FONTS_WITH_INFO_REPLY: ReplySpec = ReplySpec {
    fields: FONT_INFO_FIELDS,
    fixed_len: 60,
    suffixes: &[
        s(
            "properties",
            SuffixKind::List {
                elem: FONTPROP,
                len: LenSrc::Field(46, Width::U16),
            },
        ),
        s("name", SuffixKind::String8(LenSrc::Field(1, Width::U8))),
    ],
};

static GET_FONT_PATH_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-paths", 8, Uint16)],
    fixed_len: 32,
    suffixes: &[s(
        "path",
        SuffixKind::List {
            elem: Elem::Str,
            len: LenSrc::Field(8, Width::U16),
        },
    )],
};

static GET_IMAGE_REPLY: ReplySpec = ReplySpec {
    fields: &[f("depth", 1, Uint8), f("visual", 8, Alt32(NONE_ALT))],
    fixed_len: 32,
    suffixes: &[s("data", SuffixKind::Bytes(LenSrc::Remainder))],
};

static LIST_INSTALLED_COLORMAPS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-cmaps", 8, Uint16)],
    fixed_len: 32,
    suffixes: &[s(
        "cmaps",
        SuffixKind::List {
            elem: Elem::Scalar(Xid),
            len: LenSrc::Field(8, Width::U16),
        },
    )],
};

static ALLOC_COLOR_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("red", 8, Uint16),
        f("green", 10, Uint16),
        f("blue", 12, Uint16),
        f("pixel", 16, Card32),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static ALLOC_NAMED_COLOR_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("pixel", 8, Card32),
        f("exact-red", 12, Uint16),
        f("exact-green", 14, Uint16),
        f("exact-blue", 16, Uint16),
        f("visual-red", 18, Uint16),
        f("visual-green", 20, Uint16),
        f("visual-blue", 22, Uint16),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static ALLOC_COLOR_CELLS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-pixels", 8, Uint16), f("n-masks", 10, Uint16)],
    fixed_len: 32,
    suffixes: &[
        s(
            "pixels",
            SuffixKind::List {
                elem: Elem::Scalar(Card32),
                len: LenSrc::Field(8, Width::U16),
            },
        ),
        s(
            "masks",
            SuffixKind::List {
                elem: Elem::Scalar(Card32),
                len: LenSrc::Field(10, Width::U16),
            },
        ),
    ],
};

static ALLOC_COLOR_PLANES_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("n-pixels", 8, Uint16),
        f("red-mask", 12, Card32),
        f("green-mask", 16, Card32),
        f("blue-mask", 20, Card32),
    ],
    fixed_len: 32,
    suffixes: &[s(
        "pixels",
        SuffixKind::List {
            elem: Elem::Scalar(Card32),
            len: LenSrc::Field(8, Width::U16),
        },
    )],
};

static QUERY_COLORS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-colors", 8, Uint16)],
    fixed_len: 32,
    suffixes: &[s(
        "colors",
        SuffixKind::List {
            elem: RGB,
            len: LenSrc::Field(8, Width::U16),
        },
    )],
};

static LOOKUP_COLOR_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("exact-red", 8, Uint16),
        f("exact-green", 10, Uint16),
        f("exact-blue", 12, Uint16),
        f("visual-red", 14, Uint16),
        f("visual-green", 16, Uint16),
        f("visual-blue", 18, Uint16),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static QUERY_BEST_SIZE_REPLY: ReplySpec = ReplySpec {
    fields: &[f("width", 8, Uint16), f("height", 10, Uint16)],
    fixed_len: 32,
    suffixes: &[],
};

static QUERY_EXTENSION_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("present", 8, Bool8),
        f("major-opcode", 9, Uint8),
        f("first-event", 10, Uint8),
        f("first-error", 11, Uint8),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static LIST_EXTENSIONS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("n-names", 1, Uint8)],
    fixed_len: 32,
    suffixes: &[s(
        "names",
        SuffixKind::List {
            elem: Elem::Str,
            len: LenSrc::Field(1, Width::U8),
        },
    )],
};

static GET_KEYBOARD_MAPPING_REPLY: ReplySpec = ReplySpec {
    fields: &[f("keysyms-per-keycode", 1, Uint8)],
    fixed_len: 32,
    suffixes: &[s(
        "keysyms",
        SuffixKind::List {
            elem: Elem::Scalar(Keysym),
            len: LenSrc::Remainder,
        },
    )],
};

static GET_KEYBOARD_CONTROL_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("global-auto-repeat", 1, Enum8(GLOBAL_AUTO_REPEAT)),
        f("led-mask", 8, Card32),
        f("key-click-percent", 12, Uint8),
        f("bell-percent", 13, Uint8),
        f("bell-pitch", 14, Uint16),
        f("bell-duration", 16, Uint16),
    ],
    fixed_len: 20,
    suffixes: &[s(
        "auto-repeats",
        SuffixKind::List {
            elem: Elem::Scalar(Card8),
            len: LenSrc::Const(32),
        },
    )],
};

static GET_POINTER_CONTROL_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("acceleration-numerator", 8, Uint16),
        f("acceleration-denominator", 10, Uint16),
        f("threshold", 12, Uint16),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static GET_SCREEN_SAVER_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("timeout", 8, Uint16),
        f("interval", 10, Uint16),
        f("prefer-blanking", 12, Enum8(YES_NO_DEFAULT)),
        f("allow-exposures", 13, Enum8(YES_NO_DEFAULT)),
    ],
    fixed_len: 32,
    suffixes: &[],
};

static LIST_HOSTS_REPLY: ReplySpec = ReplySpec {
    fields: &[
        f("mode", 1, Enum8(ACCESS_CONTROL)),
        f("n-hosts", 8, Uint16),
    ],
    fixed_len: 32,
    suffixes: &[s(
        "hosts",
        SuffixKind::List {
            elem: Elem::Host,
            len: LenSrc::Field(8, Width::U16),
        },
    )],
};

static MAPPING_STATUS_REPLY: ReplySpec = ReplySpec {
    fields: &[f("status", 1, Enum8(MAPPING_STATUS))],
    fixed_len: 32,
    suffixes: &[],
};

static GET_POINTER_MAPPING_REPLY: ReplySpec = ReplySpec {
    fields: &[f("map-len", 1, Uint8)],
    fixed_len: 32,
    suffixes: &[s(
        "map",
        SuffixKind::List {
            elem: Elem::Scalar(Uint8),
            len: LenSrc::Field(1, Width::U8),
        },
    )],
};

static GET_MODIFIER_MAPPING_REPLY: ReplySpec = ReplySpec {
    fields: &[f("keycodes-per-modifier", 1, Uint8)],
    fixed_len: 32,
    suffixes: &[s(
        "keycodes",
        SuffixKind::List {
            elem: Elem::Scalar(Keycode),
            len: LenSrc::Remainder,
        },
    )],
};

// Request shapes.

static CREATE_WINDOW: RequestSpec = RequestSpec {
    name: "CreateWindow",
    min_len: 32,
    fields: &[
        f("depth", 1, Uint8),
        f("wid", 4, Xid),
        f("parent", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
        f("width", 16, Uint16),
        f("height", 18, Uint16),
        f("border-width", 20, Uint16),
        f("class", 22, Enum16(WINDOW_CLASS)),
        f("visual", 24, Alt32(COPY_FROM_PARENT_ALT)),
        f("value-mask", 28, Bitmask32(WINDOW_VALUE_MASK)),
    ],
    suffixes: &[s(
        "value-list",
        SuffixKind::ValueList {
            mask_offset: 28,
            mask_width: Width::U32,
            values: WINDOW_VALUES,
        },
    )],
    reply: None,
};

static CHANGE_WINDOW_ATTRIBUTES: RequestSpec = RequestSpec {
    name: "ChangeWindowAttributes",
    min_len: 12,
    fields: &[
        f("window", 4, Xid),
        f("value-mask", 8, Bitmask32(WINDOW_VALUE_MASK)),
    ],
    suffixes: &[s(
        "value-list",
        SuffixKind::ValueList {
            mask_offset: 8,
            mask_width: Width::U32,
            values: WINDOW_VALUES,
        },
    )],
    reply: None,
};

static GET_WINDOW_ATTRIBUTES: RequestSpec = RequestSpec {
    name: "GetWindowAttributes",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: Some(&GET_WINDOW_ATTRIBUTES_REPLY),
};

static DESTROY_WINDOW: RequestSpec = RequestSpec {
    name: "DestroyWindow",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static DESTROY_SUBWINDOWS: RequestSpec = RequestSpec {
    name: "DestroySubwindows",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static CHANGE_SAVE_SET: RequestSpec = RequestSpec {
    name: "ChangeSaveSet",
    min_len: 8,
    fields: &[f("mode", 1, Enum8(SAVE_SET_MODE)), f("window", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static REPARENT_WINDOW: RequestSpec = RequestSpec {
    name: "ReparentWindow",
    min_len: 16,
    fields: &[
        f("window", 4, Xid),
        f("parent", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
    ],
    suffixes: &[],
    reply: None,
};

static MAP_WINDOW: RequestSpec = RequestSpec {
    name: "MapWindow",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static MAP_SUBWINDOWS: RequestSpec = RequestSpec {
    name: "MapSubwindows",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static UNMAP_WINDOW: RequestSpec = RequestSpec {
    name: "UnmapWindow",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static UNMAP_SUBWINDOWS: RequestSpec = RequestSpec {
    name: "UnmapSubwindows",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static CONFIGURE_WINDOW: RequestSpec = RequestSpec {
    name: "ConfigureWindow",
    min_len: 12,
    fields: &[
        f("window", 4, Xid),
        f("value-mask", 8, Bitmask16(CONFIGURE_WINDOW_MASK)),
    ],
    suffixes: &[s(
        "value-list",
        SuffixKind::ValueList {
            mask_offset: 8,
            mask_width: Width::U16,
            values: CONFIGURE_VALUES,
        },
    )],
    reply: None,
};

static CIRCULATE_WINDOW: RequestSpec = RequestSpec {
    name: "CirculateWindow",
    min_len: 8,
    fields: &[
        f("direction", 1, Enum8(CIRCULATE_DIRECTION)),
        f("window", 4, Xid),
    ],
    suffixes: &[],
    reply: None,
};

static GET_GEOMETRY: RequestSpec = RequestSpec {
    name: "GetGeometry",
    min_len: 8,
    fields: &[f("drawable", 4, Xid)],
    suffixes: &[],
    reply: Some(&GET_GEOMETRY_REPLY),
};

static QUERY_TREE: RequestSpec = RequestSpec {
    name: "QueryTree",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: Some(&QUERY_TREE_REPLY),
};

static INTERN_ATOM: RequestSpec = RequestSpec {
    name: "InternAtom",
    min_len: 8,
    fields: &[f("only-if-exists", 1, Bool8), f("name-len", 4, Uint16)],
    suffixes: &[s("name", SuffixKind::String8(LenSrc::Field(4, Width::U16)))],
    reply: Some(&INTERN_ATOM_REPLY),
};

static GET_ATOM_NAME: RequestSpec = RequestSpec {
    name: "GetAtomName",
    min_len: 8,
    fields: &[f("atom", 4, Atom)],
    suffixes: &[],
    reply: Some(&GET_ATOM_NAME_REPLY),
};

static CHANGE_PROPERTY: RequestSpec = RequestSpec {
    name: "ChangeProperty",
    min_len: 24,
    fields: &[
        f("mode", 1, Enum8(PROPERTY_MODE)),
        f("window", 4, Xid),
        f("property", 8, Atom),
        f("type", 12, Atom),
        f(
            "format",
            16,
            Format {
                strict: true,
                allow_zero: false,
            },
        ),
        f("data-len", 20, Uint32),
    ],
    suffixes: &[s(
        "data",
        SuffixKind::FormatList {
            format_offset: 16,
            len: LenSrc::Field(20, Width::U32),
        },
    )],
    reply: None,
};

static DELETE_PROPERTY: RequestSpec = RequestSpec {
    name: "DeleteProperty",
    min_len: 12,
    fields: &[f("window", 4, Xid), f("property", 8, Atom)],
    suffixes: &[],
    reply: None,
};

static GET_PROPERTY: RequestSpec = RequestSpec {
    name: "GetProperty",
    min_len: 24,
    fields: &[
        f("delete", 1, Bool8),
        f("window", 4, Xid),
        f("property", 8, Atom),
        f("type", 12, Alt32(ANY_PROPERTY_TYPE_ALT)),
        f("long-offset", 16, Uint32),
        f("long-length", 20, Uint32),
    ],
    suffixes: &[],
    reply: Some(&GET_PROPERTY_REPLY),
};

static LIST_PROPERTIES: RequestSpec = RequestSpec {
    name: "ListProperties",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: Some(&LIST_PROPERTIES_REPLY),
};

static SET_SELECTION_OWNER: RequestSpec = RequestSpec {
    name: "SetSelectionOwner",
    min_len: 16,
    fields: &[
        f("owner", 4, Alt32(NONE_ALT)),
        f("selection", 8, Atom),
        f("time", 12, Timestamp),
    ],
    suffixes: &[],
    reply: None,
};

static GET_SELECTION_OWNER: RequestSpec = RequestSpec {
    name: "GetSelectionOwner",
    min_len: 8,
    fields: &[f("selection", 4, Atom)],
    suffixes: &[],
    reply: Some(&GET_SELECTION_OWNER_REPLY),
};

static CONVERT_SELECTION: RequestSpec = RequestSpec {
    name: "ConvertSelection",
    min_len: 24,
    fields: &[
        f("requestor", 4, Xid),
        f("selection", 8, Atom),
        f("target", 12, Atom),
        f("property", 16, Atom),
        f("time", 20, Timestamp),
    ],
    suffixes: &[],
    reply: None,
};

static SEND_EVENT: RequestSpec = RequestSpec {
    name: "SendEvent",
    min_len: 44,
    fields: &[
        f("propagate", 1, Bool8),
        f("destination", 4, Alt32(SEND_EVENT_DESTINATION)),
        f("event-mask", 8, Bitmask32(EVENT_MASK)),
    ],
    suffixes: &[s("event", SuffixKind::Event)],
    reply: None,
};

static GRAB_POINTER: RequestSpec = RequestSpec {
    name: "GrabPointer",
    min_len: 24,
    fields: &[
        f("owner-events", 1, Bool8),
        f("grab-window", 4, Xid),
        f("event-mask", 8, Bitmask16(EVENT_MASK)),
        f("pointer-mode", 10, Enum8(GRAB_MODE)),
        f("keyboard-mode", 11, Enum8(GRAB_MODE)),
        f("confine-to", 12, Alt32(NONE_ALT)),
        f("cursor", 16, Alt32(NONE_ALT)),
        f("time", 20, Timestamp),
    ],
    suffixes: &[],
    reply: Some(&GRAB_STATUS_REPLY),
};

static UNGRAB_POINTER: RequestSpec = RequestSpec {
    name: "UngrabPointer",
    min_len: 8,
    fields: &[f("time", 4, Timestamp)],
    suffixes: &[],
    reply: None,
};

static GRAB_BUTTON: RequestSpec = RequestSpec {
    name: "GrabButton",
    min_len: 24,
    fields: &[
        f("owner-events", 1, Bool8),
        f("grab-window", 4, Xid),
        f("event-mask", 8, Bitmask16(EVENT_MASK)),
        f("pointer-mode", 10, Enum8(GRAB_MODE)),
        f("keyboard-mode", 11, Enum8(GRAB_MODE)),
        f("confine-to", 12, Alt32(NONE_ALT)),
        f("cursor", 16, Alt32(NONE_ALT)),
        f("button", 20, Alt8(ANY_BUTTON_ALT)),
        f("modifiers", 22, KeyMask),
    ],
    suffixes: &[],
    reply: None,
};

static UNGRAB_BUTTON: RequestSpec = RequestSpec {
    name: "UngrabButton",
    min_len: 12,
    fields: &[
        f("button", 1, Alt8(ANY_BUTTON_ALT)),
        f("grab-window", 4, Xid),
        f("modifiers", 8, KeyMask),
    ],
    suffixes: &[],
    reply: None,
};

static CHANGE_ACTIVE_POINTER_GRAB: RequestSpec = RequestSpec {
    name: "ChangeActivePointerGrab",
    min_len: 16,
    fields: &[
        f("cursor", 4, Alt32(NONE_ALT)),
        f("time", 8, Timestamp),
        f("event-mask", 12, Bitmask16(EVENT_MASK)),
    ],
    suffixes: &[],
    reply: None,
};

static GRAB_KEYBOARD: RequestSpec = RequestSpec {
    name: "GrabKeyboard",
    min_len: 16,
    fields: &[
        f("owner-events", 1, Bool8),
        f("grab-window", 4, Xid),
        f("time", 8, Timestamp),
        f("pointer-mode", 12, Enum8(GRAB_MODE)),
        f("keyboard-mode", 13, Enum8(GRAB_MODE)),
    ],
    suffixes: &[],
    reply: Some(&GRAB_STATUS_REPLY),
};

static UNGRAB_KEYBOARD: RequestSpec = RequestSpec {
    name: "UngrabKeyboard",
    min_len: 8,
    fields: &[f("time", 4, Timestamp)],
    suffixes: &[],
    reply: None,
};

static GRAB_KEY: RequestSpec = RequestSpec {
    name: "GrabKey",
    min_len: 16,
    fields: &[
        f("owner-events", 1, Bool8),
        f("grab-window", 4, Xid),
        f("modifiers", 8, KeyMask),
        f("key", 10, Alt8(ANY_KEY_ALT)),
        f("pointer-mode", 11, Enum8(GRAB_MODE)),
        f("keyboard-mode", 12, Enum8(GRAB_MODE)),
    ],
    suffixes: &[],
    reply: None,
};

static UNGRAB_KEY: RequestSpec = RequestSpec {
    name: "UngrabKey",
    min_len: 12,
    fields: &[
        f("key", 1, Alt8(ANY_KEY_ALT)),
        f("grab-window", 4, Xid),
        f("modifiers", 8, KeyMask),
    ],
    suffixes: &[],
    reply: None,
};

static ALLOW_EVENTS: RequestSpec = RequestSpec {
    name: "AllowEvents",
    min_len: 8,
    fields: &[
        f("mode", 1, Enum8(ALLOW_EVENTS_MODE)),
        f("time", 4, Timestamp),
    ],
    suffixes: &[],
    reply: None,
};

static GRAB_SERVER: RequestSpec = RequestSpec {
    name: "GrabServer",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: None,
};

static UNGRAB_SERVER: RequestSpec = RequestSpec {
    name: "UngrabServer",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: None,
};

static QUERY_POINTER: RequestSpec = RequestSpec {
    name: "QueryPointer",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: Some(&QUERY_POINTER_REPLY),
};

static GET_MOTION_EVENTS: RequestSpec = RequestSpec {
    name: "GetMotionEvents",
    min_len: 16,
    fields: &[
        f("window", 4, Xid),
        f("start", 8, Timestamp),
        f("stop", 12, Timestamp),
    ],
    suffixes: &[],
    reply: Some(&GET_MOTION_EVENTS_REPLY),
};

static TRANSLATE_COORDINATES: RequestSpec = RequestSpec {
    name: "TranslateCoordinates",
    min_len: 16,
    fields: &[
        f("src-window", 4, Xid),
        f("dst-window", 8, Xid),
        f("src-x", 12, Int16),
        f("src-y", 14, Int16),
    ],
    suffixes: &[],
    reply: Some(&TRANSLATE_COORDINATES_REPLY),
};

static WARP_POINTER: RequestSpec = RequestSpec {
    name: "WarpPointer",
    min_len: 24,
    fields: &[
        f("src-window", 4, Alt32(NONE_ALT)),
        f("dst-window", 8, Alt32(NONE_ALT)),
        f("src-x", 12, Int16),
        f("src-y", 14, Int16),
        f("src-width", 16, Uint16),
        f("src-height", 18, Uint16),
        f("dst-x", 20, Int16),
        f("dst-y", 22, Int16),
    ],
    suffixes: &[],
    reply: None,
};

static SET_INPUT_FOCUS: RequestSpec = RequestSpec {
    name: "SetInputFocus",
    min_len: 12,
    fields: &[
        f("revert-to", 1, Enum8(REVERT_TO)),
        f("focus", 4, Alt32(FOCUS_ALT)),
        f("time", 8, Timestamp),
    ],
    suffixes: &[],
    reply: None,
};

static GET_INPUT_FOCUS: RequestSpec = RequestSpec {
    name: "GetInputFocus",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&GET_INPUT_FOCUS_REPLY),
};

static QUERY_KEYMAP: RequestSpec = RequestSpec {
    name: "QueryKeymap",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&QUERY_KEYMAP_REPLY),
};

static OPEN_FONT: RequestSpec = RequestSpec {
    name: "OpenFont",
    min_len: 12,
    fields: &[f("fid", 4, Xid), f("name-len", 8, Uint16)],
    suffixes: &[s("name", SuffixKind::String8(LenSrc::Field(8, Width::U16)))],
    reply: None,
};

static CLOSE_FONT: RequestSpec = RequestSpec {
    name: "CloseFont",
    min_len: 8,
    fields: &[f("font", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static QUERY_FONT: RequestSpec = RequestSpec {
    name: "QueryFont",
    min_len: 8,
    fields: &[f("font", 4, Xid)],
    suffixes: &[],
    reply: Some(&QUERY_FONT_REPLY),
};

static QUERY_TEXT_EXTENTS: RequestSpec = RequestSpec {
    name: "QueryTextExtents",
    min_len: 8,
    fields: &[f("odd-length", 1, Bool8), f("font", 4, Xid)],
    suffixes: &[s("string", SuffixKind::String16Odd { flag_offset: 1 })],
    reply: Some(&QUERY_TEXT_EXTENTS_REPLY),
};

static LIST_FONTS: RequestSpec = RequestSpec {
    name: "ListFonts",
    min_len: 8,
    fields: &[f("max-names", 4, Uint16), f("pattern-len", 6, Uint16)],
    suffixes: &[s(
        "pattern",
        SuffixKind::String8(LenSrc::Field(6, Width::U16)),
    )],
    reply: Some(&LIST_FONTS_REPLY),
};

static LIST_FONTS_WITH_INFO: RequestSpec = RequestSpec {
    name: "ListFontsWithInfo",
    min_len: 8,
    fields: &[f("max-names", 4, Uint16), f("pattern-len", 6, Uint16)],
    suffixes: &[s(
        "pattern",
        SuffixKind::String8(LenSrc::Field(6, Width::U16)),
    )],
    reply: Some(&LIST_FONTS_WITH_INFO_REPLY),
};

static SET_FONT_PATH: RequestSpec = RequestSpec {
    name: "SetFontPath",
    min_len: 8,
    fields: &[f("n-paths", 4, Uint16)],
    suffixes: &[s(
        "path",
        SuffixKind::List {
            elem: Elem::Str,
            len: LenSrc::Field(4, Width::U16),
        },
    )],
    reply: None,
};

static GET_FONT_PATH: RequestSpec = RequestSpec {
    name: "GetFontPath",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&GET_FONT_PATH_REPLY),
};

static CREATE_PIXMAP: RequestSpec = RequestSpec {
    name: "CreatePixmap",
    min_len: 16,
    fields: &[
        f("depth", 1, Uint8),
        f("pid", 4, Xid),
        f("drawable", 8, Xid),
        f("width", 12, Uint16),
        f("height", 14, Uint16),
    ],
    suffixes: &[],
    reply: None,
};

static FREE_PIXMAP: RequestSpec = RequestSpec {
    name: "FreePixmap",
    min_len: 8,
    fields: &[f("pixmap", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static CREATE_GC: RequestSpec = RequestSpec {
    name: "CreateGC",
    min_len: 16,
    fields: &[
        f("cid", 4, Xid),
        f("drawable", 8, Xid),
        f("value-mask", 12, Bitmask32(GC_VALUE_MASK)),
    ],
    suffixes: &[s(
        "value-list",
        SuffixKind::ValueList {
            mask_offset: 12,
            mask_width: Width::U32,
            values: GC_VALUES,
        },
    )],
    reply: None,
};

static CHANGE_GC: RequestSpec = RequestSpec {
    name: "ChangeGC",
    min_len: 12,
    fields: &[f("gc", 4, Xid), f("value-mask", 8, Bitmask32(GC_VALUE_MASK))],
    suffixes: &[s(
        "value-list",
        SuffixKind::ValueList {
            mask_offset: 8,
            mask_width: Width::U32,
            values: GC_VALUES,
        },
    )],
    reply: None,
};

static COPY_GC: RequestSpec = RequestSpec {
    name: "CopyGC",
    min_len: 16,
    fields: &[
        f("src-gc", 4, Xid),
        f("dst-gc", 8, Xid),
        f("value-mask", 12, Bitmask32(GC_VALUE_MASK)),
    ],
    suffixes: &[],
    reply: None,
};

static SET_DASHES: RequestSpec = RequestSpec {
    name: "SetDashes",
    min_len: 12,
    fields: &[
        f("gc", 4, Xid),
        f("dash-offset", 8, Uint16),
        f("n-dashes", 10, Uint16),
    ],
    suffixes: &[s(
        "dashes",
        SuffixKind::List {
            elem: Elem::Scalar(Uint8),
            len: LenSrc::Field(10, Width::U16),
        },
    )],
    reply: None,
};

static SET_CLIP_RECTANGLES: RequestSpec = RequestSpec {
    name: "SetClipRectangles",
    min_len: 12,
    fields: &[
        f("ordering", 1, Enum8(CLIP_ORDERING)),
        f("gc", 4, Xid),
        f("clip-x-origin", 8, Int16),
        f("clip-y-origin", 10, Int16),
    ],
    suffixes: &[s(
        "rectangles",
        SuffixKind::List {
            elem: RECTANGLE,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static FREE_GC: RequestSpec = RequestSpec {
    name: "FreeGC",
    min_len: 8,
    fields: &[f("gc", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static CLEAR_AREA: RequestSpec = RequestSpec {
    name: "ClearArea",
    min_len: 16,
    fields: &[
        f("exposures", 1, Bool8),
        f("window", 4, Xid),
        f("x", 8, Int16),
        f("y", 10, Int16),
        f("width", 12, Uint16),
        f("height", 14, Uint16),
    ],
    suffixes: &[],
    reply: None,
};

static COPY_AREA: RequestSpec = RequestSpec {
    name: "CopyArea",
    min_len: 28,
    fields: &[
        f("src-drawable", 4, Xid),
        f("dst-drawable", 8, Xid),
        f("gc", 12, Xid),
        f("src-x", 16, Int16),
        f("src-y", 18, Int16),
        f("dst-x", 20, Int16),
        f("dst-y", 22, Int16),
        f("width", 24, Uint16),
        f("height", 26, Uint16),
    ],
    suffixes: &[],
    reply: None,
};

static COPY_PLANE: RequestSpec = RequestSpec {
    name: "CopyPlane",
    min_len: 32,
    fields: &[
        f("src-drawable", 4, Xid),
        f("dst-drawable", 8, Xid),
        f("gc", 12, Xid),
        f("src-x", 16, Int16),
        f("src-y", 18, Int16),
        f("dst-x", 20, Int16),
        f("dst-y", 22, Int16),
        f("width", 24, Uint16),
        f("height", 26, Uint16),
        f("bit-plane", 28, Card32),
    ],
    suffixes: &[],
    reply: None,
};

static POLY_POINT: RequestSpec = RequestSpec {
    name: "PolyPoint",
    min_len: 12,
    fields: &[
        f("coordinate-mode", 1, Enum8(COORDINATE_MODE)),
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
    ],
    suffixes: &[s(
        "points",
        SuffixKind::List {
            elem: POINT,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static POLY_LINE: RequestSpec = RequestSpec {
    name: "PolyLine",
    min_len: 12,
    fields: &[
        f("coordinate-mode", 1, Enum8(COORDINATE_MODE)),
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
    ],
    suffixes: &[s(
        "points",
        SuffixKind::List {
            elem: POINT,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static POLY_SEGMENT: RequestSpec = RequestSpec {
    name: "PolySegment",
    min_len: 12,
    fields: &[f("drawable", 4, Xid), f("gc", 8, Xid)],
    suffixes: &[s(
        "segments",
        SuffixKind::List {
            elem: SEGMENT,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static POLY_RECTANGLE: RequestSpec = RequestSpec {
    name: "PolyRectangle",
    min_len: 12,
    fields: &[f("drawable", 4, Xid), f("gc", 8, Xid)],
    suffixes: &[s(
        "rectangles",
        SuffixKind::List {
            elem: RECTANGLE,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static POLY_ARC: RequestSpec = RequestSpec {
    name: "PolyArc",
    min_len: 12,
    fields: &[f("drawable", 4, Xid), f("gc", 8, Xid)],
    suffixes: &[s(
        "arcs",
        SuffixKind::List {
            elem: ARC,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static FILL_POLY: RequestSpec = RequestSpec {
    name: "FillPoly",
    min_len: 16,
    fields: &[
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
        f("shape", 12, Enum8(POLY_SHAPE)),
        f("coordinate-mode", 13, Enum8(COORDINATE_MODE)),
    ],
    suffixes: &[s(
        "points",
        SuffixKind::List {
            elem: POINT,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static POLY_FILL_RECTANGLE: RequestSpec = RequestSpec {
    name: "PolyFillRectangle",
    min_len: 12,
    fields: &[f("drawable", 4, Xid), f("gc", 8, Xid)],
    suffixes: &[s(
        "rectangles",
        SuffixKind::List {
            elem: RECTANGLE,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static POLY_FILL_ARC: RequestSpec = RequestSpec {
    name: "PolyFillArc",
    min_len: 12,
    fields: &[f("drawable", 4, Xid), f("gc", 8, Xid)],
    suffixes: &[s(
        "arcs",
        SuffixKind::List {
            elem: ARC,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static PUT_IMAGE: RequestSpec = RequestSpec {
    name: "PutImage",
    min_len: 24,
    fields: &[
        f("format", 1, Enum8(IMAGE_FORMAT)),
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
        f("width", 12, Uint16),
        f("height", 14, Uint16),
        f("dst-x", 16, Int16),
        f("dst-y", 18, Int16),
        f("left-pad", 20, Uint8),
        f("depth", 21, Uint8),
    ],
    suffixes: &[s("data", SuffixKind::Bytes(LenSrc::Remainder))],
    reply: None,
};

static GET_IMAGE: RequestSpec = RequestSpec {
    name: "GetImage",
    min_len: 20,
    fields: &[
        f("format", 1, Alt8(GET_IMAGE_FORMAT)),
        f("drawable", 4, Xid),
        f("x", 8, Int16),
        f("y", 10, Int16),
        f("width", 12, Uint16),
        f("height", 14, Uint16),
        f("plane-mask", 16, Card32),
    ],
    suffixes: &[],
    reply: Some(&GET_IMAGE_REPLY),
};

static POLY_TEXT8: RequestSpec = RequestSpec {
    name: "PolyText8",
    min_len: 16,
    fields: &[
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
    ],
    suffixes: &[s("items", SuffixKind::TextItems8)],
    reply: None,
};

static POLY_TEXT16: RequestSpec = RequestSpec {
    name: "PolyText16",
    min_len: 16,
    fields: &[
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
    ],
    suffixes: &[s("items", SuffixKind::TextItems16)],
    reply: None,
};

static IMAGE_TEXT8: RequestSpec = RequestSpec {
    name: "ImageText8",
    min_len: 16,
    fields: &[
        f("string-len", 1, Uint8),
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
    ],
    suffixes: &[s(
        "string",
        SuffixKind::String8(LenSrc::Field(1, Width::U8)),
    )],
    reply: None,
};

static IMAGE_TEXT16: RequestSpec = RequestSpec {
    name: "ImageText16",
    min_len: 16,
    fields: &[
        f("string-len", 1, Uint8),
        f("drawable", 4, Xid),
        f("gc", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
    ],
    suffixes: &[s(
        "string",
        SuffixKind::String16(LenSrc::Field(1, Width::U8)),
    )],
    reply: None,
};

static CREATE_COLORMAP: RequestSpec = RequestSpec {
    name: "CreateColormap",
    min_len: 16,
    fields: &[
        f("alloc", 1, Enum8(COLORMAP_ALLOC)),
        f("mid", 4, Xid),
        f("window", 8, Xid),
        f("visual", 12, Xid),
    ],
    suffixes: &[],
    reply: None,
};

static FREE_COLORMAP: RequestSpec = RequestSpec {
    name: "FreeColormap",
    min_len: 8,
    fields: &[f("cmap", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static COPY_COLORMAP_AND_FREE: RequestSpec = RequestSpec {
    name: "CopyColormapAndFree",
    min_len: 12,
    fields: &[f("mid", 4, Xid), f("src-cmap", 8, Xid)],
    suffixes: &[],
    reply: None,
};

static INSTALL_COLORMAP: RequestSpec = RequestSpec {
    name: "InstallColormap",
    min_len: 8,
    fields: &[f("cmap", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static UNINSTALL_COLORMAP: RequestSpec = RequestSpec {
    name: "UninstallColormap",
    min_len: 8,
    fields: &[f("cmap", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static LIST_INSTALLED_COLORMAPS: RequestSpec = RequestSpec {
    name: "ListInstalledColormaps",
    min_len: 8,
    fields: &[f("window", 4, Xid)],
    suffixes: &[],
    reply: Some(&LIST_INSTALLED_COLORMAPS_REPLY),
};

static ALLOC_COLOR: RequestSpec = RequestSpec {
    name: "AllocColor",
    min_len: 16,
    fields: &[
        f("cmap", 4, Xid),
        f("red", 8, Uint16),
        f("green", 10, Uint16),
        f("blue", 12, Uint16),
    ],
    suffixes: &[],
    reply: Some(&ALLOC_COLOR_REPLY),
};

static ALLOC_NAMED_COLOR: RequestSpec = RequestSpec {
    name: "AllocNamedColor",
    min_len: 12,
    fields: &[f("cmap", 4, Xid), f("name-len", 8, Uint16)],
    suffixes: &[s("name", SuffixKind::String8(LenSrc::Field(8, Width::U16)))],
    reply: Some(&ALLOC_NAMED_COLOR_REPLY),
};

static ALLOC_COLOR_CELLS: RequestSpec = RequestSpec {
    name: "AllocColorCells",
    min_len: 12,
    fields: &[
        f("contiguous", 1, Bool8),
        f("cmap", 4, Xid),
        f("colors", 8, Uint16),
        f("planes", 10, Uint16),
    ],
    suffixes: &[],
    reply: Some(&ALLOC_COLOR_CELLS_REPLY),
};

static ALLOC_COLOR_PLANES: RequestSpec = RequestSpec {
    name: "AllocColorPlanes",
    min_len: 16,
    fields: &[
        f("contiguous", 1, Bool8),
        f("cmap", 4, Xid),
        f("colors", 8, Uint16),
        f("reds", 10, Uint16),
        f("greens", 12, Uint16),
        f("blues", 14, Uint16),
    ],
    suffixes: &[],
    reply: Some(&ALLOC_COLOR_PLANES_REPLY),
};

static FREE_COLORS: RequestSpec = RequestSpec {
    name: "FreeColors",
    min_len: 12,
    fields: &[f("cmap", 4, Xid), f("plane-mask", 8, Card32)],
    suffixes: &[s(
        "pixels",
        SuffixKind::List {
            elem: Elem::Scalar(Card32),
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static STORE_COLORS: RequestSpec = RequestSpec {
    name: "StoreColors",
    min_len: 8,
    fields: &[f("cmap", 4, Xid)],
    suffixes: &[s(
        "items",
        SuffixKind::List {
            elem: COLORITEM,
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static STORE_NAMED_COLOR: RequestSpec = RequestSpec {
    name: "StoreNamedColor",
    min_len: 16,
    fields: &[
        f("flags", 1, Bitmask8(COLOR_FLAGS)),
        f("cmap", 4, Xid),
        f("pixel", 8, Card32),
        f("name-len", 12, Uint16),
    ],
    suffixes: &[s(
        "name",
        SuffixKind::String8(LenSrc::Field(12, Width::U16)),
    )],
    reply: None,
};

static QUERY_COLORS: RequestSpec = RequestSpec {
    name: "QueryColors",
    min_len: 8,
    fields: &[f("cmap", 4, Xid)],
    suffixes: &[s(
        "pixels",
        SuffixKind::List {
            elem: Elem::Scalar(Card32),
            len: LenSrc::Remainder,
        },
    )],
    reply: Some(&QUERY_COLORS_REPLY),
};

static LOOKUP_COLOR: RequestSpec = RequestSpec {
    name: "LookupColor",
    min_len: 12,
    fields: &[f("cmap", 4, Xid), f("name-len", 8, Uint16)],
    suffixes: &[s("name", SuffixKind::String8(LenSrc::Field(8, Width::U16)))],
    reply: Some(&LOOKUP_COLOR_REPLY),
};

static CREATE_CURSOR: RequestSpec = RequestSpec {
    name: "CreateCursor",
    min_len: 32,
    fields: &[
        f("cid", 4, Xid),
        f("source", 8, Xid),
        f("mask", 12, Alt32(NONE_ALT)),
        f("fore-red", 16, Uint16),
        f("fore-green", 18, Uint16),
        f("fore-blue", 20, Uint16),
        f("back-red", 22, Uint16),
        f("back-green", 24, Uint16),
        f("back-blue", 26, Uint16),
        f("x", 28, Uint16),
        f("y", 30, Uint16),
    ],
    suffixes: &[],
    reply: None,
};

static CREATE_GLYPH_CURSOR: RequestSpec = RequestSpec {
    name: "CreateGlyphCursor",
    min_len: 32,
    fields: &[
        f("cid", 4, Xid),
        f("source-font", 8, Xid),
        f("mask-font", 12, Alt32(NONE_ALT)),
        f("source-char", 16, Uint16),
        f("mask-char", 18, Uint16),
        f("fore-red", 20, Uint16),
        f("fore-green", 22, Uint16),
        f("fore-blue", 24, Uint16),
        f("back-red", 26, Uint16),
        f("back-green", 28, Uint16),
        f("back-blue", 30, Uint16),
    ],
    suffixes: &[],
    reply: None,
};

static FREE_CURSOR: RequestSpec = RequestSpec {
    name: "FreeCursor",
    min_len: 8,
    fields: &[f("cursor", 4, Xid)],
    suffixes: &[],
    reply: None,
};

static RECOLOR_CURSOR: RequestSpec = RequestSpec {
    name: "RecolorCursor",
    min_len: 20,
    fields: &[
        f("cursor", 4, Xid),
        f("fore-red", 8, Uint16),
        f("fore-green", 10, Uint16),
        f("fore-blue", 12, Uint16),
        f("back-red", 14, Uint16),
        f("back-green", 16, Uint16),
        f("back-blue", 18, Uint16),
    ],
    suffixes: &[],
    reply: None,
};

static QUERY_BEST_SIZE: RequestSpec = RequestSpec {
    name: "QueryBestSize",
    min_len: 12,
    fields: &[
        f("class", 1, Enum8(QUERY_BEST_SIZE_CLASS)),
        f("drawable", 4, Xid),
        f("width", 8, Uint16),
        f("height", 10, Uint16),
    ],
    suffixes: &[],
    reply: Some(&QUERY_BEST_SIZE_REPLY),
};

static QUERY_EXTENSION: RequestSpec = RequestSpec {
    name: "QueryExtension",
    min_len: 8,
    fields: &[f("name-len", 4, Uint16)],
    suffixes: &[s("name", SuffixKind::String8(LenSrc::Field(4, Width::U16)))],
    reply: Some(&QUERY_EXTENSION_REPLY),
};

static LIST_EXTENSIONS: RequestSpec = RequestSpec {
    name: "ListExtensions",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&LIST_EXTENSIONS_REPLY),
};

static CHANGE_KEYBOARD_MAPPING: RequestSpec = RequestSpec {
    name: "ChangeKeyboardMapping",
    min_len: 8,
    fields: &[
        f("keycode-count", 1, Uint8),
        f("first-keycode", 4, Keycode),
        f("keysyms-per-keycode", 5, Uint8),
    ],
    suffixes: &[s(
        "keysyms",
        SuffixKind::List {
            elem: Elem::Scalar(Keysym),
            len: LenSrc::Remainder,
        },
    )],
    reply: None,
};

static GET_KEYBOARD_MAPPING: RequestSpec = RequestSpec {
    name: "GetKeyboardMapping",
    min_len: 8,
    fields: &[f("first-keycode", 4, Keycode), f("count", 5, Uint8)],
    suffixes: &[],
    reply: Some(&GET_KEYBOARD_MAPPING_REPLY),
};

static CHANGE_KEYBOARD_CONTROL: RequestSpec = RequestSpec {
    name: "ChangeKeyboardControl",
    min_len: 8,
    fields: &[f("value-mask", 4, Bitmask32(KEYBOARD_VALUE_MASK))],
    suffixes: &[s(
        "value-list",
        SuffixKind::ValueList {
            mask_offset: 4,
            mask_width: Width::U32,
            values: KEYBOARD_VALUES,
        },
    )],
    reply: None,
};

static GET_KEYBOARD_CONTROL: RequestSpec = RequestSpec {
    name: "GetKeyboardControl",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&GET_KEYBOARD_CONTROL_REPLY),
};

static BELL: RequestSpec = RequestSpec {
    name: "Bell",
    min_len: 4,
    fields: &[f("percent", 1, Int8)],
    suffixes: &[],
    reply: None,
};

static CHANGE_POINTER_CONTROL: RequestSpec = RequestSpec {
    name: "ChangePointerControl",
    min_len: 12,
    fields: &[
        f("acceleration-numerator", 4, Int16),
        f("acceleration-denominator", 6, Int16),
        f("threshold", 8, Int16),
        f("do-acceleration", 10, Bool8),
        f("do-threshold", 11, Bool8),
    ],
    suffixes: &[],
    reply: None,
};

static GET_POINTER_CONTROL: RequestSpec = RequestSpec {
    name: "GetPointerControl",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&GET_POINTER_CONTROL_REPLY),
};

static SET_SCREEN_SAVER: RequestSpec = RequestSpec {
    name: "SetScreenSaver",
    min_len: 12,
    fields: &[
        f("timeout", 4, Int16),
        f("interval", 6, Int16),
        f("prefer-blanking", 8, Enum8(YES_NO_DEFAULT)),
        f("allow-exposures", 9, Enum8(YES_NO_DEFAULT)),
    ],
    suffixes: &[],
    reply: None,
};

static GET_SCREEN_SAVER: RequestSpec = RequestSpec {
    name: "GetScreenSaver",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&GET_SCREEN_SAVER_REPLY),
};

static CHANGE_HOSTS: RequestSpec = RequestSpec {
    name: "ChangeHosts",
    min_len: 8,
    fields: &[
        f("mode", 1, Enum8(SAVE_SET_MODE)),
        f("family", 4, Enum8(HOST_FAMILY)),
        f("address-len", 6, Uint16),
    ],
    suffixes: &[s(
        "address",
        SuffixKind::List {
            elem: Elem::Scalar(Uint8),
            len: LenSrc::Field(6, Width::U16),
        },
    )],
    reply: None,
};

static LIST_HOSTS: RequestSpec = RequestSpec {
    name: "ListHosts",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&LIST_HOSTS_REPLY),
};

static SET_ACCESS_CONTROL: RequestSpec = RequestSpec {
    name: "SetAccessControl",
    min_len: 4,
    fields: &[f("mode", 1, Enum8(ACCESS_CONTROL))],
    suffixes: &[],
    reply: None,
};

static SET_CLOSE_DOWN_MODE: RequestSpec = RequestSpec {
    name: "SetCloseDownMode",
    min_len: 4,
    fields: &[f("mode", 1, Enum8(CLOSE_DOWN_MODE))],
    suffixes: &[],
    reply: None,
};

static KILL_CLIENT: RequestSpec = RequestSpec {
    name: "KillClient",
    min_len: 8,
    fields: &[f("resource", 4, Alt32(KILL_CLIENT_ALT))],
    suffixes: &[],
    reply: None,
};

static ROTATE_PROPERTIES: RequestSpec = RequestSpec {
    name: "RotateProperties",
    min_len: 12,
    fields: &[
        f("window", 4, Xid),
        f("n-properties", 8, Uint16),
        f("delta", 10, Int16),
    ],
    suffixes: &[s(
        "properties",
        SuffixKind::List {
            elem: Elem::Scalar(Atom),
            len: LenSrc::Field(8, Width::U16),
        },
    )],
    reply: None,
};

static FORCE_SCREEN_SAVER: RequestSpec = RequestSpec {
    name: "ForceScreenSaver",
    min_len: 4,
    fields: &[f("mode", 1, Enum8(FORCE_SCREEN_SAVER_MODE))],
    suffixes: &[],
    reply: None,
};

static SET_POINTER_MAPPING: RequestSpec = RequestSpec {
    name: "SetPointerMapping",
    min_len: 4,
    fields: &[f("map-len", 1, Uint8)],
    suffixes: &[s(
        "map",
        SuffixKind::List {
            elem: Elem::Scalar(Uint8),
            len: LenSrc::Field(1, Width::U8),
        },
    )],
    reply: Some(&MAPPING_STATUS_REPLY),
};

static GET_POINTER_MAPPING: RequestSpec = RequestSpec {
    name: "GetPointerMapping",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&GET_POINTER_MAPPING_REPLY),
};

static SET_MODIFIER_MAPPING: RequestSpec = RequestSpec {
    name: "SetModifierMapping",
    min_len: 4,
    fields: &[f("keycodes-per-modifier", 1, Uint8)],
    suffixes: &[s(
        "keycodes",
        SuffixKind::List {
            elem: Elem::Scalar(Keycode),
            len: LenSrc::Remainder,
        },
    )],
    reply: Some(&MAPPING_STATUS_REPLY),
};

static GET_MODIFIER_MAPPING: RequestSpec = RequestSpec {
    name: "GetModifierMapping",
    min_len: 4,
    fields: &[],
    suffixes: &[],
    reply: Some(&GET_MODIFIER_MAPPING_REPLY),
};

// NoOperation may be extended to any length for use as padding.
static NO_OPERATION: RequestSpec = RequestSpec {
    name: "NoOperation",
    min_len: 4,
    fields: &[],
    suffixes: &[s("(padding)", SuffixKind::Bytes(LenSrc::Remainder))],
    reply: None,
};

/// Descriptor for a core major opcode, if it is one the core protocol defines.
pub fn request_spec(major_opcode: u8) -> Option<&'static RequestSpec> {
    match major_opcode {
        opcode::CREATE_WINDOW => Some(&CREATE_WINDOW),
        opcode::CHANGE_WINDOW_ATTRIBUTES => Some(&CHANGE_WINDOW_ATTRIBUTES),
        opcode::GET_WINDOW_ATTRIBUTES => Some(&GET_WINDOW_ATTRIBUTES),
        opcode::DESTROY_WINDOW => Some(&DESTROY_WINDOW),
        opcode::DESTROY_SUBWINDOWS => Some(&DESTROY_SUBWINDOWS),
        opcode::CHANGE_SAVE_SET => Some(&CHANGE_SAVE_SET),
        opcode::REPARENT_WINDOW => Some(&REPARENT_WINDOW),
        opcode::MAP_WINDOW => Some(&MAP_WINDOW),
        opcode::MAP_SUBWINDOWS => Some(&MAP_SUBWINDOWS),
        opcode::UNMAP_WINDOW => Some(&UNMAP_WINDOW),
        opcode::UNMAP_SUBWINDOWS => Some(&UNMAP_SUBWINDOWS),
        opcode::CONFIGURE_WINDOW => Some(&CONFIGURE_WINDOW),
        opcode::CIRCULATE_WINDOW => Some(&CIRCULATE_WINDOW),
        opcode::GET_GEOMETRY => Some(&GET_GEOMETRY),
        opcode::QUERY_TREE => Some(&QUERY_TREE),
        opcode::INTERN_ATOM => Some(&INTERN_ATOM),
        opcode::GET_ATOM_NAME => Some(&GET_ATOM_NAME),
        opcode::CHANGE_PROPERTY => Some(&CHANGE_PROPERTY),
        opcode::DELETE_PROPERTY => Some(&DELETE_PROPERTY),
        opcode::GET_PROPERTY => Some(&GET_PROPERTY),
        opcode::LIST_PROPERTIES => Some(&LIST_PROPERTIES),
        opcode::SET_SELECTION_OWNER => Some(&SET_SELECTION_OWNER),
        opcode::GET_SELECTION_OWNER => Some(&GET_SELECTION_OWNER),
        opcode::CONVERT_SELECTION => Some(&CONVERT_SELECTION),
        opcode::SEND_EVENT => Some(&SEND_EVENT),
        opcode::GRAB_POINTER => Some(&GRAB_POINTER),
        opcode::UNGRAB_POINTER => Some(&UNGRAB_POINTER),
        opcode::GRAB_BUTTON => Some(&GRAB_BUTTON),
        opcode::UNGRAB_BUTTON => Some(&UNGRAB_BUTTON),
        opcode::CHANGE_ACTIVE_POINTER_GRAB => Some(&CHANGE_ACTIVE_POINTER_GRAB),
        opcode::GRAB_KEYBOARD => Some(&GRAB_KEYBOARD),
        opcode::UNGRAB_KEYBOARD => Some(&UNGRAB_KEYBOARD),
        opcode::GRAB_KEY => Some(&GRAB_KEY),
        opcode::UNGRAB_KEY => Some(&UNGRAB_KEY),
        opcode::ALLOW_EVENTS => Some(&ALLOW_EVENTS),
        opcode::GRAB_SERVER => Some(&GRAB_SERVER),
        opcode::UNGRAB_SERVER => Some(&UNGRAB_SERVER),
        opcode::QUERY_POINTER => Some(&QUERY_POINTER),
        opcode::GET_MOTION_EVENTS => Some(&GET_MOTION_EVENTS),
        opcode::TRANSLATE_COORDINATES => Some(&TRANSLATE_COORDINATES),
        opcode::WARP_POINTER => Some(&WARP_POINTER),
        opcode::SET_INPUT_FOCUS => Some(&SET_INPUT_FOCUS),
        opcode::GET_INPUT_FOCUS => Some(&GET_INPUT_FOCUS),
        opcode::QUERY_KEYMAP => Some(&QUERY_KEYMAP),
        opcode::OPEN_FONT => Some(&OPEN_FONT),
        opcode::CLOSE_FONT => Some(&CLOSE_FONT),
        opcode::QUERY_FONT => Some(&QUERY_FONT),
        opcode::QUERY_TEXT_EXTENTS => Some(&QUERY_TEXT_EXTENTS),
        opcode::LIST_FONTS => Some(&LIST_FONTS),
        opcode::LIST_FONTS_WITH_INFO => Some(&LIST_FONTS_WITH_INFO),
        opcode::SET_FONT_PATH => Some(&SET_FONT_PATH),
        opcode::GET_FONT_PATH => Some(&GET_FONT_PATH),
        opcode::CREATE_PIXMAP => Some(&CREATE_PIXMAP),
        opcode::FREE_PIXMAP => Some(&FREE_PIXMAP),
        opcode::CREATE_GC => Some(&CREATE_GC),
        opcode::CHANGE_GC => Some(&CHANGE_GC),
        opcode::COPY_GC => Some(&COPY_GC),
        opcode::SET_DASHES => Some(&SET_DASHES),
        opcode::SET_CLIP_RECTANGLES => Some(&SET_CLIP_RECTANGLES),
        opcode::FREE_GC => Some(&FREE_GC),
        opcode::CLEAR_AREA => Some(&CLEAR_AREA),
        opcode::COPY_AREA => Some(&COPY_AREA),
        opcode::COPY_PLANE => Some(&COPY_PLANE),
        opcode::POLY_POINT => Some(&POLY_POINT),
        opcode::POLY_LINE => Some(&POLY_LINE),
        opcode::POLY_SEGMENT => Some(&POLY_SEGMENT),
        opcode::POLY_RECTANGLE => Some(&POLY_RECTANGLE),
        opcode::POLY_ARC => Some(&POLY_ARC),
        opcode::FILL_POLY => Some(&FILL_POLY),
        opcode::POLY_FILL_RECTANGLE => Some(&POLY_FILL_RECTANGLE),
        opcode::POLY_FILL_ARC => Some(&POLY_FILL_ARC),
        opcode::PUT_IMAGE => Some(&PUT_IMAGE),
        opcode::GET_IMAGE => Some(&GET_IMAGE),
        opcode::POLY_TEXT8 => Some(&POLY_TEXT8),
        opcode::POLY_TEXT16 => Some(&POLY_TEXT16),
        opcode::IMAGE_TEXT8 => Some(&IMAGE_TEXT8),
        opcode::IMAGE_TEXT16 => Some(&IMAGE_TEXT16),
        opcode::CREATE_COLORMAP => Some(&CREATE_COLORMAP),
        opcode::FREE_COLORMAP => Some(&FREE_COLORMAP),
        opcode::COPY_COLORMAP_AND_FREE => Some(&COPY_COLORMAP_AND_FREE),
        opcode::INSTALL_COLORMAP => Some(&INSTALL_COLORMAP),
        opcode::UNINSTALL_COLORMAP => Some(&UNINSTALL_COLORMAP),
        opcode::LIST_INSTALLED_COLORMAPS => Some(&LIST_INSTALLED_COLORMAPS),
        opcode::ALLOC_COLOR => Some(&ALLOC_COLOR),
        opcode::ALLOC_NAMED_COLOR => Some(&ALLOC_NAMED_COLOR),
        opcode::ALLOC_COLOR_CELLS => Some(&ALLOC_COLOR_CELLS),
        opcode::ALLOC_COLOR_PLANES => Some(&ALLOC_COLOR_PLANES),
        opcode::FREE_COLORS => Some(&FREE_COLORS),
        opcode::STORE_COLORS => Some(&STORE_COLORS),
        opcode::STORE_NAMED_COLOR => Some(&STORE_NAMED_COLOR),
        opcode::QUERY_COLORS => Some(&QUERY_COLORS),
        opcode::LOOKUP_COLOR => Some(&LOOKUP_COLOR),
        opcode::CREATE_CURSOR => Some(&CREATE_CURSOR),
        opcode::CREATE_GLYPH_CURSOR => Some(&CREATE_GLYPH_CURSOR),
        opcode::FREE_CURSOR => Some(&FREE_CURSOR),
        opcode::RECOLOR_CURSOR => Some(&RECOLOR_CURSOR),
        opcode::QUERY_BEST_SIZE => Some(&QUERY_BEST_SIZE),
        opcode::QUERY_EXTENSION => Some(&QUERY_EXTENSION),
        opcode::LIST_EXTENSIONS => Some(&LIST_EXTENSIONS),
        opcode::CHANGE_KEYBOARD_MAPPING => Some(&CHANGE_KEYBOARD_MAPPING),
        opcode::GET_KEYBOARD_MAPPING => Some(&GET_KEYBOARD_MAPPING),
        opcode::CHANGE_KEYBOARD_CONTROL => Some(&CHANGE_KEYBOARD_CONTROL),
        opcode::GET_KEYBOARD_CONTROL => Some(&GET_KEYBOARD_CONTROL),
        opcode::BELL => Some(&BELL),
        opcode::CHANGE_POINTER_CONTROL => Some(&CHANGE_POINTER_CONTROL),
        opcode::GET_POINTER_CONTROL => Some(&GET_POINTER_CONTROL),
        opcode::SET_SCREEN_SAVER => Some(&SET_SCREEN_SAVER),
        opcode::GET_SCREEN_SAVER => Some(&GET_SCREEN_SAVER),
        opcode::CHANGE_HOSTS => Some(&CHANGE_HOSTS),
        opcode::LIST_HOSTS => Some(&LIST_HOSTS),
        opcode::SET_ACCESS_CONTROL => Some(&SET_ACCESS_CONTROL),
        opcode::SET_CLOSE_DOWN_MODE => Some(&SET_CLOSE_DOWN_MODE),
        opcode::KILL_CLIENT => Some(&KILL_CLIENT),
        opcode::ROTATE_PROPERTIES => Some(&ROTATE_PROPERTIES),
        opcode::FORCE_SCREEN_SAVER => Some(&FORCE_SCREEN_SAVER),
        opcode::SET_POINTER_MAPPING => Some(&SET_POINTER_MAPPING),
        opcode::GET_POINTER_MAPPING => Some(&GET_POINTER_MAPPING),
        opcode::SET_MODIFIER_MAPPING => Some(&SET_MODIFIER_MAPPING),
        opcode::GET_MODIFIER_MAPPING => Some(&GET_MODIFIER_MAPPING),
        opcode::NO_OPERATION => Some(&NO_OPERATION),
        _ => None,
    }
}

/// The BIG-REQUESTS extension has a single request, `Enable`, with one reply.
pub static BIG_REQUESTS_ENABLE_REPLY: ReplySpec = ReplySpec {
    fields: &[f("maximum-request-length", 8, Uint32)],
    fixed_len: 32,
    suffixes: &[],
};

pub static BIG_REQUESTS_ENABLE: RequestSpec = RequestSpec {
    name: "BigReqEnable",
    min_len: 4,
    fields: &[f("minor-opcode", 1, Uint8)],
    suffixes: &[],
    reply: Some(&BIG_REQUESTS_ENABLE_REPLY),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_core_opcode_has_a_descriptor() {
        for op in 1..=119u8 {
            assert!(request_spec(op).is_some(), "missing opcode {}", op);
        }
        assert!(request_spec(opcode::NO_OPERATION).is_some());
        assert!(request_spec(0).is_none());
        assert!(request_spec(120).is_none());
        assert!(request_spec(128).is_none());
    }

    #[test]
    fn descriptor_names_match_known_opcodes() {
        assert_eq!(request_spec(1).unwrap().name, "CreateWindow");
        assert_eq!(request_spec(16).unwrap().name, "InternAtom");
        assert_eq!(request_spec(72).unwrap().name, "PutImage");
        assert_eq!(request_spec(98).unwrap().name, "QueryExtension");
        assert_eq!(request_spec(127).unwrap().name, "NoOperation");
    }

    #[test]
    fn value_specs_are_in_ascending_bit_order() {
        for spec in [WINDOW_VALUES, CONFIGURE_VALUES, GC_VALUES, KEYBOARD_VALUES] {
            for pair in spec.windows(2) {
                assert!(pair[0].bit < pair[1].bit);
            }
        }
    }

    #[test]
    fn fixed_fields_fit_in_min_len() {
        for op in (1..=119u8).chain([127]) {
            let spec = request_spec(op).unwrap();
            for field in spec.fields {
                assert!(
                    field.offset + field.kind.width() <= spec.min_len,
                    "{}.{} overruns fixed prefix",
                    spec.name,
                    field.name
                );
            }
        }
    }
}
