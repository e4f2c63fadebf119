//! Enum and bitmask name tables from the core protocol encoding.
//!
//! Tables are indexed by encoded value (enums) or bit position (bitmasks).
//! They are shared between request, reply, and event descriptors.

/// SETofEVENT flag names, bits 0..=24.
pub const EVENT_MASK: &[&str] = &[
    "KeyPress",
    "KeyRelease",
    "ButtonPress",
    "ButtonRelease",
    "EnterWindow",
    "LeaveWindow",
    "PointerMotion",
    "PointerMotionHint",
    "Button1Motion",
    "Button2Motion",
    "Button3Motion",
    "Button4Motion",
    "Button5Motion",
    "ButtonMotion",
    "KeymapState",
    "Exposure",
    "VisibilityChange",
    "StructureNotify",
    "ResizeRedirect",
    "SubstructureNotify",
    "SubstructureRedirect",
    "FocusChange",
    "PropertyChange",
    "ColormapChange",
    "OwnerGrabButton",
];

/// SETofKEYBUTMASK flag names, bits 0..=12.
pub const KEY_BUT_MASK: &[&str] = &[
    "Shift", "Lock", "Control", "Mod1", "Mod2", "Mod3", "Mod4", "Mod5", "Button1", "Button2",
    "Button3", "Button4", "Button5",
];

pub const BIT_GRAVITY: &[&str] = &[
    "Forget",
    "NorthWest",
    "North",
    "NorthEast",
    "West",
    "Center",
    "East",
    "SouthWest",
    "South",
    "SouthEast",
    "Static",
];

pub const WIN_GRAVITY: &[&str] = &[
    "Unmap",
    "NorthWest",
    "North",
    "NorthEast",
    "West",
    "Center",
    "East",
    "SouthWest",
    "South",
    "SouthEast",
    "Static",
];

pub const WINDOW_CLASS: &[&str] = &["CopyFromParent", "InputOutput", "InputOnly"];

pub const BACKING_STORE: &[&str] = &["NotUseful", "WhenMapped", "Always"];

/// SCREEN.backing-stores uses `Never` where window attributes use `NotUseful`.
pub const SCREEN_BACKING_STORES: &[&str] = &["Never", "WhenMapped", "Always"];

pub const MAP_STATE: &[&str] = &["Unmapped", "Unviewable", "Viewable"];

pub const VISUAL_CLASS: &[&str] = &[
    "StaticGray",
    "GrayScale",
    "StaticColor",
    "PseudoColor",
    "TrueColor",
    "DirectColor",
];

pub const IMAGE_BYTE_ORDER: &[&str] = &["LSBFirst", "MSBFirst"];

pub const BITMAP_BIT_ORDER: &[&str] = &["LeastSignificant", "MostSignificant"];

pub const SAVE_SET_MODE: &[&str] = &["Insert", "Delete"];

pub const CIRCULATE_DIRECTION: &[&str] = &["RaiseLowest", "LowerHighest"];

pub const CIRCULATE_PLACE: &[&str] = &["Top", "Bottom"];

pub const STACK_MODE: &[&str] = &["Above", "Below", "TopIf", "BottomIf", "Opposite"];

pub const PROPERTY_MODE: &[&str] = &["Replace", "Prepend", "Append"];

pub const GRAB_MODE: &[&str] = &["Synchronous", "Asynchronous"];

pub const GRAB_STATUS: &[&str] = &[
    "Success",
    "AlreadyGrabbed",
    "InvalidTime",
    "NotViewable",
    "Frozen",
];

pub const ALLOW_EVENTS_MODE: &[&str] = &[
    "AsyncPointer",
    "SyncPointer",
    "ReplayPointer",
    "AsyncKeyboard",
    "SyncKeyboard",
    "ReplayKeyboard",
    "AsyncBoth",
    "SyncBoth",
];

pub const REVERT_TO: &[&str] = &["None", "PointerRoot", "Parent"];

pub const DRAW_DIRECTION: &[&str] = &["LeftToRight", "RightToLeft"];

pub const GC_FUNCTION: &[&str] = &[
    "Clear",
    "And",
    "AndReverse",
    "Copy",
    "AndInverted",
    "NoOp",
    "Xor",
    "Or",
    "Nor",
    "Equiv",
    "Invert",
    "OrReverse",
    "CopyInverted",
    "OrInverted",
    "Nand",
    "Set",
];

pub const GC_LINE_STYLE: &[&str] = &["Solid", "OnOffDash", "DoubleDash"];

pub const GC_CAP_STYLE: &[&str] = &["NotLast", "Butt", "Round", "Projecting"];

pub const GC_JOIN_STYLE: &[&str] = &["Miter", "Round", "Bevel"];

pub const GC_FILL_STYLE: &[&str] = &["Solid", "Tiled", "Stippled", "OpaqueStippled"];

pub const GC_FILL_RULE: &[&str] = &["EvenOdd", "Winding"];

pub const GC_SUBWINDOW_MODE: &[&str] = &["ClipByChildren", "IncludeInferiors"];

pub const GC_ARC_MODE: &[&str] = &["Chord", "PieSlice"];

pub const CLIP_ORDERING: &[&str] = &["UnSorted", "YSorted", "YXSorted", "YXBanded"];

pub const COORDINATE_MODE: &[&str] = &["Origin", "Previous"];

pub const POLY_SHAPE: &[&str] = &["Complex", "Nonconvex", "Convex"];

pub const IMAGE_FORMAT: &[&str] = &["Bitmap", "XYPixmap", "ZPixmap"];

pub const COLORMAP_ALLOC: &[&str] = &["None", "All"];

/// DoRed/DoGreen/DoBlue bits of a COLORITEM flag byte.
pub const COLOR_FLAGS: &[&str] = &["DoRed", "DoGreen", "DoBlue"];

pub const QUERY_BEST_SIZE_CLASS: &[&str] = &["Cursor", "Tile", "Stipple"];

pub const AUTO_REPEAT_MODE: &[&str] = &["Off", "On", "Default"];

pub const LED_MODE: &[&str] = &["Off", "On"];

pub const YES_NO_DEFAULT: &[&str] = &["No", "Yes", "Default"];

pub const FORCE_SCREEN_SAVER_MODE: &[&str] = &["Reset", "Activate"];

pub const HOST_FAMILY: &[&str] = &["Internet", "DECnet", "Chaos"];

pub const ACCESS_CONTROL: &[&str] = &["Disabled", "Enabled"];

pub const CLOSE_DOWN_MODE: &[&str] = &["Destroy", "RetainPermanent", "RetainTemporary"];

pub const MAPPING_STATUS: &[&str] = &["Success", "Busy", "Failed"];

pub const MAPPING_NOTIFY_REQUEST: &[&str] = &["Modifier", "Keyboard", "Pointer"];

pub const VISIBILITY_STATE: &[&str] = &["Unobscured", "PartiallyObscured", "FullyObscured"];

pub const CROSSING_DETAIL: &[&str] = &[
    "Ancestor",
    "Virtual",
    "Inferior",
    "Nonlinear",
    "NonlinearVirtual",
];

pub const CROSSING_MODE: &[&str] = &["Normal", "Grab", "Ungrab"];

pub const FOCUS_DETAIL: &[&str] = &[
    "Ancestor",
    "Virtual",
    "Inferior",
    "Nonlinear",
    "NonlinearVirtual",
    "Pointer",
    "PointerRoot",
    "None",
];

pub const FOCUS_MODE: &[&str] = &["Normal", "Grab", "Ungrab", "WhileGrabbed"];

pub const PROPERTY_STATE: &[&str] = &["NewValue", "Deleted"];

pub const COLORMAP_STATE: &[&str] = &["Uninstalled", "Installed"];

// Sentinel-value tables for Alt* fields.

pub const NONE_ALT: &[(u32, &str)] = &[(0, "None")];

pub const TIME_ALT: &[(u32, &str)] = &[(0, "CurrentTime")];

pub const WINDOW_NONE_POINTER_ROOT: &[(u32, &str)] = &[(0, "None"), (1, "PointerRoot")];

pub const SEND_EVENT_DESTINATION: &[(u32, &str)] = &[(0, "PointerWindow"), (1, "InputFocus")];

pub const BACKGROUND_PIXMAP_ALT: &[(u32, &str)] = &[(0, "None"), (1, "ParentRelative")];

pub const COPY_FROM_PARENT_ALT: &[(u32, &str)] = &[(0, "CopyFromParent")];

pub const ANY_PROPERTY_TYPE_ALT: &[(u32, &str)] = &[(0, "AnyPropertyType")];

pub const ANY_KEY_ALT: &[(u32, &str)] = &[(0, "AnyKey")];

pub const ANY_BUTTON_ALT: &[(u32, &str)] = &[(0, "AnyButton")];

/// GetImage only accepts XYPixmap/ZPixmap; Bitmap (0) is reserved.
pub const GET_IMAGE_FORMAT: &[(u32, &str)] = &[(1, "XYPixmap"), (2, "ZPixmap")];

/// GetInputFocus/SetInputFocus focus field.
pub const FOCUS_ALT: &[(u32, &str)] = &[(0, "None"), (1, "PointerRoot")];

pub const KILL_CLIENT_ALT: &[(u32, &str)] = &[(0, "AllTemporary")];

/// CopyGC / CreateGC / ChangeGC value-mask bits 0..=22.
pub const GC_VALUE_MASK: &[&str] = &[
    "Function",
    "PlaneMask",
    "Foreground",
    "Background",
    "LineWidth",
    "LineStyle",
    "CapStyle",
    "JoinStyle",
    "FillStyle",
    "FillRule",
    "Tile",
    "Stipple",
    "TileStippleXOrigin",
    "TileStippleYOrigin",
    "Font",
    "SubwindowMode",
    "GraphicsExposures",
    "ClipXOrigin",
    "ClipYOrigin",
    "ClipMask",
    "DashOffset",
    "Dashes",
    "ArcMode",
];

/// CreateWindow / ChangeWindowAttributes value-mask bits 0..=14.
pub const WINDOW_VALUE_MASK: &[&str] = &[
    "BackgroundPixmap",
    "BackgroundPixel",
    "BorderPixmap",
    "BorderPixel",
    "BitGravity",
    "WinGravity",
    "BackingStore",
    "BackingPlanes",
    "BackingPixel",
    "OverrideRedirect",
    "SaveUnder",
    "EventMask",
    "DoNotPropagateMask",
    "Colormap",
    "Cursor",
];

/// ChangeKeyboardControl value-mask bits 0..=7.
pub const KEYBOARD_VALUE_MASK: &[&str] = &[
    "KeyClickPercent",
    "BellPercent",
    "BellPitch",
    "BellDuration",
    "Led",
    "LedMode",
    "Key",
    "AutoRepeatMode",
];

/// ConfigureWindow value-mask bits 0..=6 (also in ConfigureRequest events).
pub const CONFIGURE_WINDOW_MASK: &[&str] = &[
    "X",
    "Y",
    "Width",
    "Height",
    "BorderWidth",
    "Sibling",
    "StackMode",
];

/// Packed same-screen/focus byte of EnterNotify/LeaveNotify.
pub const CROSSING_FLAGS: &[&str] = &["Focus", "SameScreen"];

/// MotionNotify detail byte.
pub const MOTION_DETAIL: &[&str] = &["Normal", "Hint"];

pub const GLOBAL_AUTO_REPEAT: &[&str] = &["Off", "On"];
