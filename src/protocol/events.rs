//! Core event descriptors.
//!
//! Every core event is a fixed 32-byte encoding: the event code (with the
//! sent-event bit 0x80 possibly set), a detail byte, the sequence number of
//! the last request processed, then event-specific fields. KeymapNotify is
//! the one exception: it has no sequence number and packs 31 key bytes
//! starting right after the code.

use super::names::*;
use super::types::FieldKind::*;
use super::types::{BlobSpec, EventSpec, FieldKind, FieldSpec};

/// Core event codes.
pub mod code {
    pub const KEY_PRESS: u8 = 2;
    pub const KEY_RELEASE: u8 = 3;
    pub const BUTTON_PRESS: u8 = 4;
    pub const BUTTON_RELEASE: u8 = 5;
    pub const MOTION_NOTIFY: u8 = 6;
    pub const ENTER_NOTIFY: u8 = 7;
    pub const LEAVE_NOTIFY: u8 = 8;
    pub const FOCUS_IN: u8 = 9;
    pub const FOCUS_OUT: u8 = 10;
    pub const KEYMAP_NOTIFY: u8 = 11;
    pub const EXPOSE: u8 = 12;
    pub const GRAPHICS_EXPOSURE: u8 = 13;
    pub const NO_EXPOSURE: u8 = 14;
    pub const VISIBILITY_NOTIFY: u8 = 15;
    pub const CREATE_NOTIFY: u8 = 16;
    pub const DESTROY_NOTIFY: u8 = 17;
    pub const UNMAP_NOTIFY: u8 = 18;
    pub const MAP_NOTIFY: u8 = 19;
    pub const MAP_REQUEST: u8 = 20;
    pub const REPARENT_NOTIFY: u8 = 21;
    pub const CONFIGURE_NOTIFY: u8 = 22;
    pub const CONFIGURE_REQUEST: u8 = 23;
    pub const GRAVITY_NOTIFY: u8 = 24;
    pub const RESIZE_REQUEST: u8 = 25;
    pub const CIRCULATE_NOTIFY: u8 = 26;
    pub const CIRCULATE_REQUEST: u8 = 27;
    pub const PROPERTY_NOTIFY: u8 = 28;
    pub const SELECTION_CLEAR: u8 = 29;
    pub const SELECTION_REQUEST: u8 = 30;
    pub const SELECTION_NOTIFY: u8 = 31;
    pub const COLORMAP_NOTIFY: u8 = 32;
    pub const CLIENT_MESSAGE: u8 = 33;
    pub const MAPPING_NOTIFY: u8 = 34;

    pub const MIN: u8 = KEY_PRESS;
    pub const MAX: u8 = MAPPING_NOTIFY;
}

/// Events are 32 bytes on the wire, always.
pub const ENCODING_SIZE: usize = 32;

/// Set in the code byte when the event was produced by SendEvent.
pub const SENT_EVENT_BIT: u8 = 0x80;

const fn f(name: &'static str, offset: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, offset, kind }
}

const fn ev(name: &'static str, fields: &'static [FieldSpec]) -> EventSpec {
    EventSpec {
        name,
        has_sequence: true,
        fields,
        blob: None,
    }
}

// KeyPress/KeyRelease/ButtonPress/ButtonRelease/MotionNotify share one body;
// only the detail byte differs in type.
const INPUT_EVENT_TAIL: [FieldSpec; 10] = [
    f("time", 4, Timestamp),
    f("root", 8, Xid),
    f("event", 12, Xid),
    f("child", 16, Alt32(NONE_ALT)),
    f("root-x", 20, Int16),
    f("root-y", 22, Int16),
    f("event-x", 24, Int16),
    f("event-y", 26, Int16),
    f("state", 28, Bitmask16(KEY_BUT_MASK)),
    f("same-screen", 30, Bool8),
];

static KEY_PRESS: EventSpec = ev(
    "KeyPress",
    &[
        f("detail", 1, Keycode),
        INPUT_EVENT_TAIL[0],
        INPUT_EVENT_TAIL[1],
        INPUT_EVENT_TAIL[2],
        INPUT_EVENT_TAIL[3],
        INPUT_EVENT_TAIL[4],
        INPUT_EVENT_TAIL[5],
        INPUT_EVENT_TAIL[6],
        INPUT_EVENT_TAIL[7],
        INPUT_EVENT_TAIL[8],
        INPUT_EVENT_TAIL[9],
    ],
);

static KEY_RELEASE: EventSpec = ev(
    "KeyRelease",
    &[
        f("detail", 1, Keycode),
        INPUT_EVENT_TAIL[0],
        INPUT_EVENT_TAIL[1],
        INPUT_EVENT_TAIL[2],
        INPUT_EVENT_TAIL[3],
        INPUT_EVENT_TAIL[4],
        INPUT_EVENT_TAIL[5],
        INPUT_EVENT_TAIL[6],
        INPUT_EVENT_TAIL[7],
        INPUT_EVENT_TAIL[8],
        INPUT_EVENT_TAIL[9],
    ],
);

static BUTTON_PRESS: EventSpec = ev(
    "ButtonPress",
    &[
        f("detail", 1, Uint8),
        INPUT_EVENT_TAIL[0],
        INPUT_EVENT_TAIL[1],
        INPUT_EVENT_TAIL[2],
        INPUT_EVENT_TAIL[3],
        INPUT_EVENT_TAIL[4],
        INPUT_EVENT_TAIL[5],
        INPUT_EVENT_TAIL[6],
        INPUT_EVENT_TAIL[7],
        INPUT_EVENT_TAIL[8],
        INPUT_EVENT_TAIL[9],
    ],
);

static BUTTON_RELEASE: EventSpec = ev(
    "ButtonRelease",
    &[
        f("detail", 1, Uint8),
        INPUT_EVENT_TAIL[0],
        INPUT_EVENT_TAIL[1],
        INPUT_EVENT_TAIL[2],
        INPUT_EVENT_TAIL[3],
        INPUT_EVENT_TAIL[4],
        INPUT_EVENT_TAIL[5],
        INPUT_EVENT_TAIL[6],
        INPUT_EVENT_TAIL[7],
        INPUT_EVENT_TAIL[8],
        INPUT_EVENT_TAIL[9],
    ],
);

static MOTION_NOTIFY: EventSpec = ev(
    "MotionNotify",
    &[
        f("detail", 1, Enum8(MOTION_DETAIL)),
        INPUT_EVENT_TAIL[0],
        INPUT_EVENT_TAIL[1],
        INPUT_EVENT_TAIL[2],
        INPUT_EVENT_TAIL[3],
        INPUT_EVENT_TAIL[4],
        INPUT_EVENT_TAIL[5],
        INPUT_EVENT_TAIL[6],
        INPUT_EVENT_TAIL[7],
        INPUT_EVENT_TAIL[8],
        INPUT_EVENT_TAIL[9],
    ],
);

static ENTER_NOTIFY: EventSpec = ev(
    "EnterNotify",
    &[
        f("detail", 1, Enum8(CROSSING_DETAIL)),
        f("time", 4, Timestamp),
        f("root", 8, Xid),
        f("event", 12, Xid),
        f("child", 16, Alt32(NONE_ALT)),
        f("root-x", 20, Int16),
        f("root-y", 22, Int16),
        f("event-x", 24, Int16),
        f("event-y", 26, Int16),
        f("state", 28, Bitmask16(KEY_BUT_MASK)),
        f("mode", 30, Enum8(CROSSING_MODE)),
        f("same-screen/focus", 31, Bitmask8(CROSSING_FLAGS)),
    ],
);

static LEAVE_NOTIFY: EventSpec = ev(
    "LeaveNotify",
    &[
        f("detail", 1, Enum8(CROSSING_DETAIL)),
        f("time", 4, Timestamp),
        f("root", 8, Xid),
        f("event", 12, Xid),
        f("child", 16, Alt32(NONE_ALT)),
        f("root-x", 20, Int16),
        f("root-y", 22, Int16),
        f("event-x", 24, Int16),
        f("event-y", 26, Int16),
        f("state", 28, Bitmask16(KEY_BUT_MASK)),
        f("mode", 30, Enum8(CROSSING_MODE)),
        f("same-screen/focus", 31, Bitmask8(CROSSING_FLAGS)),
    ],
);

static FOCUS_IN: EventSpec = ev(
    "FocusIn",
    &[
        f("detail", 1, Enum8(FOCUS_DETAIL)),
        f("event", 4, Xid),
        f("mode", 8, Enum8(FOCUS_MODE)),
    ],
);

static FOCUS_OUT: EventSpec = ev(
    "FocusOut",
    &[
        f("detail", 1, Enum8(FOCUS_DETAIL)),
        f("event", 4, Xid),
        f("mode", 8, Enum8(FOCUS_MODE)),
    ],
);

/// The sole sequence-less event: 31 key bytes follow the code directly.
static KEYMAP_NOTIFY: EventSpec = EventSpec {
    name: "KeymapNotify",
    has_sequence: false,
    fields: &[],
    blob: Some(BlobSpec {
        name: "keys",
        offset: 1,
        len: 31,
    }),
};

static EXPOSE: EventSpec = ev(
    "Expose",
    &[
        f("window", 4, Xid),
        f("x", 8, Uint16),
        f("y", 10, Uint16),
        f("width", 12, Uint16),
        f("height", 14, Uint16),
        f("count", 16, Uint16),
    ],
);

static GRAPHICS_EXPOSURE: EventSpec = ev(
    "GraphicsExposure",
    &[
        f("drawable", 4, Xid),
        f("x", 8, Uint16),
        f("y", 10, Uint16),
        f("width", 12, Uint16),
        f("height", 14, Uint16),
        f("minor-opcode", 16, Uint16),
        f("count", 18, Uint16),
        f("major-opcode", 20, Uint8),
    ],
);

static NO_EXPOSURE: EventSpec = ev(
    "NoExposure",
    &[
        f("drawable", 4, Xid),
        f("minor-opcode", 8, Uint16),
        f("major-opcode", 10, Uint8),
    ],
);

static VISIBILITY_NOTIFY: EventSpec = ev(
    "VisibilityNotify",
    &[f("window", 4, Xid), f("state", 8, Enum8(VISIBILITY_STATE))],
);

static CREATE_NOTIFY: EventSpec = ev(
    "CreateNotify",
    &[
        f("parent", 4, Xid),
        f("window", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
        f("width", 16, Uint16),
        f("height", 18, Uint16),
        f("border-width", 20, Uint16),
        f("override-redirect", 22, Bool8),
    ],
);

static DESTROY_NOTIFY: EventSpec =
    ev("DestroyNotify", &[f("event", 4, Xid), f("window", 8, Xid)]);

static UNMAP_NOTIFY: EventSpec = ev(
    "UnmapNotify",
    &[
        f("event", 4, Xid),
        f("window", 8, Xid),
        f("from-configure", 12, Bool8),
    ],
);

static MAP_NOTIFY: EventSpec = ev(
    "MapNotify",
    &[
        f("event", 4, Xid),
        f("window", 8, Xid),
        f("override-redirect", 12, Bool8),
    ],
);

static MAP_REQUEST: EventSpec = ev("MapRequest", &[f("parent", 4, Xid), f("window", 8, Xid)]);

static REPARENT_NOTIFY: EventSpec = ev(
    "ReparentNotify",
    &[
        f("event", 4, Xid),
        f("window", 8, Xid),
        f("parent", 12, Xid),
        f("x", 16, Int16),
        f("y", 18, Int16),
        f("override-redirect", 20, Bool8),
    ],
);

static CONFIGURE_NOTIFY: EventSpec = ev(
    "ConfigureNotify",
    &[
        f("event", 4, Xid),
        f("window", 8, Xid),
        f("above-sibling", 12, Alt32(NONE_ALT)),
        f("x", 16, Int16),
        f("y", 18, Int16),
        f("width", 20, Uint16),
        f("height", 22, Uint16),
        f("border-width", 24, Uint16),
        f("override-redirect", 26, Bool8),
    ],
);

static CONFIGURE_REQUEST: EventSpec = ev(
    "ConfigureRequest",
    &[
        f("stack-mode", 1, Enum8(STACK_MODE)),
        f("parent", 4, Xid),
        f("window", 8, Xid),
        f("sibling", 12, Alt32(NONE_ALT)),
        f("x", 16, Int16),
        f("y", 18, Int16),
        f("width", 20, Uint16),
        f("height", 22, Uint16),
        f("border-width", 24, Uint16),
        f("value-mask", 26, Bitmask16(CONFIGURE_WINDOW_MASK)),
    ],
);

static GRAVITY_NOTIFY: EventSpec = ev(
    "GravityNotify",
    &[
        f("event", 4, Xid),
        f("window", 8, Xid),
        f("x", 12, Int16),
        f("y", 14, Int16),
    ],
);

static RESIZE_REQUEST: EventSpec = ev(
    "ResizeRequest",
    &[
        f("window", 4, Xid),
        f("width", 8, Uint16),
        f("height", 10, Uint16),
    ],
);

static CIRCULATE_NOTIFY: EventSpec = ev(
    "CirculateNotify",
    &[
        f("event", 4, Xid),
        f("window", 8, Xid),
        f("place", 16, Enum8(CIRCULATE_PLACE)),
    ],
);

static CIRCULATE_REQUEST: EventSpec = ev(
    "CirculateRequest",
    &[
        f("parent", 4, Xid),
        f("window", 8, Xid),
        f("place", 16, Enum8(CIRCULATE_PLACE)),
    ],
);

static PROPERTY_NOTIFY: EventSpec = ev(
    "PropertyNotify",
    &[
        f("window", 4, Xid),
        f("atom", 8, Atom),
        f("time", 12, Timestamp),
        f("state", 16, Enum8(PROPERTY_STATE)),
    ],
);

static SELECTION_CLEAR: EventSpec = ev(
    "SelectionClear",
    &[
        f("time", 4, Timestamp),
        f("owner", 8, Xid),
        f("selection", 12, Atom),
    ],
);

static SELECTION_REQUEST: EventSpec = ev(
    "SelectionRequest",
    &[
        f("time", 4, Timestamp),
        f("owner", 8, Xid),
        f("requestor", 12, Xid),
        f("selection", 16, Atom),
        f("target", 20, Atom),
        f("property", 24, Atom),
    ],
);

static SELECTION_NOTIFY: EventSpec = ev(
    "SelectionNotify",
    &[
        f("time", 4, Timestamp),
        f("requestor", 8, Xid),
        f("selection", 12, Atom),
        f("target", 16, Atom),
        f("property", 20, Atom),
    ],
);

static COLORMAP_NOTIFY: EventSpec = ev(
    "ColormapNotify",
    &[
        f("window", 4, Xid),
        f("colormap", 8, Alt32(NONE_ALT)),
        f("new", 12, Bool8),
        f("state", 13, Enum8(COLORMAP_STATE)),
    ],
);

static CLIENT_MESSAGE: EventSpec = EventSpec {
    name: "ClientMessage",
    has_sequence: true,
    fields: &[
        f("format", 1, Uint8),
        f("window", 4, Xid),
        f("type", 8, Atom),
    ],
    blob: Some(BlobSpec {
        name: "data",
        offset: 12,
        len: 20,
    }),
};

static MAPPING_NOTIFY: EventSpec = ev(
    "MappingNotify",
    &[
        f("request", 4, Enum8(MAPPING_NOTIFY_REQUEST)),
        f("first-keycode", 5, Keycode),
        f("count", 6, Uint8),
    ],
);

/// Descriptor for a core event code, if it is one the core protocol defines.
/// The sent-event bit must already be stripped.
pub fn event_spec(event_code: u8) -> Option<&'static EventSpec> {
    match event_code {
        code::KEY_PRESS => Some(&KEY_PRESS),
        code::KEY_RELEASE => Some(&KEY_RELEASE),
        code::BUTTON_PRESS => Some(&BUTTON_PRESS),
        code::BUTTON_RELEASE => Some(&BUTTON_RELEASE),
        code::MOTION_NOTIFY => Some(&MOTION_NOTIFY),
        code::ENTER_NOTIFY => Some(&ENTER_NOTIFY),
        code::LEAVE_NOTIFY => Some(&LEAVE_NOTIFY),
        code::FOCUS_IN => Some(&FOCUS_IN),
        code::FOCUS_OUT => Some(&FOCUS_OUT),
        code::KEYMAP_NOTIFY => Some(&KEYMAP_NOTIFY),
        code::EXPOSE => Some(&EXPOSE),
        code::GRAPHICS_EXPOSURE => Some(&GRAPHICS_EXPOSURE),
        code::NO_EXPOSURE => Some(&NO_EXPOSURE),
        code::VISIBILITY_NOTIFY => Some(&VISIBILITY_NOTIFY),
        code::CREATE_NOTIFY => Some(&CREATE_NOTIFY),
        code::DESTROY_NOTIFY => Some(&DESTROY_NOTIFY),
        code::UNMAP_NOTIFY => Some(&UNMAP_NOTIFY),
        code::MAP_NOTIFY => Some(&MAP_NOTIFY),
        code::MAP_REQUEST => Some(&MAP_REQUEST),
        code::REPARENT_NOTIFY => Some(&REPARENT_NOTIFY),
        code::CONFIGURE_NOTIFY => Some(&CONFIGURE_NOTIFY),
        code::CONFIGURE_REQUEST => Some(&CONFIGURE_REQUEST),
        code::GRAVITY_NOTIFY => Some(&GRAVITY_NOTIFY),
        code::RESIZE_REQUEST => Some(&RESIZE_REQUEST),
        code::CIRCULATE_NOTIFY => Some(&CIRCULATE_NOTIFY),
        code::CIRCULATE_REQUEST => Some(&CIRCULATE_REQUEST),
        code::PROPERTY_NOTIFY => Some(&PROPERTY_NOTIFY),
        code::SELECTION_CLEAR => Some(&SELECTION_CLEAR),
        code::SELECTION_REQUEST => Some(&SELECTION_REQUEST),
        code::SELECTION_NOTIFY => Some(&SELECTION_NOTIFY),
        code::COLORMAP_NOTIFY => Some(&COLORMAP_NOTIFY),
        code::CLIENT_MESSAGE => Some(&CLIENT_MESSAGE),
        code::MAPPING_NOTIFY => Some(&MAPPING_NOTIFY),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_core_event_has_a_descriptor() {
        for code in code::MIN..=code::MAX {
            assert!(event_spec(code).is_some(), "missing event code {}", code);
        }
        assert!(event_spec(0).is_none());
        assert!(event_spec(1).is_none());
        assert!(event_spec(35).is_none());
    }

    #[test]
    fn keymap_notify_has_no_sequence() {
        let spec = event_spec(code::KEYMAP_NOTIFY).unwrap();
        assert!(!spec.has_sequence);
        let blob = spec.blob.unwrap();
        assert_eq!(blob.offset, 1);
        assert_eq!(blob.len, 31);
    }

    #[test]
    fn fields_stay_inside_the_fixed_encoding() {
        for code in code::MIN..=code::MAX {
            let spec = event_spec(code).unwrap();
            for field in spec.fields {
                assert!(field.offset + field.kind.width() <= ENCODING_SIZE);
            }
            if let Some(blob) = spec.blob {
                assert!(blob.offset + blob.len <= ENCODING_SIZE);
            }
        }
    }
}
