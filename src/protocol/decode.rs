//! Table-driven message decoding.
//!
//! [`request_header`] reads the fixed request prefix (including the
//! BIG-REQUESTS long form), [`decode_request`], [`decode_reply`],
//! [`decode_event`], and [`decode_error`] interpret a complete message
//! against its schema descriptor and render the members for the transcript.
//!
//! Decoders consume exactly the bytes the schema implies; any disagreement
//! with the length declared in the header is an [`ParseError::Invalid`].

use super::ParseError;
use super::atoms::AtomTable;
use super::endian::{ByteOrder, ByteReader};
use super::errors::{error_has_value, error_name};
use super::events::{self, ENCODING_SIZE, SENT_EVENT_BIT};
use super::types::{
    Elem, FieldKind, FieldSpec, LenSrc, ReplySpec, RequestSpec, SuffixKind, SuffixSpec, Width,
};

/// Longest list rendered in full; longer lists are elided with a count.
const MAX_SHOWN_LIST_LEN: usize = 64;

/// One rendered member of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub value: String,
}

impl Member {
    pub fn new(name: &'static str, value: String) -> Self {
        Self { name, value }
    }
}

/// Decoded request prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeader {
    pub major: u8,
    /// Second byte of the request; typed per-request by the schema.
    pub detail: u8,
    /// Total message size in bytes.
    pub total: usize,
    /// True when the BIG-REQUESTS long form was used.
    pub big: bool,
}

impl RequestHeader {
    /// Offset shift applied to fixed fields past the length word.
    pub fn shift(&self) -> usize {
        if self.big { 4 } else { 0 }
    }
}

/// Decoded reply prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyHeader {
    pub detail: u8,
    pub sequence: u16,
    /// Reply length field: aligned units beyond the 32-byte header.
    pub length: u32,
    pub total: usize,
}

/// Read a request's fixed prefix and total size.
///
/// A 16-bit length of zero selects the BIG-REQUESTS long form when the
/// extension is active on this connection and is a hard error otherwise.
pub fn request_header(
    buf: &[u8],
    order: ByteOrder,
    big_requests_active: bool,
) -> Result<RequestHeader, ParseError> {
    if buf.len() < 4 {
        return Err(ParseError::NeedMoreData);
    }
    let mut reader = ByteReader::new(buf, order);
    let major = reader.read_u8()?;
    let detail = reader.read_u8()?;
    let short_len = reader.read_u16()?;

    let (units, big) = if short_len == 0 {
        if !big_requests_active {
            return Err(ParseError::Invalid(format!(
                "request opcode {} has zero length and BIG-REQUESTS is not active",
                major
            )));
        }
        if buf.len() < 8 {
            return Err(ParseError::NeedMoreData);
        }
        (reader.read_u32()? as u64, true)
    } else {
        (short_len as u64, false)
    };

    let total = (units * 4) as usize;
    let min = if big { 8 } else { 4 };
    if total < min {
        return Err(ParseError::Invalid(format!(
            "request opcode {} declares {} bytes, shorter than its own header",
            major, total
        )));
    }
    if total > buf.len() {
        return Err(ParseError::NeedMoreData);
    }
    Ok(RequestHeader {
        major,
        detail,
        total,
        big,
    })
}

/// Read a reply's fixed prefix and total size.
pub fn reply_header(buf: &[u8], order: ByteOrder) -> Result<ReplyHeader, ParseError> {
    if buf.len() < 32 {
        return Err(ParseError::NeedMoreData);
    }
    let mut reader = ByteReader::new(buf, order);
    reader.skip(1)?;
    let detail = reader.read_u8()?;
    let sequence = reader.read_u16()?;
    let length = reader.read_u32()?;
    let total = 32 + length as usize * 4;
    if total > buf.len() {
        return Err(ParseError::NeedMoreData);
    }
    Ok(ReplyHeader {
        detail,
        sequence,
        length,
        total,
    })
}

/// Decode a complete request message into rendered members.
pub fn decode_request(
    spec: &RequestSpec,
    data: &[u8],
    header: &RequestHeader,
    order: ByteOrder,
    atoms: &AtomTable,
) -> Result<Vec<Member>, ParseError> {
    let shift = header.shift();
    if header.total < spec.min_len + shift {
        return Err(ParseError::Invalid(format!(
            "{} shorter than its fixed encoding ({} < {})",
            spec.name,
            header.total,
            spec.min_len + shift
        )));
    }
    let data = &data[..header.total];
    let mut members = Vec::new();
    decode_fields(data, order, atoms, spec.fields, shift, &mut members)?;

    let start = spec.min_len + shift;
    decode_suffixes(
        spec.name,
        data,
        order,
        atoms,
        spec.suffixes,
        start,
        shift,
        &mut members,
    )?;
    Ok(members)
}

/// Decode a complete reply message into rendered members.
///
/// Servers may legitimately append data a core-only schema does not know
/// about, so unconsumed trailing bytes are reported instead of failing.
pub fn decode_reply(
    spec: &ReplySpec,
    data: &[u8],
    header: &ReplyHeader,
    order: ByteOrder,
    atoms: &AtomTable,
) -> Result<Vec<Member>, ParseError> {
    let data = &data[..header.total];
    let mut members = Vec::new();
    decode_fields(data, order, atoms, spec.fields, 0, &mut members)?;

    match decode_suffixes(
        "reply",
        data,
        order,
        atoms,
        spec.suffixes,
        spec.fixed_len,
        0,
        &mut members,
    ) {
        Ok(()) => {}
        Err(ParseError::Invalid(_)) if spec.suffixes.is_empty() => {
            // Fixed-shape reply longer than the core encoding; report, don't fail.
            let unparsed = header.total.saturating_sub(spec.fixed_len.max(32));
            members.push(Member::new(
                "(unparsed suffix)",
                format!("{} bytes", unparsed),
            ));
        }
        Err(e) => return Err(e),
    }
    Ok(members)
}

/// Decode one 32-byte event. Returns the event name (or a placeholder for
/// unknown codes), the sequence number where the event carries one, and the
/// rendered members.
pub fn decode_event(
    data: &[u8],
    order: ByteOrder,
    atoms: &AtomTable,
) -> Result<(String, Option<u16>, Vec<Member>), ParseError> {
    if data.len() < ENCODING_SIZE {
        return Err(ParseError::NeedMoreData);
    }
    let data = &data[..ENCODING_SIZE];
    let raw_code = data[0];
    let sent = raw_code & SENT_EVENT_BIT != 0;
    let code = raw_code & !SENT_EVENT_BIT;

    let Some(spec) = events::event_spec(code) else {
        let mut members = Vec::new();
        members.push(Member::new("code", format!("{}", code)));
        members.push(Member::new("(unparseable suffix)", "28 bytes".to_string()));
        let mut reader = ByteReader::new(data, order);
        reader.skip(2)?;
        let sequence = reader.read_u16()?;
        return Ok((format!("UnknownEvent({})", code), Some(sequence), members));
    };

    let sequence = if spec.has_sequence {
        let mut reader = ByteReader::new(data, order);
        reader.skip(2)?;
        Some(reader.read_u16()?)
    } else {
        None
    };

    let mut members = Vec::new();
    decode_fields(data, order, atoms, spec.fields, 0, &mut members)?;
    if let Some(blob) = spec.blob {
        let bytes = &data[blob.offset..blob.offset + blob.len];
        members.push(Member::new(blob.name, fmt_byte_list(bytes)));
    }

    let name = if sent {
        format!("{}(sent)", spec.name)
    } else {
        spec.name.to_string()
    };
    Ok((name, sequence, members))
}

/// Decode one 32-byte error. Returns the error name (or raw code) plus the
/// sequence number and rendered members.
pub fn decode_error(
    data: &[u8],
    order: ByteOrder,
) -> Result<(String, u16, Vec<Member>), ParseError> {
    if data.len() < ENCODING_SIZE {
        return Err(ParseError::NeedMoreData);
    }
    let mut reader = ByteReader::new(&data[..ENCODING_SIZE], order);
    reader.skip(1)?;
    let code = reader.read_u8()?;
    let sequence = reader.read_u16()?;
    let value = reader.read_u32()?;
    let minor = reader.read_u16()?;
    let major = reader.read_u8()?;

    let mut members = Vec::new();
    let name = match error_name(code) {
        Some(name) => name.to_string(),
        None => {
            members.push(Member::new("code", format!("{}", code)));
            format!("UnknownError({})", code)
        }
    };
    if error_has_value(code) {
        members.push(Member::new("bad-value", format!("{:#010x}", value)));
    }
    members.push(Member::new("minor-opcode", format!("{}", minor)));
    members.push(Member::new("major-opcode", format!("{}", major)));
    Ok((name, sequence, members))
}

/// Members for a request whose opcode is outside the known tables.
pub fn unknown_request_members(header: &RequestHeader) -> Vec<Member> {
    let fixed = 4 + header.shift();
    vec![
        Member::new("major-opcode", format!("{}", header.major)),
        Member::new("minor-opcode", format!("{}", header.detail)),
        Member::new(
            "(unparseable suffix)",
            format!("{} bytes", header.total.saturating_sub(fixed)),
        ),
    ]
}

fn shifted(offset: usize, shift: usize) -> usize {
    if offset >= 4 { offset + shift } else { offset }
}

fn decode_fields(
    data: &[u8],
    order: ByteOrder,
    atoms: &AtomTable,
    fields: &[FieldSpec],
    shift: usize,
    members: &mut Vec<Member>,
) -> Result<(), ParseError> {
    let mut reader = ByteReader::new(data, order);
    for field in fields {
        reader.seek(shifted(field.offset, shift))?;
        let value = read_rendered(&mut reader, &field.kind, atoms)?;
        members.push(Member::new(field.name, value));
    }
    Ok(())
}

/// Read one scalar per its kind and render it.
fn read_rendered(
    reader: &mut ByteReader<'_>,
    kind: &FieldKind,
    atoms: &AtomTable,
) -> Result<String, ParseError> {
    Ok(match kind {
        FieldKind::Card8 => format!("{:#04x}", reader.read_u8()?),
        FieldKind::Card16 => format!("{:#06x}", reader.read_u16()?),
        FieldKind::Card32 => format!("{:#010x}", reader.read_u32()?),
        FieldKind::Uint8 => format!("{}", reader.read_u8()?),
        FieldKind::Uint16 => format!("{}", reader.read_u16()?),
        FieldKind::Uint32 => format!("{}", reader.read_u32()?),
        FieldKind::Int8 => format!("{}", reader.read_i8()?),
        FieldKind::Int16 => format!("{}", reader.read_i16()?),
        FieldKind::Int32 => format!("{}", reader.read_i32()?),
        FieldKind::Bool8 => match reader.read_u8()? {
            0 => "False".to_string(),
            1 => "True".to_string(),
            other => format!("{}?", other),
        },
        FieldKind::Enum8(names) => fmt_enum(*names, reader.read_u8()? as u32),
        FieldKind::Enum16(names) => fmt_enum(*names, reader.read_u16()? as u32),
        FieldKind::Enum32(names) => fmt_enum(*names, reader.read_u32()?),
        FieldKind::Alt8(alts) => fmt_alt(*alts, reader.read_u8()? as u32, 4),
        FieldKind::Alt16(alts) => fmt_alt(*alts, reader.read_u16()? as u32, 6),
        FieldKind::Alt32(alts) => fmt_alt(*alts, reader.read_u32()?, 10),
        FieldKind::Bitmask8(flags) => fmt_bitmask(*flags, reader.read_u8()? as u32),
        FieldKind::Bitmask16(flags) => fmt_bitmask(*flags, reader.read_u16()? as u32),
        FieldKind::Bitmask32(flags) => fmt_bitmask(*flags, reader.read_u32()?),
        FieldKind::Xid => format!("{:#010x}", reader.read_u32()?),
        FieldKind::Atom => fmt_atom(atoms, reader.read_u32()?),
        FieldKind::Timestamp => match reader.read_u32()? {
            0 => "CurrentTime".to_string(),
            time => format!("{}", time),
        },
        FieldKind::Keycode => format!("{}", reader.read_u8()?),
        FieldKind::Keysym => format!("{:#010x}", reader.read_u32()?),
        FieldKind::KeyMask => {
            let mask = reader.read_u16()?;
            if mask == 0x8000 {
                "AnyModifier".to_string()
            } else {
                fmt_bitmask(super::names::KEY_BUT_MASK, mask as u32)
            }
        }
        FieldKind::Format { strict, allow_zero } => {
            let format = reader.read_u8()?;
            match format {
                8 | 16 | 32 => format!("{}", format),
                0 if *allow_zero => "0".to_string(),
                other if *strict => {
                    return Err(ParseError::Invalid(format!(
                        "property format {} is not 8, 16, or 32",
                        other
                    )));
                }
                other => format!("{}?", other),
            }
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn decode_suffixes(
    what: &str,
    data: &[u8],
    order: ByteOrder,
    atoms: &AtomTable,
    suffixes: &[SuffixSpec],
    start: usize,
    shift: usize,
    members: &mut Vec<Member>,
) -> Result<(), ParseError> {
    let total = data.len();
    let mut reader = ByteReader::new(data, order);
    reader.seek(start.min(total))?;
    if start > total {
        return Err(ParseError::Truncated("suffix starts past end of message"));
    }

    for suffix in suffixes {
        decode_one_suffix(data, order, atoms, suffix, shift, &mut reader, members)?;
    }

    // Anything shorter than an alignment unit is trailing pad.
    let slack = total - reader.offset();
    if slack >= 4 {
        return Err(ParseError::Invalid(format!(
            "{} declared {} bytes but its schema accounts for {}",
            what,
            total,
            reader.offset()
        )));
    }
    Ok(())
}

fn decode_one_suffix(
    data: &[u8],
    order: ByteOrder,
    atoms: &AtomTable,
    suffix: &SuffixSpec,
    shift: usize,
    reader: &mut ByteReader<'_>,
    members: &mut Vec<Member>,
) -> Result<(), ParseError> {
    match &suffix.kind {
        SuffixKind::String8(len) => {
            let n = resolve_len(data, order, len, shift, reader)?;
            let bytes = reader.read_bytes(n)?;
            reader.skip_pad(n)?;
            members.push(Member::new(suffix.name, fmt_string(bytes)));
        }
        SuffixKind::String16(len) => {
            let units = match len {
                LenSrc::Remainder => reader.remaining() / 2,
                other => resolve_len(data, order, other, shift, reader)?,
            };
            let value = read_string16(reader, units)?;
            reader.skip_pad(units * 2)?;
            members.push(Member::new(suffix.name, value));
        }
        SuffixKind::String16Odd { flag_offset } => {
            let odd = data[shifted(*flag_offset, shift)] != 0;
            let mut units = reader.remaining() / 2;
            if odd && units > 0 {
                units -= 1;
            }
            let value = read_string16(reader, units)?;
            // The odd CHAR2B and the alignment slack stay behind as pad.
            members.push(Member::new(suffix.name, value));
            reader.skip(reader.remaining())?;
        }
        SuffixKind::Bytes(len) => {
            let n = match len {
                LenSrc::Remainder => reader.remaining(),
                other => resolve_len(data, order, other, shift, reader)?,
            };
            reader.skip(n)?;
            reader.skip_pad(n)?;
            if n > 0 {
                members.push(Member::new(suffix.name, format!("{} bytes", n)));
            }
        }
        SuffixKind::List { elem, len } => {
            let count = match len {
                LenSrc::Remainder => {
                    let size = elem.fixed_size().ok_or_else(|| {
                        ParseError::Invalid(
                            "variable-size list elements need an explicit count".to_string(),
                        )
                    })?;
                    reader.remaining() / size
                }
                other => resolve_len(data, order, other, shift, reader)?,
            };
            let value = read_list(reader, elem, count, atoms)?;
            members.push(Member::new(suffix.name, value));
        }
        SuffixKind::ListByteLen { elem, len } => {
            let bytes = resolve_len(data, order, len, shift, reader)?;
            let size = elem.fixed_size().ok_or_else(|| {
                ParseError::Invalid("byte-length lists need fixed-size elements".to_string())
            })?;
            let value = read_list(reader, elem, bytes / size, atoms)?;
            reader.skip_pad(bytes)?;
            members.push(Member::new(suffix.name, value));
        }
        SuffixKind::ValueList {
            mask_offset,
            mask_width,
            values,
        } => {
            let mask = read_at(data, order, shifted(*mask_offset, shift), *mask_width)? as u32;
            let covered = values.iter().fold(0u32, |acc, v| acc | (1 << v.bit));
            if mask & !covered != 0 {
                return Err(ParseError::Invalid(format!(
                    "value-mask {:#x} selects bits outside the value-list specification",
                    mask
                )));
            }
            for value in *values {
                if mask & (1 << value.bit) == 0 {
                    continue;
                }
                // Every VALUE is carried in 4 bytes; narrow kinds read the
                // low-order portion after byte order is applied.
                let raw = reader.read_u32()?;
                members.push(Member::new(value.name, render_value(raw, &value.kind, atoms)));
            }
        }
        SuffixKind::TextItems8 => {
            let value = read_text_items(reader, false)?;
            members.push(Member::new(suffix.name, value));
        }
        SuffixKind::TextItems16 => {
            let value = read_text_items(reader, true)?;
            members.push(Member::new(suffix.name, value));
        }
        SuffixKind::FormatList { format_offset, len } => {
            let format = data[shifted(*format_offset, shift)];
            let count = resolve_len(data, order, len, shift, reader)?;
            let width = (format / 8) as usize;
            let value = match format {
                0 => "[]".to_string(),
                8 => {
                    let bytes = reader.read_bytes(count)?;
                    fmt_property_data8(bytes)
                }
                16 => {
                    let mut items = Vec::with_capacity(count.min(MAX_SHOWN_LIST_LEN));
                    for i in 0..count {
                        let item = reader.read_u16()?;
                        if i < MAX_SHOWN_LIST_LEN {
                            items.push(format!("{:#06x}", item));
                        }
                    }
                    fmt_list(items, count)
                }
                32 => {
                    let mut items = Vec::with_capacity(count.min(MAX_SHOWN_LIST_LEN));
                    for i in 0..count {
                        let item = reader.read_u32()?;
                        if i < MAX_SHOWN_LIST_LEN {
                            items.push(format!("{:#010x}", item));
                        }
                    }
                    fmt_list(items, count)
                }
                other => {
                    return Err(ParseError::Invalid(format!(
                        "property format {} is not 8, 16, or 32",
                        other
                    )));
                }
            };
            reader.skip_pad(count * width)?;
            members.push(Member::new(suffix.name, value));
        }
        SuffixKind::Event => {
            let bytes = reader.read_bytes(ENCODING_SIZE)?;
            let (name, _, event_members) = decode_event(bytes, order, atoms)?;
            members.push(Member::new(suffix.name, fmt_nested(&name, &event_members)));
        }
    }
    Ok(())
}

fn resolve_len(
    data: &[u8],
    order: ByteOrder,
    len: &LenSrc,
    shift: usize,
    reader: &ByteReader<'_>,
) -> Result<usize, ParseError> {
    match len {
        LenSrc::Field(offset, width) => Ok(read_at(data, order, shifted(*offset, shift), *width)?),
        LenSrc::Const(n) => Ok(*n),
        LenSrc::Remainder => Ok(reader.remaining()),
    }
}

fn read_at(data: &[u8], order: ByteOrder, offset: usize, width: Width) -> Result<usize, ParseError> {
    let mut reader = ByteReader::new(data, order);
    reader.seek(offset)?;
    Ok(match width {
        Width::U8 => reader.read_u8()? as usize,
        Width::U16 => reader.read_u16()? as usize,
        Width::U32 => reader.read_u32()? as usize,
    })
}

/// Interpret one 4-byte VALUE as its declared kind.
fn render_value(raw: u32, kind: &FieldKind, atoms: &AtomTable) -> String {
    match kind {
        FieldKind::Card8 => format!("{:#04x}", raw as u8),
        FieldKind::Card16 => format!("{:#06x}", raw as u16),
        FieldKind::Uint8 => format!("{}", raw as u8),
        FieldKind::Uint16 => format!("{}", raw as u16),
        FieldKind::Int8 => format!("{}", raw as u8 as i8),
        FieldKind::Int16 => format!("{}", raw as u16 as i16),
        FieldKind::Int32 => format!("{}", raw as i32),
        FieldKind::Bool8 => match raw as u8 {
            0 => "False".to_string(),
            1 => "True".to_string(),
            other => format!("{}?", other),
        },
        FieldKind::Enum8(names) => fmt_enum(names, raw & 0xFF),
        FieldKind::Keycode => format!("{}", raw as u8),
        _ => {
            // 32-bit kinds render the full value.
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&raw.to_le_bytes());
            let mut reader = ByteReader::new(&bytes, ByteOrder::Lsb);
            read_rendered(&mut reader, kind, atoms).unwrap_or_else(|_| format!("{:#010x}", raw))
        }
    }
}

fn read_list(
    reader: &mut ByteReader<'_>,
    elem: &Elem,
    count: usize,
    atoms: &AtomTable,
) -> Result<String, ParseError> {
    let mut items = Vec::with_capacity(count.min(MAX_SHOWN_LIST_LEN));
    for i in 0..count {
        let rendered = match elem {
            Elem::Scalar(kind) => read_rendered(reader, kind, atoms)?,
            Elem::Struct { name, size, fields } => {
                let bytes = reader.read_bytes(*size)?;
                let mut struct_members = Vec::new();
                decode_fields(bytes, reader.byte_order(), atoms, fields, 0, &mut struct_members)?;
                fmt_nested(name, &struct_members)
            }
            Elem::Str => {
                let len = reader.read_u8()? as usize;
                fmt_string(reader.read_bytes(len)?)
            }
            Elem::Host => read_host(reader)?,
        };
        if i < MAX_SHOWN_LIST_LEN {
            items.push(rendered);
        }
    }
    Ok(fmt_list(items, count))
}

/// HOST: family byte, pad, 2-byte address length, padded address.
fn read_host(reader: &mut ByteReader<'_>) -> Result<String, ParseError> {
    let family = reader.read_u8()?;
    reader.skip(1)?;
    let len = reader.read_u16()? as usize;
    let address = reader.read_bytes(len)?;
    reader.skip_pad(len)?;

    let family_name = fmt_enum(super::names::HOST_FAMILY, family as u32);
    let address = if family == 0 && len == 4 {
        format!("{}.{}.{}.{}", address[0], address[1], address[2], address[3])
    } else {
        fmt_byte_list(address)
    };
    Ok(format!("HOST(family={}, address={})", family_name, address))
}

fn read_string16(reader: &mut ByteReader<'_>, units: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(units + 2);
    out.push('"');
    for _ in 0..units {
        // CHAR2B is a byte pair, not a 16-bit integer; byte order does not
        // apply to it.
        let b1 = reader.read_u8()?;
        let b2 = reader.read_u8()?;
        let ch = ((b1 as u16) << 8) | b2 as u16;
        push_escaped(&mut out, ch);
    }
    out.push('"');
    Ok(out)
}

fn read_text_items(reader: &mut ByteReader<'_>, wide: bool) -> Result<String, ParseError> {
    let mut items = Vec::new();
    while reader.remaining() >= 2 {
        let len = reader.read_u8()?;
        if len == 255 {
            // Font shift: the FONT id is always most significant byte first.
            let bytes = reader.read_bytes(4)?;
            let font = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            items.push(format!("font-shift({:#010x})", font));
        } else {
            let delta = reader.read_i8()?;
            let text = if wide {
                let mut value = read_string16(reader, len as usize)?;
                value.insert_str(0, &format!("delta={}, string=", delta));
                value
            } else {
                let bytes = reader.read_bytes(len as usize)?;
                format!("delta={}, string={}", delta, fmt_string(bytes))
            };
            items.push(format!("TEXTITEM({})", text));
        }
    }
    // 0-3 trailing pad bytes.
    reader.skip(reader.remaining())?;
    let count = items.len();
    Ok(fmt_list(items, count))
}

fn fmt_enum(names: &[&str], value: u32) -> String {
    match names.get(value as usize) {
        Some(name) => (*name).to_string(),
        None => format!("{}?", value),
    }
}

fn fmt_alt(alts: &[(u32, &str)], value: u32, hex_width: usize) -> String {
    for (alt, name) in alts {
        if *alt == value {
            return (*name).to_string();
        }
    }
    format!("{:#0width$x}", value, width = hex_width)
}

fn fmt_bitmask(flags: &[&str], value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut parts = Vec::new();
    for bit in 0..32 {
        if value & (1 << bit) == 0 {
            continue;
        }
        match flags.get(bit as usize) {
            Some(name) => parts.push((*name).to_string()),
            None => parts.push(format!("{:#x}", 1u32 << bit)),
        }
    }
    parts.join("|")
}

fn fmt_atom(atoms: &AtomTable, value: u32) -> String {
    if value == 0 {
        return "None".to_string();
    }
    match atoms.lookup(value) {
        Some(name) => format!("{:#010x}(\"{}\")", value, name),
        None => format!("{:#010x}", value),
    }
}

/// Render protocol text, escaping control and non-ASCII bytes.
pub fn fmt_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        push_escaped(&mut out, b as u16);
    }
    out.push('"');
    out
}

fn push_escaped(out: &mut String, ch: u16) {
    match ch {
        0x20..=0x7E => {
            let c = ch as u8 as char;
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        0x09 => out.push_str("\\t"),
        0x0A => out.push_str("\\n"),
        _ => out.push_str(&format!("\\x{:02x}", ch)),
    }
}

fn fmt_property_data8(bytes: &[u8]) -> String {
    let printable = bytes
        .iter()
        .all(|&b| (0x20..=0x7E).contains(&b) || b == b'\n' || b == b'\t');
    if printable {
        fmt_string(bytes)
    } else {
        fmt_byte_list(bytes)
    }
}

fn fmt_byte_list(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes
        .iter()
        .take(MAX_SHOWN_LIST_LEN)
        .map(|b| format!("{:#04x}", b))
        .collect();
    fmt_list(items, bytes.len())
}

fn fmt_list(mut items: Vec<String>, count: usize) -> String {
    if count > items.len() {
        items.push(format!("...({} total)", count));
    }
    format!("[{}]", items.join(", "))
}

fn fmt_nested(name: &str, members: &[Member]) -> String {
    let inner: Vec<String> = members
        .iter()
        .map(|m| format!("{}={}", m.name, m.value))
        .collect();
    format!("{}({})", name, inner.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::requests::request_spec;

    fn atoms() -> AtomTable {
        AtomTable::new()
    }

    /// InternAtom { only-if-exists=True, name="PRIMARY" }, little endian.
    fn intern_atom_primary() -> Vec<u8> {
        let mut buf = vec![16u8, 1, 4, 0, 7, 0, 0, 0];
        buf.extend_from_slice(b"PRIMARY");
        buf.push(0);
        buf
    }

    #[test]
    fn request_header_short_form() {
        let buf = intern_atom_primary();
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        assert_eq!(header.major, 16);
        assert_eq!(header.detail, 1);
        assert_eq!(header.total, 16);
        assert!(!header.big);
    }

    #[test]
    fn request_header_zero_length_without_big_requests_is_an_error() {
        let buf = [72u8, 0, 0, 0, 0, 0, 0, 0];
        match request_header(&buf, ByteOrder::Lsb, false) {
            Err(ParseError::Invalid(_)) => {}
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn request_header_big_form() {
        // PutImage with 16-bit length 0 and 32-bit length 70000 units:
        // 280000 bytes declared, so the prefix alone must ask for more data.
        let mut buf = vec![72u8, 2, 0, 0];
        buf.extend_from_slice(&70000u32.to_le_bytes());
        match request_header(&buf, ByteOrder::Lsb, true) {
            Err(ParseError::NeedMoreData) => {}
            other => panic!("expected NeedMoreData, got {:?}", other),
        }
        // The same bytes with the extension inactive are a hard error.
        assert!(matches!(
            request_header(&buf, ByteOrder::Lsb, false),
            Err(ParseError::Invalid(_))
        ));
    }

    #[test]
    fn request_header_needs_four_bytes() {
        assert!(matches!(
            request_header(&[16, 0], ByteOrder::Lsb, false),
            Err(ParseError::NeedMoreData)
        ));
    }

    #[test]
    fn decodes_intern_atom() {
        let buf = intern_atom_primary();
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        let spec = request_spec(16).unwrap();
        let members = decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()).unwrap();
        let only_if_exists = members.iter().find(|m| m.name == "only-if-exists").unwrap();
        assert_eq!(only_if_exists.value, "True");
        let name = members.iter().find(|m| m.name == "name").unwrap();
        assert_eq!(name.value, "\"PRIMARY\"");
    }

    #[test]
    fn empty_value_mask_yields_no_value_members() {
        // CreateWindow with value-mask 0: fixed 32 bytes, no values.
        let mut buf = vec![1u8, 24, 8, 0];
        buf.extend_from_slice(&0x0060_0001u32.to_le_bytes()); // wid
        buf.extend_from_slice(&0x0000_004du32.to_le_bytes()); // parent
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.extend_from_slice(&150u16.to_le_bytes());
        buf.extend_from_slice(&150u16.to_le_bytes());
        buf.extend_from_slice(&10u16.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // InputOutput
        buf.extend_from_slice(&0u32.to_le_bytes()); // CopyFromParent visual
        buf.extend_from_slice(&0u32.to_le_bytes()); // value-mask = 0
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        let spec = request_spec(1).unwrap();
        let members = decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()).unwrap();
        let mask = members.iter().find(|m| m.name == "value-mask").unwrap();
        assert_eq!(mask.value, "0");
        // None of the optional attribute members appear.
        assert!(!members.iter().any(|m| m.name == "background-pixel"));
        assert!(!members.iter().any(|m| m.name == "event-mask"));
    }

    #[test]
    fn poly_point_with_empty_point_list() {
        let mut buf = vec![64u8, 0, 3, 0];
        buf.extend_from_slice(&0x0060_0001u32.to_le_bytes());
        buf.extend_from_slice(&0x0060_0002u32.to_le_bytes());
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        let spec = request_spec(64).unwrap();
        let members = decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()).unwrap();
        let points = members.iter().find(|m| m.name == "points").unwrap();
        assert_eq!(points.value, "[]");
    }

    #[test]
    fn change_property_bad_format_is_a_hard_error() {
        let mut buf = vec![18u8, 0, 6, 0];
        buf.extend_from_slice(&1u32.to_le_bytes()); // window
        buf.extend_from_slice(&39u32.to_le_bytes()); // WM_NAME
        buf.extend_from_slice(&31u32.to_le_bytes()); // STRING
        buf.push(7); // bad format
        buf.extend_from_slice(&[0, 0, 0]);
        buf.extend_from_slice(&0u32.to_le_bytes()); // data-len
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        let spec = request_spec(18).unwrap();
        match decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()) {
            Err(ParseError::Invalid(msg)) => assert!(msg.contains("format")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn value_mask_with_unknown_bits_fails() {
        // ConfigureWindow with a reserved mask bit set but no values.
        let mut buf = vec![12u8, 0, 3, 0];
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&0x8000u16.to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        let spec = request_spec(12).unwrap();
        assert!(matches!(
            decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()),
            Err(ParseError::Invalid(_))
        ));
    }

    #[test]
    fn value_list_shorter_than_mask_fails() {
        // ConfigureWindow claims x and y but carries only one value.
        let mut buf = vec![12u8, 0, 4, 0];
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&0x0003u16.to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(&10u32.to_le_bytes());
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        let spec = request_spec(12).unwrap();
        assert!(matches!(
            decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()),
            Err(ParseError::Truncated(_) | ParseError::Invalid(_))
        ));
    }

    #[test]
    fn keymap_notify_parses_without_sequence() {
        let mut data = vec![11u8];
        data.extend_from_slice(&[0xAA; 31]);
        let (name, sequence, members) = decode_event(&data, ByteOrder::Lsb, &atoms()).unwrap();
        assert_eq!(name, "KeymapNotify");
        assert_eq!(sequence, None);
        let keys = members.iter().find(|m| m.name == "keys").unwrap();
        assert!(keys.value.starts_with("[0xaa"));
    }

    #[test]
    fn error_decodes_with_value() {
        let mut data = vec![0u8, 2, 0x34, 0x12];
        data.extend_from_slice(&0xdeadbeefu32.to_le_bytes());
        data.extend_from_slice(&7u16.to_le_bytes());
        data.push(42);
        data.resize(32, 0);
        let (name, sequence, members) = decode_error(&data, ByteOrder::Lsb).unwrap();
        assert_eq!(name, "Value");
        assert_eq!(sequence, 0x1234);
        assert!(members.iter().any(|m| m.name == "bad-value"));
        let major = members.iter().find(|m| m.name == "major-opcode").unwrap();
        assert_eq!(major.value, "42");
    }

    #[test]
    fn unknown_request_reports_suffix_size() {
        let header = RequestHeader {
            major: 200,
            detail: 0,
            total: 16,
            big: false,
        };
        let members = unknown_request_members(&header);
        let suffix = members
            .iter()
            .find(|m| m.name == "(unparseable suffix)")
            .unwrap();
        assert_eq!(suffix.value, "12 bytes");
    }

    #[test]
    fn big_request_shifts_field_offsets() {
        // InternAtom in BIG-REQUESTS form: length word 0, 32-bit units 5.
        let mut buf = vec![16u8, 0, 0, 0];
        buf.extend_from_slice(&5u32.to_le_bytes());
        buf.extend_from_slice(&7u16.to_le_bytes()); // name-len at 4+4
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(b"PRIMARY");
        buf.push(0);
        assert_eq!(buf.len(), 20);
        let header = request_header(&buf, ByteOrder::Lsb, true).unwrap();
        assert!(header.big);
        assert_eq!(header.total, 20);
        let spec = request_spec(16).unwrap();
        let members = decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()).unwrap();
        let name = members.iter().find(|m| m.name == "name").unwrap();
        assert_eq!(name.value, "\"PRIMARY\"");
    }

    #[test]
    fn poly_text8_handles_items_and_font_shift() {
        // PolyText8: one text item ("Hi", delta 2), one font shift.
        let mut buf = vec![74u8, 0, 7, 0];
        buf.extend_from_slice(&1u32.to_le_bytes()); // drawable
        buf.extend_from_slice(&2u32.to_le_bytes()); // gc
        buf.extend_from_slice(&10i16.to_le_bytes()); // x
        buf.extend_from_slice(&20i16.to_le_bytes()); // y
        buf.push(2); // len
        buf.push(2); // delta
        buf.extend_from_slice(b"Hi");
        buf.push(255); // font shift
        buf.extend_from_slice(&0x12345678u32.to_be_bytes());
        buf.resize(28, 0); // trailing pad
        let header = request_header(&buf, ByteOrder::Lsb, false).unwrap();
        let spec = request_spec(74).unwrap();
        let members = decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()).unwrap();
        let items = members.iter().find(|m| m.name == "items").unwrap();
        assert!(items.value.contains("string=\"Hi\""));
        assert!(items.value.contains("font-shift(0x12345678)"));
    }

    #[test]
    fn big_put_image_parses_in_full() {
        // Scenario: 16-bit length 0, 32-bit length 70000 units, all bytes
        // present; the request must be accepted as 280000 total bytes.
        let total = 280_000usize;
        let mut buf = vec![72u8, 2, 0, 0];
        buf.extend_from_slice(&70_000u32.to_le_bytes());
        // Fixed fields shifted by 4.
        buf.extend_from_slice(&1u32.to_le_bytes()); // drawable
        buf.extend_from_slice(&2u32.to_le_bytes()); // gc
        buf.extend_from_slice(&64u16.to_le_bytes()); // width
        buf.extend_from_slice(&64u16.to_le_bytes()); // height
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.push(0); // left-pad
        buf.push(24); // depth
        buf.extend_from_slice(&[0, 0]);
        buf.resize(total, 0x5A);
        let header = request_header(&buf, ByteOrder::Lsb, true).unwrap();
        assert_eq!(header.total, total);
        let spec = request_spec(72).unwrap();
        let members = decode_request(spec, &buf, &header, ByteOrder::Lsb, &atoms()).unwrap();
        let data = members.iter().find(|m| m.name == "data").unwrap();
        assert_eq!(data.value, format!("{} bytes", total - 28));
    }

    #[test]
    fn big_endian_clients_decode_the_same() {
        let mut buf = vec![16u8, 1, 0, 4, 0, 7, 0, 0];
        buf.extend_from_slice(b"PRIMARY");
        buf.push(0);
        let header = request_header(&buf, ByteOrder::Msb, false).unwrap();
        assert_eq!(header.total, 16);
        let spec = request_spec(16).unwrap();
        let members = decode_request(spec, &buf, &header, ByteOrder::Msb, &atoms()).unwrap();
        let name = members.iter().find(|m| m.name == "name").unwrap();
        assert_eq!(name.value, "\"PRIMARY\"");
    }
}
