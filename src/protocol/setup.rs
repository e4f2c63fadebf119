//! Connection setup decoding.
//!
//! The setup exchange predates the regular request/reply framing: the client
//! sends an initiation block carrying its byte-order byte, and the server
//! answers with Failed, Authenticate, or a Success block that describes the
//! whole server (vendor, pixmap formats, and the SCREEN / DEPTH / VISUALTYPE
//! tree). Neither direction fits the schema tables, so both are decoded here
//! by hand.

use super::ParseError;
use super::decode::{Member, fmt_string};
use super::endian::{ByteOrder, ByteReader, pad};
use super::names::{BITMAP_BIT_ORDER, IMAGE_BYTE_ORDER, SCREEN_BACKING_STORES, VISUAL_CLASS};

/// Decoded client initiation block.
#[derive(Debug)]
pub struct ClientSetup {
    pub order: ByteOrder,
    pub total: usize,
    pub members: Vec<Member>,
}

/// Decoded server response to the initiation block.
#[derive(Debug)]
pub enum ServerSetup {
    Failed { total: usize, members: Vec<Member> },
    Authenticate { total: usize, members: Vec<Member> },
    Success { total: usize, members: Vec<Member> },
}

/// Parse the client's initiation block. The first byte picks the byte order
/// for this and every later message on the connection.
pub fn parse_client_setup(buf: &[u8]) -> Result<ClientSetup, ParseError> {
    if buf.len() < 12 {
        return Err(ParseError::NeedMoreData);
    }
    let order = ByteOrder::from_setup_byte(buf[0]).ok_or_else(|| {
        ParseError::Invalid(format!(
            "connection setup starts with {:#04x}, expected 'B' or 'l'",
            buf[0]
        ))
    })?;

    let mut reader = ByteReader::new(buf, order);
    reader.skip(2)?;
    let major = reader.read_u16()?;
    let minor = reader.read_u16()?;
    let name_len = reader.read_u16()? as usize;
    let data_len = reader.read_u16()? as usize;
    reader.skip(2)?;

    let total = 12 + pad(name_len) + pad(data_len);
    if buf.len() < total {
        return Err(ParseError::NeedMoreData);
    }
    let name = reader.read_bytes(name_len)?;
    let name = fmt_string(name);
    reader.skip_pad(name_len)?;
    reader.skip(data_len)?;
    reader.skip_pad(data_len)?;

    let members = vec![
        Member {
            name: "byte-order",
            value: match order {
                ByteOrder::Lsb => "LSBFirst".to_string(),
                ByteOrder::Msb => "MSBFirst".to_string(),
            },
        },
        Member {
            name: "protocol-major-version",
            value: format!("{}", major),
        },
        Member {
            name: "protocol-minor-version",
            value: format!("{}", minor),
        },
        Member {
            name: "authorization-protocol-name",
            value: name,
        },
        Member {
            name: "authorization-protocol-data",
            value: format!("{} bytes", data_len),
        },
    ];
    Ok(ClientSetup {
        order,
        total,
        members,
    })
}

/// Parse the server's response to the initiation block.
pub fn parse_server_setup(buf: &[u8], order: ByteOrder) -> Result<ServerSetup, ParseError> {
    if buf.len() < 8 {
        return Err(ParseError::NeedMoreData);
    }
    let status = buf[0];
    let mut reader = ByteReader::new(buf, order);
    match status {
        0 => {
            reader.skip(1)?;
            let reason_len = reader.read_u8()? as usize;
            let major = reader.read_u16()?;
            let minor = reader.read_u16()?;
            let extra_units = reader.read_u16()? as usize;
            let total = 8 + extra_units * 4;
            if buf.len() < total {
                return Err(ParseError::NeedMoreData);
            }
            let reason = fmt_string(reader.read_bytes(reason_len.min(extra_units * 4))?);
            let members = vec![
                Member {
                    name: "protocol-major-version",
                    value: format!("{}", major),
                },
                Member {
                    name: "protocol-minor-version",
                    value: format!("{}", minor),
                },
                Member {
                    name: "reason",
                    value: reason,
                },
            ];
            Ok(ServerSetup::Failed { total, members })
        }
        2 => {
            reader.skip(6)?;
            let extra_units = reader.read_u16()? as usize;
            let total = 8 + extra_units * 4;
            if buf.len() < total {
                return Err(ParseError::NeedMoreData);
            }
            let members = vec![Member {
                name: "data",
                value: format!("{} bytes (encoding unspecified by X11)", extra_units * 4),
            }];
            Ok(ServerSetup::Authenticate { total, members })
        }
        1 => parse_success(buf, order),
        other => Err(ParseError::Invalid(format!(
            "connection setup response has unknown status {}",
            other
        ))),
    }
}

fn parse_success(buf: &[u8], order: ByteOrder) -> Result<ServerSetup, ParseError> {
    let mut reader = ByteReader::new(buf, order);
    reader.skip(2)?;
    let major = reader.read_u16()?;
    let minor = reader.read_u16()?;
    let extra_units = reader.read_u16()? as usize;
    let total = 8 + extra_units * 4;
    if buf.len() < total {
        return Err(ParseError::NeedMoreData);
    }

    let release = reader.read_u32()?;
    let id_base = reader.read_u32()?;
    let id_mask = reader.read_u32()?;
    let motion_buffer = reader.read_u32()?;
    let vendor_len = reader.read_u16()? as usize;
    let max_request_len = reader.read_u16()?;
    let n_screens = reader.read_u8()? as usize;
    let n_formats = reader.read_u8()? as usize;
    let image_byte_order = reader.read_u8()?;
    let bitmap_bit_order = reader.read_u8()?;
    let scanline_unit = reader.read_u8()?;
    let scanline_pad = reader.read_u8()?;
    let min_keycode = reader.read_u8()?;
    let max_keycode = reader.read_u8()?;
    reader.skip(4)?;
    let vendor = fmt_string(reader.read_bytes(vendor_len)?);
    reader.skip_pad(vendor_len)?;

    let mut formats = Vec::with_capacity(n_formats);
    for _ in 0..n_formats {
        let depth = reader.read_u8()?;
        let bits_per_pixel = reader.read_u8()?;
        let scanline_pad = reader.read_u8()?;
        reader.skip(5)?;
        formats.push(format!(
            "FORMAT(depth={}, bits-per-pixel={}, scanline-pad={})",
            depth, bits_per_pixel, scanline_pad
        ));
    }

    let mut screens = Vec::with_capacity(n_screens);
    for _ in 0..n_screens {
        screens.push(read_screen(&mut reader)?);
    }

    let enum_name = |names: &[&str], v: u8| -> String {
        names
            .get(v as usize)
            .map(|s| (*s).to_string())
            .unwrap_or_else(|| format!("{}?", v))
    };

    let members = vec![
        Member {
            name: "protocol-major-version",
            value: format!("{}", major),
        },
        Member {
            name: "protocol-minor-version",
            value: format!("{}", minor),
        },
        Member {
            name: "release-number",
            value: format!("{}", release),
        },
        Member {
            name: "resource-id-base",
            value: format!("{:#010x}", id_base),
        },
        Member {
            name: "resource-id-mask",
            value: format!("{:#010x}", id_mask),
        },
        Member {
            name: "motion-buffer-size",
            value: format!("{}", motion_buffer),
        },
        Member {
            name: "maximum-request-length",
            value: format!("{}", max_request_len),
        },
        Member {
            name: "image-byte-order",
            value: enum_name(IMAGE_BYTE_ORDER, image_byte_order),
        },
        Member {
            name: "bitmap-format-bit-order",
            value: enum_name(BITMAP_BIT_ORDER, bitmap_bit_order),
        },
        Member {
            name: "bitmap-format-scanline-unit",
            value: format!("{}", scanline_unit),
        },
        Member {
            name: "bitmap-format-scanline-pad",
            value: format!("{}", scanline_pad),
        },
        Member {
            name: "min-keycode",
            value: format!("{}", min_keycode),
        },
        Member {
            name: "max-keycode",
            value: format!("{}", max_keycode),
        },
        Member {
            name: "vendor",
            value: vendor,
        },
        Member {
            name: "pixmap-formats",
            value: format!("[{}]", formats.join(", ")),
        },
        Member {
            name: "roots",
            value: format!("[{}]", screens.join(", ")),
        },
    ];
    Ok(ServerSetup::Success { total, members })
}

fn read_screen(reader: &mut ByteReader<'_>) -> Result<String, ParseError> {
    let root = reader.read_u32()?;
    let default_colormap = reader.read_u32()?;
    let white_pixel = reader.read_u32()?;
    let black_pixel = reader.read_u32()?;
    let input_masks = reader.read_u32()?;
    let width_px = reader.read_u16()?;
    let height_px = reader.read_u16()?;
    let width_mm = reader.read_u16()?;
    let height_mm = reader.read_u16()?;
    let min_maps = reader.read_u16()?;
    let max_maps = reader.read_u16()?;
    let root_visual = reader.read_u32()?;
    let backing_stores = reader.read_u8()?;
    let save_unders = reader.read_u8()?;
    let root_depth = reader.read_u8()?;
    let n_depths = reader.read_u8()? as usize;

    let mut depths = Vec::with_capacity(n_depths);
    for _ in 0..n_depths {
        depths.push(read_depth(reader)?);
    }

    let backing = SCREEN_BACKING_STORES
        .get(backing_stores as usize)
        .map(|s| (*s).to_string())
        .unwrap_or_else(|| format!("{}?", backing_stores));

    Ok(format!(
        "SCREEN(root={:#010x}, default-colormap={:#010x}, white-pixel={:#010x}, \
         black-pixel={:#010x}, current-input-masks={:#010x}, width={}, height={}, \
         width-mm={}, height-mm={}, min-installed-maps={}, max-installed-maps={}, \
         root-visual={:#010x}, backing-stores={}, save-unders={}, root-depth={}, \
         allowed-depths=[{}])",
        root,
        default_colormap,
        white_pixel,
        black_pixel,
        input_masks,
        width_px,
        height_px,
        width_mm,
        height_mm,
        min_maps,
        max_maps,
        root_visual,
        backing,
        if save_unders == 0 { "False" } else { "True" },
        root_depth,
        depths.join(", ")
    ))
}

fn read_depth(reader: &mut ByteReader<'_>) -> Result<String, ParseError> {
    let depth = reader.read_u8()?;
    reader.skip(1)?;
    let n_visuals = reader.read_u16()? as usize;
    reader.skip(4)?;

    let mut visuals = Vec::with_capacity(n_visuals);
    for _ in 0..n_visuals {
        let visual_id = reader.read_u32()?;
        let class = reader.read_u8()?;
        let bits_per_rgb = reader.read_u8()?;
        let colormap_entries = reader.read_u16()?;
        let red_mask = reader.read_u32()?;
        let green_mask = reader.read_u32()?;
        let blue_mask = reader.read_u32()?;
        reader.skip(4)?;
        let class = VISUAL_CLASS
            .get(class as usize)
            .map(|s| (*s).to_string())
            .unwrap_or_else(|| format!("{}?", class));
        visuals.push(format!(
            "VISUALTYPE(visual-id={:#010x}, class={}, bits-per-rgb-value={}, \
             colormap-entries={}, red-mask={:#010x}, green-mask={:#010x}, blue-mask={:#010x})",
            visual_id, class, bits_per_rgb, colormap_entries, red_mask, green_mask, blue_mask
        ));
    }
    Ok(format!(
        "DEPTH(depth={}, visuals=[{}])",
        depth,
        visuals.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_setup_bytes() -> Vec<u8> {
        let mut buf = vec![b'l', 0];
        buf.extend_from_slice(&11u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&18u16.to_le_bytes()); // "MIT-MAGIC-COOKIE-1"
        buf.extend_from_slice(&16u16.to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(b"MIT-MAGIC-COOKIE-1");
        buf.extend_from_slice(&[0, 0]); // pad to 20
        buf.extend_from_slice(&[0xAB; 16]);
        buf
    }

    #[test]
    fn parses_client_initiation() {
        let buf = client_setup_bytes();
        let setup = parse_client_setup(&buf).unwrap();
        assert_eq!(setup.order, ByteOrder::Lsb);
        assert_eq!(setup.total, buf.len());
        let name = setup
            .members
            .iter()
            .find(|m| m.name == "authorization-protocol-name")
            .unwrap();
        assert_eq!(name.value, "\"MIT-MAGIC-COOKIE-1\"");
    }

    #[test]
    fn short_initiation_waits_for_more() {
        let buf = client_setup_bytes();
        assert!(matches!(
            parse_client_setup(&buf[..10]),
            Err(ParseError::NeedMoreData)
        ));
        assert!(matches!(
            parse_client_setup(&buf[..16]),
            Err(ParseError::NeedMoreData)
        ));
    }

    #[test]
    fn rejects_bad_order_byte() {
        let mut buf = client_setup_bytes();
        buf[0] = 0x7F;
        assert!(matches!(
            parse_client_setup(&buf),
            Err(ParseError::Invalid(_))
        ));
    }

    #[test]
    fn parses_failed_response() {
        let reason = b"Authentication rejected";
        let mut buf = vec![0u8, reason.len() as u8];
        buf.extend_from_slice(&11u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        let units = pad(reason.len()) / 4;
        buf.extend_from_slice(&(units as u16).to_le_bytes());
        buf.extend_from_slice(reason);
        buf.resize(8 + units * 4, 0);
        match parse_server_setup(&buf, ByteOrder::Lsb).unwrap() {
            ServerSetup::Failed { total, members } => {
                assert_eq!(total, buf.len());
                let reason = members.iter().find(|m| m.name == "reason").unwrap();
                assert!(reason.value.contains("Authentication rejected"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn parses_authenticate_response() {
        let mut buf = vec![2u8, 0, 0, 0, 0, 0];
        buf.extend_from_slice(&2u16.to_le_bytes());
        buf.extend_from_slice(&[0; 8]);
        match parse_server_setup(&buf, ByteOrder::Lsb).unwrap() {
            ServerSetup::Authenticate { total, .. } => assert_eq!(total, 16),
            other => panic!("expected Authenticate, got {:?}", other),
        }
    }

    #[test]
    fn parses_minimal_success_response() {
        // One screen, one depth, one visual, no vendor string.
        let mut buf = vec![1u8, 0];
        buf.extend_from_slice(&11u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        let body_len_pos = buf.len();
        buf.extend_from_slice(&0u16.to_le_bytes()); // patched below
        buf.extend_from_slice(&12000000u32.to_le_bytes()); // release
        buf.extend_from_slice(&0x0040_0000u32.to_le_bytes()); // id base
        buf.extend_from_slice(&0x003f_ffffu32.to_le_bytes()); // id mask
        buf.extend_from_slice(&256u32.to_le_bytes()); // motion buffer
        buf.extend_from_slice(&0u16.to_le_bytes()); // vendor len
        buf.extend_from_slice(&65535u16.to_le_bytes()); // max request len
        buf.push(1); // screens
        buf.push(1); // formats
        buf.push(0); // image byte order
        buf.push(0); // bitmap bit order
        buf.push(32);
        buf.push(32);
        buf.push(8); // min keycode
        buf.push(255); // max keycode
        buf.extend_from_slice(&[0; 4]);
        // FORMAT
        buf.extend_from_slice(&[24, 32, 32, 0, 0, 0, 0, 0]);
        // SCREEN
        buf.extend_from_slice(&1u32.to_le_bytes()); // root
        buf.extend_from_slice(&1u32.to_le_bytes()); // colormap
        buf.extend_from_slice(&0xffffffu32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes()); // input masks
        buf.extend_from_slice(&1920u16.to_le_bytes());
        buf.extend_from_slice(&1080u16.to_le_bytes());
        buf.extend_from_slice(&508u16.to_le_bytes());
        buf.extend_from_slice(&286u16.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&1u32.to_le_bytes()); // root visual
        buf.push(0); // backing stores: Never
        buf.push(0); // save unders
        buf.push(24); // root depth
        buf.push(1); // one depth
        // DEPTH
        buf.push(24);
        buf.push(0);
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&[0; 4]);
        // VISUALTYPE
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.push(4); // TrueColor
        buf.push(8);
        buf.extend_from_slice(&256u16.to_le_bytes());
        buf.extend_from_slice(&0x00ff0000u32.to_le_bytes());
        buf.extend_from_slice(&0x0000ff00u32.to_le_bytes());
        buf.extend_from_slice(&0x000000ffu32.to_le_bytes());
        buf.extend_from_slice(&[0; 4]);

        let units = ((buf.len() - 8) / 4) as u16;
        buf[body_len_pos..body_len_pos + 2].copy_from_slice(&units.to_le_bytes());

        match parse_server_setup(&buf, ByteOrder::Lsb).unwrap() {
            ServerSetup::Success { total, members } => {
                assert_eq!(total, buf.len());
                let roots = members.iter().find(|m| m.name == "roots").unwrap();
                assert!(roots.value.contains("SCREEN(root=0x00000001"));
                assert!(roots.value.contains("VISUALTYPE"));
                assert!(roots.value.contains("class=TrueColor"));
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }
}
