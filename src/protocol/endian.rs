// SPDX-License-Identifier: Apache-2.0

//! Alignment arithmetic and byte-order-aware reads of X11 protocol data.
//!
//! Every multibyte protocol field goes through [`ByteReader`]; protocol bytes
//! are never reinterpreted through packed structs.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use super::ParseError;

/// Round `n` up to the next multiple of 4, the X11 alignment unit.
#[inline]
pub const fn pad(n: usize) -> usize {
    (n + 3) & !3
}

/// Byte order a client declared in its connection setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Setup byte `'l'` (0x6C): least significant byte first.
    Lsb,
    /// Setup byte `'B'` (0x42): most significant byte first.
    Msb,
}

impl ByteOrder {
    /// Interpret the first byte of a connection setup message.
    pub fn from_setup_byte(byte: u8) -> Option<Self> {
        match byte {
            b'l' => Some(ByteOrder::Lsb),
            b'B' => Some(ByteOrder::Msb),
            _ => None,
        }
    }
}

/// Bounds-checked cursor over one message's bytes with a fixed byte order.
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
    byte_order: ByteOrder,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            data,
            offset: 0,
            byte_order,
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], ParseError> {
        if self.offset + count > self.data.len() {
            return Err(ParseError::Truncated("read past end of message"));
        }
        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ParseError> {
        let bytes = self.take(2)?;
        Ok(match self.byte_order {
            ByteOrder::Lsb => LittleEndian::read_u16(bytes),
            ByteOrder::Msb => BigEndian::read_u16(bytes),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        let bytes = self.take(4)?;
        Ok(match self.byte_order {
            ByteOrder::Lsb => LittleEndian::read_u32(bytes),
            ByteOrder::Msb => BigEndian::read_u32(bytes),
        })
    }

    pub fn read_i8(&mut self) -> Result<i8, ParseError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, ParseError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_i32(&mut self) -> Result<i32, ParseError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ParseError> {
        self.take(count)
    }

    /// Consume the 0-3 pad bytes that align `consumed` bytes of payload.
    pub fn skip_pad(&mut self, consumed: usize) -> Result<(), ParseError> {
        let padding = pad(consumed) - consumed;
        self.take(padding)?;
        Ok(())
    }

    pub fn skip(&mut self, count: usize) -> Result<(), ParseError> {
        self.take(count)?;
        Ok(())
    }

    /// Reposition the cursor to an absolute offset within the message.
    pub fn seek(&mut self, offset: usize) -> Result<(), ParseError> {
        if offset > self.data.len() {
            return Err(ParseError::Truncated("seek past end of message"));
        }
        self.offset = offset;
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_rounds_to_four() {
        assert_eq!(pad(0), 0);
        assert_eq!(pad(1), 4);
        assert_eq!(pad(4), 4);
        assert_eq!(pad(5), 8);
        assert_eq!(pad(7), 8);
    }

    #[test]
    fn setup_byte_selects_order() {
        assert_eq!(ByteOrder::from_setup_byte(b'l'), Some(ByteOrder::Lsb));
        assert_eq!(ByteOrder::from_setup_byte(b'B'), Some(ByteOrder::Msb));
        assert_eq!(ByteOrder::from_setup_byte(0x00), None);
    }

    #[test]
    fn reads_little_endian() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut reader = ByteReader::new(&data, ByteOrder::Lsb);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0x12345678);
    }

    #[test]
    fn reads_big_endian() {
        let data = [0x12, 0x34, 0x12, 0x34, 0x56, 0x78];
        let mut reader = ByteReader::new(&data, ByteOrder::Msb);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0x12345678);
    }

    #[test]
    fn bounds_checking() {
        let data = [0x12];
        let mut reader = ByteReader::new(&data, ByteOrder::Lsb);
        assert!(reader.read_u8().is_ok());
        assert!(reader.read_u8().is_err());
        assert!(reader.read_u16().is_err());
    }

    #[test]
    fn skip_pad_consumes_alignment() {
        let data = [1, 2, 0, 0, 9];
        let mut reader = ByteReader::new(&data, ByteOrder::Lsb);
        reader.read_bytes(2).unwrap();
        reader.skip_pad(2).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 9);
    }
}
