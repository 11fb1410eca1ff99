use std::io::{Cursor, Result as IoResult, Error as IoError, ErrorKind};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};

/// Growable byte buffer with big-endian helpers for the wire formats.
///
/// Writes always append; reads advance a cursor from the front.
pub struct ByteBuffer {
    buffer: Vec<u8>,
    cursor: usize,
}

impl ByteBuffer {
    /// Create a new ByteBuffer from bytes
    pub fn new(data: Vec<u8>) -> Self {
        ByteBuffer {
            buffer: data,
            cursor: 0,
        }
    }

    /// Create an empty ByteBuffer with capacity
    pub fn with_capacity(capacity: usize) -> Self {
        ByteBuffer {
            buffer: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Get remaining bytes from current position
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    fn ensure(&self, n: usize) -> IoResult<()> {
        if self.remaining() < n {
            return Err(IoError::new(ErrorKind::UnexpectedEof, "Not enough bytes"));
        }
        Ok(())
    }

    /// Read bytes into buffer
    pub fn read_bytes(&mut self, len: usize) -> IoResult<Vec<u8>> {
        self.ensure(len)?;
        let bytes = self.buffer[self.cursor..self.cursor + len].to_vec();
        self.cursor += len;
        Ok(bytes)
    }

    /// Write bytes to buffer
    pub fn write_bytes(&mut self, data: &[u8]) -> IoResult<()> {
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Read u8
    pub fn read_u8(&mut self) -> IoResult<u8> {
        self.ensure(1)?;
        let value = self.buffer[self.cursor];
        self.cursor += 1;
        Ok(value)
    }

    /// Write u8
    pub fn write_u8(&mut self, value: u8) -> IoResult<()> {
        self.buffer.push(value);
        Ok(())
    }

    /// Read u16 (big endian)
    pub fn read_u16_be(&mut self) -> IoResult<u16> {
        self.ensure(2)?;
        let mut cursor = Cursor::new(&self.buffer[self.cursor..]);
        let value = cursor.read_u16::<BigEndian>()?;
        self.cursor += 2;
        Ok(value)
    }

    /// Write u16 (big endian)
    pub fn write_u16_be(&mut self, value: u16) -> IoResult<()> {
        self.buffer.write_u16::<BigEndian>(value)
    }

    /// Read u24 (big endian)
    pub fn read_u24_be(&mut self) -> IoResult<u32> {
        self.ensure(3)?;
        let mut cursor = Cursor::new(&self.buffer[self.cursor..]);
        let value = cursor.read_u24::<BigEndian>()?;
        self.cursor += 3;
        Ok(value)
    }

    /// Write the low 24 bits of `value` (big endian)
    pub fn write_u24_be(&mut self, value: u32) -> IoResult<()> {
        self.buffer.write_u24::<BigEndian>(value & 0x00FF_FFFF)
    }

    /// Write u32 (big endian)
    pub fn write_u32_be(&mut self, value: u32) -> IoResult<()> {
        self.buffer.write_u32::<BigEndian>(value)
    }

    /// Read u32 (little endian) - message stream id
    pub fn read_u32_le(&mut self) -> IoResult<u32> {
        self.ensure(4)?;
        let mut cursor = Cursor::new(&self.buffer[self.cursor..]);
        let value = cursor.read_u32::<LittleEndian>()?;
        self.cursor += 4;
        Ok(value)
    }

    /// Write u32 (little endian) - message stream id
    pub fn write_u32_le(&mut self, value: u32) -> IoResult<()> {
        self.buffer.write_u32::<LittleEndian>(value)
    }

    /// Write f64 (big endian)
    pub fn write_f64_be(&mut self, value: f64) -> IoResult<()> {
        self.buffer.write_f64::<BigEndian>(value)
    }

    /// Get slice of underlying buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the buffer, returning the written bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// Get length of buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_u16() {
        let mut buffer = ByteBuffer::with_capacity(10);
        buffer.write_u16_be(0x1234).unwrap();
        assert_eq!(buffer.as_slice(), &[0x12, 0x34]);
        assert_eq!(buffer.read_u16_be().unwrap(), 0x1234);
    }

    #[test]
    fn test_u24_drops_high_byte() {
        let mut buffer = ByteBuffer::with_capacity(3);
        buffer.write_u24_be(0x0A12_3456).unwrap();
        assert_eq!(buffer.as_slice(), &[0x12, 0x34, 0x56]);
        assert_eq!(buffer.read_u24_be().unwrap(), 0x12_3456);
    }

    #[test]
    fn test_stream_id_is_little_endian() {
        let mut buffer = ByteBuffer::with_capacity(4);
        buffer.write_u32_le(1).unwrap();
        assert_eq!(buffer.as_slice(), &[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(buffer.read_u32_le().unwrap(), 1);
    }

    #[test]
    fn test_boundary_checks() {
        let data = vec![1, 2];
        let mut buffer = ByteBuffer::new(data);

        // Should succeed
        assert!(buffer.read_u16_be().is_ok());

        // Should fail - not enough bytes
        assert!(buffer.read_u24_be().is_err());
        assert_eq!(buffer.remaining(), 0);
    }
}
