use crate::amf::amf0::{markers, Amf0Object, Amf0Value, MAX_SHORT_STRING_LEN};
use crate::{ByteBuffer, Error, Result};

/// Appends AMF0 values to an internal buffer.
///
/// Command and data payloads are a plain sequence of values, so a payload is
/// built by encoding each value in turn and taking the bytes at the end.
pub struct Amf0Encoder {
    buffer: ByteBuffer,
}

impl Default for Amf0Encoder {
    fn default() -> Self {
        Amf0Encoder::new()
    }
}

impl Amf0Encoder {
    pub fn new() -> Self {
        Amf0Encoder {
            buffer: ByteBuffer::with_capacity(256),
        }
    }

    pub fn encode(&mut self, value: &Amf0Value) -> Result<()> {
        match value {
            Amf0Value::Number(n) => self.encode_number(*n),
            Amf0Value::Boolean(b) => self.encode_boolean(*b),
            Amf0Value::String(s) => self.encode_string(s),
            Amf0Value::Object(obj) => self.encode_object(obj),
            Amf0Value::Null => self.encode_null(),
        }
    }

    pub fn encode_number(&mut self, value: f64) -> Result<()> {
        self.buffer.write_u8(markers::NUMBER)?;
        self.buffer.write_f64_be(value)?;
        Ok(())
    }

    pub fn encode_string(&mut self, value: &str) -> Result<()> {
        self.buffer.write_u8(markers::STRING)?;
        self.write_string_no_marker(value)
    }

    pub fn encode_boolean(&mut self, value: bool) -> Result<()> {
        self.buffer.write_u8(markers::BOOLEAN)?;
        self.buffer.write_u8(if value { 1 } else { 0 })?;
        Ok(())
    }

    pub fn encode_null(&mut self) -> Result<()> {
        self.buffer.write_u8(markers::NULL)?;
        Ok(())
    }

    pub fn encode_object(&mut self, obj: &Amf0Object) -> Result<()> {
        self.buffer.write_u8(markers::OBJECT)?;
        for (key, value) in obj.iter() {
            self.write_string_no_marker(key)?;
            self.encode(value)?;
        }
        // Empty key followed by the end marker
        self.buffer.write_u16_be(0)?;
        self.buffer.write_u8(markers::OBJECT_END)?;
        Ok(())
    }

    /// Length-prefixed UTF-8, shared by string values and object keys
    fn write_string_no_marker(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        if bytes.len() > MAX_SHORT_STRING_LEN {
            return Err(Error::amf_encode(format!(
                "string of {} bytes exceeds the {} byte AMF0 limit",
                bytes.len(),
                MAX_SHORT_STRING_LEN
            )));
        }
        self.buffer.write_u16_be(bytes.len() as u16)?;
        self.buffer.write_bytes(bytes)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_vec()
    }
}

/// Encode a single value into a fresh byte vector
pub fn encode_amf0(value: &Amf0Value) -> Result<Vec<u8>> {
    let mut encoder = Amf0Encoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

pub fn encode_amf0_string(value: &str) -> Result<Vec<u8>> {
    let mut encoder = Amf0Encoder::new();
    encoder.encode_string(value)?;
    Ok(encoder.into_bytes())
}

pub fn encode_amf0_number(value: f64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(9);
    bytes.push(markers::NUMBER);
    bytes.extend_from_slice(&value.to_be_bytes());
    bytes
}

pub fn encode_amf0_boolean(value: bool) -> Vec<u8> {
    vec![markers::BOOLEAN, value as u8]
}

pub fn encode_amf0_null() -> Vec<u8> {
    vec![markers::NULL]
}

pub fn encode_amf0_object(obj: &Amf0Object) -> Result<Vec<u8>> {
    let mut encoder = Amf0Encoder::new();
    encoder.encode_object(obj)?;
    Ok(encoder.into_bytes())
}
