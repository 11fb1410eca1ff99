use crate::amf::{Amf0Encoder, Amf0Object, Amf0Value};
use crate::Result;

/// Stream description sent in the onMetaData message.
///
/// Every field is a constant describing the synthetic stream; nothing is
/// measured from real media.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamMetadata {
    pub duration: f64,
    pub width: f64,
    pub height: f64,
    pub video_codec_id: String,
    pub video_data_rate: f64,
    pub framerate: f64,
    pub audio_codec_id: String,
    pub audio_data_rate: f64,
    pub audio_sample_rate: f64,
    pub audio_sample_size: f64,
    pub audio_channels: f64,
    pub stereo: bool,
    pub encoder: String,
}

impl Default for StreamMetadata {
    fn default() -> Self {
        StreamMetadata {
            duration: 0.0,
            width: 16.0,
            height: 16.0,
            video_codec_id: "avc1".to_string(),
            video_data_rate: 10000.0,
            framerate: 30.0,
            audio_codec_id: "mp4a".to_string(),
            audio_data_rate: 128.0,
            audio_sample_rate: 44100.0,
            audio_sample_size: 16.0,
            audio_channels: 2.0,
            stereo: true,
            encoder: "TwitchTest/1.4-qt".to_string(),
        }
    }
}

impl StreamMetadata {
    pub fn to_amf0(&self) -> Amf0Object {
        Amf0Object::new()
            .with("duration", self.duration)
            .with("width", self.width)
            .with("height", self.height)
            .with("videocodecid", self.video_codec_id.as_str())
            .with("videodatarate", self.video_data_rate)
            .with("framerate", self.framerate)
            .with("audiocodecid", self.audio_codec_id.as_str())
            .with("audiodatarate", self.audio_data_rate)
            .with("audiosamplerate", self.audio_sample_rate)
            .with("audiosamplesize", self.audio_sample_size)
            .with("audiochannels", self.audio_channels)
            .with("stereo", self.stereo)
            .with("encoder", self.encoder.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RtmpData {
    pub data_type: String,
    pub values: Vec<Amf0Value>,
}

impl RtmpData {
    /// Create new data message
    pub fn new(data_type: impl Into<String>) -> Self {
        RtmpData {
            data_type: data_type.into(),
            values: Vec::new(),
        }
    }

    /// Create onMetaData message
    pub fn on_metadata(metadata: &StreamMetadata) -> Self {
        let mut data = RtmpData::new("onMetaData");
        data.values.push(metadata.to_amf0().into());
        data
    }

    /// Encode data message to bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut encoder = Amf0Encoder::new();

        encoder.encode_string(&self.data_type)?;
        for value in &self.values {
            encoder.encode(value)?;
        }

        Ok(encoder.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf::encode_amf0_string;

    #[test]
    fn test_metadata_fields() {
        let obj = StreamMetadata::default().to_amf0();
        assert_eq!(obj.len(), 13);
        assert_eq!(obj.get("audiosamplerate").and_then(|v| v.as_number()), Some(44100.0));
        assert_eq!(obj.get("videocodecid").and_then(|v| v.as_string()), Some("avc1"));
        assert_eq!(obj.get("stereo"), Some(&Amf0Value::Boolean(true)));
    }

    #[test]
    fn test_on_metadata_encoding() {
        let bytes = RtmpData::on_metadata(&StreamMetadata::default()).encode().unwrap();
        let name = encode_amf0_string("onMetaData").unwrap();
        assert!(bytes.starts_with(&name));
        assert_eq!(bytes[name.len()], 0x03);
        assert!(bytes.ends_with(&[0x00, 0x00, 0x09]));
    }
}
