use crate::amf::{Amf0Encoder, Amf0Object, Amf0Value};
use crate::Result;

/// Transaction id of the connect command
pub const CONNECT_TRANSACTION_ID: f64 = 1.0;
/// Transaction id of the createStream command
pub const CREATE_STREAM_TRANSACTION_ID: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct RtmpCommand {
    pub name: String,
    pub transaction_id: f64,
    pub command_object: Amf0Value,
    pub arguments: Vec<Amf0Value>,
}

impl RtmpCommand {
    /// Create new command with a null command object
    pub fn new(name: impl Into<String>, transaction_id: f64) -> Self {
        RtmpCommand {
            name: name.into(),
            transaction_id,
            command_object: Amf0Value::Null,
            arguments: Vec::new(),
        }
    }

    /// Create connect command
    pub fn connect(app: &str, tc_url: &str, flash_ver: &str) -> Self {
        let mut cmd = RtmpCommand::new("connect", CONNECT_TRANSACTION_ID);
        cmd.command_object = Amf0Object::new()
            .with("app", app)
            .with("tcUrl", tc_url)
            .with("flashVer", flash_ver)
            .with("type", "nonprivate")
            .into();
        cmd
    }

    /// Create createStream command
    pub fn create_stream(transaction_id: f64) -> Self {
        RtmpCommand::new("createStream", transaction_id)
    }

    /// Create publish command
    pub fn publish(stream_name: &str, publish_type: &str) -> Self {
        let mut cmd = RtmpCommand::new("publish", 0.0);
        cmd.arguments.push(Amf0Value::from(stream_name));
        cmd.arguments.push(Amf0Value::from(publish_type));
        cmd
    }

    /// Encode command to bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut encoder = Amf0Encoder::new();

        encoder.encode_string(&self.name)?;
        encoder.encode_number(self.transaction_id)?;
        encoder.encode(&self.command_object)?;

        for arg in &self.arguments {
            encoder.encode(arg)?;
        }

        Ok(encoder.into_bytes())
    }
}
