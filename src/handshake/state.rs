use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HandshakeState {
    /// Nothing sent yet
    #[default]
    Uninitialized,

    /// Sent C0+C1, waiting for S0+S1+S2
    SentC0C1,

    /// Read S0+S1+S2, C2 not yet sent
    ReceivedS0S1S2,

    /// Sent C2, handshake complete
    Done,

    /// Error occurred
    Failed,
}

impl HandshakeState {
    /// Initial state
    pub fn new() -> Self {
        HandshakeState::Uninitialized
    }

    /// Check if handshake is complete
    pub fn is_done(&self) -> bool {
        *self == HandshakeState::Done
    }

    /// Check if handshake failed
    pub fn is_failed(&self) -> bool {
        *self == HandshakeState::Failed
    }

    /// Transition to next state
    pub fn transition(&mut self, event: HandshakeEvent) -> Result<()> {
        match (*self, event) {
            (HandshakeState::Uninitialized, HandshakeEvent::SentC0C1) => {
                *self = HandshakeState::SentC0C1;
                Ok(())
            }
            (HandshakeState::SentC0C1, HandshakeEvent::ReceivedS0S1S2) => {
                *self = HandshakeState::ReceivedS0S1S2;
                Ok(())
            }
            (HandshakeState::ReceivedS0S1S2, HandshakeEvent::SentC2) => {
                *self = HandshakeState::Done;
                Ok(())
            }
            (_, HandshakeEvent::Error) => {
                *self = HandshakeState::Failed;
                Ok(())
            }
            _ => {
                Err(Error::handshake(format!(
                    "Invalid transition from {:?} with event {:?}",
                    self, event
                )))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum HandshakeEvent {
    SentC0C1,
    ReceivedS0S1S2,
    SentC2,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut state = HandshakeState::new();
        state.transition(HandshakeEvent::SentC0C1).unwrap();
        state.transition(HandshakeEvent::ReceivedS0S1S2).unwrap();
        assert!(!state.is_done());
        state.transition(HandshakeEvent::SentC2).unwrap();
        assert!(state.is_done());
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut state = HandshakeState::new();
        assert!(state.transition(HandshakeEvent::SentC2).is_err());
        assert_eq!(state, HandshakeState::Uninitialized);
    }

    #[test]
    fn test_error_fails_from_any_state() {
        let mut state = HandshakeState::new();
        state.transition(HandshakeEvent::SentC0C1).unwrap();
        state.transition(HandshakeEvent::Error).unwrap();
        assert!(state.is_failed());
    }
}
