//! Inbound message types

use crate::telemetry::{AttitudeReport, PositionReport};

/// Kind of inbound message a caller can wait for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Local position and velocity report (LOCAL_POSITION_NED)
    Position,
    /// Orientation and angular rate report (ATTITUDE)
    Attitude,
    /// Liveness beacon (HEARTBEAT)
    Heartbeat,
}

impl MessageKind {
    /// All kinds, in routing-table order
    pub const ALL: [MessageKind; 3] = [
        MessageKind::Position,
        MessageKind::Attitude,
        MessageKind::Heartbeat,
    ];

    /// Index into a per-kind routing table
    pub const fn index(self) -> usize {
        match self {
            MessageKind::Position => 0,
            MessageKind::Attitude => 1,
            MessageKind::Heartbeat => 2,
        }
    }

    /// Wire name of the message, for logs
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageKind::Position => "LOCAL_POSITION_NED",
            MessageKind::Attitude => "ATTITUDE",
            MessageKind::Heartbeat => "HEARTBEAT",
        }
    }
}

/// Decoded inbound message
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkMessage {
    Position(PositionReport),
    Attitude(AttitudeReport),
    Heartbeat,
}

impl LinkMessage {
    /// Kind of this message
    pub const fn kind(&self) -> MessageKind {
        match self {
            LinkMessage::Position(_) => MessageKind::Position,
            LinkMessage::Attitude(_) => MessageKind::Attitude,
            LinkMessage::Heartbeat => MessageKind::Heartbeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_are_distinct() {
        for (i, kind) in MessageKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_message_kind_matches_payload() {
        assert_eq!(LinkMessage::Heartbeat.kind(), MessageKind::Heartbeat);
        assert_eq!(
            LinkMessage::Position(PositionReport::default()).kind(),
            MessageKind::Position
        );
        assert_eq!(
            LinkMessage::Attitude(AttitudeReport::default()).kind(),
            MessageKind::Attitude
        );
    }
}
