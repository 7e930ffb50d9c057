//! Conversion between MAVLink `common` messages and link types

use std::io::Cursor;

use mavlink::common::{
    MavAutopilot, MavCmd, MavMessage, MavModeFlag, MavState, MavType, COMMAND_LONG_DATA,
    HEARTBEAT_DATA,
};
use mavlink::peek_reader::PeekReader;
use mavlink::MavHeader;
use waypoint_pilot_core::link::{LinkMessage, VehicleCommand};
use waypoint_pilot_core::telemetry::{AttitudeReport, PositionReport};

use crate::communication::LinkError;

/// Largest MAVLink v2 frame (header, 255 byte payload, checksum, signature)
pub const MAX_FRAME_LEN: usize = 280;

const MAVLINK_V2_STX: u8 = 0xFD;

/// Map an inbound message to the link type, if the pipeline uses it.
pub fn decode(msg: &MavMessage) -> Option<LinkMessage> {
    match msg {
        MavMessage::LOCAL_POSITION_NED(data) => Some(LinkMessage::Position(PositionReport {
            time_boot_ms: data.time_boot_ms,
            x: data.x,
            y: data.y,
            z: data.z,
            vx: data.vx,
            vy: data.vy,
            vz: data.vz,
        })),
        MavMessage::ATTITUDE(data) => Some(LinkMessage::Attitude(AttitudeReport {
            time_boot_ms: data.time_boot_ms,
            roll: data.roll,
            pitch: data.pitch,
            yaw: data.yaw,
            roll_speed: data.rollspeed,
            pitch_speed: data.pitchspeed,
            yaw_speed: data.yawspeed,
        })),
        MavMessage::HEARTBEAT(_) => Some(LinkMessage::Heartbeat),
        _ => None,
    }
}

/// Build a COMMAND_LONG carrying `command`.
pub fn encode_command(
    command: &VehicleCommand,
    target_system: u8,
    target_component: u8,
) -> MavMessage {
    let mav_cmd = match command {
        VehicleCommand::ChangeAltitude { .. } => MavCmd::MAV_CMD_CONDITION_CHANGE_ALT,
        VehicleCommand::ConditionYaw { .. } => MavCmd::MAV_CMD_CONDITION_YAW,
    };
    let [param1, param2, param3, param4, param5, param6, param7] = command.params();

    MavMessage::COMMAND_LONG(COMMAND_LONG_DATA {
        param1,
        param2,
        param3,
        param4,
        param5,
        param6,
        param7,
        command: mav_cmd,
        target_system,
        target_component,
        confirmation: 0,
    })
}

/// Build a HEARTBEAT identifying this process as a ground control station.
pub fn build_gcs_heartbeat() -> MavMessage {
    MavMessage::HEARTBEAT(HEARTBEAT_DATA {
        custom_mode: 0,
        mavtype: MavType::MAV_TYPE_GCS,
        autopilot: MavAutopilot::MAV_AUTOPILOT_INVALID,
        base_mode: MavModeFlag::empty(),
        system_status: MavState::MAV_STATE_ACTIVE,
        mavlink_version: 3,
    })
}

/// Serialize one message as a MAVLink v2 frame.
pub fn write_frame(header: MavHeader, msg: &MavMessage) -> Result<Vec<u8>, LinkError> {
    let mut buf = Cursor::new(Vec::with_capacity(MAX_FRAME_LEN));
    mavlink::write_v2_msg(&mut buf, header, msg).map_err(|e| LinkError::Encode {
        message: message_name(msg),
        reason: format!("{e:?}"),
    })?;
    Ok(buf.into_inner())
}

/// Parse every frame in one datagram.
///
/// The protocol version is chosen from the first byte: `0xFD` starts a v2
/// frame, anything else is read as v1. Parsing stops at the first frame that
/// fails to decode.
pub fn parse_datagram(data: &[u8]) -> Vec<(MavHeader, MavMessage)> {
    let v2 = data.first() == Some(&MAVLINK_V2_STX);
    let mut reader = PeekReader::new(Cursor::new(data));
    let mut frames = Vec::new();
    loop {
        let frame = if v2 {
            mavlink::read_v2_msg::<MavMessage, _>(&mut reader)
        } else {
            mavlink::read_v1_msg::<MavMessage, _>(&mut reader)
        };
        match frame {
            Ok(frame) => frames.push(frame),
            Err(_) => break,
        }
    }
    frames
}

fn message_name(msg: &MavMessage) -> &'static str {
    match msg {
        MavMessage::COMMAND_LONG(_) => "COMMAND_LONG",
        MavMessage::HEARTBEAT(_) => "HEARTBEAT",
        _ => "message",
    }
}
