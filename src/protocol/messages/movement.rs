//! Movement messages and the shared movement-state substructure.

use crate::core::bit_buffer::{BitReader, BitWriter};
use crate::core::guid::Guid;
use crate::error::Result;
use crate::protocol::message::{ConnChannel, Decodable, Encodable, Message, Opcode};

/// Mover state embedded in every movement packet.
///
/// This substructure travels in both directions (inside client move packets
/// and inside server broadcasts), so it implements both codec roles.
///
/// # Wire Format
/// ```text
/// [PackedGuid] [Flags(4)] [TimeMs(4)] [X(4)] [Y(4)] [Z(4)] [O(4)]
/// bits: [HasPitch(1)] [HasFallTime(1)]
/// [Pitch(4)]?  [FallTime(4)]?
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementInfo {
    pub guid: Guid,
    /// Raw movement flag bits; their meaning belongs to domain logic
    pub flags: u32,
    /// Client movement clock, milliseconds
    pub time_ms: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub orientation: f32,
    /// Vertical look angle, present only while swimming or flying
    pub pitch: Option<f32>,
    /// Milliseconds airborne, present only while falling
    pub fall_time: Option<u32>,
}

impl Decodable for MovementInfo {
    fn decode(r: &mut BitReader<'_>) -> Result<Self> {
        let guid = r.read_packed_guid()?;
        let flags = r.read_u32()?;
        let time_ms = r.read_u32()?;
        let x = r.read_f32()?;
        let y = r.read_f32()?;
        let z = r.read_f32()?;
        let orientation = r.read_f32()?;

        let has_pitch = r.read_bit()?;
        let has_fall_time = r.read_bit()?;

        let pitch = if has_pitch { Some(r.read_f32()?) } else { None };
        let fall_time = if has_fall_time {
            Some(r.read_u32()?)
        } else {
            None
        };

        Ok(MovementInfo {
            guid,
            flags,
            time_ms,
            x,
            y,
            z,
            orientation,
            pitch,
            fall_time,
        })
    }
}

impl Encodable for MovementInfo {
    fn encode(&self, w: &mut BitWriter) {
        w.write_packed_guid(self.guid);
        w.write_u32(self.flags);
        w.write_u32(self.time_ms);
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
        w.write_f32(self.orientation);

        w.write_bit(self.pitch.is_some());
        w.write_bit(self.fall_time.is_some());

        if let Some(pitch) = self.pitch {
            w.write_f32(pitch);
        }
        if let Some(fall_time) = self.fall_time {
            w.write_u32(fall_time);
        }
    }
}

/// Client starts moving forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStartForward {
    pub info: MovementInfo,
}

impl Message for MoveStartForward {
    const OPCODE: Opcode = Opcode::MoveStartForward;
    const CHANNEL: ConnChannel = ConnChannel::Instance;
}

impl Decodable for MoveStartForward {
    fn decode(r: &mut BitReader<'_>) -> Result<Self> {
        Ok(MoveStartForward {
            info: MovementInfo::decode(r)?,
        })
    }
}

/// Server broadcast of another mover's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveUpdate {
    pub info: MovementInfo,
}

impl Message for MoveUpdate {
    const OPCODE: Opcode = Opcode::MoveUpdate;
    const CHANNEL: ConnChannel = ConnChannel::Instance;
}

impl Encodable for MoveUpdate {
    fn encode(&self, w: &mut BitWriter) {
        self.info.encode(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovementInfo {
        MovementInfo {
            guid: Guid::new(0x0600_0000_0000_1A2B),
            flags: 0x0000_0001,
            time_ms: 123_456,
            x: -8913.23,
            y: 554.63,
            z: 93.79,
            orientation: 3.14,
            pitch: None,
            fall_time: None,
        }
    }

    fn roundtrip(info: MovementInfo) -> MovementInfo {
        let mut w = BitWriter::new();
        info.encode(&mut w);
        let bytes = w.finish();
        let mut r = BitReader::new(&bytes);
        let decoded = MovementInfo::decode(&mut r).unwrap();
        r.expect_exhausted().unwrap();
        decoded
    }

    #[test]
    fn plain_state_roundtrips() {
        assert_eq!(roundtrip(sample()), sample());
    }

    #[test]
    fn optional_fields_roundtrip() {
        let info = MovementInfo {
            pitch: Some(-0.5),
            fall_time: Some(880),
            ..sample()
        };
        assert_eq!(roundtrip(info), info);
    }

    #[test]
    fn absent_optionals_cost_only_presence_bits() {
        let mut with = BitWriter::new();
        MovementInfo {
            pitch: Some(0.0),
            fall_time: Some(0),
            ..sample()
        }
        .encode(&mut with);

        let mut without = BitWriter::new();
        sample().encode(&mut without);

        // Same presence-bit byte either way; only the payloads differ.
        assert_eq!(with.finish().len(), without.finish().len() + 8);
    }

    #[test]
    fn truncated_state_is_underrun() {
        let mut w = BitWriter::new();
        sample().encode(&mut w);
        let bytes = w.finish();
        let mut r = BitReader::new(&bytes[..bytes.len() - 1]);
        assert!(MovementInfo::decode(&mut r).is_err());
    }
}
