//! Time synchronization messages.

use crate::core::bit_buffer::{BitReader, BitWriter};
use crate::core::packed_time::pack_time;
use crate::error::Result;
use crate::protocol::message::{ConnChannel, Decodable, Encodable, Message, Opcode};

/// Client request for the server clock.
///
/// # Wire Format
/// ```text
/// (empty body)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTime;

impl Message for QueryTime {
    const OPCODE: Opcode = Opcode::QueryTime;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Decodable for QueryTime {
    fn decode(_r: &mut BitReader<'_>) -> Result<Self> {
        Ok(QueryTime)
    }
}

/// Server clock report.
///
/// # Wire Format
/// ```text
/// [UnixTime(4)] [DailyResetIn(4)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTimeResponse {
    /// Server time as raw Unix seconds
    pub unix_time: u32,
    /// Seconds until the next daily reset
    pub daily_reset_in: u32,
}

impl Message for QueryTimeResponse {
    const OPCODE: Opcode = Opcode::QueryTimeResponse;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Encodable for QueryTimeResponse {
    fn encode(&self, w: &mut BitWriter) {
        w.write_u32(self.unix_time);
        w.write_u32(self.daily_reset_in);
    }
}

/// Game clock and speed announcement sent on world entry.
///
/// # Wire Format
/// ```text
/// [PackedTime(4)] [GameSpeed(4)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetTimeSpeed {
    /// Current game time as Unix seconds; travels as a packed calendar word
    pub game_time: i64,
    /// Game-minute rate, conventionally 1/60
    pub speed: f32,
}

impl Message for SetTimeSpeed {
    const OPCODE: Opcode = Opcode::SetTimeSpeed;
    const CHANNEL: ConnChannel = ConnChannel::Instance;
}

impl Encodable for SetTimeSpeed {
    fn encode(&self, w: &mut BitWriter) {
        w.write_u32(pack_time(self.game_time));
        w.write_f32(self.speed);
    }
}
