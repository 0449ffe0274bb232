//! Character roster messages.

use crate::core::bit_buffer::{BitReader, BitWriter};
use crate::core::guid::Guid;
use crate::error::Result;
use crate::protocol::message::{ConnChannel, Decodable, Encodable, Message, Opcode};

/// Client request for the account's character roster.
///
/// # Wire Format
/// ```text
/// (empty body)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEnumRequest;

impl Message for CharEnumRequest {
    const OPCODE: Opcode = Opcode::CharEnumRequest;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Decodable for CharEnumRequest {
    fn decode(_r: &mut BitReader<'_>) -> Result<Self> {
        Ok(CharEnumRequest)
    }
}

/// Client character-creation request.
///
/// One of the protocol's legacy shapes: the name travels NUL-terminated
/// rather than length-prefixed.
///
/// # Wire Format
/// ```text
/// [Name\0] [Race(1)] [Class(1)] [Gender(1)]
/// [Skin(1)] [Face(1)] [HairStyle(1)] [HairColor(1)] [FacialHair(1)]
/// [OutfitId(1)]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharCreate {
    pub name: String,
    pub race: u8,
    pub class: u8,
    pub gender: u8,
    pub skin: u8,
    pub face: u8,
    pub hair_style: u8,
    pub hair_color: u8,
    pub facial_hair: u8,
    pub outfit_id: u8,
}

impl Message for CharCreate {
    const OPCODE: Opcode = Opcode::CharCreate;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Decodable for CharCreate {
    fn decode(r: &mut BitReader<'_>) -> Result<Self> {
        Ok(CharCreate {
            name: r.read_cstring()?,
            race: r.read_u8()?,
            class: r.read_u8()?,
            gender: r.read_u8()?,
            skin: r.read_u8()?,
            face: r.read_u8()?,
            hair_style: r.read_u8()?,
            hair_color: r.read_u8()?,
            facial_hair: r.read_u8()?,
            outfit_id: r.read_u8()?,
        })
    }
}

/// One roster entry inside [`CharEnumResult`].
///
/// # Wire Format
/// ```text
/// bits: [HasGuild(1)] [FirstLogin(1)] [NameLen(7)]
/// [PackedGuid] [Name(NameLen)]
/// [Level(1)] [Race(1)] [Class(1)] [Gender(1)]
/// [Zone(4)] [Map(4)] [X(4)] [Y(4)] [Z(4)]
/// [PackedGuid guild]?
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSummary {
    pub guid: Guid,
    pub name: String,
    pub level: u8,
    pub race: u8,
    pub class: u8,
    pub gender: u8,
    pub zone: u32,
    pub map: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub guild: Option<Guid>,
    pub first_login: bool,
}

impl Encodable for CharacterSummary {
    fn encode(&self, w: &mut BitWriter) {
        assert!(self.name.len() < 1 << 7, "character name exceeds 7-bit length");

        w.write_bit(self.guild.is_some());
        w.write_bit(self.first_login);
        w.write_bits(self.name.len() as u32, 7);

        w.write_packed_guid(self.guid);
        w.write_string(&self.name);
        w.write_u8(self.level);
        w.write_u8(self.race);
        w.write_u8(self.class);
        w.write_u8(self.gender);
        w.write_u32(self.zone);
        w.write_u32(self.map);
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);

        if let Some(guild) = self.guild {
            w.write_packed_guid(guild);
        }
    }
}

/// Account character roster.
///
/// # Wire Format
/// ```text
/// [Count(4)] [CharacterSummary xCount]
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharEnumResult {
    pub characters: Vec<CharacterSummary>,
}

impl Message for CharEnumResult {
    const OPCODE: Opcode = Opcode::CharEnumResult;
    const CHANNEL: ConnChannel = ConnChannel::Realm;
}

impl Encodable for CharEnumResult {
    fn encode(&self, w: &mut BitWriter) {
        w.write_u32(self.characters.len() as u32);
        for character in &self.characters {
            character.encode(w);
        }
    }
}
