use super::type_config::TypeId;
use super::way::Id;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

impl MemberKind {
    fn from_u8(value: u8) -> io::Result<MemberKind> {
        match value {
            0 => Ok(MemberKind::Node),
            1 => Ok(MemberKind::Way),
            2 => Ok(MemberKind::Relation),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid relation member kind {}", value),
            )),
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            MemberKind::Node => 0,
            MemberKind::Way => 1,
            MemberKind::Relation => 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Member {
    pub kind: MemberKind,
    pub id: Id,
    pub role: String,
}

/// A relation as written by the relation import stage, with its members
/// untouched. This stage only cares about the turn-restriction types.
#[derive(Clone, Debug)]
pub struct RawRelation {
    pub id: Id,
    pub type_id: TypeId,
    pub members: Vec<Member>,
}

impl RawRelation {
    pub fn read<R: Read>(reader: &mut R) -> io::Result<RawRelation> {
        let id = reader.read_u64::<LittleEndian>()?;
        let type_id = reader.read_u16::<LittleEndian>()?;

        let member_count = reader.read_u32::<LittleEndian>()?;
        let mut members = Vec::with_capacity(member_count as usize);
        for _ in 0..member_count {
            members.push(Member {
                kind: MemberKind::from_u8(reader.read_u8()?)?,
                id: reader.read_u64::<LittleEndian>()?,
                role: read_string(reader)?,
            });
        }

        Ok(RawRelation {
            id,
            type_id,
            members,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.id)?;
        writer.write_u16::<LittleEndian>(self.type_id)?;

        writer.write_u32::<LittleEndian>(self.members.len() as u32)?;
        for member in &self.members {
            writer.write_u8(member.kind.as_u8())?;
            writer.write_u64::<LittleEndian>(member.id)?;
            write_string(writer, &member.role)?;
        }

        Ok(())
    }
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let len = reader.read_u32::<LittleEndian>()?;
    let mut bytes = vec![0; len as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    writer.write_u32::<LittleEndian>(value.len() as u32)?;
    writer.write_all(value.as_bytes())
}
