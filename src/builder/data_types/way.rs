use super::type_config::TypeId;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

pub type Id = u64;

/// Attribute bits carried by a way record
pub const WAY_HAS_ACCESS: u8 = 1 << 0;
pub const WAY_ONEWAY: u8 = 1 << 1;
pub const WAY_AREA: u8 = 1 << 2;

/// One geographic point of a way. The id is 0 for anonymous geometry points
/// that no other object refers to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub id: Id,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    /// Great-circle distance to another point in kilometres.
    /// Haversine, see https://en.wikipedia.org/wiki/Haversine_formula
    pub fn distance_km(&self, other: &Point) -> f64 {
        let theta1 = self.lat.to_radians();
        let theta2 = other.lat.to_radians();
        let delta_theta = (other.lat - self.lat).to_radians();
        let delta_lambda = (other.lon - self.lon).to_radians();
        let a = (delta_theta / 2.).sin().powi(2)
            + theta1.cos() * theta2.cos() * (delta_lambda / 2.).sin().powi(2);
        6371.0 * 2. * a.sqrt().asin()
    }
}

/// A road (or area boundary) as written by the way import stage
#[derive(Clone, Debug)]
pub struct Way {
    pub id: Id,
    pub type_id: TypeId,
    pub flags: u8,
    pub max_speed: u8,
    pub nodes: Vec<Point>,
}

impl Way {
    pub fn has_access(&self) -> bool {
        self.flags & WAY_HAS_ACCESS != 0
    }

    pub fn is_oneway(&self) -> bool {
        self.flags & WAY_ONEWAY != 0
    }

    pub fn is_area(&self) -> bool {
        self.flags & WAY_AREA != 0
    }

    /// A way is closed when its first and last points carry the same id
    pub fn is_closed(&self) -> bool {
        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => first.id == last.id,
            _ => false,
        }
    }

    pub fn read<R: Read>(reader: &mut R) -> io::Result<Way> {
        let id = reader.read_u64::<LittleEndian>()?;
        let type_id = reader.read_u16::<LittleEndian>()?;
        let flags = reader.read_u8()?;
        let max_speed = reader.read_u8()?;

        let node_count = reader.read_u32::<LittleEndian>()?;
        let mut nodes = Vec::with_capacity(node_count as usize);
        for _ in 0..node_count {
            nodes.push(Point {
                id: reader.read_u64::<LittleEndian>()?,
                lat: reader.read_f64::<LittleEndian>()?,
                lon: reader.read_f64::<LittleEndian>()?,
            });
        }

        Ok(Way {
            id,
            type_id,
            flags,
            max_speed,
            nodes,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.id)?;
        writer.write_u16::<LittleEndian>(self.type_id)?;
        writer.write_u8(self.flags)?;
        writer.write_u8(self.max_speed)?;

        writer.write_u32::<LittleEndian>(self.nodes.len() as u32)?;
        for node in &self.nodes {
            writer.write_u64::<LittleEndian>(node.id)?;
            writer.write_f64::<LittleEndian>(node.lat)?;
            writer.write_f64::<LittleEndian>(node.lon)?;
        }

        Ok(())
    }
}
