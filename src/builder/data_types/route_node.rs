use super::type_config::TypeId;
use super::way::Id;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Path flag mirroring the way's access bit
pub const PATH_HAS_ACCESS: u8 = 1 << 0;

/// A directed edge of the routing graph, from the route node it is stored in
/// to the neighbouring junction `id`
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub id: Id,
    /// Index into the owning route node's `ways`
    pub way_index: u32,
    pub type_id: TypeId,
    pub max_speed: u8,
    pub flags: u8,
    pub lat: f64,
    pub lon: f64,
    /// Along-way distance to the neighbour, in kilometres
    pub distance: f64,
}

/// Denies the turn from `source_way` onto the path at `target_path`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Exclude {
    pub source_way: Id,
    pub target_path: u32,
}

/// One vertex of the routing graph: a junction, the ways that meet there,
/// the outgoing edges and the denied turns
#[derive(Clone, Debug, PartialEq)]
pub struct RouteNode {
    pub id: Id,
    pub ways: Vec<Id>,
    pub paths: Vec<Path>,
    pub excludes: Vec<Exclude>,
}

impl RouteNode {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            ways: Vec::new(),
            paths: Vec::new(),
            excludes: Vec::new(),
        }
    }

    pub fn read<R: Read>(reader: &mut R) -> io::Result<RouteNode> {
        let id = reader.read_u64::<LittleEndian>()?;

        let way_count = reader.read_u32::<LittleEndian>()?;
        let mut ways = Vec::with_capacity(way_count as usize);
        for _ in 0..way_count {
            ways.push(reader.read_u64::<LittleEndian>()?);
        }

        let path_count = reader.read_u32::<LittleEndian>()?;
        let mut paths = Vec::with_capacity(path_count as usize);
        for _ in 0..path_count {
            paths.push(Path {
                id: reader.read_u64::<LittleEndian>()?,
                way_index: reader.read_u32::<LittleEndian>()?,
                type_id: reader.read_u16::<LittleEndian>()?,
                max_speed: reader.read_u8()?,
                flags: reader.read_u8()?,
                lat: reader.read_f64::<LittleEndian>()?,
                lon: reader.read_f64::<LittleEndian>()?,
                distance: reader.read_f64::<LittleEndian>()?,
            });
        }

        let exclude_count = reader.read_u32::<LittleEndian>()?;
        let mut excludes = Vec::with_capacity(exclude_count as usize);
        for _ in 0..exclude_count {
            excludes.push(Exclude {
                source_way: reader.read_u64::<LittleEndian>()?,
                target_path: reader.read_u32::<LittleEndian>()?,
            });
        }

        Ok(RouteNode {
            id,
            ways,
            paths,
            excludes,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.id)?;

        writer.write_u32::<LittleEndian>(self.ways.len() as u32)?;
        for &way_id in &self.ways {
            writer.write_u64::<LittleEndian>(way_id)?;
        }

        writer.write_u32::<LittleEndian>(self.paths.len() as u32)?;
        for path in &self.paths {
            writer.write_u64::<LittleEndian>(path.id)?;
            writer.write_u32::<LittleEndian>(path.way_index)?;
            writer.write_u16::<LittleEndian>(path.type_id)?;
            writer.write_u8(path.max_speed)?;
            writer.write_u8(path.flags)?;
            writer.write_f64::<LittleEndian>(path.lat)?;
            writer.write_f64::<LittleEndian>(path.lon)?;
            writer.write_f64::<LittleEndian>(path.distance)?;
        }

        writer.write_u32::<LittleEndian>(self.excludes.len() as u32)?;
        for exclude in &self.excludes {
            writer.write_u64::<LittleEndian>(exclude.source_way)?;
            writer.write_u32::<LittleEndian>(exclude.target_path)?;
        }

        Ok(())
    }
}
