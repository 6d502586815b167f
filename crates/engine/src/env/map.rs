//! Static map oracle: immutable terrain the engine reads but never writes.
//!
//! Gameplay-mutable geometry (door open/closed, container contents) lives in
//! the world's prop layer; the oracle only answers what the level geometry
//! itself is.

use crate::state::{TilePos, WorldState};

/// Static map oracle exposing immutable layout information.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: TilePos) -> Option<StaticTile>;

    fn contains(&self, position: TilePos) -> bool {
        self.dimensions().contains(position)
    }

    /// Whether terrain alone permits standing on `position`.
    fn is_walkable(&self, position: TilePos) -> bool {
        self.tile(position).is_some_and(|tile| tile.is_passable())
    }

    /// Whether terrain alone permits seeing through `position`.
    fn is_transparent(&self, position: TilePos) -> bool {
        self.tile(position).is_some_and(|tile| tile.is_transparent())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: TilePos) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }

    pub fn is_transparent(self) -> bool {
        self.terrain.is_transparent()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    Water,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn is_transparent(self) -> bool {
        !matches!(self, TerrainKind::Wall)
    }
}

/// In-memory map built from character rows. Reference implementation for
/// tests, tools, and anything that does not stream maps from content files.
///
/// Legend: `.` floor, `#` wall, `~` water. Row 0 is y = 0.
#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl GridMap {
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for row in rows {
            debug_assert_eq!(row.chars().count() as u32, width, "ragged map rows");
            for ch in row.chars() {
                let terrain = match ch {
                    '#' => TerrainKind::Wall,
                    '~' => TerrainKind::Water,
                    _ => TerrainKind::Floor,
                };
                tiles.push(StaticTile::new(terrain));
            }
        }
        Self {
            dimensions: MapDimensions::new(width, height),
            tiles,
        }
    }

    /// An open floor rectangle.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            tiles: vec![StaticTile::new(TerrainKind::Floor); (width * height) as usize],
        }
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: TilePos) -> Option<StaticTile> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let index = position.y as usize * self.dimensions.width as usize + position.x as usize;
        self.tiles.get(index).copied()
    }
}

/// Line of sight between two tiles over terrain transparency and the prop
/// layer (a closed door blocks sight; the endpoints never block themselves).
///
/// Uses integer Bresenham stepping so the result is symmetric enough for
/// gameplay and fully deterministic.
pub fn line_of_sight(map: &dyn MapOracle, world: &WorldState, from: TilePos, to: TilePos) -> bool {
    let mut x = from.x;
    let mut y = from.y;
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let here = TilePos::new(x, y);
        if here == to {
            return true;
        }
        if here != from {
            if !map.is_transparent(here) {
                return false;
            }
            if world.prop_at(here).is_some_and(|prop| !prop.is_transparent()) {
                return false;
            }
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
