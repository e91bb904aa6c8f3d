use num_traits::ToPrimitive;

/// One of the six sides of a unit cube.
///
/// The discriminant doubles as the face's position in a [`FaceMask`](super::FaceMask)
/// and in the per-face constant tables below.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Face {
    Up = 0,
    Down = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
}

/// Two triangles over quad corners `[0, 1, 2, 3]`, diagonal 0-2.
const WIND_FORWARD: [u32; 6] = [0, 1, 2, 2, 3, 0];
/// The same quad traversed the other way round.
const WIND_REVERSE: [u32; 6] = [2, 1, 0, 0, 3, 2];

/// Quad corners relative to the cell's top corner `(x, y, z)`. A cell spans
/// `[y - 1, y]` vertically, hence the negative y offsets.
const CORNERS: [[[f32; 3]; 4]; Face::COUNT] = [
    // Up
    [[0., 0., 0.], [1., 0., 0.], [1., 0., 1.], [0., 0., 1.]],
    // Down
    [[0., -1., 0.], [1., -1., 0.], [1., -1., 1.], [0., -1., 1.]],
    // North
    [[0., 0., 1.], [1., 0., 1.], [1., -1., 1.], [0., -1., 1.]],
    // South
    [[0., 0., 0.], [1., 0., 0.], [1., -1., 0.], [0., -1., 0.]],
    // West
    [[0., 0., 0.], [0., 0., 1.], [0., -1., 1.], [0., -1., 0.]],
    // East
    [[1., 0., 0.], [1., 0., 1.], [1., -1., 1.], [1., -1., 0.]],
];

/// Counter-clockwise front faces, looking at the cube from outside.
const WINDING: [[u32; 6]; Face::COUNT] = [
    WIND_REVERSE, // Up
    WIND_FORWARD, // Down
    WIND_REVERSE, // North
    WIND_FORWARD, // South
    WIND_REVERSE, // West
    WIND_FORWARD, // East
];

impl Face {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Up,
        Self::Down,
        Self::North,
        Self::South,
        Self::West,
        Self::East,
    ];

    pub fn iterate() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied()
    }

    /// Direction to the neighbor cell this face looks at.
    pub fn offset(&self) -> uv::IVec3 {
        match *self {
            Face::Up => uv::IVec3::new(0, 1, 0),
            Face::Down => uv::IVec3::new(0, -1, 0),
            Face::North => uv::IVec3::new(0, 0, 1),
            Face::South => uv::IVec3::new(0, 0, -1),
            Face::West => uv::IVec3::new(-1, 0, 0),
            Face::East => uv::IVec3::new(1, 0, 0),
        }
    }

    pub fn normal(&self) -> uv::Vec3 {
        let offset = self.offset();
        uv::Vec3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }

    pub fn bit(&self) -> u8 {
        1 << (*self as u8)
    }

    pub fn corners(&self) -> &'static [[f32; 3]; 4] {
        &CORNERS[*self as usize]
    }

    pub fn winding(&self) -> &'static [u32; 6] {
        &WINDING[*self as usize]
    }
}

/// Dimensions of a cubic grid and its `x + y * size + z * size²` linear order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Shape {
    size: u32,
}

impl Shape {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn area(&self) -> usize {
        self.size as usize * self.size as usize
    }

    pub fn volume(&self) -> usize {
        self.area() * self.size as usize
    }

    pub fn linearize(&self, x: u32, y: u32, z: u32) -> usize {
        x as usize + y as usize * self.size as usize + z as usize * self.area()
    }

    pub fn delinearize(&self, index: usize) -> (u32, u32, u32) {
        let size = self.size as usize;
        (
            (index % size) as u32,
            (index / size % size) as u32,
            (index / self.area()) as u32,
        )
    }

    /// Linear index of a possibly out-of-range coordinate, `None` outside the grid.
    pub fn checked(&self, coord: uv::IVec3) -> Option<usize> {
        let (x, y, z) = (coord.x.to_u32()?, coord.y.to_u32()?, coord.z.to_u32()?);
        (x < self.size && y < self.size && z < self.size).then(|| self.linearize(x, y, z))
    }
}
