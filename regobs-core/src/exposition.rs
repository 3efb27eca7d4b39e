use serde::{Serialize, Serializer};

/// The eight compass octants, in bitmask order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Slot of this direction in an exposition bitmask (N = 0 .. NW = 7).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Compass bearing in degrees.
    pub const fn degrees(self) -> u16 {
        self as u16 * 45
    }
}

/// A set of slope orientations, sent to RegObs as an eight character
/// bitstring ("10001000" for N and S).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Expositions([bool; 8]);

impl Expositions {
    pub fn new(directions: &[Direction]) -> Expositions {
        let mut slots = [false; 8];
        for direction in directions {
            slots[direction.index()] = true;
        }
        Expositions(slots)
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|set| !set)
    }

    pub fn to_bitstring(&self) -> String {
        self.0.iter().map(|&set| if set { '1' } else { '0' }).collect()
    }
}

impl From<Direction> for Expositions {
    fn from(direction: Direction) -> Self {
        Expositions::new(&[direction])
    }
}

impl Serialize for Expositions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bitstring())
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Expositions};

    #[test]
    fn test_north_and_south() {
        let expositions = Expositions::new(&[Direction::N, Direction::S]);
        assert_eq!(expositions.to_bitstring(), "10001000");
    }

    #[test]
    fn test_duplicates_and_order_do_not_matter() {
        let a = Expositions::new(&[Direction::NW, Direction::NE, Direction::NW]);
        let b = Expositions::new(&[Direction::NE, Direction::NW]);
        assert_eq!(a, b);
        assert_eq!(a.to_bitstring(), "01000001");
        assert!(a.contains(Direction::NW));
        assert!(!a.contains(Direction::S));
    }

    #[test]
    fn test_empty_and_full() {
        assert_eq!(Expositions::new(&[]).to_bitstring(), "00000000");
        assert!(Expositions::default().is_empty());
        assert_eq!(Expositions::new(&Direction::ALL).to_bitstring(), "11111111");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Expositions::from(Direction::E)).unwrap();
        assert_eq!(json, "\"00100000\"");
        assert_eq!(Direction::SW.degrees(), 225);
    }
}
