/// Stable identity of a piece: its lattice index at construction (0–26),
/// x-major, z-minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

/// Identity of a face tile, in creation order (0–53).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u8);

/// Notifications for the presentation layer, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeEvent {
    /// A gesture-driven layer rotation committed.
    Moved,
    /// The solved check passed after a committed layer rotation.
    Solved,
    /// The last queued scramble move finished.
    ScrambleFinished,
}

impl CubeEvent {
    /// Numeric code written to the host event buffer.
    pub fn code(self) -> f32 {
        match self {
            CubeEvent::Moved => 1.0,
            CubeEvent::Solved => 2.0,
            CubeEvent::ScrambleFinished => 3.0,
        }
    }
}
