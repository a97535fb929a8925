use core::fmt;

/// Structural consistency rules a well-formed snapshot must satisfy. A
/// violation means a caller bypassed the snapshot API; these are checked by
/// tests and debug assertions, never surfaced to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantCode {
    BoardShape,
    CellEncoding,
    InputSlotCount,
    PainterBounds,
    PainterTeamRange,
}

impl fmt::Display for InvariantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardShape => write!(f, "BOARD_SHAPE"),
            Self::CellEncoding => write!(f, "CELL_ENCODING"),
            Self::InputSlotCount => write!(f, "INPUT_SLOT_COUNT"),
            Self::PainterBounds => write!(f, "PAINTER_BOUNDS"),
            Self::PainterTeamRange => write!(f, "PAINTER_TEAM_RANGE"),
        }
    }
}

/// Failures while decoding a serialized snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    TooShort { actual: usize, min: usize },
    InvalidMagic { found: u32 },
    UnsupportedVersion { found: u8 },
    ReservedNonZero { offset: usize },
    EmptyBoard,
    UnexpectedEof { offset: usize },
    TrailingBytes { remaining: usize },
    InvalidCell { index: usize, raw: u8 },
    InvalidPresence { slot: usize, raw: u8 },
    InvalidDirection { slot: usize, raw: u8 },
    InvalidTeam { slot: usize, found: u8 },
    PainterOutOfBounds { slot: usize, row: u16, col: u16 },
    NameNotUtf8 { slot: usize },
    CrcMismatch { stored: u32, computed: u32 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { actual, min } => {
                write!(
                    f,
                    "snapshot too short: got {actual} bytes, need at least {min}"
                )
            }
            Self::InvalidMagic { found } => write!(f, "invalid snapshot magic: 0x{found:08x}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported snapshot version: {found}")
            }
            Self::ReservedNonZero { offset } => {
                write!(f, "reserved byte at offset {offset} is non-zero")
            }
            Self::EmptyBoard => write!(f, "snapshot declares a zero-sized board"),
            Self::UnexpectedEof { offset } => {
                write!(f, "snapshot body truncated at offset {offset}")
            }
            Self::TrailingBytes { remaining } => {
                write!(f, "{remaining} unexpected bytes after snapshot footer")
            }
            Self::InvalidCell { index, raw } => {
                write!(f, "invalid cell encoding {raw} at cell index {index}")
            }
            Self::InvalidPresence { slot, raw } => {
                write!(f, "invalid presence byte 0x{raw:02x} for painter slot {slot}")
            }
            Self::InvalidDirection { slot, raw } => {
                write!(f, "invalid direction byte 0x{raw:02x} for slot {slot}")
            }
            Self::InvalidTeam { slot, found } => {
                write!(f, "team {found} out of range for painter slot {slot}")
            }
            Self::PainterOutOfBounds { slot, row, col } => {
                write!(f, "painter slot {slot} at ({row}, {col}) is off the board")
            }
            Self::NameNotUtf8 { slot } => {
                write!(f, "painter slot {slot} has a non-UTF-8 name")
            }
            Self::CrcMismatch { stored, computed } => write!(
                f,
                "crc mismatch: stored=0x{stored:08x}, computed=0x{computed:08x}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}
