/// Highest team number; team 0 is "unclaimed".
pub const MAX_TEAMS: u8 = 4;
/// Painter slots per team.
pub const TEAM_SLOTS: usize = 4;
pub const MAX_PLAYERS: usize = MAX_TEAMS as usize * TEAM_SLOTS;

/// Cell encoding is `team * TEAM_STRIDE + level`.
pub const TEAM_STRIDE: u8 = 10;
/// Trail level at which a cell becomes permanent territory.
pub const FIXED_LEVEL: u8 = 4;

pub const POINTS_PER_ENCLOSED_CELL: u32 = 5;

pub const DEFAULT_BOARD_ROWS: usize = 50;
pub const DEFAULT_BOARD_COLS: usize = 50;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
/// Turn count after which a running round is reseeded. Zero disables.
pub const DEFAULT_TURNS_TO_RESTART: u32 = 500;

/// How many random probes painter placement makes before falling back to a
/// linear scan for a free cell.
pub const PLACEMENT_PROBE_LIMIT: u32 = 128;

pub const SNAPSHOT_MAGIC: u32 = u32::from_le_bytes(*b"INKS");
pub const SNAPSHOT_VERSION: u8 = 1;
/// magic u32, version u8, 3 reserved, turn index u32, rows u16, cols u16,
/// painter slot count u16, 2 reserved.
pub const SNAPSHOT_HEADER_SIZE: usize = 20;
/// CRC32 over header + body.
pub const SNAPSHOT_FOOTER_SIZE: usize = 4;

pub const MAX_NAME_BYTES: usize = 32;
