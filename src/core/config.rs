/// Smallest accepted board width or height.
pub const MIN_DIMENSION: i32 = 10;

/// Largest accepted board width or height.
pub const MAX_DIMENSION: i32 = 1000;

/// Ships every player must place.
pub const NUM_SHIPS: usize = 5;

/// Integers describing one ship in an initialize message: shape, rotation,
/// column, row.
pub const FIELDS_PER_SHIP: usize = 4;

/// Integers carried by a complete initialize message.
pub const INIT_FIELDS: usize = NUM_SHIPS * FIELDS_PER_SHIP;

/// Largest inbound line accepted by the transports, in bytes.
pub const MAX_LINE_LEN: usize = 1024;

/// Default listening port for player 1.
pub const PLAYER1_PORT: u16 = 2201;

/// Default listening port for player 2.
pub const PLAYER2_PORT: u16 = 2202;
