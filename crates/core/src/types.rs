/// All pool (banca) identifiers are backend BIGSERIAL keys.
pub type PoolId = i64;

/// All draw (sorteo) identifiers are backend BIGSERIAL keys.
pub type DrawId = i64;
