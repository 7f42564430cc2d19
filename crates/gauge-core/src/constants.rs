//! # Protocol Constants
//!
//! Fixed-point scales, fee bounds and bootstrap defaults.

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Reward index fixed-point scale: 1e18
pub const INDEX_SCALE: u128 = 1_000_000_000_000_000_000;

// ============================================================================
// Fee Constants
// ============================================================================

/// Maximum LP fee in pips (hundredths of a basis point), i.e. 100%
pub const MAX_LP_FEE: u32 = 1_000_000;

/// Flag OR'ed into a fee returned from a before-swap hook to override the pool fee
pub const OVERRIDE_FEE_FLAG: u32 = 0x40_0000;

/// Default internal fee (0%)
pub const DEFAULT_INTERNAL_FEE: u32 = 0;

/// Default keeper fee (0.05%)
pub const DEFAULT_KEEPER_FEE: u32 = 500;

/// Default external fee (0.3%)
pub const DEFAULT_EXTERNAL_FEE: u32 = 3_000;

// ============================================================================
// Bootstrap Constants
// ============================================================================

/// Default genesis stake injected at initialization (one base unit)
pub const DEFAULT_BOOTSTRAP_STAKE: u128 = 1;
