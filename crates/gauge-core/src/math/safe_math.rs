//! # Safe Math Operations
//!
//! Overflow-checked arithmetic for ledger amounts.

use ethnum::U256;

use crate::errors::{GaugeError, GaugeResult};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        pub fn $fn_name(a: $type, b: $type) -> GaugeResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };
}

safe_arith!(safe_add_u128, u128, checked_add, GaugeError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, GaugeError::MathUnderflow);
safe_arith!(safe_mul_u128, u128, checked_mul, GaugeError::MathOverflow);

/// Narrow a U256 to u128
pub fn u256_to_u128(value: U256) -> GaugeResult<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(GaugeError::MathOverflow);
    }
    Ok(lo)
}
