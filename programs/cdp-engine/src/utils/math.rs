use anchor_lang::prelude::*;
use crate::errors::ProtocolError;

// kept apart from the anchor prelude, whose `Result` shadows the one the macro expands to
mod wide {
    use uint::construct_uint;

    construct_uint! {
        pub struct U256(4);
    }

    construct_uint! {
        pub struct U512(8);
    }
}

pub use wide::{U256, U512};

fn widen(value: U256) -> U512 {
    let U256(ref limbs) = value;
    U512([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

fn narrow(value: U512) -> Result<U256> {
    let U512(ref limbs) = value;
    require!(
        limbs[4..].iter().all(|limb| *limb == 0),
        ProtocolError::MathOverflow
    );
    Ok(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// `a * b / denominator`, truncating, with a 256-bit intermediate product.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator != 0, ProtocolError::MathOverflow);

    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(ProtocolError::MathOverflow)?;

    to_u128(product / U256::from(denominator))
}

/// `a * b / denominator` over 256-bit operands, with a 512-bit intermediate product.
pub fn mul_div_u256(a: U256, b: U256, denominator: U256) -> Result<U256> {
    require!(!denominator.is_zero(), ProtocolError::MathOverflow);

    let product = widen(a)
        .checked_mul(widen(b))
        .ok_or(ProtocolError::MathOverflow)?;

    narrow(product / widen(denominator))
}

pub fn to_u128(value: U256) -> Result<u128> {
    u128::try_from(value).map_err(|_| error!(ProtocolError::MathOverflow))
}

pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(ProtocolError::MathOverflow))
}
