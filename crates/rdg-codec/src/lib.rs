//! Wire codec for scenario rows.

pub mod codec;
pub mod error;

pub use codec::{DELIMITER, DecodedColumn, ScenarioCodec, decode_wire, encode_row, split_wire};
pub use error::DecodeError;
