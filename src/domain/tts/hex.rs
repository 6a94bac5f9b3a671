use super::error::HexDecodeError;

/// Decode a string of contiguous two-digit hex pairs into bytes.
///
/// Upper and lower case digits are accepted. Anything else, including
/// whitespace or a `0x` prefix, is rejected.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, HexDecodeError> {
    hex::decode(input).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => HexDecodeError::InvalidDigit {
            // Report the whole character when the offending byte starts a
            // multi-byte one
            found: input
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(c),
            offset: index,
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            HexDecodeError::OddLength(input.len())
        }
    })
}
