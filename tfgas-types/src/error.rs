pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Payload length mismatch: expected {expected} bytes, got {actual} bytes")]
    PayloadLength {
        expected: usize,
        actual: usize,
    },

    #[error("Unknown gas type code: {0}")]
    InvalidGasType(u8),
}
