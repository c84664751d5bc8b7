/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID (promotions."promotionId") の変換
 * - sqids の設定はここに閉じ込める (方式変更の影響を局所化)
 */
use sqids::Sqids;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {value}")]
    InvalidMinLength { value: usize },

    #[error("sqids error: {0}")]
    Sqids(#[from] sqids::Error),

    #[error("id must be non-negative, got {value}")]
    NegativeId { value: i64 },

    #[error("unknown public id")]
    Unknown,
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId { value: id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    /// Anything that is not the canonical encoding of exactly one id is
    /// `Unknown`, so callers can answer "not found" for it.
    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        let [n] = nums.as_slice() else {
            return Err(IdCodecError::Unknown);
        };
        let id = i64::try_from(*n).map_err(|_| IdCodecError::Unknown)?;

        // sqids decodes some non-canonical strings too; only accept the one we hand out
        if self.sqids.encode(&[*n])? != public_id {
            return Err(IdCodecError::Unknown);
        }
        Ok(id)
    }
}
