use anyhow::Result;

mod coder;
mod errors;
pub mod gf;
mod syndrome;

pub use coder::{BlockCoder, Coder};
pub use errors::{DomainError, ReedSolomonError};
pub use syndrome::SyndromeDecoder;

/// Представление полинома в поле GF(256). Старший индекс - старший коэффициент.
type Poly = Vec<u8>;

/// Ссылочное представление полинома поля GF(256).
type RefPoly<'a> = &'a [u8];

pub fn new_syndrome_decoder(control_count: usize) -> SyndromeDecoder<gf::FastGF256> {
    SyndromeDecoder::new(control_count, gf::FastGF256::new())
}
