use super::*;

/// Общий интерфейс кодеров: кодирование добавляет контрольные символы,
/// декодирование исправляет ошибки и возвращает исходные данные.
pub trait Coder {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

impl<T> BlockCoder for T where T: Coder {}

/// Для работы с данными, не помещающимися в один блок GF(256).
pub trait BlockCoder: Coder {
    fn encode_blocks(&self, data: &[u8], block_size: usize) -> Result<Vec<Vec<u8>>> {
        data.chunks(block_size).map(|chunk| self.encode(chunk)).collect()
    }

    fn decode_blocks(&self, data: &[u8], block_size: usize) -> Result<Vec<Vec<u8>>> {
        data.chunks(block_size).map(|chunk| self.decode(chunk)).collect()
    }

    fn encode_blocks_to_vec(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        Ok(self.encode_blocks(data, block_size)?.into_iter().flatten().collect())
    }

    fn decode_blocks_to_vec(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        Ok(self.decode_blocks(data, block_size)?.into_iter().flatten().collect())
    }
}
