use super::{GF256, PRIMITIVE_POLY_FULL};

/// Реализация арифметики GF(256) на таблицах степеней и логарифмов.
/// Таблицы строятся один раз в конструкторе и дальше не изменяются,
/// поэтому структуру можно свободно разделять между потоками.
pub struct FastGF256 {
    exp_table: [u8; 256],
    log_table: [u8; 256],
}

impl FastGF256 {
    pub fn new() -> Self {
        let mut exp_table = [0u8; 256];
        let mut log_table = [0u8; 256];

        let mut x = 1;

        for i in 0..256 {
            exp_table[i] = x as u8;
            log_table[x as usize] = i as u8;

            x <<= 1;

            // 0x100 или 0b1_0000_0000 или 256
            if x >= 256 {
                x ^= PRIMITIVE_POLY_FULL;
            }
        }

        // log_table[1] перезаписывается при i = 255, так как α^255 = α^0 = 1
        log_table[1] = 0;

        FastGF256 {
            exp_table,
            log_table,
        }
    }
}

impl Default for FastGF256 {
    fn default() -> Self {
        Self::new()
    }
}

impl GF256 for FastGF256 {
    fn _div(&self, a: u8, b: u8) -> u8 {
        let log_a = self.log_table[a as usize] as i16;
        let log_b = self.log_table[b as usize] as i16;
        let result = (log_a - log_b + 255) % 255;
        self.exp_table[result as usize]
    }

    /// Так как любой элемент представим в виде степени примитивного многочлена, если
    /// `a=x^n`, `b=x^m`, то `a*b=x^(n+m)` - произведение элементов можно представить в виде степени примитивного.
    /// - Подсчитаем таблицу степеней x т.е. `exp[i] = x^i`
    /// - Подсчитаем таблицу логарифмов x т.е. `x^log[a] = a`
    /// - Получаем `a * b = exp[log[a] + log[b] % 255]`
    fn _mul(&self, a: u8, b: u8) -> u8 {
        let log_a = self.log_table[a as usize] as usize;
        let log_b = self.log_table[b as usize] as usize;
        self.exp_table[(log_a + log_b) % 255]
    }

    fn _pow(&self, a: u8, n: u8) -> u8 {
        let log_a = self.log_table[a as usize] as usize;
        let result = (log_a * n as usize) % 255;
        self.exp_table[result]
    }

    fn _inverse(&self, a: u8) -> u8 {
        let log_a = self.log_table[a as usize] as usize;
        self.exp_table[(255 - log_a) % 255]
    }

    fn _log(&self, a: u8) -> u8 {
        self.log_table[a as usize]
    }
}
