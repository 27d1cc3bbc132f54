use super::{GF256, PRIMITIVE_POLY};

/// Реализация арифметики GF(256) без таблиц, прямым умножением столбиком.
/// Медленнее табличной, но не требует памяти и служит эталоном в тестах.
pub struct SimpleGF256 {}

impl GF256 for SimpleGF256 {
    fn _div(&self, a: u8, b: u8) -> u8 {
        let b_inverse = self.inverse(b);
        self.mul(a, b_inverse)
    }

    fn _mul(&self, a: u8, b: u8) -> u8 {
        let mut a = a;
        let mut b = b;
        let mut result = 0;

        while a > 0 {
            result ^= b * (a & 1);
            a >>= 1;
            // b << 1 соответствует домножению многочлена на x
            // (b >> 7) соответветствует проверке, что b
            // многочлен степени 7.
            // ^ (irreducible_poly * (b >> 7)) соответствует
            // взятию по модулю в этом случае. В противном случае
            // для взятия по модулю ничего не нужно делать
            b = (b << 1) ^ (PRIMITIVE_POLY * (b >> 7));
        }
        result
    }

    fn _pow(&self, a: u8, n: u8) -> u8 {
        let mut a = a;
        let mut result = 1;
        let mut pow = n;

        while pow > 0 {
            if pow & 1 > 0 {
                result = self.mul(result, a);
            }
            a = self.mul(a, a);
            pow >>= 1;
        }
        result
    }

    /// Найти a^(-1) в поле GF(256) можно как a^(254).
    fn _inverse(&self, a: u8) -> u8 {
        self.pow(a, 254)
    }

    /// Логарифм перебором степеней примитивного элемента.
    fn _log(&self, a: u8) -> u8 {
        let mut power = 1u8;

        for n in 0..255 {
            if power == a {
                return n;
            }
            power = self.mul(power, Self::alpha());
        }

        unreachable!("every non-zero element is a power of alpha");
    }
}
