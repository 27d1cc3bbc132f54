//! Примитивный элемент поля GF(256) — это элемент, который порождает мультипликативную группу поля
//! GF(256), то есть при возведении его в степени от 1 до 255 (исключая 0) можно получить все ненулевые
//! элементы этого поля.

use anyhow::Result;

use crate::{DomainError, Poly, RefPoly};

mod fast_gf256;
mod simple_gf256;

pub use fast_gf256::FastGF256;
pub use simple_gf256::SimpleGF256;

/// Примитивный полином: x⁸ + x⁴ + x³ + x² + 1 = 0x11D или 285 в десятичной.
pub const PRIMITIVE_POLY_FULL: u16 = 0x11D;

/// Возьмем младшие степени примитивного полинома: x⁴ + x³ + x² + 1 = 0x1D или 29 в десятичной.
pub const PRIMITIVE_POLY: u8 = 0x1D;

/// Определяет арифметические операции над элементами поля GF(256).
pub trait GF256 {
    fn _div(&self, a: u8, b: u8) -> u8;
    fn _mul(&self, a: u8, b: u8) -> u8;
    fn _pow(&self, a: u8, n: u8) -> u8;
    fn _inverse(&self, a: u8) -> u8;
    fn _log(&self, a: u8) -> u8;

    /// Примитивный элемент поля.
    fn alpha() -> u8 {
        2
    }

    /// Возвести примитивный элемент в произвольную целую степень.
    /// Показатель приводится по модулю 255 в математическом смысле,
    /// поэтому отрицательные степени (например `α^(-k)` в алгоритме Форни)
    /// допустимы.
    fn alpha_pow(&self, n: i32) -> u8 {
        self.pow(Self::alpha(), n.rem_euclid(255) as u8)
    }

    /// Дискретный логарифм по основанию α: `α^log(a) = a`.
    ///
    /// # Panics
    /// Паникует при a = 0, нуль не является степенью α.
    fn log(&self, a: u8) -> u8 {
        if a == 0 {
            panic!("Zero has no discrete logarithm");
        }
        Self::_log(&self, a)
    }

    /// Возвести число a в степень n.
    fn pow(&self, a: u8, n: u8) -> u8 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        Self::_pow(&self, a, n)
    }

    /// Найти a^(-1) в поле GF(256).
    ///
    /// # Panics
    /// Паникует при a = 0, у нуля нет обратного элемента.
    fn inverse(&self, a: u8) -> u8 {
        if a == 0 {
            panic!("Zero has no inverse");
        }
        Self::_inverse(&self, a)
    }

    fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        Self::_mul(&self, a, b)
    }

    /// # Panics
    /// Паникует при b = 0.
    fn div(&self, a: u8, b: u8) -> u8 {
        if b == 0 {
            panic!("Division by zero");
        }
        if a == 0 {
            return 0;
        }
        Self::_div(&self, a, b)
    }

    fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    fn sub(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }
}

impl<T> GF256Poly for T where T: GF256 {}

/// Определяет операции над полиномами в поле GF(256).
pub trait GF256Poly: GF256 {
    /// Единичный многочлен `1`.
    fn unit_poly(&self) -> Poly {
        vec![1]
    }

    /// Нулевой многочлен — многочлен без ненулевых коэффициентов.
    fn is_zero_poly(&self, poly: RefPoly) -> bool {
        poly.iter().all(|&c| c == 0)
    }

    /// Индекс старшего ненулевого коэффициента, 0 для нулевого многочлена.
    fn poly_degree(&self, poly: RefPoly) -> usize {
        poly.iter().rposition(|&c| c != 0).unwrap_or(0)
    }

    /// Убирает нулевые старшие коэффициенты, оставляя минимум один коэффициент.
    fn rstrip_poly(&self, poly: &mut Poly) {
        while poly.len() > 1 && *poly.last().unwrap() == 0 {
            poly.pop();
        }
        if poly.is_empty() {
            poly.push(0);
        }
    }

    /// Равенство многочленов с точностью до нулевых старших коэффициентов.
    fn poly_eq(&self, a: RefPoly, b: RefPoly) -> bool {
        let len = a.len().max(b.len());
        (0..len).all(|i| {
            a.get(i).copied().unwrap_or_default() == b.get(i).copied().unwrap_or_default()
        })
    }

    /// Складывает многочлены с учетом правил сложения GF256
    fn add_poly(&self, a: RefPoly, b: RefPoly) -> Poly {
        let len = a.len().max(b.len());
        let mut result = vec![0u8; len];

        for i in 0..len {
            let a_val = a.get(i).copied().unwrap_or_default();
            let b_val = b.get(i).copied().unwrap_or_default();
            result[i] = self.add(a_val, b_val);
        }

        result
    }

    /// Умножает многочлены с учетом правил GF256
    fn mul_poly(&self, a: RefPoly, b: RefPoly) -> Poly {
        let mut result = vec![0u8; (a.len() + b.len()).saturating_sub(1).max(1)];

        for (i, &coef_a) in a.iter().enumerate() {
            for (j, &coef_b) in b.iter().enumerate() {
                let product = self.mul(coef_a, coef_b);
                result[i + j] = self.add(result[i + j], product);
            }
        }

        result
    }

    /// Вычисляет значение полинома в точке по схеме Горнера, начиная со
    /// старшего коэффициента.
    fn eval_poly(&self, poly: RefPoly, x: u8) -> u8 {
        let mut result = poly.last().copied().unwrap_or_default();

        for &coef in poly.iter().rev().skip(1) {
            result = self.add(self.mul(result, x), coef);
        }

        result
    }

    /// Умножает коэффициенты многочлена на скаляр
    fn scale_poly(&self, poly: RefPoly, scalar: u8) -> Poly {
        poly.iter().map(|&coef| self.mul(coef, scalar)).collect()
    }

    /// Сдвигает многочлен на n, то есть умножает его на x^n
    fn shift_poly(&self, poly: RefPoly, shift: usize) -> Poly {
        let mut result = vec![0u8; shift];
        result.extend_from_slice(poly);
        result
    }

    /// Вычисляет частное и остаток от деления многочлена на многочлен:
    /// `a = q·b + r`, причем степень r строго меньше степени b.
    /// Остаток возвращается без нулевых старших коэффициентов.
    fn div_rem_poly(&self, dividend: RefPoly, divisor: RefPoly) -> Result<(Poly, Poly)> {
        if self.is_zero_poly(divisor) {
            return Err(DomainError::ZeroPolynomialDivision.into());
        }

        let divisor_degree = self.poly_degree(divisor);
        let leader = divisor[divisor_degree];

        let mut remainder = dividend.to_vec();
        self.rstrip_poly(&mut remainder);

        let dividend_degree = self.poly_degree(&remainder);

        if self.is_zero_poly(&remainder) || dividend_degree < divisor_degree {
            return Ok((vec![0], remainder));
        }

        // Последовательно погашаем старший коэффициент остатка
        let mut quotient = vec![0u8; dividend_degree - divisor_degree + 1];

        for i in (divisor_degree..=dividend_degree).rev() {
            if remainder[i] == 0 {
                continue;
            }

            let coef = self.div(remainder[i], leader);
            quotient[i - divisor_degree] = coef;

            for j in 0..=divisor_degree {
                let product = self.mul(coef, divisor[j]);
                let idx = i - divisor_degree + j;
                remainder[idx] = self.sub(remainder[idx], product);
            }
        }

        remainder.truncate(divisor_degree.max(1));
        self.rstrip_poly(&mut remainder);

        Ok((quotient, remainder))
    }

    /// Расширенный алгоритм Евклида для многочленов.
    ///
    /// Возвращает тройку `(u, v, g)` такую, что `u·a + v·b = g = gcd(a, b)`.
    /// Итерация поддерживает пару коэффициентов Безу и завершается, когда
    /// текущий остаток становится нулевым.
    fn extended_euclidean_poly(&self, a: RefPoly, b: RefPoly) -> Result<(Poly, Poly, Poly)> {
        self.euclidean_iteration(a, b, None)
    }

    /// Вариант Сугиямы: та же итерация Евклида, но с ранним выходом, как
    /// только степень текущего остатка опускается до `upperdeg` (или остаток
    /// обнуляется). Возвращает `(u, v, r)` для текущего остатка r.
    fn sugiyama_euclidean_poly(
        &self,
        a: RefPoly,
        b: RefPoly,
        upperdeg: isize,
    ) -> Result<(Poly, Poly, Poly)> {
        self.euclidean_iteration(a, b, Some(upperdeg))
    }

    fn euclidean_iteration(
        &self,
        a: RefPoly,
        b: RefPoly,
        upperdeg: Option<isize>,
    ) -> Result<(Poly, Poly, Poly)> {
        let mut prev_r = a.to_vec();
        let mut curr_r = b.to_vec();
        self.rstrip_poly(&mut prev_r);
        self.rstrip_poly(&mut curr_r);

        // Инвариант: prev_u·a + prev_v·b = prev_r и curr_u·a + curr_v·b = curr_r
        let (mut prev_u, mut curr_u) = (vec![1u8], vec![0u8]);
        let (mut prev_v, mut curr_v) = (vec![0u8], vec![1u8]);

        loop {
            let reached_bound = match upperdeg {
                Some(bound) => {
                    self.is_zero_poly(&curr_r) || self.poly_degree(&curr_r) as isize <= bound
                }
                None => self.is_zero_poly(&curr_r),
            };
            if reached_bound {
                break;
            }

            let (q, rem) = self.div_rem_poly(&prev_r, &curr_r)?;

            // Вычитание и сложение в GF(256) совпадают
            let next_u = self.add_poly(&prev_u, &self.mul_poly(&q, &curr_u));
            let next_v = self.add_poly(&prev_v, &self.mul_poly(&q, &curr_v));

            prev_r = std::mem::replace(&mut curr_r, rem);
            prev_u = std::mem::replace(&mut curr_u, next_u);
            prev_v = std::mem::replace(&mut curr_v, next_v);
        }

        // Без ограничения степени итерация доходит до нулевого остатка,
        // и НОД лежит в предыдущей строке таблицы. С ограничением ответом
        // является текущая строка.
        let (mut u, mut v, mut r) = if upperdeg.is_some() {
            (curr_u, curr_v, curr_r)
        } else {
            (prev_u, prev_v, prev_r)
        };

        self.rstrip_poly(&mut u);
        self.rstrip_poly(&mut v);
        self.rstrip_poly(&mut r);

        Ok((u, v, r))
    }
}
