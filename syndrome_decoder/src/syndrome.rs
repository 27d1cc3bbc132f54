use anyhow::Result;

use crate::{
    Coder, DomainError, Poly, ReedSolomonError, RefPoly,
    gf::{GF256, GF256Poly},
};

/// k – число информационных символов, подлежащих кодированию,
/// n – число кодовых символов в кодируемом блоке.
/// t – количество ошибочных символов, которые может исправить код.
/// n–k = 2t – число контрольных символов.
/// Минимальное расстояние определяется следующим образом: dmin = n–k+1.
///
/// Декодер восстанавливает кодовое слово двумя независимыми путями:
/// алгоритмом Берлекэмпа-Месси и алгоритмом Сугиямы на основе расширенного
/// алгоритма Евклида. Оба пути поддерживают стирания — позиции, о которых
/// известно, что символ в них потерян.
pub struct SyndromeDecoder<T>
where
    T: GF256Poly,
{
    control_count: usize,
    gf: T,
    gen_poly: Poly,
}

impl<T> SyndromeDecoder<T>
where
    T: GF256Poly,
{
    /// Декодер строит порождающий многочлен для указанного количества контрольных символов.
    ///
    /// # Panics
    /// Panics if `control_count` is greater than 255.
    ///
    /// Причина: при вычислении синдромов и локаторов ошибок используются степени примитивного элемента.
    /// Если `i > 255`, то `a^i` начнет повторяться из за цикличности поля Галуа. Это нарушит уникальность
    /// синдромов и сделает невозможным корректное декодирование.
    pub fn new(control_count: usize, gf: T) -> Self {
        if control_count > 255 {
            panic!(
                "The number of control characters cannot exceed 255, actual: {}",
                control_count
            );
        }

        Self {
            control_count,
            gen_poly: Self::build_gen_poly(&gf, control_count),
            gf,
        }
    }

    /// Конструирует порождающий многочлен следующим образом:
    ///
    /// `g(x) = (x + a^0)(x + a^1)...(x + a^(control_count-1))`
    ///
    /// где `a` - примитивный элемент.
    fn build_gen_poly(gf: &T, control_count: usize) -> Poly {
        let mut gen_poly = gf.unit_poly();

        // Умножаем на (x + α^i)
        // По правилу a * (b + c) = a * b + a * c
        for i in 0..control_count {
            let shifted_poly = gf.shift_poly(&gen_poly, 1);

            let alpha_i = gf.alpha_pow(i as i32);
            gen_poly = gf.scale_poly(&gen_poly, alpha_i);

            gen_poly = gf.add_poly(&gen_poly, &shifted_poly);
        }

        gen_poly
    }

    /// Вычисляет многочлен синдромов для принятого слова `data`.
    /// Коэффициент Si получается подстановкой α^i в многочлен сообщения:
    /// `Si = C(α^i)` для i от 0 до control_count - 1.
    ///
    /// Нетрудно убедиться, что если бы сообщение не было искажено, то все коэффициенты Si оказались
    /// бы равны нулю: ведь неискажённое сообщение `C(x)` кратно порождающему многочлену `g(x)`,
    /// для которого числа `a^0, a^1, ..., a^(N-K-1)` являются корнями.
    pub fn calculate_syndromes(&self, data: RefPoly) -> Poly {
        let mut syndromes = vec![0u8; self.control_count];

        for (i, syndrome) in syndromes.iter_mut().enumerate() {
            let point = self.gf.alpha_pow(i as i32);
            *syndrome = self.gf.eval_poly(data, point);
        }

        syndromes
    }

    /// Принятое слово содержит ошибки тогда и только тогда, когда его синдром ненулевой.
    /// Отсутствие ошибок гарантируется лишь если их истинное число не превышает control_count.
    pub fn has_errors(&self, data: RefPoly) -> bool {
        !self.gf.is_zero_poly(&self.calculate_syndromes(data))
    }

    /// Строит локатор стираний по известным позициям:
    ///
    /// `Γ(x) = (1 + α^i1·x)(1 + α^i2·x)...(1 + α^ik·x)`
    ///
    /// Пустой список позиций дает единичный многочлен.
    pub fn erasure_locator(&self, positions: &[usize]) -> Poly {
        let mut locator = self.gf.unit_poly();

        for &position in positions {
            let factor = vec![1, self.gf.alpha_pow(position as i32)];
            locator = self.gf.mul_poly(&locator, &factor);
        }

        locator
    }

    /// Локаторы ошибок – это элементы поля Галуа, степень которых совпадает с позицией
    /// ошибки. Так, если искажён коэффициент при x4, то локатор этой ошибки равен a4, если
    /// искажён коэффициент при x7 то локатор ошибки будет равен a7 и т.п. (а – примитивный член,
    /// т.е. в нашем случае a=2).
    ///
    /// Многочлен локаторов Λ(x) – это многочлен, корни которого обратны локаторам ошибок.
    /// Таким образом, многочлен Λ(x) должен иметь вид `Λ(x) = (1+xX1)(1+xX2)…(1+xXi)`,
    /// где `X1, X2, Xi` – локаторы ошибок. (`1+xXi` обращается в ноль при `x=Xi^(-1) : Xi * Xi^(-1) = 1, 1+1 =0`)
    ///
    /// # Алгоритм Берлекэмпа-Месси
    ///
    /// Итеративный синтез регистра сдвига: на каждом шаге r вычисляется расхождение
    /// Δ текущего локатора с синдромами. Если Δ ненулевое и регистр слишком короток,
    /// его длина увеличивается, а копия предыдущего локатора B(x) нормируется на Δ;
    /// иначе локатор лишь корректируется слагаемым `Δ·x·B(x)`.
    ///
    /// Список стираний `erasures` задает начальное состояние: Λ(x) и B(x) равны
    /// локатору стираний, первые `ρ = erasures.len()` шагов пропускаются. Итоговый
    /// Λ(x) при этом накрывает и ошибки, и стирания.
    ///
    /// При `check = true` дополнительно требуется, чтобы найденный локатор
    /// полностью распадался на корни в GF(256).
    pub fn find_errata_locator(
        &self,
        syndromes: RefPoly,
        erasures: &[usize],
        check: bool,
    ) -> Result<Poly> {
        let n = self.control_count;
        let rho = erasures.len();

        let mut locator = self.erasure_locator(erasures); // Λ(x)
        let mut prev = locator.clone(); // B(x)
        let mut errata_count = rho; // L - текущая длина регистра

        for r in (rho + 1)..=n {
            // Расхождение Δ = Λ₀·S{r-1} + Λ₁·S{r-2} + ... + ΛL·S{r-1-L}
            let mut discrepancy = 0u8;
            for (j, &coef) in locator.iter().enumerate().take(r) {
                let product = self.gf.mul(coef, syndromes[r - 1 - j]);
                discrepancy = self.gf.add(discrepancy, product);
            }

            let shifted_prev = self.gf.shift_poly(&prev, 1); // x·B(x)
            let correction = self.gf.scale_poly(&shifted_prev, discrepancy);

            // Оба присваивания (Λ, B) должны происходить одновременно:
            // правая часть для B читает старый Λ
            if discrepancy == 0 || 2 * errata_count > r + rho - 1 {
                locator = self.gf.add_poly(&locator, &correction);
                prev = shifted_prev;
            } else {
                let normalized = self.gf.scale_poly(&locator, self.gf.inverse(discrepancy));
                locator = self.gf.add_poly(&locator, &correction);
                errata_count = r - errata_count - rho;
                prev = normalized;
            }
        }

        self.gf.rstrip_poly(&mut locator);

        if self.gf.is_zero_poly(&locator) {
            anyhow::bail!(ReedSolomonError::ZeroLocator);
        }

        // Число истинных ошибок v: локатор накрывает и ошибки, и стирания,
        // поэтому его степень равна v + ρ. Исправимо только 2v + ρ <= n.
        let errors = self.gf.poly_degree(&locator) as isize - rho as isize;
        if errors < 0 || 2 * errors + rho as isize > n as isize {
            anyhow::bail!(ReedSolomonError::TooManyErrors {
                errors: errors.max(0) as usize,
                erasures: rho,
                control: n,
            });
        }

        if check
            && self.gf.poly_degree(&locator) > 0
            && self.error_positions(&locator)?.is_empty()
        {
            anyhow::bail!(ReedSolomonError::NoLocatorRoots);
        }

        Ok(locator)
    }

    /// Находит корни многочлена перебором всех 256 элементов поля.
    ///
    /// Каждый кандидат проверяется синтетическим делением на `(x - r)` по схеме
    /// Горнера; найденный корень отщепляется от многочлена, и перебор продолжается
    /// с частным. Возвращается список корней длины `degree(p)`, либо пустой список,
    /// если стольких различных корней в GF(256) нет — например, при кратных корнях.
    pub fn find_roots(&self, poly: RefPoly) -> Poly {
        let mut current = poly.to_vec();
        self.gf.rstrip_poly(&mut current);

        let mut remaining = self.gf.poly_degree(&current);
        let mut roots = Vec::with_capacity(remaining);

        if remaining == 0 {
            return roots;
        }

        for r in 0..=255u8 {
            // Деление на (x - r): коэффициенты частного накапливаются по Горнеру,
            // последний аккумулятор равен остатку, то есть значению p(r)
            let degree = current.len() - 1;
            let mut quotient = vec![0u8; degree];
            let mut acc = current[degree];

            for i in (0..degree).rev() {
                quotient[i] = acc;
                acc = self.gf.add(self.gf.mul(acc, r), current[i]);
            }

            if acc == 0 {
                roots.push(r);
                current = quotient;
                remaining -= 1;

                if remaining == 0 {
                    return roots;
                }
            }
        }

        // Кратные корни или корни вне GF(256)
        Vec::new()
    }

    /// Переводит корни локатора в позиции ошибок: корень `X^(-1)` локатора
    /// обратен локатору ошибки `X = α^i`, поэтому позиция восстанавливается
    /// как `i = (-log α корня) mod 255`.
    ///
    /// Пустой список означает, что локатор не распадается на корни.
    pub fn error_positions(&self, locator: RefPoly) -> Result<Vec<usize>> {
        let roots = self.find_roots(locator);
        let mut positions = Vec::with_capacity(roots.len());

        for &root in &roots {
            if root == 0 {
                // Локатор, делящийся на x, не соответствует ни одной позиции
                anyhow::bail!(ReedSolomonError::NoLocatorRoots);
            }
            positions.push((255 - self.gf.log(root) as usize) % 255);
        }

        Ok(positions)
    }

    /// Вычисляет производную Λ'(x) следующим образом – для чётных степеней производная равна нулю,
    /// для нечётных - степени, как обычно, уменьшенной на 1: `(x^2)' = 0, (x^3)' = x^2`.
    /// В поле характеристики 2 это точное правило: целочисленный множитель i
    /// превращается в `i mod 2`.
    fn locator_derivative(&self, locator: RefPoly) -> Poly {
        let mut derivative = vec![0u8; locator.len().saturating_sub(1).max(1)];

        // Производная для x^0 = 0, поэтому начинаем с 1
        for i in (1..locator.len()).step_by(2) {
            derivative[i - 1] = locator[i];
        }

        self.gf.rstrip_poly(&mut derivative);
        derivative
    }

    /// Многочлен значений ошибок `Ω(x) = S(x)·Λ(x)`, коэффициенты старшие
    /// чем control_count должны быть обнулены.
    fn omega(&self, syndromes: RefPoly, locator: RefPoly) -> Poly {
        let mut omega = self.gf.mul_poly(syndromes, locator);
        omega.truncate(self.control_count.max(1));
        self.gf.rstrip_poly(&mut omega);
        omega
    }

    /// # Алгоритм Форни
    ///
    /// Значение ошибки в позиции k вычисляется в замкнутой форме:
    ///
    /// `Yk = α^k · Ω(α^(-k)) / Λ'(α^(-k))`
    ///
    /// где Λ - локатор ошибок и стираний, Ω - многочлен значений ошибок.
    /// Величины возвращаются в том же порядке, что и позиции.
    pub fn find_error_magnitudes(
        &self,
        locator: RefPoly,
        omega: RefPoly,
        positions: &[usize],
    ) -> Result<Vec<u8>> {
        let derivative = self.locator_derivative(locator);
        let mut magnitudes = Vec::with_capacity(positions.len());

        for &position in positions {
            let x = self.gf.alpha_pow(position as i32);
            let x_inverse = self.gf.alpha_pow(-(position as i32));

            let numerator = self.gf.mul(x, self.gf.eval_poly(omega, x_inverse));
            let denominator = self.gf.eval_poly(&derivative, x_inverse);

            if denominator == 0 {
                // Кратный корень локатора: позиция указана дважды
                anyhow::bail!(ReedSolomonError::ZeroDerivative { position });
            }

            magnitudes.push(self.gf.div(numerator, denominator));
        }

        Ok(magnitudes)
    }

    /// Исправляет ошибки в сообщении. Ошибка на позиции positions[i] с magnitudes[i]
    /// вычитается из сообщения.
    fn correct_errors(
        &self,
        data: RefPoly,
        positions: &[usize],
        magnitudes: &[u8],
    ) -> Result<Poly> {
        let mut corrected = data.to_vec();

        for (&position, &magnitude) in positions.iter().zip(magnitudes.iter()) {
            if position >= corrected.len() {
                anyhow::bail!(ReedSolomonError::PositionOutOfRange {
                    position,
                    len: corrected.len(),
                });
            }
            corrected[position] = self.gf.sub(corrected[position], magnitude);
        }

        Ok(corrected)
    }

    /// Общие проверки входных данных всех декодеров. Нарушение формата сообщения
    /// дает DomainError, превышение числа стираний - ReedSolomonError.
    fn validate(&self, data: RefPoly, erasures: &[usize]) -> Result<()> {
        if data.len() > 255 {
            anyhow::bail!(DomainError::MessageTooLong { len: data.len() });
        }

        for (i, &position) in erasures.iter().enumerate() {
            if position >= data.len() {
                anyhow::bail!(DomainError::ErasureOutOfRange {
                    position,
                    len: data.len(),
                });
            }
            if erasures[..i].contains(&position) {
                anyhow::bail!(DomainError::DuplicateErasure { position });
            }
        }

        if erasures.len() > self.control_count {
            anyhow::bail!(ReedSolomonError::TooManyErasures {
                erasures: erasures.len(),
                control: self.control_count,
            });
        }

        Ok(())
    }

    /// Проверка синдромов после исправления: успешное декодирование обязано
    /// возвращать слово с нулевым синдромом.
    fn verify_correction(&self, corrected: RefPoly) -> Result<()> {
        if self.has_errors(corrected) {
            anyhow::bail!(ReedSolomonError::CorrectionFailed);
        }
        Ok(())
    }

    /// Декодирование алгоритмом Берлекэмпа-Месси без стираний.
    ///
    /// # Шаги декодирования
    /// 1. Вычислить синдромы Si = C(α^i); если все нули, слово не повреждено.
    /// 2. Вычислить Λ(x) с помощью Берлекэмпа-Месси.
    /// 3. Получить корни Λ(x) – локаторы ошибок.
    /// 4. Вычислить Ω(x) = S(x)·Λ(x) и производную Λ'(x).
    /// 5. Получить значения ошибок по Форни и вычесть их из принятого слова.
    pub fn bm_decode(&self, data: RefPoly) -> Result<Poly> {
        self.bm_decode_with_erasures(data, &[])
    }

    /// Декодирование алгоритмом Берлекэмпа-Месси с известными позициями стираний.
    /// Локатор стираний служит начальным состоянием алгоритма, поэтому найденный
    /// Λ(x) сразу накрывает и ошибки, и стирания.
    pub fn bm_decode_with_erasures(&self, data: RefPoly, erasures: &[usize]) -> Result<Poly> {
        self.validate(data, erasures)?;

        let syndromes = self.calculate_syndromes(data);
        if self.gf.is_zero_poly(&syndromes) {
            return Ok(data.to_vec());
        }

        let locator = self.find_errata_locator(&syndromes, erasures, false)?;

        let positions = self.error_positions(&locator)?;
        if positions.is_empty() {
            anyhow::bail!(ReedSolomonError::NoLocatorRoots);
        }

        let omega = self.omega(&syndromes, &locator);
        let magnitudes = self.find_error_magnitudes(&locator, &omega, &positions)?;

        let corrected = self.correct_errors(data, &positions, &magnitudes)?;
        self.verify_correction(&corrected)?;

        Ok(corrected)
    }

    /// Декодирование алгоритмом Сугиямы без стираний.
    pub fn euclidean_decode(&self, data: RefPoly) -> Result<Poly> {
        self.euclidean_decode_with_erasures(data, &[])
    }

    /// # Алгоритм Сугиямы
    ///
    /// Локатор и многочлен значений ошибок находятся совместно расширенным
    /// алгоритмом Евклида для `S(x)·Γ(x)` и `x^n` с ранним выходом:
    ///
    /// `Λ(x)·S(x)·Γ(x) + v(x)·x^n = Ω(x)`
    ///
    /// Итерация останавливается, как только степень остатка Ω опускается до
    /// `(n + ρ)/2 - 1`. Локатор ошибок и стираний равен произведению `Λ(x)·Γ(x)`,
    /// а его корни обязаны дать ровно столько позиций, какова его степень.
    pub fn euclidean_decode_with_erasures(
        &self,
        data: RefPoly,
        erasures: &[usize],
    ) -> Result<Poly> {
        self.validate(data, erasures)?;

        let n = self.control_count;
        let syndromes = self.calculate_syndromes(data);
        if self.gf.is_zero_poly(&syndromes) {
            return Ok(data.to_vec());
        }

        let erasure_locator = self.erasure_locator(erasures); // Γ(x)
        let product = self.gf.mul_poly(&syndromes, &erasure_locator); // S(x)·Γ(x)

        let mut x_n = vec![0u8; n + 1]; // x^n
        x_n[n] = 1;

        let upperdeg = ((n + erasures.len()) / 2) as isize - 1;
        let (error_locator, _, omega) = self.gf.sugiyama_euclidean_poly(&product, &x_n, upperdeg)?;

        let mut errata_locator = self.gf.mul_poly(&error_locator, &erasure_locator);
        self.gf.rstrip_poly(&mut errata_locator);

        // Позиции ошибок из корней Λ(x), затем стирания; порядок обязан
        // совпадать с порядком величин в алгоритме Форни
        let mut positions = self.error_positions(&error_locator)?;
        positions.extend_from_slice(erasures);

        let expected = self.gf.poly_degree(&errata_locator);
        if positions.len() != expected {
            anyhow::bail!(ReedSolomonError::PositionsMismatch {
                found: positions.len(),
                expected,
            });
        }

        let magnitudes = self.find_error_magnitudes(&errata_locator, &omega, &positions)?;

        let corrected = self.correct_errors(data, &positions, &magnitudes)?;
        self.verify_correction(&corrected)?;

        Ok(corrected)
    }

    /// Чистое исправление стираний: все позиции ошибок известны заранее,
    /// искать локатор не нужно — он строится прямо по позициям. Эквивалентно
    /// декодированию, когда число стираний не превышает control_count.
    pub fn fill_erasures(&self, data: RefPoly, erasures: &[usize]) -> Result<Poly> {
        self.validate(data, erasures)?;

        let syndromes = self.calculate_syndromes(data);
        if self.gf.is_zero_poly(&syndromes) {
            return Ok(data.to_vec());
        }

        let locator = self.erasure_locator(erasures);
        let omega = self.omega(&syndromes, &locator);
        let magnitudes = self.find_error_magnitudes(&locator, &omega, erasures)?;

        let corrected = self.correct_errors(data, erasures, &magnitudes)?;
        self.verify_correction(&corrected)?;

        Ok(corrected)
    }
}

impl<T> Coder for SyndromeDecoder<T>
where
    T: GF256Poly,
{
    /// На вход поступает массив байт, что представляет собой многочлен, где элемент `a` под индексом
    /// `i` является коэффициентом при `x^i` -> `a*x^i`.
    ///
    /// 1. Сдвигает данные на control_count позиций, освобождая место для контрольных символов и получая
    /// увеличенный на `x^control_count` многочлен.
    /// 2. Делит полученный полином на порождающий многочлен g(x). Остаток от деления - и есть контрольные символы.
    /// 3. Записывает их в начало полинома.
    fn encode(&self, data: RefPoly) -> Result<Poly> {
        if data.len() + self.control_count > 255 {
            anyhow::bail!(DomainError::MessageTooLong {
                len: data.len() + self.control_count,
            });
        }

        let mut encoded = self.gf.shift_poly(data, self.control_count);

        let (_, remainder) = self.gf.div_rem_poly(&encoded, &self.gen_poly)?;

        for (i, &coef) in remainder.iter().enumerate().take(self.control_count) {
            encoded[i] = coef;
        }

        Ok(encoded)
    }

    /// Декодирует кодовое слово и отбрасывает контрольные символы.
    /// По умолчанию используется путь Берлекэмпа-Месси; оба декодера обязаны
    /// давать одинаковый результат в пределах корректирующей способности кода.
    fn decode(&self, data: RefPoly) -> Result<Poly> {
        let corrected = self.bm_decode(data)?;
        Ok(corrected[self.control_count.min(corrected.len())..].to_vec())
    }
}
