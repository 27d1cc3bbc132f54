use super::*;

/// Вспомогательная функция для создания декодера с заданным количеством контрольных символов
pub fn create_decoder(control_count: usize) -> SyndromeDecoder<FastGF256> {
    SyndromeDecoder::new(control_count, FastGF256::new())
}

/// Подсветка различий в кодированном сообщении
pub fn diff_highlight(encoded: RefPoly, corrupted: RefPoly) -> String {
    let diff_encoded: Vec<String> = encoded
        .iter()
        .zip(corrupted.iter())
        .map(|(e, c)| {
            if e != c {
                format!("\x1b[91m{}\x1b[0m", c) // красный цвет для различий
            } else {
                format!("{}", c)
            }
        })
        .collect();

    format!("[{}]", diff_encoded.join(", "))
}

/// Искажение кодового слова: возвращает испорченное слово и позиции стираний
pub type CorruptFn = Box<dyn Fn(RefPoly) -> (Poly, Vec<usize>)>;

pub struct StressTestConfig {
    pub decoders_count: usize,
    pub tests_by_decoder: usize,

    pub min_control_count: usize,
    pub max_control_count: usize,

    pub min_data_len: usize,
    pub max_data_len: usize,

    corrupt_fn: CorruptFn,
}

impl StressTestConfig {
    pub fn with_corrupt_fn(mut self, corrupt_fn: impl Fn(RefPoly) -> (Poly, Vec<usize>) + 'static) -> Self {
        self.corrupt_fn = Box::new(corrupt_fn);
        self
    }

    pub fn corrupt(&self, poly: RefPoly) -> (Poly, Vec<usize>) {
        (self.corrupt_fn)(poly)
    }

    /// Вносит `errors` ошибок в случайные различные позиции и дополнительно
    /// затирает нулями `erasures` позиций, которые сообщаются декодеру.
    pub fn with_errata_fn(self, errors: usize, erasures: usize) -> Self {
        self.with_corrupt_fn(move |poly: RefPoly| {
            let mut modified = poly.to_vec();

            // Различные позиции для ошибок и стираний
            let mut positions: Vec<usize> = Vec::new();
            while positions.len() < errors + erasures {
                let index = rand::random_range(0..poly.len());
                if !positions.contains(&index) {
                    positions.push(index);
                }
            }

            let (erased, errored) = positions.split_at(erasures);

            // Стирание: значение теряется, позиция известна
            for &index in erased {
                modified[index] = 0;
            }

            // Ошибка: значение заменяется на произвольное другое
            for &index in errored {
                loop {
                    let error: u8 = rand::random();
                    if error != poly[index] {
                        modified[index] = error;
                        break;
                    }
                }
            }

            (modified, erased.to_vec())
        })
    }

    pub fn with_n_errors_fn(self, n: usize) -> Self {
        self.with_errata_fn(n, 0)
    }

    pub fn new_n_error_config(n: usize) -> Self {
        let mut cf = Self::default();

        // Чтобы декодер мог исправить t ошибок, контрольных символов должно быть 2t
        cf.min_control_count = cf.min_control_count.max(2 * n);
        cf.max_control_count = cf.max_control_count.max(2 * n);

        cf.with_n_errors_fn(n)
    }

    /// Конфигурация для смешанных ошибок и стираний: 2·errors + erasures
    /// контрольных символов достаточно для исправления.
    pub fn new_errata_config(errors: usize, erasures: usize) -> Self {
        let mut cf = Self::default();

        cf.min_control_count = cf.min_control_count.max(2 * errors + erasures);
        cf.max_control_count = cf.max_control_count.max(2 * errors + erasures);
        cf.min_data_len = cf.min_data_len.max(errors + erasures);

        cf.with_errata_fn(errors, erasures)
    }

    pub fn new_one_error_config() -> StressTestConfig {
        Self::new_n_error_config(1)
    }
}

impl Default for StressTestConfig {
    fn default() -> Self {
        Self {
            decoders_count: 10,
            tests_by_decoder: 100,
            max_control_count: 10,
            min_control_count: 1,
            max_data_len: 20,
            min_data_len: 1,
            corrupt_fn: Box::new(|poly: RefPoly| (poly.to_vec(), Vec::new())), // Не вносит ошибок
        }
    }
}

impl std::fmt::Debug for StressTestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StressTestConfig")
            .field("decoders_count", &self.decoders_count)
            .field("tests_by_decoder", &self.tests_by_decoder)
            .field("min_control_count", &self.min_control_count)
            .field("max_control_count", &self.max_control_count)
            .field("min_data_len", &self.min_data_len)
            .field("max_data_len", &self.max_data_len)
            .finish()
    }
}

pub fn stress_test_common<F>(cf: StressTestConfig, test_logic: F)
where
    F: Fn(&mut String, &SyndromeDecoder<FastGF256>, &[u8], &[u8], &[u8], &[usize]),
{
    for j in 0..cf.decoders_count {
        let control = rand::random_range(cf.min_control_count..=cf.max_control_count);
        let decoder = create_decoder(control);

        for i in 1..=cf.tests_by_decoder {
            let len = rand::random_range(cf.min_data_len..=cf.max_data_len);
            let message = rand::random_iter().take(len).collect::<Vec<_>>();

            let mut context = format!(
                "\nIteration: {}, \n\
                Control Count: {control} \n\
                Config: {cf:?} \n\
                Message:\t{message:?}",
                j * cf.tests_by_decoder + i
            );

            let encoded = decoder.encode(&message).unwrap();
            context += &format!("\nEncoded:\t{encoded:?}");

            let (corrupted, erasures) = cf.corrupt(&encoded);
            context += &format!(
                "\nAfter Errors:\t{} Count: {} Erasures: {erasures:?}",
                diff_highlight(&encoded, &corrupted),
                encoded
                    .iter()
                    .zip(corrupted.iter())
                    .filter(|(e, c)| e != c)
                    .count(),
            );

            assert_eq!(
                encoded.len(),
                corrupted.len(),
                "corrupt_fn should not change length. {}",
                context
            );

            // Вызов уникальной логики теста
            test_logic(&mut context, &decoder, &message, &encoded, &corrupted, &erasures);
        }
    }
}

/// Проверка, что синдромы равны нулю
pub fn check_syndromes(decoder: &SyndromeDecoder<FastGF256>, encoded: RefPoly) -> Result<()> {
    let syndromes = decoder.calculate_syndromes(encoded);

    if syndromes.iter().any(|&s| s != 0) {
        anyhow::bail!(
            "Syndromes: {syndromes:?} should be all zero for \n\
            Encoded: {encoded:?} \n\
            Generator polynomial: {:?}",
            decoder.gen_poly,
        )
    }
    Ok(())
}
