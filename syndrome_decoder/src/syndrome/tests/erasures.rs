use super::*;

#[test]
fn fill_erasures_recovers_up_to_control_count() {
    // Чистые стирания: исправимо до control_count потерянных символов
    for erasures in 1..=10 {
        let mut cf = StressTestConfig::default().with_errata_fn(0, erasures);
        cf.min_control_count = erasures;
        cf.max_control_count = cf.max_control_count.max(erasures);
        cf.min_data_len = erasures;

        stress_test_common(cf, |context, decoder, _message, encoded, corrupted, positions| {
            let filled = decoder
                .fill_erasures(corrupted, positions)
                .with_context(|| format!("{}", context))
                .unwrap();

            assert_eq!(encoded, filled, "{context}");
            check_syndromes(decoder, &filled).unwrap();
        });
    }
}

#[test]
fn fill_erasures_with_untouched_positions() {
    // Стирание позиции, в которой на самом деле стоял ноль, не мешает восстановлению
    let decoder = create_decoder(6);
    let data = vec![0, 0, 7, 0, 9];

    let encoded = decoder.encode(&data).unwrap();

    // Данные начинаются после контрольных символов
    let positions = vec![6, 7, 9];
    let mut corrupted = encoded.clone();
    for &position in &positions {
        corrupted[position] = 0;
    }

    let filled = decoder.fill_erasures(&corrupted, &positions).unwrap();
    assert_eq!(encoded, filled);
}

#[test]
fn fill_erasures_rejects_too_many() {
    let decoder = create_decoder(4);
    let data = vec![1, 2, 3, 4, 5];

    let encoded = decoder.encode(&data).unwrap();
    let error = decoder.fill_erasures(&encoded, &[0, 1, 2, 3, 4]).unwrap_err();

    assert_eq!(
        error.downcast_ref::<ReedSolomonError>(),
        Some(&ReedSolomonError::TooManyErasures {
            erasures: 5,
            control: 4
        })
    );
}

#[test]
fn erasure_validation_errors() {
    let decoder = create_decoder(6);
    let data = vec![1, 2, 3];
    let encoded = decoder.encode(&data).unwrap();

    // Позиция за пределами сообщения
    let error = decoder.fill_erasures(&encoded, &[encoded.len()]).unwrap_err();
    assert_eq!(
        error.downcast_ref::<DomainError>(),
        Some(&DomainError::ErasureOutOfRange {
            position: encoded.len(),
            len: encoded.len()
        })
    );

    // Повторенная позиция
    let error = decoder.fill_erasures(&encoded, &[2, 2]).unwrap_err();
    assert_eq!(
        error.downcast_ref::<DomainError>(),
        Some(&DomainError::DuplicateErasure { position: 2 })
    );

    // Те же проверки действуют для обоих декодеров
    type DecodeFn = fn(&SyndromeDecoder<FastGF256>, RefPoly, &[usize]) -> Result<Poly>;
    let decoders: [DecodeFn; 2] = [
        SyndromeDecoder::bm_decode_with_erasures,
        SyndromeDecoder::euclidean_decode_with_erasures,
    ];

    for decode in decoders {
        let error = decode(&decoder, &encoded, &[encoded.len()]).unwrap_err();
        assert!(error.downcast_ref::<DomainError>().is_some());

        let error = decode(&decoder, &encoded, &[0; 7]).unwrap_err();
        assert!(
            error.downcast_ref::<DomainError>().is_some(),
            "duplicates are reported before the erasure budget: {error:?}"
        );
    }
}

#[test]
fn decode_mixed_errors_and_erasures() {
    // Смешанный режим: 2w + ρ <= n исправимо обоими декодерами
    let configs = [(1, 2), (2, 2), (3, 4), (1, 8), (4, 2)];

    for (errors, erasures) in configs {
        let cf = StressTestConfig::new_errata_config(errors, erasures);

        stress_test_common(cf, |context, decoder, _message, encoded, corrupted, positions| {
            let bm = decoder
                .bm_decode_with_erasures(corrupted, positions)
                .with_context(|| format!("BM {}", context))
                .unwrap();
            assert_eq!(encoded, bm, "BM {context}");

            let euclidean = decoder
                .euclidean_decode_with_erasures(corrupted, positions)
                .with_context(|| format!("Euclidean {}", context))
                .unwrap();
            assert_eq!(encoded, euclidean, "Euclidean {context}");
        });
    }
}

#[test]
fn decode_with_erasures_beats_blind_decoding() {
    // 1 ошибка + 4 стирания при 6 контрольных символах: со списком стираний
    // слово исправимо, вслепую – как правило нет
    let cf = StressTestConfig::new_errata_config(1, 4);

    stress_test_common(cf, |context, decoder, _message, encoded, corrupted, positions| {
        let with_list = decoder
            .bm_decode_with_erasures(corrupted, positions)
            .with_context(|| format!("{}", context))
            .unwrap();

        assert_eq!(encoded, with_list, "{context}");
    });
}
