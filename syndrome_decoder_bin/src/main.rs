use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use syndrome_decoder::{BlockCoder, Coder, SyndromeDecoder, gf::FastGF256, new_syndrome_decoder};

const MAX_BLOCK_SIZE: usize = 255;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.controls == 0 || cli.controls >= MAX_BLOCK_SIZE {
        anyhow::bail!(
            "Количество контрольных символов должно быть от 1 до {}",
            MAX_BLOCK_SIZE - 1
        );
    }

    let rs = new_syndrome_decoder(cli.controls);

    match cli.command {
        Command::Encode {
            input,
            input_format,
            output_format,
        } => {
            let data = input_format.parse_input_data(&input)?;
            let block_size = MAX_BLOCK_SIZE - cli.controls;

            let encoded = rs.encode_blocks_to_vec(&data, block_size)?;

            println!("{}", output_format.parse(&encoded)?);
        }
        Command::Decode {
            input,
            input_format,
            output_format,
            decoder,
            erasures,
        } => {
            let data = input_format.parse_input_data(&input)?;

            let decoded = if erasures.is_empty() {
                decode_blocks(&rs, &data, decoder, cli.controls)?
            } else {
                decode_with_erasures(&rs, &data, decoder, &erasures, cli.controls)?
            };

            println!("{}", output_format.parse(&decoded)?);
        }
    };
    Ok(())
}

/// Поблочное декодирование: каждый блок исправляется выбранным алгоритмом,
/// контрольные символы отбрасываются.
fn decode_blocks(
    rs: &SyndromeDecoder<FastGF256>,
    data: &[u8],
    decoder: DecoderKind,
    controls: usize,
) -> Result<Vec<u8>> {
    let mut decoded = Vec::new();

    for chunk in data.chunks(MAX_BLOCK_SIZE) {
        if chunk.len() <= controls {
            anyhow::bail!(
                "Блок из {} байт не содержит данных: {} байт занято контрольными символами",
                chunk.len(),
                controls
            );
        }

        let corrected = match decoder {
            DecoderKind::Bm => rs.bm_decode(chunk)?,
            DecoderKind::Euclidean => rs.euclidean_decode(chunk)?,
        };

        decoded.extend_from_slice(&corrected[controls..]);
    }

    Ok(decoded)
}

/// Декодирование с известными позициями стираний - только для одного блока,
/// так как позиции задаются относительно всего сообщения.
fn decode_with_erasures(
    rs: &SyndromeDecoder<FastGF256>,
    data: &[u8],
    decoder: DecoderKind,
    erasures: &[usize],
    controls: usize,
) -> Result<Vec<u8>> {
    if data.len() > MAX_BLOCK_SIZE {
        anyhow::bail!(
            "Стирания поддерживаются только для одного блока до {} байт, получено {}",
            MAX_BLOCK_SIZE,
            data.len()
        );
    }
    if data.len() <= controls {
        anyhow::bail!(
            "Блок из {} байт не содержит данных: {} байт занято контрольными символами",
            data.len(),
            controls
        );
    }

    let corrected = match decoder {
        DecoderKind::Bm => rs.bm_decode_with_erasures(data, erasures)?,
        DecoderKind::Euclidean => rs.euclidean_decode_with_erasures(data, erasures)?,
    };

    Ok(corrected[controls..].to_vec())
}

#[derive(Parser)]
#[command(version, about = "Декодер Рида-Соломона для QR-кодов", long_about = None)]
struct Cli {
    /// Исполняемая команда
    #[command(subcommand)]
    command: Command,

    /// Количество контрольных символов
    #[arg(short, long, default_value = "10")]
    controls: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Закодировать данные
    Encode {
        /// Входные данные
        input: String,

        /// Тип входных данных
        #[arg(long, default_value = "auto")]
        input_format: DataFormat,

        /// Тип выходных данных
        #[arg(long, default_value = "hex")]
        output_format: OutputFormat,
    },

    /// Декодировать данные, исправив ошибки
    Decode {
        /// Входные данные
        input: String,

        /// Тип входных данных
        #[arg(long, default_value = "auto")]
        input_format: DataFormat,

        /// Тип выходных данных
        #[arg(long, default_value = "auto")]
        output_format: DataFormat,

        /// Алгоритм декодирования
        #[arg(long, default_value = "bm")]
        decoder: DecoderKind,

        /// Позиции стираний через запятую (например: 2,9)
        #[arg(long, value_delimiter = ',')]
        erasures: Vec<usize>,
    },
}

/// Алгоритм поиска локатора ошибок
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DecoderKind {
    /// Берлекэмп-Месси
    Bm,

    /// Расширенный алгоритм Евклида (Сугияма)
    Euclidean,
}

/// Выходной формат — только для бинарных данных
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Шестнадцатеричная строка без 0x (например: a1b2c3)
    Hex,

    /// Байты через пробел (например: 10 20 255)
    Bytes,
}

impl OutputFormat {
    fn parse(&self, data: &[u8]) -> Result<String> {
        match self {
            OutputFormat::Hex => Ok(DataFormat::bytes_to_hex(data)),
            OutputFormat::Bytes => Ok(DataFormat::bytes_to_string(data)),
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum DataFormat {
    /// Автоматическое определение формата
    Auto,

    /// Строка в формате UTF-8 (кодируется в байты)
    Text,

    /// Строка в формате hex (например: a1b2c3 или 0xa1b2c3)
    Hex,

    /// Строка байтов через пробел (например: 10 20 30)
    Bytes,
}

impl DataFormat {
    fn parse(&self, data: &[u8]) -> Result<String> {
        match self {
            DataFormat::Text => Self::bytes_to_text(data),
            DataFormat::Hex => Ok(Self::bytes_to_hex(data)),
            DataFormat::Auto => {
                let text = Self::bytes_to_text(data);
                if text.is_ok() {
                    text
                } else {
                    Ok(Self::bytes_to_hex(data))
                }
            }
            DataFormat::Bytes => Ok(Self::bytes_to_string(data)),
        }
    }

    /// Попытка интерпретировать как UTF-8
    fn bytes_to_text(data: &[u8]) -> Result<String> {
        if let Ok(utf8_str) = std::str::from_utf8(data) {
            // Проверим, что строка "печатающаяся" и не содержит мусора
            if utf8_str
                .chars()
                .all(|c| c.is_ascii_graphic() || c.is_whitespace() || c.is_ascii_control())
            {
                return Ok(utf8_str.to_string());
            }
        }
        anyhow::bail!("Не удалось декодировать как UTF-8: {:#?}", data)
    }

    fn bytes_to_string(data: &[u8]) -> String {
        data.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" ")
    }

    fn bytes_to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join("")
    }

    fn parse_input_data(&self, input: &str) -> Result<Vec<u8>> {
        match self {
            DataFormat::Auto => Self::detect_and_parse(input),
            DataFormat::Text => Ok(input.as_bytes().to_vec()),
            DataFormat::Hex => Self::from_hex(input),
            DataFormat::Bytes => Self::from_bytes(input),
        }
    }

    fn from_hex(input: &str) -> Result<Vec<u8>> {
        let clean = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input);

        if clean.is_empty() {
            return Ok(vec![]);
        }
        if clean.chars().any(|c| !c.is_ascii_hexdigit()) {
            anyhow::bail!("Некорректные символы в hex-строке");
        }
        if clean.len() % 2 != 0 {
            anyhow::bail!("Нечётная длина hex-строки");
        }
        hex::decode(clean).map_err(|e| anyhow::anyhow!("Ошибка парсинга hex: {}", e))
    }

    fn from_bytes(input: &str) -> Result<Vec<u8>> {
        input
            .split_whitespace()
            .map(|s| {
                s.parse::<u8>()
                    .map_err(|_| anyhow::anyhow!("Некорректное число: '{}'", s))
            })
            .collect()
    }

    fn detect_and_parse(input: &str) -> Result<Vec<u8>> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Ok(vec![]);
        }

        // 1. Похоже на hex: только hex-символы (возможно с 0x) и чётная длина
        let clean_hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if !clean_hex.is_empty()
            && clean_hex.chars().all(|c| c.is_ascii_hexdigit())
            && clean_hex.len() % 2 == 0
        {
            return hex::decode(clean_hex).map_err(|e| anyhow::anyhow!("Ошибка парсинга как hex: {}", e));
        }

        // 2. Похоже на список байтов через пробелы
        if trimmed.split_whitespace().count() > 1
            && trimmed.split_whitespace().all(|s| s.parse::<u8>().is_ok())
        {
            return Self::from_bytes(trimmed);
        }

        // 3. По умолчанию — текст (UTF-8)
        Ok(trimmed.as_bytes().to_vec())
    }
}
