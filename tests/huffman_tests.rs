//! Integration tests for the Huffman coding pipeline
//!
//! Covers the end-to-end scenarios of the crate:
//! - Frequency-skewed input gets short codes for frequent symbols
//! - Single-symbol input with its synthetic companion
//! - Empty input
//! - Truncated packed streams
//! - File workflow with out-of-band tree transport

use huffcode::config::{CodecConfig, Config};
use huffcode::entropy::{
    bits_to_string, pack_bit_string, unpack_bits, EncodingTable, FrequencyAnalyzer, HuffmanCodec,
    HuffmanDecoder, HuffmanTree,
};
use huffcode::error::HuffmanError;
use huffcode::io::{decode_file, encode_file, read_packed_from_file, ReaderSymbolSource};
use tempfile::tempdir;

/// Frequent symbols get shorter codes and the stream round-trips
#[test]
fn test_skewed_input_round_trip() {
    let input = b"aaabbc";
    let codec = HuffmanCodec::from_symbols(input, &CodecConfig::default()).unwrap();

    let frequencies = codec.sorted_frequencies();
    assert!((frequencies.probability_of(b'a').unwrap() - 0.5).abs() < 1e-9);
    assert!((frequencies.probability_of(b'b').unwrap() - 0.333).abs() < 1e-3);
    assert!((frequencies.probability_of(b'c').unwrap() - 0.1667).abs() < 1e-3);

    let table = codec.encoding_table();
    assert!(table.get(b'a').unwrap().len() < table.get(b'c').unwrap().len());

    let packed = codec.encode(input).unwrap();
    assert_eq!(codec.decode(&packed).unwrap(), input.to_vec());
}

/// A single distinct symbol gets a companion and a one-bit code
#[test]
fn test_single_symbol_round_trip() {
    let input = b"zzzz";
    let codec = HuffmanCodec::from_symbols(input, &CodecConfig::default()).unwrap();

    let frequencies = codec.sorted_frequencies();
    assert_eq!(frequencies.len(), 2);
    let companion = frequencies.companion().unwrap();
    assert_eq!(companion, b'z' + 1);
    assert_eq!(frequencies.probability_of(companion), Some(0.0));

    assert_eq!(codec.encoding_table().get(b'z').unwrap().len(), 1);

    let packed = codec.encode(input).unwrap();
    // 4 payload bits behind 4 padding bits: exactly one byte
    assert_eq!(packed.len(), 1);
    assert_eq!(codec.decode(&packed).unwrap(), input.to_vec());
}

/// Empty input never reaches tree construction
#[test]
fn test_empty_input() {
    let result = FrequencyAnalyzer::default().analyze(b"");
    assert!(matches!(result, Err(HuffmanError::EmptyInput)));

    let result = HuffmanCodec::from_symbols(b"", &CodecConfig::default());
    assert!(matches!(result, Err(HuffmanError::EmptyInput)));

    assert!(matches!(
        HuffmanTree::from_symbols(b"", &CodecConfig::default()),
        Err(HuffmanError::EmptyInput)
    ));
}

/// Bytes too short to reach a leaf fail to decode
#[test]
fn test_truncated_stream() {
    let codec = HuffmanCodec::from_symbols(b"wxyz", &CodecConfig::default()).unwrap();
    let packed = pack_bit_string("1").unwrap();

    let err = codec.decode(&packed).unwrap_err();
    assert!(matches!(err, HuffmanError::TruncatedStream { .. }));
    assert_eq!(err.category(), "decode");
}

/// Dropping the tail of a valid stream is detected
#[test]
fn test_cut_stream_detected_or_shorter() {
    let input = b"the rain in spain falls mainly on the plain";
    let codec = HuffmanCodec::from_symbols(input, &CodecConfig::default()).unwrap();
    let bits = {
        let packed = codec.encode(input).unwrap();
        unpack_bits(&packed)
    };

    let decoder = HuffmanDecoder::new(codec.tree()).unwrap();
    for cut in 1..bits.len() {
        match decoder.decode_bits(&bits[..cut]) {
            Ok(symbols) => assert!(input.starts_with(&symbols)),
            Err(err) => assert!(matches!(err, HuffmanError::TruncatedStream { .. })),
        }
    }
}

/// Codes shown as text follow the left-0 / right-1 convention
#[test]
fn test_code_strings() {
    let codec = HuffmanCodec::from_symbols(b"aabc", &CodecConfig::default()).unwrap();
    let table = codec.encoding_table();

    // b and c (0.25 each) merge first; that node ties with a (0.5) and a wins the tie
    assert_eq!(table.code_string(b'a').as_deref(), Some("0"));
    assert_eq!(table.code_string(b'b').as_deref(), Some("10"));
    assert_eq!(table.code_string(b'c').as_deref(), Some("11"));

    let packed = codec.encode(b"cab").unwrap();
    assert_eq!(bits_to_string(&unpack_bits(&packed)), "11010");
}

/// Every byte value survives with the byte preset
#[test]
fn test_full_byte_alphabet() {
    let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let codec = HuffmanCodec::from_symbols(&input, &CodecConfig::byte_preset()).unwrap();
    assert_eq!(codec.encoding_table().len(), 256);
    assert_eq!(codec.encoding_table().max_code_length(), 8);

    let packed = codec.encode(&input).unwrap();
    assert_eq!(codec.decode(&packed).unwrap(), input);
}

/// The ASCII default rejects bytes above 127
#[test]
fn test_ascii_alphabet_rejects_high_bytes() {
    let result = HuffmanCodec::from_symbols(&[b'a', 0xC3, 0xA9], &CodecConfig::default());
    assert!(matches!(
        result,
        Err(HuffmanError::SymbolOutOfRange { symbol: 0xA9, .. })
    ));
}

/// Encode to a file, ship the tree as JSON, decode in a "different process"
#[test]
fn test_file_workflow_with_tree_sidecar() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("poem.txt");
    let encoded = dir.path().join("poem.huff");
    let sidecar = dir.path().join("poem.tree.json");
    let decoded = dir.path().join("poem.out.txt");

    let text = "Tyger Tyger, burning bright,\nIn the forests of the night;\n";
    std::fs::write(&input, text).unwrap();

    let codec = encode_file(&input, &encoded, &CodecConfig::default()).unwrap();
    codec.tree().save_to_file(&sidecar).unwrap();
    drop(codec);

    let tree = HuffmanTree::load_from_file(&sidecar).unwrap();
    let count = decode_file(&tree, &encoded, &decoded).unwrap();

    assert_eq!(count, text.len());
    assert_eq!(std::fs::read_to_string(&decoded).unwrap(), text);

    let packed = read_packed_from_file(&encoded).unwrap();
    assert!(packed.len() < text.len());
}

/// Codec built from a reader matches one built from a slice
#[test]
fn test_codec_from_reader_source() {
    let text = b"peter piper picked a peck of pickled peppers";
    let mut source = ReaderSymbolSource::new(std::io::Cursor::new(text.to_vec()));

    let from_reader = HuffmanCodec::from_source(&mut source, &CodecConfig::default()).unwrap();
    let from_slice = HuffmanCodec::from_symbols(text, &CodecConfig::default()).unwrap();

    assert_eq!(from_reader.tree(), from_slice.tree());
    assert_eq!(from_reader.encoding_table(), from_slice.encoding_table());
}

/// Configuration loaded from disk drives the analyzer
#[test]
fn test_config_file_drives_codec() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("codec.json");
    CodecConfig::byte_preset().save_to_file(&path).unwrap();

    let config = CodecConfig::load_from_file(&path).unwrap();
    let codec = HuffmanCodec::from_symbols(&[0xFF, 0xFF], &config).unwrap();
    assert_eq!(codec.sorted_frequencies().companion(), Some(0));

    let table: &EncodingTable = codec.encoding_table();
    assert!(table.contains(0));
    assert!(table.contains(0xFF));
}

/// A hand-built config with a one-symbol alphabet never reaches tree building
#[test]
fn test_codec_rejects_invalid_alphabet() {
    let config = CodecConfig {
        alphabet_size: 1,
        ..CodecConfig::default()
    };
    assert!(matches!(
        HuffmanCodec::from_symbols(&[0, 0, 0], &config),
        Err(HuffmanError::Configuration { .. })
    ));
}
