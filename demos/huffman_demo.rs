use huffcode::config::{CodecConfig, Config};
use huffcode::entropy::{bits_to_string, unpack_bits, HuffmanCodec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    huffcode::init();

    let config = CodecConfig::from_env()?;
    let text = "Huffman coding is a greedy algorithm that builds optimal prefix codes.";
    let symbols = text.as_bytes();

    println!("=== huffcode demo ===");
    println!("Input: {} symbols", symbols.len());

    let codec = HuffmanCodec::from_symbols(symbols, &config)?;

    println!("\nSorted frequencies:");
    for entry in codec.sorted_frequencies() {
        if let Some(symbol) = entry.symbol {
            println!("  {:?}  {:.4}", symbol as char, entry.probability);
        }
    }

    println!("\nCodes:");
    let table = codec.encoding_table();
    for (symbol, _) in table.iter() {
        println!(
            "  {:?}  {}",
            symbol as char,
            table.code_string(symbol).unwrap_or_default()
        );
    }

    let packed = codec.encode(symbols)?;
    println!(
        "\nPacked: {} bytes ({:.1}% of input), tree depth {}",
        packed.len(),
        codec.compression_ratio(symbols)? * 100.0,
        codec.tree().depth()
    );
    let preview: String = bits_to_string(&unpack_bits(&packed)).chars().take(48).collect();
    println!("First payload bits: {}...", preview);

    let decoded = codec.decode(&packed)?;
    if decoded == symbols {
        println!("Round trip OK");
    } else {
        return Err("decoded output does not match input".into());
    }

    Ok(())
}
