//! Example: Build a `.neo` file from a synthetic ROM set and inspect it.
//!
//! Writes a handful of fake ROM dumps to a temporary directory, converts
//! them, then reads the header back and prints it.

use neo_rom::{read_header, GameMetadata, Genre, NeoBuilder, SourceFileSet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let roms = dir.path().join("roms");
    std::fs::create_dir(&roms)?;

    // Two 1 MiB P ROMs, a fix ROM, one voice bank and a C pair.
    std::fs::write(roms.join("demo_p1.rom"), vec![0x01u8; 1024 * 1024])?;
    std::fs::write(roms.join("demo_p2.rom"), vec![0x02u8; 1024 * 1024])?;
    std::fs::write(roms.join("demo-s1.s1"), vec![0x03u8; 128 * 1024])?;
    std::fs::write(roms.join("demo-m1.m1"), vec![0x04u8; 64 * 1024])?;
    std::fs::write(roms.join("demo-v1.v1"), vec![0x05u8; 512 * 1024])?;
    std::fs::write(roms.join("demo-c1.c1"), vec![0x06u8; 512 * 1024])?;
    std::fs::write(roms.join("demo-c2.c2"), vec![0x07u8; 512 * 1024])?;
    std::fs::write(roms.join("index.html"), b"<html></html>")?;

    let files = SourceFileSet::from_dir(&roms)?;
    println!("Loaded {} ROM files", files.len());

    let metadata = GameMetadata::new("Demo Game", 1994)
        .with_genre(Genre::Fighting)
        .with_ngh("55");
    let path = dir.path().join("demo.neo");
    let container = NeoBuilder::new(metadata).finalize(&files, &path)?;
    println!("Wrote {} ({} bytes)", path.display(), container.bytes.len());

    let header = read_header(&path)?;
    let meta = &header.metadata;
    println!("\n=== NEO Header ===");
    println!("  Name:         {}", meta.name);
    println!("  Manufacturer: {}", meta.manufacturer);
    println!("  Year:         {}", meta.year);
    println!("  Genre:        {}", meta.genre);
    println!("  NGH:          {}", meta.ngh.as_deref().unwrap_or("-"));

    for (label, size) in ["P", "S", "M", "V1", "V2", "C"]
        .iter()
        .zip(header.sizes.to_array())
    {
        println!("  {label:<3} {size:>9} bytes");
    }

    // The 2 MiB program had its banks swapped: P2 comes first.
    let program_start = neo_rom::HEADER_SIZE;
    println!(
        "\nFirst program byte: 0x{:02X}",
        container.bytes[program_start]
    );

    Ok(())
}
