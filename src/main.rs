//! Decay CLI - Evolve a nuclide inventory from JSON input.

use std::fs;
use std::path::PathBuf;

use nuclide_decay::{
    compute::DecayEngine,
    schema::{Inventory, ReferenceTable},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <inventory.json> [seconds]", args[0]);
        eprintln!();
        eprintln!("Evolve a radioactive nuclide inventory over elapsed time.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  inventory.json  Initial masses in grams, keyed by nuclide");
        eprintln!("  seconds         Elapsed time in seconds (default: 3600)");
        eprintln!();
        eprintln!("A reference table is read from <inventory>.table.json when");
        eprintln!("present; otherwise the bundled natural-series dataset is used.");
        eprintln!("Example documents are generated with --example.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_documents();
        return;
    }

    let inventory_path = PathBuf::from(&args[1]);
    let seconds: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3600.0);

    // Load initial inventory
    let inventory_str = fs::read_to_string(&inventory_path).unwrap_or_else(|e| {
        eprintln!("Error reading inventory file: {}", e);
        std::process::exit(1);
    });
    let initial: Inventory = serde_json::from_str(&inventory_str).unwrap_or_else(|e| {
        eprintln!("Error parsing inventory: {}", e);
        std::process::exit(1);
    });

    // Load reference table next to the inventory, or fall back to builtin
    let table_path = inventory_path.with_extension("table.json");
    let table: ReferenceTable = if table_path.exists() {
        let table_str = fs::read_to_string(&table_path).unwrap_or_else(|e| {
            eprintln!("Error reading reference table: {}", e);
            std::process::exit(1);
        });
        ReferenceTable::from_json(&table_str).unwrap_or_else(|e| {
            eprintln!("Error in reference table: {}", e);
            std::process::exit(1);
        })
    } else {
        ReferenceTable::builtin()
    };

    let engine = DecayEngine::new(&table);

    println!("Nuclide Decay");
    println!("=============");
    println!("Reference table: {} nuclides", table.len());
    println!("Elapsed time: {} s", seconds);
    println!();

    let initial_stats = engine.stats(&initial).unwrap_or_else(|e| {
        eprintln!("Error in initial inventory: {}", e);
        std::process::exit(1);
    });

    println!("Initial inventory:");
    println!("  Total mass: {:.6} g", initial_stats.total_mass);
    println!("  Total moles: {:.6e}", initial_stats.total_moles);
    println!("  Activity: {:.4e} Bq", initial_stats.activity_bq);
    println!();

    let evolution = engine.mass_evolution(&initial).unwrap_or_else(|e| {
        eprintln!("Error building evolution: {}", e);
        std::process::exit(1);
    });
    let evolved = evolution.at(seconds).unwrap_or_else(|e| {
        eprintln!("Error evolving inventory: {}", e);
        std::process::exit(1);
    });
    let final_stats = engine.stats(&evolved).unwrap_or_else(|e| {
        eprintln!("Error in evolved inventory: {}", e);
        std::process::exit(1);
    });

    println!("After {} s ({} decay chains):", seconds, evolution.chain_count());
    for (id, mass) in evolved.iter() {
        if mass > 0.0 {
            println!("  {:<8} {:.6e} g", id, mass);
        }
    }
    println!();
    println!("  Total mass: {:.6} g", final_stats.total_mass);
    println!("  Activity: {:.4e} Bq", final_stats.activity_bq);
    println!(
        "Mole conservation: {:.4}%",
        (1.0 - (final_stats.total_moles - initial_stats.total_moles).abs()
            / initial_stats.total_moles)
            * 100.0
    );
}

fn print_example_documents() {
    let inventory = Inventory::from([("Po-216", 1000.0)]);

    println!("Example inventory (inventory.json):");
    println!("{}", serde_json::to_string_pretty(&inventory).unwrap());
    println!();
    println!("Example reference table (inventory.table.json):");
    println!(
        "{}",
        r#"{
  "Po-216": {
    "halfLifeSeconds": 0.145,
    "molarMassGramsPerMole": 216.00192,
    "products": [ { "product": "Pb-212", "branchingRatio": 1.0 } ]
  },
  "Pb-212": {
    "halfLifeSeconds": null,
    "molarMassGramsPerMole": 211.9919
  }
}"#
    );
}
