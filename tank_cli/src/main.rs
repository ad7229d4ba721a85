//! # Tankform CLI
//!
//! Terminal front-end for the tank design engine. Prompts for the process
//! parameters a web form would collect, runs the engine, and prints a
//! formatted report plus the raw JSON result.

use std::io::{self, BufRead, Write};

use tank_core::calculations::tank_design::{calculate, thickness_profile, DesignInput};
use tank_core::chemicals;
use tank_core::rules::DesignRules;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    println!("Tankform - API 650 Storage Tank Design Calculator");
    println!("=================================================");
    println!();
    println!("Available chemicals:");
    for (id, name) in chemicals::list() {
        println!("  {:<15} {}", id, name);
    }
    println!();

    let chemical_id = prompt_string("Chemical [acetic_acid]: ", "acetic_acid");
    let chemical = match chemicals::get(&chemical_id) {
        Ok(props) => props,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rate_tpd = prompt_f64("Production rate (t/day) [50.0]: ", 50.0);
    let holding_days = prompt_f64("Holding period (days) [10.0]: ", 10.0);
    let num_tanks = prompt_f64("Number of tanks (1-4) [1]: ", 1.0) as u32;

    let mut input = DesignInput::for_chemical(chemical, rate_tpd, holding_days);
    input.num_tanks = num_tanks;

    let rules = DesignRules::default();

    println!();
    println!("Designing for {} ({})...", chemical.name, chemical.formula);
    println!();

    match calculate(&input, &rules) {
        Ok(result) => {
            println!("═══════════════════════════════════════════════");
            println!("  TANK DESIGN RESULTS");
            println!("═══════════════════════════════════════════════");
            println!();
            println!("Storage:");
            println!("  Total mass:       {:.1} t", result.storage.total_mass.0);
            println!("  Total volume:     {:.1} m³", result.storage.total_volume.0);
            println!(
                "  Required/tank:    {:.1} m³ ({} tank(s), {:.0}% fill)",
                result.storage.per_tank_volume.0,
                result.num_tanks,
                input.fill_fraction * 100.0
            );
            println!();
            println!("Dimensions (each tank):");
            println!("  Diameter:         {:.1} m", result.dimensions.diameter.0);
            println!("  Height:           {:.1} m", result.dimensions.height.0);
            println!(
                "  Capacity:         {:.1} m³ (H/D = {:.2})",
                result.dimensions.actual_volume.0, result.dimensions.aspect_ratio
            );
            println!();
            println!("Shell courses ({}, bottom to top):", result.material);
            println!("  No.  Elev (m)  Head (m)  Required (mm)  Plate (mm)");
            for course in &result.courses {
                println!(
                    "  {:>2}   {:>7.1}  {:>8.1}  {:>13.2}  {:>10.0}",
                    course.course,
                    course.bottom_elevation.0,
                    course.liquid_head.0,
                    course.required_thickness.0,
                    course.nominal_thickness.0
                );
            }
            println!();
            println!("Plates:");
            println!("  Bottom:           {:.1} mm", result.bottom_thickness.0);
            println!("  Roof:             {:.1} mm", result.roof_thickness.0);
            println!();
            println!("Bund volume:        {:.1} m³", result.bund_volume.0);

            if !result.warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &result.warnings {
                    println!("  - {}", warning);
                }
            }

            if let Ok(profile) = thickness_profile(&input, &rules) {
                println!();
                println!("Shell thickness vs height (constant volume):");
                for (h, t) in profile.heights_m.iter().zip(&profile.thicknesses_mm) {
                    println!("  H = {:>5.1} m  ->  {:>4.0} mm", h, t);
                }
            }

            println!();
            println!("JSON Output (for export/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}
