//! # Colmin CLI
//!
//! Terminal front-end for the column dimensioning engine. Prompts for the
//! design inputs, runs the solver, and prints the resulting section both as
//! a human summary and as JSON.
//!
//! Each solve is independent; batch runs can simply invoke the engine once
//! per load case (in parallel if desired - solves share no state).

use std::io::{self, BufRead, Write};

use colmin_core::calculations::column::{solve, ColumnDesignInput, DesignPhase};
use colmin_core::units::{KiloNewtonMeters, KiloNewtons, NewtonMillimeters, Newtons};

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

fn main() {
    println!("Colmin CLI - Minimum Column Dimensions (NEN-EN 1992-1-1)");
    println!("========================================================");
    println!();
    println!("Units: N, mm, MPa. Compression is negative.");
    println!();

    let m1_knm = prompt_f64("End moment M1 (kNm) [0.0]: ", 0.0);
    let m2_knm = prompt_f64("End moment M2 (kNm) [0.0]: ", 0.0);
    let ned_kn = prompt_f64("Axial force Ned (kN) [-900.0]: ", -900.0);
    let fck = prompt_f64("Concrete strength fck (MPa) [20.0]: ", 20.0);
    let rho = prompt_f64("Reinforcement ratio (fraction) [0.01]: ", 0.01);
    let l0_mm = prompt_f64("Buckling length l0 (mm) [3000.0]: ", 3000.0);
    let phi_eff = prompt_f64("Effective creep factor [1.0]: ", 1.0);

    let input = ColumnDesignInput::new(
        "CLI column",
        NewtonMillimeters::from(KiloNewtonMeters(m1_knm)).value(),
        NewtonMillimeters::from(KiloNewtonMeters(m2_knm)).value(),
        Newtons::from(KiloNewtons(ned_kn)).value(),
        fck,
        rho,
        l0_mm,
        phi_eff,
    );

    println!();
    let result = match solve(&input) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("Input rejected: {}", error);
            std::process::exit(1);
        }
    };

    match result.phase {
        DesignPhase::AxialSearch => println!("Axial-minimum section carries the moment."),
        DesignPhase::JointSearch => println!(
            "Joint moment/axial search ({} + {} iterations).",
            result.axial_iterations, result.joint_iterations
        ),
    }

    match &result.solution {
        Some(design) if result.validity => {
            println!();
            println!(
                "Section:       {:.0} x {:.0} mm",
                design.width_mm, design.height_mm
            );
            println!("As per face:   {:.0} mm2", design.as_mm2);
            println!("Mrd:           {:.1} kNm", design.mrd().value());
            println!("Nrd:           {:.1} kN", design.nrd().value());
            println!("M0Ed + M2:     {:.1} kNm", design.governing_moment().value());
        }
        Some(_) => {
            println!("Did not converge; last trial retained for inspection only.");
        }
        None => {
            println!("Search diverged; no section assigned.");
        }
    }

    println!();
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(error) => eprintln!("Could not serialize result: {}", error),
    }
}
