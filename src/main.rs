//! Interactive phase estimation demo
//!
//! Prompts for a counting-register size and a phase θ (decimal or
//! fraction), runs the estimation circuit for the controlled unitary
//! U = diag(1, e^{2πiθ}), and prints the estimated θ next to the actual
//! value together with the leading histogram entries.

use std::error::Error;
use std::f64::consts::PI;
use std::io::{self, BufRead, Write};

use num_rational::Ratio;

use kickback::estimation::{controlled_phase, estimate_phase, DEFAULT_SHOTS};

/// Parse θ from a decimal ("0.25") or a fraction ("1/7")
fn parse_theta(input: &str) -> Option<f64> {
    let trimmed = input.trim();

    if let Ok(value) = trimmed.parse::<f64>() {
        return value.is_finite().then_some(value);
    }

    let (numer, denom) = trimmed.split_once('/')?;
    let numer: i64 = numer.trim().parse().ok()?;
    let denom: i64 = denom.trim().parse().ok()?;
    if denom == 0 {
        return None;
    }

    let ratio = Ratio::new(numer, denom);
    Some(*ratio.numer() as f64 / *ratio.denom() as f64)
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn main() -> Result<(), Box<dyn Error>> {
    let bits: usize = prompt("Number of bits: ")?.trim().parse()?;

    let input = prompt("Theta to estimate: ")?;
    let theta = match parse_theta(&input) {
        Some(value) => value,
        None => {
            println!("Invalid theta {:?}. Using theta = 1/7", input.trim());
            1.0 / 7.0
        }
    };

    let outcome = estimate_phase(controlled_phase(2.0 * PI * theta), bits, DEFAULT_SHOTS)?;

    println!();
    println!(
        "Estimated theta: {}/2^{} = {}",
        outcome.best_index, bits, outcome.estimate
    );
    println!("Actual theta:    {}", theta.rem_euclid(1.0));

    let mut rows: Vec<(usize, usize)> = outcome.counts.iter().map(|(&m, &c)| (m, c)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!();
    println!("Top outcomes:");
    for (index, count) in rows.into_iter().take(5) {
        println!(
            "  |{:0width$b}⟩  {:>6}  ({:.1}%)",
            index,
            count,
            100.0 * count as f64 / outcome.shots as f64,
            width = bits
        );
    }

    Ok(())
}
