use std::fs::File;
use std::io::Write;
use crate::timebank::{Ledger, OrgTimeBankPolicy};

/// Formats a signed minute count as hours and minutes, e.g. `+1h 05m`
pub fn format_minutes(minutes: i64) -> String {
    let sign = match minutes.signum() {
        1 => "+",
        -1 => "-",
        _ => "",
    };
    let magnitude = minutes.unsigned_abs();
    format!("{}{}h {:02}m", sign, magnitude / 60, magnitude % 60)
}

fn movement_lines(ledger: &Ledger) -> Vec<String> {
    let mut running = 0i64;
    ledger
        .movements()
        .iter()
        .map(|m| {
            running = running.saturating_add(m.minutes);
            let mut line = format!(
                "{} {:>10} {:<24} balance {}",
                m.date,
                format_minutes(m.minutes),
                m.origin.label(),
                format_minutes(running)
            );
            if let Some(description) = &m.description {
                line.push_str(&format!(" ({})", description));
            }
            line
        })
        .collect()
}

/// Writes an employee's ledger to a text report
pub fn write_ledger_to_file(
    ledger: &Ledger,
    policy: &OrgTimeBankPolicy,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    let summary = ledger.summary(policy);

    writeln!(file, "** Time bank: {} **", ledger.employee_id)?;
    for line in movement_lines(ledger) {
        writeln!(file, "{}", line)?;
    }
    writeln!(file, "Balance: {}", format_minutes(summary.balance_minutes))?;

    Ok(())
}

/// Prints an employee's ledger in a readable format
pub fn print_ledger(ledger: &Ledger, policy: &OrgTimeBankPolicy) {
    let summary = ledger.summary(policy);
    println!("\n=== Time bank: {} ===", ledger.employee_id);
    println!("Movements recorded: {}", summary.movement_count);

    for line in movement_lines(ledger) {
        println!("  {}", line);
    }

    println!(
        "Balance: {} (room until cap: {}, room until deficit limit: {})",
        format_minutes(summary.balance_minutes),
        format_minutes(summary.headroom_positive_minutes),
        format_minutes(summary.headroom_negative_minutes)
    );
    if summary.balance_minutes == policy.upper_bound() {
        println!("⚠️  Balance is at the positive cap; further overtime will be truncated");
    } else if summary.balance_minutes == policy.lower_bound() {
        println!("⚠️  Balance is at the negative limit; further deficit will be truncated");
    }
}
