use anyhow::{Context, Result};
use std::path::Path;

use crate::finance::{format_rate, AllocationRates, MonthlySummary};
use crate::models::{Kind, NewTransaction, Period};
use crate::ui::app::AppLedger;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], ledger: &mut AppLedger) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, ledger),
        "list" | "ls" => cli_list(rest, ledger),
        "add" => cli_add(rest, ledger),
        "delete" | "rm" => cli_delete(rest, ledger),
        "rates" => cli_rates(rest, ledger),
        "export" => cli_export(rest, ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("coiner {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Coiner - local-only monthly income, expense and allocation tracker");
    println!();
    println!("Usage: coiner [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  summary [YYYY-MM]               Print the monthly summary");
    println!("  list [YYYY-MM]                  List the month's transactions with ids");
    println!("  add <kind> <amount> <description...>");
    println!("    --category <label>            Category label (required)");
    println!("    --month <YYYY-MM>             Month to file under (default: current)");
    println!("  delete <id>                     Delete a transaction");
    println!("  rates <savings> <debt> <invest> Set a month's allocation percentages");
    println!("    --month <YYYY-MM>             Month to configure (default: current)");
    println!("  export [path]                   Export a month to CSV");
    println!("    --month <YYYY-MM>             Month to export (default: current)");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
    println!();
    println!("Kinds: fixed, variable, indispensable, necessary, unnecessary");
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither `--flag` nor a flag's value.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

/// Period from `text`, defaulting the year to the current one. Without
/// `text` the ledger stays on its current month.
fn select_month(text: Option<&str>, ledger: &mut AppLedger) -> Result<Period> {
    if let Some(text) = text {
        let period = Period::parse(text, Period::current().year())?;
        ledger.jump_to(period);
    }
    Ok(ledger.period())
}

// ── Commands ─────────────────────────────────────────────────

fn cli_summary(args: &[String], ledger: &mut AppLedger) -> Result<()> {
    let period = select_month(positional(args).first().copied(), ledger)?;
    let summary = ledger.get_summary(period)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(s: &MonthlySummary) {
    println!("Coiner - {}", s.period.label());
    println!("{}", "─".repeat(44));
    for &kind in Kind::income() {
        println!("  {:<26} {:>14}", kind.label(), format_amount(s.subtotal(kind)));
    }
    println!("  {:<26} {:>14}", "Total Income (A)", format_amount(s.total_income));
    println!();
    for (name, rate, amount) in [
        ("Savings", s.rates.savings, s.allocation.savings),
        ("Debt Payment", s.rates.debt, s.allocation.debt),
        ("Investment", s.rates.investment, s.allocation.investment),
    ] {
        let label = format!("{name} ({})", format_rate(rate));
        println!("  {label:<26} {:>14}", format_amount(amount));
    }
    println!(
        "  {:<26} {:>14}",
        "Total Allocation (B)",
        format_amount(s.allocation.total())
    );
    println!();
    for &kind in Kind::expenses() {
        println!("  {:<26} {:>14}", kind.label(), format_amount(s.subtotal(kind)));
    }
    println!("  {:<26} {:>14}", "Total Expenses (C)", format_amount(s.total_expenses));
    println!("{}", "─".repeat(44));
    println!("  {:<26} {:>14}", "Final Balance", format_amount(s.final_balance));
}

fn cli_list(args: &[String], ledger: &mut AppLedger) -> Result<()> {
    let period = select_month(positional(args).first().copied(), ledger)?;
    let summary = ledger.get_summary(period)?;

    if summary.transaction_count() == 0 {
        println!("No transactions for {}", period.label());
        return Ok(());
    }

    for category in &summary.categories {
        if category.transactions.is_empty() {
            continue;
        }
        println!("{} ({})", category.kind.label(), format_amount(category.subtotal));
        for txn in &category.transactions {
            println!(
                "  {:<6} {:>14}  {:<30} {}",
                txn.id,
                format_amount(txn.amount),
                txn.description,
                txn.category
            );
        }
    }
    Ok(())
}

fn cli_add(args: &[String], ledger: &mut AppLedger) -> Result<()> {
    let pos = positional(args);
    if pos.len() < 3 {
        anyhow::bail!(
            "Usage: coiner add <kind> <amount> <description...> --category <label> [--month <YYYY-MM>]"
        );
    }

    let kind: Kind = pos[0].parse()?;
    let description = pos[2..].join(" ");
    let category = flag_value(args, "--category").unwrap_or("");
    let txn = NewTransaction::parse(kind, pos[1], &description, category)?;

    let period = select_month(flag_value(args, "--month"), ledger)?;
    let id = ledger.add_transaction(&txn)?;
    println!(
        "Added #{id}: {} {} '{}' ({}) to {}",
        kind.label(),
        format_amount(txn.amount()),
        txn.description(),
        txn.category(),
        period.label()
    );
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut AppLedger) -> Result<()> {
    let raw = positional(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: coiner delete <id>"))?;
    let id: i64 = raw
        .parse()
        .with_context(|| format!("Invalid transaction id: {raw}"))?;

    let txn = ledger.delete_transaction(id)?;
    println!(
        "Deleted #{id}: {} '{}' from {}",
        format_amount(txn.amount),
        txn.description,
        txn.period.label()
    );
    Ok(())
}

fn cli_rates(args: &[String], ledger: &mut AppLedger) -> Result<()> {
    let pos = positional(args);
    let period = select_month(flag_value(args, "--month"), ledger)?;

    if pos.is_empty() {
        let rates = ledger.rates_for(period)?;
        println!(
            "{}: savings {}, debt {}, investment {}",
            period.label(),
            format_rate(rates.savings),
            format_rate(rates.debt),
            format_rate(rates.investment)
        );
        return Ok(());
    }

    let rates = AllocationRates::parse_percentages(&pos.join(" "))?;
    ledger.set_rates(rates)?;
    println!(
        "{}: savings {}, debt {}, investment {}",
        period.label(),
        format_rate(rates.savings),
        format_rate(rates.debt),
        format_rate(rates.investment)
    );
    Ok(())
}

fn cli_export(args: &[String], ledger: &mut AppLedger) -> Result<()> {
    let period = select_month(flag_value(args, "--month"), ledger)?;

    // Output path is the first non-flag argument
    let output_path = positional(args)
        .first()
        .map(|a| super::shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/coiner-export-{period}.csv")
        });

    let count = crate::export::export_period(ledger.store(), period, Path::new(&output_path))?;
    if count == 0 {
        println!("No transactions for {}", period.label());
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}
