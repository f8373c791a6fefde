//! Order summary

use std::io;

use rusty_money::{Formatter, Money, Params, Position, iso::IDR};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Color, Style, Theme, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{items::LineItem, pricing};

/// Errors that can occur while rendering an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The summary could not be written to the output.
    #[error("IO error")]
    Io,
}

/// Format a whole-rupiah amount for display, e.g. `Rp 70.000`.
///
/// Rupiah prices are displayed with dot digit grouping and no decimal
/// subunit, matching the storefront's locale convention.
#[must_use]
pub fn format_idr(amount: i64) -> String {
    let money = Money::from_major(amount, IDR);

    let params = Params {
        digit_separator: '.',
        rounding: Some(0),
        symbol: Some("Rp"),
        positions: &[Position::Sign, Position::Symbol, Position::Space, Position::Amount],
        ..Params::default()
    };

    Formatter::money(&money, params)
}

/// Write an order summary table for the given items, followed by subtotal,
/// tax (PPN 11%) and total lines.
///
/// An empty cart renders the storefront's empty-cart notice instead of a
/// table.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the summary cannot be written.
pub fn write_summary(mut out: impl io::Write, items: &[LineItem]) -> Result<(), SummaryError> {
    if items.is_empty() {
        return writeln!(out, "Keranjang Anda kosong").map_err(|_err| SummaryError::Io);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Layanan", "Harga Satuan", "Qty", "Jumlah"]);

    let mut item_boundary_rows: SmallVec<[usize; 16]> = smallvec![];

    for (idx, item) in items.iter().enumerate() {
        item_boundary_rows.push(idx + 1);

        let label = match item.category.as_deref() {
            Some(category) => format!("{} ({category})", item.name),
            None => item.name.clone(),
        };

        builder.push_record([
            format!("#{:<3}", idx + 1),
            label,
            format_idr(item.unit_price),
            item.quantity.to_string(),
            format_idr(item.line_total()),
        ]);
    }

    write_summary_table(&mut out, builder, &item_boundary_rows)?;
    write_summary_totals(&mut out, items)?;

    Ok(())
}

fn write_summary_table(
    out: &mut impl io::Write,
    builder: Builder,
    item_boundary_rows: &[usize],
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in item_boundary_rows {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::Io)
}

fn write_summary_totals(
    out: &mut impl io::Write,
    items: &[LineItem],
) -> Result<(), SummaryError> {
    let totals = pricing::price(items);

    let rows = [
        ("Subtotal:", format_idr(totals.subtotal)),
        ("Pajak (11%):", format_idr(totals.tax)),
        ("Total:", format_idr(totals.total)),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")
            .map_err(|_err| SummaryError::Io)?;
    }

    writeln!(out).map_err(|_err| SummaryError::Io)
}
