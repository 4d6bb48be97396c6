//! Plain-text rendering of resource lists and detail panels.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use smile_core::{AppointmentDetails, ListView, Procedure, Record, RemoteResources, ResourceList};
use std::fmt::Write;

fn table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

/// Heading followed by the table, or by the error message alone when the load failed.
pub fn render_list<R>(list: &ResourceList<R>) -> String
where
    R: RemoteResources + ?Sized,
{
    let spec = list.spec();
    let mut out = format!("{}\n", spec.title);

    match list.view() {
        ListView::Loading => out.push_str("Loading...\n"),
        ListView::Error(message) => {
            let _ = writeln!(out, "{}", message);
        }
        ListView::Table(records) => {
            let mut table = table();
            let mut header = vec!["ID".to_string()];
            header.extend(spec.table_columns().map(|f| f.label.to_string()));
            table.set_header(header);

            for record in records {
                let mut row = vec![record.id.to_string()];
                row.extend(list.display_row(record));
                table.add_row(row);
            }
            let _ = writeln!(out, "{}", table);
            if let Some(message) = list.lookup_error() {
                let _ = writeln!(out, "{}", message);
            }
        }
    }
    out
}

/// Every field of one record, labelled.
pub fn render_record<R>(list: &ResourceList<R>, record: &Record) -> String
where
    R: RemoteResources + ?Sized,
{
    let spec = list.spec();
    let mut out = format!("{} {}\n", spec.singular, record.id);
    for field in spec.detail_fields() {
        let _ = writeln!(out, "{}: {}", field.label, list.display_value(record, field));
    }
    out
}

pub fn render_appointment(details: &AppointmentDetails) -> String {
    let mut out = format!("Appointment {}\n", details.id);
    for (label, value) in details.lines() {
        let _ = writeln!(out, "{}: {}", label, value);
    }
    out
}

pub fn render_procedures(procedures: &[Procedure]) -> String {
    let mut table = table();
    table.set_header(vec!["Code", "Procedure"]);
    for procedure in procedures {
        table.add_row(vec![procedure.code.as_str(), procedure.label.as_str()]);
    }
    format!("{}\n", table)
}
