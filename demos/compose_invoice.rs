//! Compose an invoice from `demos/invoice.json` without the CLI
//!
//! Run with: cargo run -p invoice --example compose_invoice

use chrono::NaiveDate;
use invoice::{Align, InvoiceComposer, InvoiceData, Paragraph};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = InvoiceData::from_file("demos/invoice.json")?;
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid date")?;
    let settings = data.settings.resolve(today);

    let mut composer = InvoiceComposer::new(data.company, data.client, settings)?;
    let header = composer.build_header()?;
    composer.add_table(header);
    composer.add_blank_line();
    let addresses = composer.build_billing_shipping()?;
    composer.add_table(addresses);
    composer.add_blank_line();
    let items = composer.build_items(&data.items)?;
    composer.add_table(items);
    composer.add_blank_line();
    composer.add_paragraph(Paragraph::new("Thank you for your business!").align(Align::Center));

    composer.render("demo_invoice.pdf")?;
    println!("Generated demo_invoice.pdf");
    Ok(())
}
