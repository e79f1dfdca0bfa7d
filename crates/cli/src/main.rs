//! invoice-gen - render a PDF invoice from billing data

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use invoice::{
    AmountFormat, BillableItem, ImageSource, InvoiceComposer, InvoiceData, ItemOverflow,
    Paragraph, SettingsOverrides,
};
use log::{debug, info};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "invoice-gen", version, about = "Generates a PDF invoice", long_about = None)]
struct Args {
    /// Client identifier (reserved, not used yet)
    #[arg(short, long)]
    client: Option<String>,

    /// Hours worked (reserved, not used yet)
    #[arg(short = 'H', long)]
    hours: Option<String>,

    /// Start of the billing period (reserved, not used yet)
    #[arg(short, long)]
    start: Option<String>,

    /// End of the billing period (reserved, not used yet)
    #[arg(short, long)]
    end: Option<String>,

    /// Where to write the PDF
    #[arg(short, long, default_value = "output.pdf")]
    output: PathBuf,

    /// JSON invoice data; the built-in sample is used without it
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Invoice date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Invoice number
    #[arg(long)]
    number: Option<u32>,

    /// Tax rate in percent
    #[arg(long)]
    tax_rate: Option<Decimal>,

    /// Days until payment is due
    #[arg(long)]
    grace_days: Option<u64>,

    /// Logo path, file:// URI or http(s) URL
    #[arg(long)]
    logo: Option<String>,

    /// Print line amounts with two decimals
    #[arg(long)]
    normalize_amounts: bool,

    /// Fail instead of dropping items that don't fit
    #[arg(long)]
    reject_overflow: bool,
}

impl Args {
    /// Command line values win over the data file
    fn apply_to(&self, settings: &mut SettingsOverrides) {
        if let Some(date) = self.date {
            settings.date = Some(date);
        }
        if let Some(number) = self.number {
            settings.number = Some(number);
        }
        if let Some(rate) = self.tax_rate {
            settings.tax_rate = Some(rate);
        }
        if let Some(days) = self.grace_days {
            settings.grace_days = Some(days);
        }
        if let Some(logo) = &self.logo {
            settings.logo = Some(logo.clone());
        }
        if self.normalize_amounts {
            settings.amount_format = Some(AmountFormat::TwoDecimals);
        }
        if self.reject_overflow {
            settings.overflow = Some(ItemOverflow::Reject);
        }
    }

    fn log_reserved(&self) {
        let reserved = [
            ("client", &self.client),
            ("hours", &self.hours),
            ("start", &self.start),
            ("end", &self.end),
        ];
        for (name, value) in reserved {
            if let Some(value) = value {
                debug!("--{name} {value:?} is accepted but not used");
            }
        }
    }
}

/// Logo, header, addresses, items and the tax registration line
fn compose(composer: &mut InvoiceComposer, items: &[BillableItem], logo: Option<&str>) -> Result<()> {
    if let Some(logo) = logo {
        composer
            .add_logo(&ImageSource::parse(logo))
            .with_context(|| format!("failed to load logo {logo}"))?;
    }

    let header = composer.build_header()?;
    composer.add_table(header);
    composer.add_blank_line();

    let addresses = composer.build_billing_shipping()?;
    composer.add_table(addresses);
    composer.add_blank_line();

    let table = composer
        .build_items(items)
        .context("failed to build the items table")?;
    composer.add_table(table);

    let tax_id = composer.company().tax_id.trim().to_string();
    if !tax_id.is_empty() {
        composer.add_blank_line();
        let label = format!("{} #: {tax_id}", composer.settings().tax_label);
        composer.add_paragraph(Paragraph::new(label).bold());
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    args.log_reserved();
    let today = Local::now().date_naive();

    let mut data = match &args.data {
        Some(path) => InvoiceData::from_file(path)
            .with_context(|| format!("failed to load invoice data from {}", path.display()))?,
        None => {
            info!("no data file given, using the sample invoice");
            InvoiceData::sample(today)
        }
    };
    args.apply_to(&mut data.settings);

    let settings = data.settings.resolve(today);
    let logo = data.settings.logo.clone();
    let mut composer =
        InvoiceComposer::new(data.company, data.client, settings).context("invalid settings")?;

    compose(&mut composer, &data.items, logo.as_deref())?;
    composer
        .render(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Generated {}", args.output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("invoice=info"))
        .init();

    let args = Args::parse();
    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice::{Block, FontWeight};
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_args_parse_short_flags() {
        let args = Args::try_parse_from([
            "invoice-gen", "-c", "ABC", "-H", "40", "-s", "2024-01-01", "-e", "2024-01-31", "-o",
            "out.pdf",
        ])
        .unwrap();
        assert_eq!(args.client.as_deref(), Some("ABC"));
        assert_eq!(args.hours.as_deref(), Some("40"));
        assert_eq!(args.output, PathBuf::from("out.pdf"));
    }

    #[test]
    fn test_output_defaults() {
        let args = Args::try_parse_from(["invoice-gen"]).unwrap();
        assert_eq!(args.output, PathBuf::from("output.pdf"));
        assert!(args.data.is_none());
    }

    #[test]
    fn test_flags_override_file_settings() {
        let args = Args::try_parse_from([
            "invoice-gen",
            "--date",
            "2024-02-01",
            "--number",
            "9",
            "--tax-rate",
            "12.5",
            "--grace-days",
            "14",
            "--normalize-amounts",
            "--reject-overflow",
        ])
        .unwrap();

        let mut overrides = SettingsOverrides {
            number: Some(3),
            ..SettingsOverrides::default()
        };
        args.apply_to(&mut overrides);
        let settings = overrides.resolve(day());

        assert_eq!(settings.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(settings.number, 9);
        assert_eq!(settings.tax_rate, Decimal::new(125, 1));
        assert_eq!(settings.grace_days, 14);
        assert_eq!(settings.amount_format, AmountFormat::TwoDecimals);
        assert_eq!(settings.overflow, ItemOverflow::Reject);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(Args::try_parse_from(["invoice-gen", "--date", "01/02/2024"]).is_err());
    }

    #[test]
    fn test_compose_sample_layout() {
        let data = InvoiceData::sample(day());
        let company = data.company.with_tax_id("123456789RT0001");
        let mut composer =
            InvoiceComposer::new(company, data.client, data.settings.resolve(day())).unwrap();

        compose(&mut composer, &data.items, None).unwrap();

        let kinds: Vec<&str> = composer.blocks().iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            ["table", "paragraph", "table", "paragraph", "table", "paragraph", "paragraph"]
        );
        match composer.blocks().last() {
            Some(Block::Paragraph(p)) => {
                assert_eq!(p.text, "GST #: 123456789RT0001");
                assert_eq!(p.weight, FontWeight::Bold);
            }
            other => panic!("expected the tax id paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_compose_reports_missing_logo() {
        let data = InvoiceData::sample(day());
        let mut composer =
            InvoiceComposer::new(data.company, data.client, data.settings.resolve(day())).unwrap();

        let err = compose(&mut composer, &data.items, Some("/nonexistent/logo.png")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load logo"));
    }
}
