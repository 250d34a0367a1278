use alero::{
    estimates::{DiscountTiers, ProjectRequest, estimate},
    pricing::to_money,
};
use clap::Args;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct EstimateArgs {
    /// Width of the area to cover, in metres
    #[arg(long)]
    width: Decimal,

    /// Length of the area to cover, in metres
    #[arg(long)]
    length: Decimal,

    /// Price per square metre in CLP
    #[arg(long)]
    price: u64,

    /// Skip volume discounts
    #[arg(long)]
    no_discounts: bool,
}

pub(crate) fn run(args: &EstimateArgs) -> Result<(), String> {
    let tiers = if args.no_discounts {
        DiscountTiers::none()
    } else {
        DiscountTiers::standard()
    };

    let result = estimate(
        &ProjectRequest {
            width_m: args.width,
            length_m: args.length,
            unit_price_per_m2: args.price,
        },
        &tiers,
    )
    .map_err(|error| format!("failed to estimate project: {error}"))?;

    let mut builder = Builder::default();

    builder.push_record(["Area (m²)".to_string(), result.area_m2.to_string()]);
    builder.push_record(["Sheets".to_string(), result.sheets_needed.to_string()]);
    builder.push_record(["Subtotal".to_string(), to_money(result.subtotal).to_string()]);
    builder.push_record([
        "Discount".to_string(),
        match result.discount_rate {
            Some(rate) => format!(
                "{} ({}%)",
                to_money(result.discount),
                ((rate * Decimal::ONE) * Decimal::ONE_HUNDRED).normalize()
            ),
            None => to_money(result.discount).to_string(),
        },
    ]);
    builder.push_record(["Total".to_string(), to_money(result.total).to_string()]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    println!("{table}");

    Ok(())
}
