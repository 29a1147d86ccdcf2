/// compound comparison - the same nominal rate under each compounding frequency
use investment_projection_rs::chrono::NaiveDate;
use investment_projection_rs::{project, CompoundingFrequency, Money, ProjectionBuilder, Rate, Span};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let frequencies = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
    ];

    println!("=== $10,000 at 12% for 5 years ===\n");
    for frequency in frequencies {
        let input = ProjectionBuilder::new()
            .principal(Money::from_major(10_000))
            .compound(Rate::from_percentage(dec!(12)), frequency)
            .span(Span::years(5))
            .start_date(start)
            .build()?;

        let result = project(&input);
        println!(
            "{:<14} final {:>12}  yield {:>6}%",
            format!("{:?}", frequency),
            result.final_value.round_dp(2),
            result.effective_annual_yield.round_dp(2)
        );
    }

    Ok(())
}
