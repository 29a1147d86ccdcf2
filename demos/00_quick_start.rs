/// quick start - minimal example to get started
use investment_projection_rs::{project, Money, ProjectionBuilder, Rate, Decimal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $3,000 at 1.3% a day for 60 days, every gain reinvested
    let input = ProjectionBuilder::new()
        .principal(Money::from_major(3_000))
        .daily(Rate::from_percentage(Decimal::new(13, 1)), Rate::ONE)
        .days(60)
        .build()?;

    let result = project(&input);

    println!("final value:    {}", result.final_value.round_dp(2));
    println!("total interest: {}", result.total_interest.round_dp(2));
    println!("profit:         {}%", result.percentage_profit.round_dp(2));
    println!("trading days:   {}", result.trading_days_count);

    Ok(())
}
