/// forex plan - profit only on monday to friday, half of it taken out
use investment_projection_rs::chrono::NaiveDate;
use investment_projection_rs::{project, Money, ProjectionInput, ProjectionView, Rate, Span};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let input = ProjectionInput::forex_weekdays(
        Money::from_major(5_000),
        Rate::from_percentage(dec!(0.8)),
        Rate::from_percentage(dec!(50)),
        Span::months(6),
        start,
    );

    let result = project(&input);

    println!("=== forex, weekdays only, 50% reinvested ===\n");
    println!("{} trading days out of {}", result.trading_days_count, result.total_calendar_days);
    println!("balance still trading: {}", (result.final_value - result.withdrawn_profit).round_dp(2));
    println!("profit taken:          {}", result.withdrawn_profit.round_dp(2));
    println!("final value:           {}\n", result.final_value.round_dp(2));

    println!("{}", ProjectionView::from_result(&input, &result).to_json_pretty()?);

    Ok(())
}
