/// contributions - deposits and withdrawals across modes
use investment_projection_rs::chrono::NaiveDate;
use investment_projection_rs::{
    project, ContributionFrequency, ContributionPlan, Money, ProjectionBuilder, Rate, Span,
    WeekdaySet,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;

    // savings account with a monthly deposit
    let savings = ProjectionBuilder::new()
        .principal(Money::from_major(1_000))
        .compound(Rate::from_percentage(dec!(6)), investment_projection_rs::CompoundingFrequency::Monthly)
        .span(Span::years(10))
        .start_date(start)
        .contribution(ContributionPlan::deposit(Money::from_major(200), ContributionFrequency::Monthly))
        .build()?;
    let result = project(&savings);

    println!("=== savings, $200 a month for 10 years ===");
    println!("deposited: {}", result.total_deposits.round_dp(2));
    println!("interest:  {}", result.total_interest.round_dp(2));
    println!("final:     {}\n", result.final_value.round_dp(2));

    // daily plan drawing an income every 22 trading days
    let income = ProjectionBuilder::new()
        .principal(Money::from_major(20_000))
        .daily(Rate::from_percentage(dec!(0.3)), Rate::ONE)
        .span(Span::years(1))
        .start_date(start)
        .weekdays(WeekdaySet::monday_to_friday())
        .contribution(ContributionPlan::withdrawal(Money::from_major(1_000), ContributionFrequency::Monthly))
        .build()?;
    let result = project(&income);

    println!("=== daily plan, $1,000 income every 22 trading days ===");
    println!("withdrawn: {}", result.total_withdrawals.round_dp(2));
    println!("interest:  {}", result.total_interest.round_dp(2));
    println!("final:     {}", result.final_value.round_dp(2));
    for point in &result.series {
        println!("  {}  {:>12}", point.date, point.balance.round_dp(2));
    }

    Ok(())
}
