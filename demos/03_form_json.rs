/// form json - lenient parsing of a posted calculator form
use investment_projection_rs::chrono::{TimeZone, Utc};
use investment_projection_rs::{project, ProjectionForm, ProjectionView, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .ok_or("invalid clock")?,
    ));

    // negative and garbage values are coerced, the missing date comes from the clock
    let body = r#"{
        "principal": "2500",
        "mode": "daily",
        "rate": "0.9",
        "months": "3",
        "days": "-4",
        "reinvest_rate": "175",
        "contribution_type": "withdrawal",
        "contribution_amount": "abc",
        "contribution_frequency": "weekly"
    }"#;

    let input = ProjectionForm::from_json(body)?.into_input(&time);
    println!("coerced input: {:#?}\n", input);

    let result = project(&input);
    println!("{}", ProjectionView::from_result(&input, &result).to_json_pretty()?);

    Ok(())
}
