use jiff::SpanRelativeTo;

pub fn parse_duration(input: &str) -> Result<std::time::Duration, String> {
    let duration = if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<i64>() {
        jiff::SignedDuration::from_secs(seconds)
    } else {
        return Err(String::from("Invalid duration"));
    };

    if !duration.is_positive() {
        return Err(String::from("Duration must be positive"));
    }

    std::time::Duration::try_from(duration).map_err(|err| err.to_string())
}
