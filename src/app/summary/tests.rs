use super::*;

fn measured_summary() -> Summary {
    Summary {
        total_requests: 4,
        successful_requests: 2,
        throttled_requests: 1,
        other_failed_requests: 1,
        connection_failures: 0,
        requests_per_second: Some(0.5),
        total_time: Some(4.0),
        min_response_time: Some(1.0),
        average_response_time: Some(2.0),
        max_response_time: Some(3.0),
    }
}

fn unmeasured_summary() -> Summary {
    Summary {
        total_requests: 3,
        successful_requests: 0,
        throttled_requests: 0,
        other_failed_requests: 0,
        connection_failures: 3,
        requests_per_second: None,
        total_time: None,
        min_response_time: None,
        average_response_time: None,
        max_response_time: None,
    }
}

#[test]
fn text_report_layout() -> Result<(), String> {
    let rendered = render_text(&measured_summary());
    let expected = "\
--- Load Test Results ---
Total Requests:         4
Successful Requests:    2
Throttled Requests:     1
Other Failed Requests:  1
Connection Failures:    0
Requests Per Second:    0.500000

Total Time:             4.000000s
Min Response Time:      1.000000s
Average Response Time:  2.000000s
Max Response Time:      3.000000s";
    if rendered != expected {
        return Err(format!("Unexpected report:\n{}", rendered));
    }
    Ok(())
}

#[test]
fn undefined_values_render_without_unit() -> Result<(), String> {
    let rendered = render_text(&unmeasured_summary());
    let placeholders = rendered
        .lines()
        .filter(|text| text.ends_with(NOT_AVAILABLE))
        .count();
    if placeholders != 5 {
        return Err(format!("Expected 5 placeholders:\n{}", rendered));
    }
    if rendered.contains("N/As") {
        return Err("Placeholder must not carry a unit".to_owned());
    }
    if !rendered.contains("Connection Failures:    3") {
        return Err(format!("Missing failure count:\n{}", rendered));
    }
    Ok(())
}

#[test]
fn json_report_uses_null_for_undefined() -> Result<(), String> {
    let rendered =
        render_summary(&unmeasured_summary(), OutputFormat::Json).map_err(|err| err.to_string())?;
    let value: serde_json::Value =
        serde_json::from_str(&rendered).map_err(|err| format!("invalid json: {}", err))?;
    if value.get("total_time") != Some(&serde_json::Value::Null) {
        return Err(format!("Expected null total_time: {}", rendered));
    }
    if value.get("connection_failures") != Some(&serde_json::json!(3)) {
        return Err(format!("Unexpected failures: {}", rendered));
    }
    Ok(())
}

#[test]
fn json_report_keeps_measured_values() -> Result<(), String> {
    let rendered =
        render_summary(&measured_summary(), OutputFormat::Json).map_err(|err| err.to_string())?;
    let value: serde_json::Value =
        serde_json::from_str(&rendered).map_err(|err| format!("invalid json: {}", err))?;
    if value.get("requests_per_second") != Some(&serde_json::json!(0.5)) {
        return Err(format!("Unexpected rps: {}", rendered));
    }
    Ok(())
}
