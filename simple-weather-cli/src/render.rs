use chrono::Local;
use simple_weather_core::{TemperatureUnit, WeatherReport};

/// Main screen: icon and condition, temperature, location.
pub fn report(report: &WeatherReport, unit: TemperatureUnit) -> String {
    let icon = report.classification.icon;
    let mut out = format!(
        "{} {}\n   {}\n   {}\n   icon: {} ({})",
        icon.glyph(),
        report.observation.condition_text,
        report.temperature(unit),
        report.label,
        icon,
        report.classification.palette,
    );

    if let Some(updated) = report.observation.last_updated {
        out.push_str(&format!(
            "\n   updated: {}",
            updated.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
    }

    out
}

/// Saved-locations screen, oldest first.
pub fn saved(reports: &[WeatherReport], unit: TemperatureUnit) -> String {
    if reports.is_empty() {
        return "No saved locations yet.".to_string();
    }

    reports
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{:>2}. {} {} | {} | {}",
                i + 1,
                r.classification.icon.glyph(),
                r.label,
                r.observation.condition_text,
                r.temperature(unit),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
