//! Maps provider condition text ("Patchy light rain with thunder") to an icon and colors.
//!
//! Matching is lowercase substring containment against an ordered rule table.
//! The first matching rule wins, so more specific phrases sit above the
//! general keywords they contain ("partly cloudy" before "cloudy",
//! "heavy rain" before "rain", thunder with precipitation before thunder).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sun,
    Moon,
    CloudSun,
    CloudFog,
    Smoke,
    CloudBoltRain,
    CloudBolt,
    CloudSleet,
    CloudHeavyRain,
    CloudRain,
    CloudDrizzle,
    CloudSnow,
    WindSnow,
    Unknown,
}

impl Icon {
    /// Stable symbolic id, usable as an asset name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sun => "sun.max.fill",
            Icon::Moon => "moon.stars.fill",
            Icon::CloudSun => "cloud.sun.fill",
            Icon::CloudFog => "cloud.fog.fill",
            Icon::Smoke => "smoke.fill",
            Icon::CloudBoltRain => "cloud.bolt.rain.fill",
            Icon::CloudBolt => "cloud.bolt.fill",
            Icon::CloudSleet => "cloud.sleet.fill",
            Icon::CloudHeavyRain => "cloud.heavyrain.fill",
            Icon::CloudRain => "cloud.rain.fill",
            Icon::CloudDrizzle => "cloud.drizzle.fill",
            Icon::CloudSnow => "cloud.snow.fill",
            Icon::WindSnow => "wind.snow",
            Icon::Unknown => "questionmark",
        }
    }

    /// Terminal rendering of the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sun => "☀️",
            Icon::Moon => "🌙",
            Icon::CloudSun => "⛅",
            Icon::CloudFog => "🌫️",
            Icon::Smoke => "☁️",
            Icon::CloudBoltRain => "⛈️",
            Icon::CloudBolt => "🌩️",
            Icon::CloudSleet => "🌨️",
            Icon::CloudHeavyRain => "🌧️",
            Icon::CloudRain => "🌦️",
            Icon::CloudDrizzle => "💧",
            Icon::CloudSnow => "❄️",
            Icon::WindSnow => "🌬️",
            Icon::Unknown => "❓",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract color tokens; the renderer decides the concrete shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Yellow,
    White,
    Gray,
    LightGray,
    Blue,
    Cyan,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::Gray => "gray",
            Color::LightGray => "light-gray",
            Color::Blue => "blue",
            Color::Cyan => "cyan",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One or two colors, in layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    primary: Color,
    secondary: Option<Color>,
}

impl Palette {
    pub const fn single(color: Color) -> Self {
        Self { primary: color, secondary: None }
    }

    pub const fn pair(primary: Color, secondary: Color) -> Self {
        Self { primary, secondary: Some(secondary) }
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        std::iter::once(self.primary).chain(self.secondary)
    }

    pub fn len(&self) -> usize {
        if self.secondary.is_some() { 2 } else { 1 }
    }

    /// Never true; a palette always has a primary color.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primary.as_str())?;
        if let Some(secondary) = self.secondary {
            write!(f, "+{secondary}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub icon: Icon,
    pub palette: Palette,
}

/// A row of the rule table.
///
/// Matches when the text contains every keyword in `all_of` and, if `any_of`
/// is non-empty, at least one keyword from `any_of`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub all_of: &'static [&'static str],
    pub any_of: &'static [&'static str],
    pub classification: Classification,
}

impl Rule {
    const fn keyword(keywords: &'static [&'static str], icon: Icon, palette: Palette) -> Self {
        Self { all_of: &[], any_of: keywords, classification: Classification { icon, palette } }
    }

    pub fn matches(&self, normalized: &str) -> bool {
        self.all_of.iter().all(|kw| normalized.contains(kw))
            && (self.any_of.is_empty() || self.any_of.iter().any(|kw| normalized.contains(kw)))
    }
}

pub const FALLBACK: Classification =
    Classification { icon: Icon::Unknown, palette: Palette::single(Color::Yellow) };

/// Evaluated top to bottom; order is precedence.
pub const RULES: &[Rule] = &[
    Rule::keyword(&["sunny"], Icon::Sun, Palette::single(Color::Yellow)),
    Rule::keyword(&["clear"], Icon::Moon, Palette::single(Color::White)),
    Rule::keyword(&["partly cloudy"], Icon::CloudSun, Palette::pair(Color::White, Color::Yellow)),
    Rule::keyword(&["cloudy"], Icon::CloudFog, Palette::pair(Color::Gray, Color::LightGray)),
    Rule::keyword(&["overcast"], Icon::Smoke, Palette::single(Color::Gray)),
    Rule::keyword(&["mist", "fog"], Icon::CloudFog, Palette::pair(Color::Gray, Color::LightGray)),
    Rule {
        all_of: &["thunder"],
        any_of: &["rain", "snow"],
        classification: Classification {
            icon: Icon::CloudBoltRain,
            palette: Palette::pair(Color::White, Color::Blue),
        },
    },
    Rule::keyword(&["thunder"], Icon::CloudBolt, Palette::pair(Color::White, Color::Gray)),
    Rule::keyword(&["freezing"], Icon::CloudSleet, Palette::pair(Color::White, Color::Cyan)),
    Rule::keyword(&["heavy rain"], Icon::CloudHeavyRain, Palette::pair(Color::White, Color::Cyan)),
    Rule::keyword(&["rain"], Icon::CloudRain, Palette::pair(Color::White, Color::Blue)),
    Rule::keyword(&["drizzle"], Icon::CloudDrizzle, Palette::pair(Color::White, Color::Blue)),
    Rule::keyword(&["snow"], Icon::CloudSnow, Palette::pair(Color::Gray, Color::White)),
    Rule::keyword(&["sleet", "ice pellets"], Icon::CloudSleet, Palette::pair(Color::White, Color::Blue)),
    Rule::keyword(&["blizzard"], Icon::WindSnow, Palette::pair(Color::Gray, Color::White)),
];

/// Classifies provider condition text. Total: unmatched text yields [`FALLBACK`].
pub fn classify(condition_text: &str) -> Classification {
    let normalized = condition_text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.classification)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Sunny", Icon::Sun)]
    #[case("Clear", Icon::Moon)]
    #[case("Partly cloudy", Icon::CloudSun)]
    #[case("PARTLY CLOUDY showers", Icon::CloudSun)]
    #[case("Cloudy", Icon::CloudFog)]
    #[case("Overcast", Icon::Smoke)]
    #[case("Mist", Icon::CloudFog)]
    #[case("Freezing fog", Icon::CloudFog)]
    #[case("Patchy light rain with thunder", Icon::CloudBoltRain)]
    #[case("Patchy light snow with thunder", Icon::CloudBoltRain)]
    #[case("Moderate or heavy snow with thunder", Icon::CloudBoltRain)]
    #[case("Thundery outbreaks possible", Icon::CloudBolt)]
    #[case("Light freezing rain", Icon::CloudSleet)]
    #[case("Patchy freezing drizzle possible", Icon::CloudSleet)]
    #[case("Heavy rain at times", Icon::CloudHeavyRain)]
    #[case("Moderate or heavy rain shower", Icon::CloudHeavyRain)]
    #[case("Light rain", Icon::CloudRain)]
    #[case("Patchy rain possible", Icon::CloudRain)]
    #[case("Light drizzle", Icon::CloudDrizzle)]
    #[case("Patchy light snow", Icon::CloudSnow)]
    #[case("Blowing snow", Icon::CloudSnow)]
    #[case("Light sleet", Icon::CloudSleet)]
    #[case("Ice pellets", Icon::CloudSleet)]
    #[case("Blizzard", Icon::WindSnow)]
    fn classifies_provider_conditions(#[case] text: &str, #[case] expected: Icon) {
        assert_eq!(classify(text).icon, expected, "condition text: {text:?}");
    }

    #[rstest]
    #[case("")]
    #[case("supercalifragilistic")]
    #[case("   ")]
    fn unmatched_text_falls_back(#[case] text: &str) {
        assert_eq!(classify(text), FALLBACK);
        assert_eq!(classify(text).palette.len(), 1);
    }

    #[test]
    fn partly_cloudy_never_yields_generic_cloudy() {
        for text in ["partly cloudy", "Partly Cloudy", "PARTLY CLOUDY showers", "Mostly partly cloudy"] {
            let result = classify(text);
            assert_eq!(result.icon, Icon::CloudSun, "{text}");
            assert_eq!(result.palette, Palette::pair(Color::White, Color::Yellow));
        }
    }

    #[test]
    fn thunder_with_snow_is_not_plain_thunder() {
        for text in ["Thundery outbreaks with light snow", "SNOW AND THUNDER", "thundersnow"] {
            assert_eq!(classify(text).icon, Icon::CloudBoltRain, "{text}");
        }
    }

    #[test]
    fn substring_not_whole_word() {
        assert_eq!(classify("rainy").icon, Icon::CloudRain);
        assert_eq!(classify("snowfall").icon, Icon::CloudSnow);
    }

    #[test]
    fn single_color_rules() {
        assert_eq!(classify("Sunny").palette, Palette::single(Color::Yellow));
        assert_eq!(classify("Clear").palette, Palette::single(Color::White));
        assert_eq!(classify("Overcast").palette, Palette::single(Color::Gray));
    }

    #[test]
    fn table_palettes_hold_one_or_two_colors() {
        for rule in RULES {
            let len = rule.classification.palette.colors().count();
            assert!((1..=2).contains(&len));
            assert_eq!(len, rule.classification.palette.len());
        }
    }

    #[test]
    fn palette_display_joins_colors() {
        assert_eq!(Palette::pair(Color::Gray, Color::LightGray).to_string(), "gray+light-gray");
        assert_eq!(Palette::single(Color::Yellow).to_string(), "yellow");
    }
}
