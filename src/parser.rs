//! Parse target selections typed by the user.
//! Accepted: preset names (t1, t2, t3, sl, tsl) or a signed percentage
//! ("+4%", "-2.5", "custom:-2.5").

use regex::Regex;
use rust_decimal::Decimal;
use std::{str::FromStr, sync::OnceLock};

use crate::error::ValidationError;
use crate::types::{TargetPreset, TargetSelection};

fn custom_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:custom\s*[:=]?\s*)?([+-]?\d+(?:\.\d+)?)\s*%?$").expect("valid regex")
    })
}

pub fn parse_target(text: &str) -> Result<TargetSelection, ValidationError> {
    let t = text.trim();
    if let Some(p) = preset_by_name(t) {
        return Ok(TargetSelection::Preset(p));
    }

    let unknown = || ValidationError::UnknownTarget(text.to_string());
    let c = custom_re().captures(t).ok_or_else(unknown)?;
    let pct = Decimal::from_str(c[1].trim_start_matches('+')).map_err(|_| unknown())?;
    Ok(TargetSelection::Custom(pct))
}

/// Separators are only dropped between word characters, so a sign in front
/// of a preset name ("-t1") is never read as the preset.
fn preset_by_name(t: &str) -> Option<TargetPreset> {
    let starts_word = t.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let ends_word = t.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    if !starts_word || !ends_word {
        return None;
    }
    let key: String = t
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();

    match key.as_str() {
        "t1" | "target1" => Some(TargetPreset::Target1),
        "t2" | "target2" => Some(TargetPreset::Target2),
        "t3" | "target3" => Some(TargetPreset::Target3),
        "sl" | "stoploss" | "stop" => Some(TargetPreset::StopLoss),
        "tsl" | "tightstop" | "sl1" => Some(TargetPreset::TightStop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn must_parse(s: &str) -> TargetSelection {
        parse_target(s).unwrap_or_else(|e| panic!("should parse {s:?}: {e}"))
    }

    // ---------- Presets ----------

    #[test]
    fn preset_names() {
        assert_eq!(must_parse("t1"), TargetSelection::Preset(TargetPreset::Target1));
        assert_eq!(must_parse("Target 2"), TargetSelection::Preset(TargetPreset::Target2));
        assert_eq!(must_parse("T3"), TargetSelection::Preset(TargetPreset::Target3));
        assert_eq!(must_parse("stop-loss"), TargetSelection::Preset(TargetPreset::StopLoss));
        assert_eq!(must_parse("SL"), TargetSelection::Preset(TargetPreset::StopLoss));
        assert_eq!(must_parse("tight_stop"), TargetSelection::Preset(TargetPreset::TightStop));
    }

    // ---------- Custom percentages ----------

    #[test]
    fn signed_percentages() {
        assert_eq!(must_parse("+4%"), TargetSelection::Custom(dec!(4)));
        assert_eq!(must_parse("-2.5"), TargetSelection::Custom(dec!(-2.5)));
        assert_eq!(must_parse("0.75 %"), TargetSelection::Custom(dec!(0.75)));
        assert_eq!(must_parse("custom:-1.25"), TargetSelection::Custom(dec!(-1.25)));
        assert_eq!(must_parse("Custom 6"), TargetSelection::Custom(dec!(6)));
        assert_eq!(must_parse("  2  "), TargetSelection::Custom(dec!(2)));
    }

    // ---------- Rejections ----------

    #[test]
    fn garbage_is_unknown_target() {
        for s in ["", "t9", "moon", "1.2.3", "5%%", "custom:", "--2"] {
            assert!(
                matches!(parse_target(s), Err(ValidationError::UnknownTarget(_))),
                "{s:?} should be rejected"
            );
        }
    }

    #[test]
    fn signed_preset_name_is_rejected() {
        for s in ["-t1", "+sl", "- sl", "_t2", "t3-", "-stop-loss"] {
            assert!(
                matches!(parse_target(s), Err(ValidationError::UnknownTarget(_))),
                "{s:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_keeps_original_text() {
        assert_eq!(
            parse_target(" T 9 "),
            Err(ValidationError::UnknownTarget(" T 9 ".to_string()))
        );
    }
}
