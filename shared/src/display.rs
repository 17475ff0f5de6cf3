//! Text shaping for prediction results shown in the browser.

const CLASS_PREFIX: &str = "Tomato ";

/// Turns a classifier label such as `Tomato___Early_blight` into `Early blight`.
///
/// Underscores become spaces, the first `Tomato ` is removed, and runs of
/// whitespace collapse to one space.
pub fn display_label(class: &str) -> String {
    let spaced = class.replace('_', " ");
    let stripped = spaced.replacen(CLASS_PREFIX, "", 1);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Percentage with two decimals, e.g. `87.00%`.
pub fn confidence_text(confidence: f32) -> String {
    format!("{:.2}%", f64::from(confidence) * 100.0)
}

/// Whole-percent width for the confidence bar, clamped to the bar.
pub fn confidence_bar_width(confidence: f32) -> u8 {
    let percent = (f64::from(confidence) * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_and_underscores() {
        assert_eq!(display_label("Tomato_Early_blight"), "Early blight");
        assert_eq!(display_label("Tomato___Early_blight"), "Early blight");
        assert_eq!(display_label("Tomato___healthy"), "healthy");
    }

    #[test]
    fn only_first_prefix_is_removed() {
        assert_eq!(
            display_label("Tomato___Tomato_mosaic_virus"),
            "Tomato mosaic virus"
        );
    }

    #[test]
    fn labels_without_prefix_are_kept() {
        assert_eq!(display_label("Potato_Late_blight"), "Potato Late blight");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn confidence_formats_two_decimals() {
        assert_eq!(confidence_text(0.87), "87.00%");
        assert_eq!(confidence_text(1.0), "100.00%");
        assert_eq!(confidence_text(0.0), "0.00%");
    }

    #[test]
    fn bar_width_is_rounded_and_clamped() {
        assert_eq!(confidence_bar_width(0.87), 87);
        assert_eq!(confidence_bar_width(0.996), 100);
        assert_eq!(confidence_bar_width(1.4), 100);
        assert_eq!(confidence_bar_width(-0.2), 0);
    }
}
