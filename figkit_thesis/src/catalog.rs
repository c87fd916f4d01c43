// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static lookups shared by the figures: engines, features, methods and mixtures.

use peniko::Color;
use peniko::color::palette::css;

/// Search engines in swarm-lane order, bottom to top.
pub const ENGINES: [&str; 3] = ["xtandem", "msgf", "comet"];

/// Features of the rescoring model, in matrix order.
pub const FEATURES: [&str; 5] = [
    "replicate-spectra",
    "precursor-scores",
    "sibling-ions",
    "sibling-modifications",
    "sibling-scores",
];

/// Rescoring methods compared in the identification plots.
pub const METHODS: [&str; 2] = ["IDPEP", "Percolator"];

/// Mixtures offered by the dropdowns.
pub const MIXTURES: [&str; 2] = ["A", "B"];

/// Display name of a search engine.
pub fn pretty_engine(engine: &str) -> &str {
    match engine {
        "xtandem" => "X!Tandem",
        "comet" => "Comet",
        "msgf" => "MS-GF+",
        other => other,
    }
}

/// Display name of a feature.
pub fn pretty_feature(feature: &str) -> &str {
    match feature {
        "replicate-spectra" => "Replicate Spectra",
        "precursor-scores" => "Precursor Scores",
        "sibling-ions" => "Sibling Ions",
        "sibling-modifications" => "Sibling Modifications",
        "sibling-scores" => "Sibling Scores",
        other => other,
    }
}

/// Stroke (`light == false`) or fill (`light == true`) color of a feature.
pub fn feature_color(feature: &str, light: bool) -> Color {
    let (dark, pale) = match feature {
        "replicate-spectra" => ([0xff, 0xd8, 0x00], [0xff, 0xf4, 0xb5]),
        "precursor-scores" => ([0xff, 0x8d, 0x00], [0xff, 0xd1, 0x99]),
        "sibling-ions" => ([0x81, 0x81, 0x00], [0xd1, 0xd1, 0x82]),
        "sibling-modifications" => ([0xbe, 0xb8, 0x6b], [0xe6, 0xe1, 0xa5]),
        "sibling-scores" => ([0x55, 0x6b, 0x2f], [0x9d, 0xad, 0x80]),
        _ => return css::GRAY,
    };
    let [r, g, b] = if light { pale } else { dark };
    Color::from_rgb8(r, g, b)
}

/// Line color of a rescoring method.
pub fn method_color(method: &str) -> Color {
    if method == "IDPEP" {
        css::ORANGE
    } else {
        css::STEEL_BLUE
    }
}

/// How a mixture is named in captions; `C` is the union of `A` and `B`.
pub fn mixture_label(mixture: &str) -> &str {
    if mixture == "C" { "A+B" } else { mixture }
}

/// English ordinal suffix for a replicate number.
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Vertical offset of a feature label above the swarm, staggered so labels do not collide.
pub fn feature_label_padding(feature: &str) -> f64 {
    match feature {
        "replicate-spectra" => 15.0,
        "precursor-scores" => 32.5,
        _ => 50.0,
    }
}

/// `(key, display name)` pairs for the engine lanes.
pub fn engine_lanes() -> Vec<(String, String)> {
    ENGINES
        .iter()
        .map(|e| ((*e).to_owned(), pretty_engine(e).to_owned()))
        .collect()
}

/// `(key, display name)` pairs for the features.
pub fn feature_names() -> Vec<(String, String)> {
    FEATURES
        .iter()
        .map(|f| ((*f).to_owned(), pretty_feature(f).to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn names_fall_back_to_the_key() {
        assert_eq!(pretty_engine("msgf"), "MS-GF+", "known engine");
        assert_eq!(pretty_engine("mascot"), "mascot", "unknown engine");
        assert_eq!(pretty_feature("sibling-ions"), "Sibling Ions", "known feature");
    }

    #[test]
    fn ordinals() {
        let got: Vec<_> = [1, 2, 3, 4, 11, 21].into_iter().map(ordinal_suffix).collect();
        assert_eq!(got, ["st", "nd", "rd", "th", "th", "st"], "suffixes");
    }

    #[test]
    fn feature_colors_come_in_pairs() {
        for f in FEATURES {
            assert_ne!(feature_color(f, true), feature_color(f, false), "{f}");
        }
        assert_eq!(mixture_label("C"), "A+B", "union mixture");
    }
}
