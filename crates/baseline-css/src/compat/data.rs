//! Bundled baseline availability snapshot.
//!
//! A point-in-time extract of the public web-features dataset, keyed by the
//! canonical lower-cased identifiers the analyzer produces. The year is the
//! year a feature first became baseline-available. Hosts with fresher data
//! should build their own [`CompatDatabase`]; anything absent here is simply
//! never flagged.

use std::sync::LazyLock;

use super::BaselineStatus::{Newly, NotBaseline, Widely};
use super::{BaselineStatus, CompatDatabase, CompatRecord};

type Entry = (&'static str, BaselineStatus, Option<u16>);

const PROPERTIES: &[Entry] = &[
    ("accent-color", NotBaseline, None),
    ("aspect-ratio", Widely, Some(2021)),
    ("backdrop-filter", Newly, Some(2024)),
    ("background", Widely, Some(2015)),
    ("background-color", Widely, Some(2015)),
    ("border", Widely, Some(2015)),
    ("bottom", Widely, Some(2015)),
    ("box-shadow", Widely, Some(2015)),
    ("clip-path", Widely, Some(2020)),
    ("color", Widely, Some(2015)),
    ("container-name", Newly, Some(2023)),
    ("container-type", Newly, Some(2023)),
    ("content", Widely, Some(2015)),
    ("cursor", Widely, Some(2015)),
    ("display", Widely, Some(2015)),
    ("field-sizing", NotBaseline, None),
    ("font-family", Widely, Some(2015)),
    ("font-size", Widely, Some(2015)),
    ("font-stretch", Widely, Some(2017)),
    ("font-style", Widely, Some(2015)),
    ("font-weight", Widely, Some(2015)),
    ("gap", Widely, Some(2017)),
    ("height", Widely, Some(2015)),
    ("left", Widely, Some(2015)),
    ("line-height", Widely, Some(2015)),
    ("margin", Widely, Some(2015)),
    ("object-fit", Widely, Some(2016)),
    ("opacity", Widely, Some(2015)),
    ("overflow", Widely, Some(2015)),
    ("overscroll-behavior", Widely, Some(2019)),
    ("padding", Widely, Some(2015)),
    ("position", Widely, Some(2015)),
    ("right", Widely, Some(2015)),
    ("scrollbar-gutter", Newly, Some(2024)),
    ("text-align", Widely, Some(2015)),
    ("text-wrap", Newly, Some(2024)),
    ("top", Widely, Some(2015)),
    ("transform", Widely, Some(2015)),
    ("transition", Widely, Some(2015)),
    ("view-transition-name", NotBaseline, None),
    ("width", Widely, Some(2015)),
    ("z-index", Widely, Some(2015)),
];

const PROPERTY_VALUES: &[(&str, &str, BaselineStatus, Option<u16>)] = &[
    ("clip-path", "fill-box", Newly, Some(2023)),
    ("clip-path", "stroke-box", Newly, Some(2023)),
    ("clip-path", "view-box", Newly, Some(2023)),
    ("display", "contents", Widely, Some(2020)),
    ("overflow", "clip", Widely, Some(2022)),
    ("width", "stretch", NotBaseline, None),
];

const AT_RULES: &[Entry] = &[
    ("charset", Widely, Some(2015)),
    ("container", Widely, Some(2023)),
    ("counter-style", Newly, Some(2023)),
    ("font-face", Widely, Some(2015)),
    ("import", Widely, Some(2015)),
    ("keyframes", Widely, Some(2015)),
    ("layer", Widely, Some(2022)),
    ("media", Widely, Some(2015)),
    ("namespace", Widely, Some(2015)),
    ("page", Widely, Some(2015)),
    ("property", Newly, Some(2024)),
    ("scope", NotBaseline, None),
    ("starting-style", Newly, Some(2024)),
    ("supports", Widely, Some(2015)),
    ("view-transition", NotBaseline, None),
];

const SELECTORS: &[Entry] = &[
    ("active", Widely, Some(2015)),
    ("after", Widely, Some(2015)),
    ("backdrop", Widely, Some(2022)),
    ("before", Widely, Some(2015)),
    ("checked", Widely, Some(2015)),
    ("details-content", NotBaseline, None),
    ("disabled", Widely, Some(2015)),
    ("empty", Widely, Some(2015)),
    ("enabled", Widely, Some(2015)),
    ("first-child", Widely, Some(2015)),
    ("focus", Widely, Some(2015)),
    ("focus-visible", Widely, Some(2022)),
    ("fullscreen", NotBaseline, None),
    ("has", Newly, Some(2023)),
    ("hover", Widely, Some(2015)),
    ("is", Widely, Some(2021)),
    ("last-child", Widely, Some(2015)),
    ("nesting", Newly, Some(2023)),
    ("not", Widely, Some(2015)),
    ("nth-child", Widely, Some(2015)),
    ("popover-open", Newly, Some(2024)),
    ("root", Widely, Some(2015)),
    ("user-invalid", Newly, Some(2023)),
    ("user-valid", Newly, Some(2023)),
    ("visited", Widely, Some(2015)),
    ("where", Widely, Some(2021)),
];

const FUNCTIONS: &[Entry] = &[
    ("abs", NotBaseline, None),
    ("anchor", NotBaseline, None),
    ("attr", Widely, Some(2015)),
    ("calc", Widely, Some(2015)),
    ("clamp", Widely, Some(2020)),
    ("color-mix", Newly, Some(2023)),
    ("hsl", Widely, Some(2015)),
    ("hsla", Widely, Some(2015)),
    ("light-dark", Newly, Some(2024)),
    ("linear-gradient", Widely, Some(2015)),
    ("max", Widely, Some(2020)),
    ("min", Widely, Some(2020)),
    ("oklch", Newly, Some(2023)),
    ("rgb", Widely, Some(2015)),
    ("rgba", Widely, Some(2015)),
    ("round", Newly, Some(2024)),
    ("sign", NotBaseline, None),
    ("var", Widely, Some(2017)),
];

const MEDIA_CONDITIONS: &[Entry] = &[
    ("any-hover", Widely, Some(2018)),
    ("any-pointer", Widely, Some(2018)),
    ("aspect-ratio", Widely, Some(2015)),
    ("color-gamut", Widely, Some(2023)),
    ("device-posture", NotBaseline, None),
    ("display-mode", NotBaseline, None),
    ("dynamic-range", Newly, Some(2022)),
    ("height", Widely, Some(2015)),
    ("hover", Widely, Some(2018)),
    ("inverted-colors", NotBaseline, None),
    ("max-height", Widely, Some(2015)),
    ("max-width", Widely, Some(2015)),
    ("min-height", Widely, Some(2015)),
    ("min-width", Widely, Some(2015)),
    ("orientation", Widely, Some(2015)),
    ("pointer", Widely, Some(2018)),
    ("prefers-color-scheme", Widely, Some(2020)),
    ("prefers-contrast", Newly, Some(2022)),
    ("prefers-reduced-motion", Widely, Some(2020)),
    ("resolution", Widely, Some(2015)),
    ("scripting", Newly, Some(2023)),
    ("width", Widely, Some(2015)),
];

pub(super) static BUNDLED: LazyLock<CompatDatabase> = LazyLock::new(|| {
    let mut database = CompatDatabase::new();
    for &(name, status, since) in PROPERTIES {
        database.insert_property(name, CompatRecord::new(status, since));
    }
    for &(property, value, status, since) in PROPERTY_VALUES {
        database.insert_property_value(property, value, CompatRecord::new(status, since));
    }
    for &(name, status, since) in AT_RULES {
        database.insert_at_rule(name, CompatRecord::new(status, since));
    }
    for &(name, status, since) in SELECTORS {
        database.insert_selector(name, CompatRecord::new(status, since));
    }
    for &(name, status, since) in FUNCTIONS {
        database.insert_function(name, CompatRecord::new(status, since));
    }
    for &(name, status, since) in MEDIA_CONDITIONS {
        database.insert_media_condition(name, CompatRecord::new(status, since));
    }
    database
});
