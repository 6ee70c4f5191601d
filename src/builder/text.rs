use crate::model::{SiteConfig, SourceDocument, SourceNomination, TextSection};

pub const DEFAULT_TITLE: &str = "Community Awards";
pub const DEFAULT_SUBTITLE: &str = "Celebrating the people who made this year";
pub const DEFAULT_PREFACE_TITLE: &str = "Preface";
pub const DEFAULT_PREFACE_TEXT: &str = "Welcome to this year's awards.";
pub const DEFAULT_AFTERWORD_TITLE: &str = "Afterword";
pub const DEFAULT_AFTERWORD_TEXT: &str = "Thank you to everyone who took part.";

/// Resolve the site text fields of `source`.
///
/// Flat fields win over the nested `preface`/`afterword` shorthand, and
/// anything still unset takes its default. Returns the output document with
/// no nominations yet, plus the raw nominations still to be resolved.
pub(crate) fn normalize_text(source: SourceDocument) -> (SiteConfig, Vec<SourceNomination>) {
    let SourceDocument {
        title,
        subtitle,
        preface_title,
        preface_text,
        afterword_title,
        afterword_text,
        preface,
        afterword,
        nominations,
        extra,
    } = source;

    let TextSection {
        title: nested_preface_title,
        text: nested_preface_text,
    } = preface.unwrap_or_default();
    let TextSection {
        title: nested_afterword_title,
        text: nested_afterword_text,
    } = afterword.unwrap_or_default();

    let config = SiteConfig {
        title: title.unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
        subtitle: subtitle.unwrap_or_else(|| DEFAULT_SUBTITLE.to_owned()),
        preface_title: pick(preface_title, nested_preface_title, DEFAULT_PREFACE_TITLE),
        preface_text: pick(preface_text, nested_preface_text, DEFAULT_PREFACE_TEXT),
        afterword_title: pick(afterword_title, nested_afterword_title, DEFAULT_AFTERWORD_TITLE),
        afterword_text: pick(afterword_text, nested_afterword_text, DEFAULT_AFTERWORD_TEXT),
        nominations: Vec::with_capacity(nominations.len()),
        extra,
    };
    (config, nominations)
}

fn pick(flat: Option<String>, nested: Option<String>, default: &str) -> String {
    flat.or(nested).unwrap_or_else(|| default.to_owned())
}
