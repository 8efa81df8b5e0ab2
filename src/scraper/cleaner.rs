use regex::Regex;
use std::sync::LazyLock;

// ── Patterns ──────────────────────────────────────────────────────────────────

static RE_ANIME_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/anime/(\d+)/").expect("invalid regex: anime id"));

static RE_LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("invalid regex: float")
});

static RE_LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("invalid regex: int"));

static RE_EPISODES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+|\?)\s*eps").expect("invalid regex: episodes"));

static RE_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*min").expect("invalid regex: duration"));

static RE_AIR_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][a-z]{2}\s+\d{1,2},\s+\d{4}").expect("invalid regex: air date")
});

const RASTER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
const PREFERRED_IMAGE_EXT: &str = "webp";

// ── Field parsers ─────────────────────────────────────────────────────────────

/// "/anime/59978/Sousou_no_Frieren" → "59978"
pub fn parse_anime_id(href: &str) -> Option<String> {
    RE_ANIME_ID.captures(href).map(|c| c[1].to_string())
}

/// Lenient decimal parse. "8.50" → 8.5 | "N/A", "?", "" → None | "abc" → None
pub fn parse_score(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "N/A" || s == "?" {
        return None;
    }
    let prefix = RE_LEADING_FLOAT.find(s)?;
    prefix.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Member count with thousands separators. "12,345" → 12345
pub fn parse_audience(s: &str) -> Option<i64> {
    let s = s.trim().replace(',', "");
    if s.is_empty() {
        return None;
    }
    RE_LEADING_INT.find(&s)?.as_str().parse().ok()
}

/// Make an image reference absolute and prefer the webp rendition.
///
/// "//cdn/x.png" → "https://cdn/x.webp" | "/images/a.jpg" → "{origin}/images/a.webp"
pub fn normalize_image_url(raw: &str, origin: &str) -> String {
    let raw = raw.trim();
    let absolute = if raw.starts_with("//") {
        format!("https:{raw}")
    } else if raw.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), raw)
    } else {
        raw.to_string()
    };
    prefer_webp(&absolute)
}

/// Swap a raster extension on the last path segment, leaving every other byte alone.
fn prefer_webp(url: &str) -> String {
    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    let (path, tail) = url.split_at(path_end);

    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    let Some(dot) = path[segment_start..].rfind('.').map(|i| segment_start + i) else {
        return url.to_string();
    };

    let ext = &path[dot + 1..];
    if !RASTER_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
        return url.to_string();
    }

    format!("{}.{PREFERRED_IMAGE_EXT}{tail}", &path[..dot])
}

// ── Info block ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoFields {
    pub air_date: Option<String>,
    pub episode_count: Option<String>,
    pub episode_duration: Option<String>,
}

/// Scan the free-text info block line by line.
///
/// Lines mentioning "eps" feed the episode count and duration; otherwise a
/// "Mon D, YYYY" line is taken whole as the air date. Later lines overwrite
/// earlier matches.
pub fn parse_info(text: &str) -> InfoFields {
    let mut fields = InfoFields::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains("eps") {
            if let Some(c) = RE_EPISODES.captures(line) {
                fields.episode_count = Some(c[1].to_string());
            }
            if let Some(c) = RE_DURATION.captures(line) {
                fields.episode_duration = Some(format!("{} min", &c[1]));
            }
        } else if RE_AIR_DATE.is_match(line) {
            fields.air_date = Some(line.to_string());
        }
    }

    fields
}

// ── Tests ─────────────────────────────────────────────────────────────────────
