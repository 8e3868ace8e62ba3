// Script-based language detection.
//
// Counts characters against ten fixed Unicode block ranges (one per Indic
// script) and picks the dominant script when it covers more than 30% of the
// text. Latin letters, digits, punctuation and emoji count toward the total
// but never toward a script bucket, so mixed or Latin-heavy text falls back
// to the default bucket.
//
// Two call sites render the default bucket differently: the transformer
// route reports "mixed/english", the detect_language route reports
// "english". The detector returns a ScriptBucket so that choice stays
// visible at the call site instead of being baked in here.

/// Share of total characters a script must exceed (strictly) to win.
const SCRIPT_SHARE_THRESHOLD: f64 = 0.3;

/// The ten script ranges, in priority order.
///
/// The first range containing a character gets the hit, and ties for the
/// max break toward the earlier entry, so this order is part of the
/// contract. Hindi and Marathi share the Devanagari block; listed after
/// Hindi, Marathi can never win. Kept for parity with the upstream label
/// set rather than collapsed.
const SCRIPT_RANGES: [(IndicScript, u32, u32); 10] = [
    (IndicScript::Hindi, 0x0900, 0x097F),
    (IndicScript::Bengali, 0x0980, 0x09FF),
    (IndicScript::Tamil, 0x0B80, 0x0BFF),
    (IndicScript::Telugu, 0x0C00, 0x0C7F),
    (IndicScript::Kannada, 0x0C80, 0x0CFF),
    (IndicScript::Malayalam, 0x0D00, 0x0D7F),
    (IndicScript::Gujarati, 0x0A80, 0x0AFF),
    (IndicScript::Punjabi, 0x0A00, 0x0A7F),
    (IndicScript::Oriya, 0x0B00, 0x0B7F),
    (IndicScript::Marathi, 0x0900, 0x097F),
];

/// One of the supported Indic scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicScript {
    Hindi,
    Bengali,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Gujarati,
    Punjabi,
    Oriya,
    Marathi,
}

impl IndicScript {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicScript::Hindi => "hindi",
            IndicScript::Bengali => "bengali",
            IndicScript::Tamil => "tamil",
            IndicScript::Telugu => "telugu",
            IndicScript::Kannada => "kannada",
            IndicScript::Malayalam => "malayalam",
            IndicScript::Gujarati => "gujarati",
            IndicScript::Punjabi => "punjabi",
            IndicScript::Oriya => "oriya",
            IndicScript::Marathi => "marathi",
        }
    }
}

/// Outcome of scanning one text: a dominant script, the default bucket
/// (no script cleared the threshold), or unknown (empty input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptBucket {
    Script(IndicScript),
    Mixed,
    Unknown,
}

/// Coarse routing decision derived from the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageGroup {
    English,
    Indic,
}

impl LanguageGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageGroup::English => "english",
            LanguageGroup::Indic => "indic",
        }
    }
}

impl ScriptBucket {
    /// Render with the transformer route's default-bucket convention.
    pub fn as_mixed_english(&self) -> &'static str {
        match self {
            ScriptBucket::Script(script) => script.as_str(),
            ScriptBucket::Mixed => "mixed/english",
            ScriptBucket::Unknown => "unknown",
        }
    }

    /// Render with the detect_language route's default-bucket convention.
    pub fn as_plain_english(&self) -> &'static str {
        match self {
            ScriptBucket::Script(script) => script.as_str(),
            ScriptBucket::Mixed => "english",
            ScriptBucket::Unknown => "unknown",
        }
    }

    /// Which classifier branch handles this bucket. Anything that isn't a
    /// recognized Indic script falls to the English branch.
    pub fn group(&self) -> LanguageGroup {
        match self {
            ScriptBucket::Script(_) => LanguageGroup::Indic,
            ScriptBucket::Mixed | ScriptBucket::Unknown => LanguageGroup::English,
        }
    }
}

/// Scan a text and return its script bucket.
///
/// Every character increments the total; the first matching script range
/// (in SCRIPT_RANGES order) gets the per-script hit. A script wins only if
/// its hits exceed 30% of the total character count. Pure function, no I/O.
pub fn detect_script(text: &str) -> ScriptBucket {
    let mut counts = [0usize; SCRIPT_RANGES.len()];
    let mut total = 0usize;

    for ch in text.chars() {
        let code = ch as u32;
        total += 1;
        for (i, &(_, start, end)) in SCRIPT_RANGES.iter().enumerate() {
            if (start..=end).contains(&code) {
                counts[i] += 1;
                break;
            }
        }
    }

    if total == 0 {
        return ScriptBucket::Unknown;
    }

    // Strict > keeps the earliest index on ties.
    let mut best_idx = 0;
    for (i, &count) in counts.iter().enumerate().skip(1) {
        if count > counts[best_idx] {
            best_idx = i;
        }
    }

    if counts[best_idx] as f64 / total as f64 > SCRIPT_SHARE_THRESHOLD {
        ScriptBucket::Script(SCRIPT_RANGES[best_idx].0)
    } else {
        ScriptBucket::Mixed
    }
}
