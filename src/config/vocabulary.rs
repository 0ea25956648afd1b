use serde::{Deserialize, Serialize};

/// Institution-specific words that shape event synthesis.
///
/// `key_markers` are short first lines ("экзамен", "защита") that only make
/// sense together with the next line; `special_keywords` mark events that get
/// highlighted in the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default = "default_key_markers")]
    pub key_markers: Vec<String>,
    #[serde(default = "default_special_keywords")]
    pub special_keywords: Vec<String>,
}

fn default_key_markers() -> Vec<String> {
    [
        "начало",
        "защита",
        "защита отчета",
        "защита отчёта",
        "защита отчетов",
        "защита отчётов",
        "защита курсовой",
        "зачет",
        "зачёт",
        "дифзачет",
        "дифзачёт",
        "диф. зачет",
        "диф. зачёт",
        "дифференцированный зачет",
        "дифференцированный зачёт",
        "экзамен",
        "зачет/незачет",
        "зачёт/незачёт",
        "дедлайн",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_special_keywords() -> Vec<String> {
    [
        "дедлайн", "защита", "зачет", "зачёт", "дифзачет", "дифзачёт", "экзамен", "начало",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            key_markers: default_key_markers(),
            special_keywords: default_special_keywords(),
        }
    }
}

impl Vocabulary {
    /// Exact, case-insensitive match of a whole (trimmed) line.
    pub fn is_key_marker(&self, line: &str) -> bool {
        let needle = line.trim().to_lowercase();
        self.key_markers
            .iter()
            .any(|m| m.trim().to_lowercase() == needle)
    }

    /// Case-insensitive substring match against summary or description.
    pub fn is_special(&self, summary: &str, description: &str) -> bool {
        let summary = summary.to_lowercase();
        let description = description.to_lowercase();
        self.special_keywords.iter().any(|k| {
            let k = k.trim().to_lowercase();
            !k.is_empty() && (summary.contains(&k) || description.contains(&k))
        })
    }
}
