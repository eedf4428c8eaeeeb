/// Economic-event severity inferred from the impact icon's class list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Impact {
    High,
    Medium,
    Low,
    Unknown,
}

impl Impact {
    pub fn as_str(&self) -> &str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
            Impact::Unknown => "",
        }
    }
}

/// Keyword families in tie-break order; the first family with any match
/// wins. Matching is by substring over the joined, lowercased class list,
/// so `icon--ff-impact-red` hits "red" and `ff-impact-ora` hits "ora".
const IMPACT_RULES: &[(&[&str], Impact)] = &[
    (&["high", "red"], Impact::High),
    (&["medium", "ora", "orange"], Impact::Medium),
    (&["low", "yel", "yellow"], Impact::Low),
];

/// Map the class tokens of an impact icon to a severity. Anything the rule
/// table does not recognize (holiday markers, bank notices) is `Unknown`.
pub fn normalize_impact<'a, I>(classes: I) -> Impact
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = classes
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    for (keywords, impact) in IMPACT_RULES {
        if keywords.iter().any(|kw| joined.contains(kw)) {
            return *impact;
        }
    }
    Impact::Unknown
}
